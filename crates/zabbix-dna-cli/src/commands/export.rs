//! Configuration export of single hosts and templates.

use std::path::Path;

use serde_json::Value;
use zabbix_dna_core::api::{resolve_id, Lookup};
use zabbix_dna_core::protocol::response::as_string;
use zabbix_dna_core::protocol::Params;

use crate::cli::{ExportArgs, ExportCommands, ExportTargetArgs};
use crate::context::Context;
use crate::error::{ApiError, CliError};

/// Run export command
pub async fn run_export(args: ExportArgs, ctx: &Context) -> Result<(), CliError> {
    let client = ctx.connect().await?;

    let (lookup, option, target) = match args.command {
        ExportCommands::Host(target) => (Lookup::Host, "hosts", target),
        ExportCommands::Template(target) => (Lookup::Template, "templates", target),
    };

    let id = resolve_id(&client, lookup, &target.name).await?;
    let result = client
        .call("configuration.export", Params::export(option, &[id]))
        .await?;
    let document = parse_export(&result)?;

    write_or_print(ctx, &target, &document).await
}

/// configuration.export returns the document as a JSON string.
pub fn parse_export(result: &Value) -> Result<Value, CliError> {
    let text = as_string(result)?;
    serde_json::from_str(&text)
        .map_err(|e| ApiError::InvalidResponse(format!("export is not valid JSON: {}", e)).into())
}

async fn write_or_print(ctx: &Context, target: &ExportTargetArgs, document: &Value) -> Result<(), CliError> {
    let pretty = serde_json::to_string_pretty(document)
        .map_err(|e| CliError::Other(format!("Failed to encode export: {}", e)))?;

    match &target.output {
        Some(path) => {
            write_file(path, &pretty).await?;
            ctx.message(&format!("Exported '{}' to {}", target.name, path.display()));
        }
        None => println!("{}", pretty),
    }
    Ok(())
}

pub async fn write_file(path: &Path, content: &str) -> Result<(), CliError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, content).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_export_string() {
        let result = json!("{\"zabbix_export\":{\"version\":\"7.0\",\"hosts\":[{\"host\":\"web01\"}]}}");
        let doc = parse_export(&result).unwrap();
        assert_eq!(doc["zabbix_export"]["hosts"][0]["host"], "web01");
    }

    #[test]
    fn test_parse_export_rejects_garbage() {
        assert!(parse_export(&json!("<xml/>")).is_err());
        assert!(parse_export(&json!({"not": "a string"})).is_err());
    }
}
