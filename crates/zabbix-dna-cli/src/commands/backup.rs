//! Full configuration backup.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde_json::{json, Value};
use tracing::warn;
use zabbix_dna_core::protocol::Params;
use zabbix_dna_core::ZabbixClient;

use crate::cli::BackupArgs;
use crate::context::Context;
use crate::error::CliError;

use super::export::{parse_export, write_file};

/// Run backup command
pub async fn run_backup(args: BackupArgs, ctx: &Context) -> Result<(), CliError> {
    let client = ctx.connect().await?;

    let document = match full_export(&client).await {
        Ok(document) => document,
        Err(e) => {
            warn!("configuration.export failed, falling back to basic objects: {}", e);
            basic_objects(&client).await?
        }
    };

    let path = backup_path(&args.output_dir, Local::now());
    let content = serde_json::to_string_pretty(&document)
        .map_err(|e| CliError::Other(format!("Failed to encode backup: {}", e)))?;
    write_file(&path, &content).await?;

    ctx.message(&format!("Backup written to {}", path.display()));
    Ok(())
}

/// `zabbix_backup_YYYYMMDD_HHMMSS.json` inside `dir`.
pub fn backup_path(dir: &Path, now: DateTime<Local>) -> PathBuf {
    dir.join(format!("zabbix_backup_{}.json", now.format("%Y%m%d_%H%M%S")))
}

async fn collect_ids(client: &ZabbixClient, method: &str, id_field: &str) -> Result<Vec<String>, CliError> {
    let rows: Vec<Value> = client.get(method, Params::ids_only(id_field)).await?;
    Ok(rows
        .iter()
        .filter_map(|row| row.get(id_field).and_then(Value::as_str))
        .map(str::to_string)
        .collect())
}

async fn full_export(client: &ZabbixClient) -> Result<Value, CliError> {
    let host_groups = collect_ids(client, "hostgroup.get", "groupid").await?;
    let hosts = collect_ids(client, "host.get", "hostid").await?;
    let template_groups = collect_ids(client, "templategroup.get", "groupid").await?;
    let templates = collect_ids(client, "template.get", "templateid").await?;
    let media_types = collect_ids(client, "mediatype.get", "mediatypeid").await?;

    let result = client
        .call(
            "configuration.export",
            Params::export_all(&host_groups, &hosts, &template_groups, &templates, &media_types),
        )
        .await?;
    parse_export(&result)
}

async fn basic_objects(client: &ZabbixClient) -> Result<Value, CliError> {
    let hostgroups: Vec<Value> = client.get("hostgroup.get", Params::extend()).await?;
    let hosts: Vec<Value> = client.get("host.get", Params::extend()).await?;
    let templates: Vec<Value> = client.get("template.get", Params::extend()).await?;

    Ok(json!({
        "hostgroups": hostgroups,
        "hosts": hosts,
        "templates": templates
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_backup_file_name() {
        let now = Local.with_ymd_and_hms(2024, 10, 16, 9, 5, 7).unwrap();
        let path = backup_path(Path::new("/tmp/backups"), now);
        assert_eq!(path, PathBuf::from("/tmp/backups/zabbix_backup_20241016_090507.json"));
    }
}
