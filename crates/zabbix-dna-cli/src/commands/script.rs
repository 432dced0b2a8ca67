//! Global script commands.

use zabbix_dna_core::api::{resolve_id, Lookup};
use zabbix_dna_core::protocol::records::{Script, ScriptResult};
use zabbix_dna_core::protocol::response::decode_object;
use zabbix_dna_core::protocol::Params;

use crate::cli::{ScriptArgs, ScriptCommands};
use crate::context::Context;
use crate::error::CliError;
use crate::output::Listing;

/// Run script command
pub async fn run_script(args: ScriptArgs, ctx: &Context) -> Result<(), CliError> {
    let client = ctx.connect().await?;

    match args.command {
        ScriptCommands::List => {
            let scripts: Vec<Script> = client.get("script.get", Params::script_list()).await?;
            ctx.emit(&Listing::new("scripts", &["ID", "Name", "Command"], &scripts, |s| {
                vec![s.scriptid.clone(), s.name.clone(), s.command.clone()]
            }));
            Ok(())
        }
        ScriptCommands::Execute(args) => {
            let hostid = match (args.hostid, &args.host) {
                (Some(id), _) => id,
                (None, Some(host)) => resolve_id(&client, Lookup::Host, host).await?,
                (None, None) => {
                    return Err(CliError::InvalidArgument("--host or --hostid is required".to_string()))
                }
            };

            let result = client
                .call("script.execute", Params::script_execute(&args.scriptid, &hostid))
                .await?;
            let output: ScriptResult = decode_object(result.clone())?;

            let message = if output.value.is_empty() {
                format!("Script {} finished ({})", args.scriptid, output.response)
            } else {
                format!(
                    "Script {} finished ({}):\n{}",
                    args.scriptid, output.response, output.value
                )
            };
            ctx.report(&message, &result);
            Ok(())
        }
    }
}
