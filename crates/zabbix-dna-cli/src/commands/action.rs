//! Action commands.

use zabbix_dna_core::protocol::labels::{enabled_name, event_source_name};
use zabbix_dna_core::protocol::records::Action;
use zabbix_dna_core::protocol::Params;

use crate::cli::{ActionArgs, ActionCommands};
use crate::context::Context;
use crate::error::CliError;
use crate::output::Listing;

/// Run action command
pub async fn run_action(args: ActionArgs, ctx: &Context) -> Result<(), CliError> {
    let client = ctx.connect().await?;

    match args.command {
        ActionCommands::List => {
            let actions: Vec<Action> = client.get("action.get", Params::action_list()).await?;
            ctx.emit(&Listing::new("actions", &["ID", "Name", "Event source", "Status"], &actions, |a| {
                vec![
                    a.actionid.clone(),
                    a.name.clone(),
                    event_source_name(&a.eventsource).to_string(),
                    enabled_name(&a.status).to_string(),
                ]
            }));
            Ok(())
        }
    }
}
