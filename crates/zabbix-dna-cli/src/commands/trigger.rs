//! Trigger commands.

use zabbix_dna_core::api::{resolve_id, Lookup};
use zabbix_dna_core::protocol::labels::{enabled_name, format_clock, priority_name, trigger_value_name};
use zabbix_dna_core::protocol::records::Trigger;
use zabbix_dna_core::protocol::response::first_id;
use zabbix_dna_core::protocol::Params;

use crate::cli::{TriggerArgs, TriggerCommands};
use crate::context::Context;
use crate::error::CliError;
use crate::output::Listing;

/// Run trigger command
pub async fn run_trigger(args: TriggerArgs, ctx: &Context) -> Result<(), CliError> {
    let client = ctx.connect().await?;

    match args.command {
        TriggerCommands::List(args) => {
            let hostids = match &args.host {
                Some(host) => Some(vec![resolve_id(&client, Lookup::Host, host).await?]),
                None => None,
            };
            let triggers: Vec<Trigger> = client
                .get("trigger.get", Params::trigger_list(hostids.as_deref(), args.limit))
                .await?;
            ctx.emit(&trigger_listing(&triggers));
            Ok(())
        }
        TriggerCommands::Create(args) => {
            let result = client
                .call(
                    "trigger.create",
                    Params::trigger_create(&args.description, &args.expression, args.priority.code()),
                )
                .await?;
            let triggerid = first_id(&result, "triggerids")?;
            ctx.report(
                &format!("Trigger '{}' created (triggerid {})", args.description, triggerid),
                &result,
            );
            Ok(())
        }
    }
}

pub fn trigger_listing(triggers: &[Trigger]) -> Listing {
    Listing::new(
        "triggers",
        &["ID", "Host", "Description", "Priority", "Value", "Status", "Last change"],
        triggers,
        |t| {
            vec![
                t.triggerid.clone(),
                t.hosts
                    .first()
                    .map(|h| h.display_name().to_string())
                    .unwrap_or_default(),
                t.description.clone(),
                priority_name(&t.priority).to_string(),
                trigger_value_name(&t.value).to_string(),
                if t.status.is_empty() {
                    String::new()
                } else {
                    enabled_name(&t.status).to_string()
                },
                format_clock(&t.lastchange),
            ]
        },
    )
}
