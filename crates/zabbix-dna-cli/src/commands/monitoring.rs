//! Per-host monitoring views.

use zabbix_dna_core::api::{resolve_id, Lookup};
use zabbix_dna_core::protocol::records::{Event, Graph, Item, Trigger};
use zabbix_dna_core::protocol::Params;

use crate::cli::{MonitoringArgs, MonitoringCommands};
use crate::context::Context;
use crate::error::CliError;
use crate::output::Listing;

use super::item::item_listing;
use super::problem::event_listing;
use super::trigger::trigger_listing;

/// Run monitoring command
pub async fn run_monitoring(args: MonitoringArgs, ctx: &Context) -> Result<(), CliError> {
    let client = ctx.connect().await?;

    match args.command {
        MonitoringCommands::Items(args) => {
            let hostid = resolve_id(&client, Lookup::Host, &args.host).await?;
            let items: Vec<Item> = client.get("item.get", Params::host_items(&hostid)).await?;
            ctx.emit(&item_listing(&items));
        }
        MonitoringCommands::Item(args) => {
            let items: Vec<Item> = client.get("item.get", Params::item_search(&args.name)).await?;
            ctx.emit(&item_listing(&items));
        }
        MonitoringCommands::LastValues(args) => {
            let hostid = resolve_id(&client, Lookup::Host, &args.host).await?;
            let items: Vec<Item> = client
                .get("item.get", Params::host_last_values(&hostid))
                .await?;
            ctx.emit(&Listing::new(
                "values",
                &["Name", "Key", "Last value", "Units"],
                &items,
                |i| vec![i.name.clone(), i.key_.clone(), i.lastvalue.clone(), i.units.clone()],
            ));
        }
        MonitoringCommands::Triggers(args) => {
            let hostid = resolve_id(&client, Lookup::Host, &args.host).await?;
            let triggers: Vec<Trigger> = client
                .get("trigger.get", Params::host_triggers(&hostid))
                .await?;
            ctx.emit(&trigger_listing(&triggers));
        }
        MonitoringCommands::Events(args) => {
            let hostid = resolve_id(&client, Lookup::Host, &args.host).await?;
            let events: Vec<Event> = client
                .get(
                    "event.get",
                    Params::event_list(None, None, Some(std::slice::from_ref(&hostid)), args.limit),
                )
                .await?;
            ctx.emit(&event_listing(&events));
        }
        MonitoringCommands::Graphs(args) => {
            let hostid = resolve_id(&client, Lookup::Host, &args.host).await?;
            let graphs: Vec<Graph> = client.get("graph.get", Params::host_graphs(&hostid)).await?;
            ctx.emit(&Listing::new("graphs", &["ID", "Name", "Size"], &graphs, |g| {
                vec![
                    g.graphid.clone(),
                    g.name.clone(),
                    format!("{}x{}", g.width, g.height),
                ]
            }));
        }
    }

    Ok(())
}
