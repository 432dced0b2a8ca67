//! Item commands.

use zabbix_dna_core::api::{resolve_id, Lookup};
use zabbix_dna_core::protocol::records::{HostInterface, Item};
use zabbix_dna_core::protocol::response::first_id;
use zabbix_dna_core::protocol::Params;
use zabbix_dna_core::ZabbixClient;

use crate::cli::{ItemArgs, ItemCommands, ItemCreateArgs};
use crate::context::Context;
use crate::error::CliError;
use crate::output::Listing;

/// Zabbix agent (passive) item type
const ITEM_TYPE_AGENT: u32 = 0;

/// Run item command
pub async fn run_item(args: ItemArgs, ctx: &Context) -> Result<(), CliError> {
    let client = ctx.connect().await?;

    match args.command {
        ItemCommands::List(args) => {
            let hostids = match &args.host {
                Some(host) => Some(vec![resolve_id(&client, Lookup::Host, host).await?]),
                None => None,
            };
            let items: Vec<Item> = client
                .get("item.get", Params::item_list(hostids.as_deref(), args.limit))
                .await?;
            ctx.emit(&item_listing(&items));
            Ok(())
        }
        ItemCommands::Create(args) => create_item(&client, ctx, args).await,
    }
}

pub fn item_listing(items: &[Item]) -> Listing {
    Listing::new(
        "items",
        &["ID", "Host", "Name", "Key", "Last value", "Units"],
        items,
        |i| {
            vec![
                i.itemid.clone(),
                i.host_label().to_string(),
                i.name.clone(),
                i.key_.clone(),
                i.lastvalue.clone(),
                i.units.clone(),
            ]
        },
    )
}

async fn create_item(client: &ZabbixClient, ctx: &Context, args: ItemCreateArgs) -> Result<(), CliError> {
    let hostid = resolve_id(client, Lookup::Host, &args.host).await?;

    let interfaceid = match args.interfaceid {
        Some(id) => Some(id),
        None if args.item_type == ITEM_TYPE_AGENT => {
            let interfaces: Vec<HostInterface> = client
                .get(
                    "hostinterface.get",
                    Params::hostinterface_list(Some(std::slice::from_ref(&hostid))),
                )
                .await?;
            let id = main_agent_interface(&interfaces).ok_or_else(|| {
                CliError::InvalidArgument(format!(
                    "host '{}' has no agent interface; pass --interfaceid",
                    args.host
                ))
            })?;
            Some(id)
        }
        None => None,
    };

    let result = client
        .call(
            "item.create",
            Params::item_create(
                &args.name,
                &args.key,
                &hostid,
                args.item_type,
                args.value_type,
                interfaceid.as_deref(),
                &args.delay,
                args.units.as_deref(),
            ),
        )
        .await?;
    let itemid = first_id(&result, "itemids")?;
    ctx.report(&format!("Item '{}' created (itemid {})", args.name, itemid), &result);
    Ok(())
}

/// Main agent interface, or any agent interface.
fn main_agent_interface(interfaces: &[HostInterface]) -> Option<String> {
    let agents: Vec<&HostInterface> = interfaces.iter().filter(|i| i.kind == "1").collect();
    agents
        .iter()
        .find(|i| i.main == "1")
        .or_else(|| agents.first())
        .map(|i| i.interfaceid.clone())
}
