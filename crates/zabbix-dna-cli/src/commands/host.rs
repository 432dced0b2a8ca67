//! Host commands.

use zabbix_dna_core::api::{resolve_id, resolve_ids, Lookup};
use zabbix_dna_core::protocol::labels::{
    availability_name, host_status_name, interface_type_name, maintenance_status_name,
};
use zabbix_dna_core::protocol::records::Host;
use zabbix_dna_core::protocol::response::first_id;
use zabbix_dna_core::protocol::Params;
use zabbix_dna_core::ZabbixClient;

use crate::cli::{HostArgs, HostCloneArgs, HostCommands, HostCreateArgs, HostUpdateArgs};
use crate::context::Context;
use crate::error::{ApiError, CliError};
use crate::output::Listing;

/// Run host command
pub async fn run_host(args: HostArgs, ctx: &Context) -> Result<(), CliError> {
    let client = ctx.connect().await?;

    match args.command {
        HostCommands::List(args) => {
            let hosts: Vec<Host> = client
                .get("host.get", Params::host_list(args.limit, args.search.as_deref()))
                .await?;
            ctx.emit(&host_listing(&hosts));
            Ok(())
        }
        HostCommands::Show(args) => {
            let host = fetch_host(&client, &args.name).await?;
            ctx.emit(&host_details(&host));
            Ok(())
        }
        HostCommands::Create(args) => create_host(&client, ctx, args).await,
        HostCommands::Update(args) => update_host(&client, ctx, args).await,
        HostCommands::Delete(args) => {
            let hostid = resolve_id(&client, Lookup::Host, &args.name).await?;
            let result = client.call("host.delete", Params::ids(&[hostid.clone()])).await?;
            ctx.report(&format!("Host '{}' deleted (hostid {})", args.name, hostid), &result);
            Ok(())
        }
        HostCommands::Clone(args) => clone_host(&client, ctx, args).await,
        HostCommands::Enable(args) => set_status(&client, ctx, &args.name, 0).await,
        HostCommands::Disable(args) => set_status(&client, ctx, &args.name, 1).await,
    }
}

pub fn host_listing(hosts: &[Host]) -> Listing {
    Listing::new(
        "hosts",
        &["ID", "Host", "Name", "Status", "Maintenance", "Availability", "IP"],
        hosts,
        |h| {
            vec![
                h.hostid.clone(),
                h.host.clone(),
                h.name.clone(),
                host_status_name(&h.status).to_string(),
                maintenance_status_name(&h.maintenance_status).to_string(),
                availability_name(h.availability()).to_string(),
                h.interfaces.first().map(|i| i.ip.clone()).unwrap_or_default(),
            ]
        },
    )
}

fn host_details(host: &Host) -> Listing {
    let groups: Vec<&str> = host.groups.iter().map(|g| g.name.as_str()).collect();
    let templates: Vec<&str> = host.templates.iter().map(|t| t.host.as_str()).collect();
    let interfaces: Vec<String> = host
        .interfaces
        .iter()
        .map(|i| {
            let address = if i.useip == "0" { &i.dns } else { &i.ip };
            format!("{} {}:{}", interface_type_name(&i.kind), address, i.port)
        })
        .collect();

    Listing::details(
        "host",
        host,
        vec![
            ("ID", host.hostid.clone()),
            ("Host", host.host.clone()),
            ("Name", host.name.clone()),
            ("Status", host_status_name(&host.status).to_string()),
            ("Maintenance", maintenance_status_name(&host.maintenance_status).to_string()),
            ("Availability", availability_name(host.availability()).to_string()),
            ("Groups", groups.join(", ")),
            ("Templates", templates.join(", ")),
            ("Interfaces", interfaces.join("\n")),
        ],
    )
}

/// Full host record by technical name.
pub async fn fetch_host(client: &ZabbixClient, name: &str) -> Result<Host, CliError> {
    let hosts: Vec<Host> = client.get("host.get", Params::host_show(name)).await?;
    hosts.into_iter().next().ok_or_else(|| {
        ApiError::NotFound {
            kind: "host",
            name: name.to_string(),
        }
        .into()
    })
}

async fn create_host(client: &ZabbixClient, ctx: &Context, args: HostCreateArgs) -> Result<(), CliError> {
    let defaults = &ctx.config.app.commands.create_host;

    let mut groupids = args.groupid.clone();
    groupids.extend(resolve_ids(client, Lookup::HostGroup, &args.hostgroup).await?);
    if groupids.is_empty() && args.hostgroup.is_empty() {
        groupids = resolve_ids(client, Lookup::HostGroup, &defaults.hostgroups).await?;
    }
    if groupids.is_empty() {
        return Err(CliError::InvalidArgument(
            "at least one host group is required (--groupid, --hostgroup or [app.commands.create_host] hostgroups)"
                .to_string(),
        ));
    }

    let interface_ip = (defaults.create_interface && !args.no_interface).then_some(args.ip.as_str());

    let result = client
        .call("host.create", Params::host_create(&args.name, &groupids, interface_ip))
        .await?;
    let hostid = first_id(&result, "hostids")?;
    ctx.report(&format!("Host '{}' created (hostid {})", args.name, hostid), &result);
    Ok(())
}

async fn update_host(client: &ZabbixClient, ctx: &Context, args: HostUpdateArgs) -> Result<(), CliError> {
    if args.status.is_none() && args.visible_name.is_none() {
        return Err(CliError::InvalidArgument(
            "nothing to update (use --status and/or --name)".to_string(),
        ));
    }

    let hostid = resolve_id(client, Lookup::Host, &args.name).await?;
    let result = client
        .call(
            "host.update",
            Params::host_update(
                &hostid,
                args.status.map(|s| s.code()),
                args.visible_name.as_deref(),
            ),
        )
        .await?;
    ctx.report(&format!("Host '{}' updated", args.name), &result);
    Ok(())
}

async fn clone_host(client: &ZabbixClient, ctx: &Context, args: HostCloneArgs) -> Result<(), CliError> {
    let source = fetch_host(client, &args.name).await?;
    let result = client
        .call("host.create", Params::host_clone(&source, &args.new_name))
        .await?;
    let hostid = first_id(&result, "hostids")?;
    ctx.report(
        &format!("Host '{}' cloned to '{}' (hostid {})", args.name, args.new_name, hostid),
        &result,
    );
    Ok(())
}

async fn set_status(client: &ZabbixClient, ctx: &Context, name: &str, status: u8) -> Result<(), CliError> {
    let hostid = resolve_id(client, Lookup::Host, name).await?;
    let result = client
        .call("host.update", Params::host_update(&hostid, Some(status), None))
        .await?;
    let verb = if status == 0 { "enabled" } else { "disabled" };
    ctx.report(&format!("Host '{}' {}", name, verb), &result);
    Ok(())
}
