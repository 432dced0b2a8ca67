//! Host interface commands.

use zabbix_dna_core::api::{resolve_id, Lookup};
use zabbix_dna_core::protocol::labels::{availability_name, interface_type_name};
use zabbix_dna_core::protocol::records::HostInterface;
use zabbix_dna_core::protocol::Params;

use crate::cli::{HostinterfaceArgs, HostinterfaceCommands};
use crate::context::Context;
use crate::error::CliError;
use crate::output::Listing;

/// Run hostinterface command
pub async fn run_hostinterface(args: HostinterfaceArgs, ctx: &Context) -> Result<(), CliError> {
    let client = ctx.connect().await?;

    match args.command {
        HostinterfaceCommands::List(args) => {
            let hostid = match &args.host {
                Some(host) => Some(resolve_id(&client, Lookup::Host, host).await?),
                None => None,
            };
            let interfaces: Vec<HostInterface> = client
                .get(
                    "hostinterface.get",
                    Params::hostinterface_list(hostid.as_ref().map(std::slice::from_ref)),
                )
                .await?;

            ctx.emit(&Listing::new(
                "interfaces",
                &["ID", "Host ID", "Type", "IP", "DNS", "Port", "Main", "Availability"],
                &interfaces,
                |i| {
                    vec![
                        i.interfaceid.clone(),
                        i.hostid.clone(),
                        interface_type_name(&i.kind).to_string(),
                        i.ip.clone(),
                        i.dns.clone(),
                        i.port.clone(),
                        if i.main == "1" { "Yes" } else { "No" }.to_string(),
                        availability_name(&i.available).to_string(),
                    ]
                },
            ));
            Ok(())
        }
    }
}
