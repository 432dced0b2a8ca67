//! Proxy commands.

use zabbix_dna_core::protocol::labels::{proxy_compatibility_name, proxy_mode_name};
use zabbix_dna_core::protocol::records::Proxy;
use zabbix_dna_core::protocol::Params;

use crate::cli::{ProxyArgs, ProxyCommands};
use crate::context::Context;
use crate::error::CliError;
use crate::output::Listing;

/// Run proxy command
pub async fn run_proxy(args: ProxyArgs, ctx: &Context) -> Result<(), CliError> {
    let client = ctx.connect().await?;

    match args.command {
        ProxyCommands::List => {
            let proxies: Vec<Proxy> = client.get("proxy.get", Params::proxy_list()).await?;
            ctx.emit(&Listing::new(
                "proxies",
                &["ID", "Name", "Mode", "Address", "Version", "Compatibility"],
                &proxies,
                |p| {
                    vec![
                        p.proxyid.clone(),
                        p.name.clone(),
                        proxy_mode_name(&p.operating_mode).to_string(),
                        p.address.clone(),
                        p.version.clone(),
                        proxy_compatibility_name(&p.compatibility).to_string(),
                    ]
                },
            ));
            Ok(())
        }
    }
}
