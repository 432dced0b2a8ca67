//! `version`: CLI version and, when configured, the server's API version.

use tracing::debug;
use zabbix_dna_core::config::Config;
use zabbix_dna_core::ZabbixClient;

use crate::context::{Context, Globals};
use crate::error::CliError;

/// Run version command
///
/// Works without a config file; the API version is only shown when the
/// server answers.
pub async fn run_version(globals: &Globals) -> Result<(), CliError> {
    println!("zabbix-dna {}", env!("CARGO_PKG_VERSION"));

    let Ok(ctx) = Context::load(globals) else {
        return Ok(());
    };

    match api_version(&ctx.config).await {
        Ok(version) => println!("Zabbix API {} ({})", version, ctx.config.api.url),
        Err(e) => debug!("API version unavailable: {}", e),
    }
    Ok(())
}

async fn api_version(config: &Config) -> Result<String, CliError> {
    config.validate()?;
    let client = ZabbixClient::new(&config.api.url, &config.api.client_options())?;
    Ok(client.version().await?)
}
