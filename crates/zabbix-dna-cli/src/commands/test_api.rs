//! `test-api`: check connectivity and credentials.

use serde_json::json;
use zabbix_dna_core::protocol::records::Host;
use zabbix_dna_core::protocol::Params;

use crate::context::Context;
use crate::error::CliError;

/// Run test-api command
pub async fn run_test_api(ctx: &Context) -> Result<(), CliError> {
    let client = ctx.connect().await?;
    let version = client.version().await?;

    // host.get needs a valid session; apiinfo.version does not
    let hosts: Vec<Host> = client.get("host.get", Params::host_list(1, None)).await?;

    ctx.report(
        &format!("Connected to {} (API {})", client.url(), version),
        &json!({
            "url": client.url(),
            "version": version,
            "authenticated": true,
            "hosts_visible": !hosts.is_empty()
        }),
    );
    Ok(())
}
