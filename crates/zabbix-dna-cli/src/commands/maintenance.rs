//! Maintenance period commands.

use std::time::Duration;

use chrono::{Local, NaiveDateTime, TimeZone};
use zabbix_dna_core::api::{resolve_id, resolve_ids, Lookup};
use zabbix_dna_core::observability::parse_interval;
use zabbix_dna_core::protocol::labels::{format_clock, maintenance_type_name};
use zabbix_dna_core::protocol::records::Maintenance;
use zabbix_dna_core::protocol::response::first_id;
use zabbix_dna_core::protocol::Params;
use zabbix_dna_core::ZabbixClient;

use crate::cli::{MaintenanceArgs, MaintenanceCommands, MaintenanceCreateArgs};
use crate::context::Context;
use crate::error::CliError;
use crate::output::Listing;

/// Run maintenance command
pub async fn run_maintenance(args: MaintenanceArgs, ctx: &Context) -> Result<(), CliError> {
    let client = ctx.connect().await?;

    match args.command {
        MaintenanceCommands::List => {
            let periods: Vec<Maintenance> = client
                .get("maintenance.get", Params::maintenance_list())
                .await?;
            ctx.emit(&Listing::new(
                "maintenance periods",
                &["ID", "Name", "Type", "Active since", "Active till", "Description"],
                &periods,
                |m| {
                    vec![
                        m.maintenanceid.clone(),
                        m.name.clone(),
                        maintenance_type_name(&m.maintenance_type).to_string(),
                        format_clock(&m.active_since),
                        format_clock(&m.active_till),
                        m.description.clone(),
                    ]
                },
            ));
            Ok(())
        }
        MaintenanceCommands::Create(args) => create_maintenance(&client, ctx, args).await,
        MaintenanceCommands::Delete(args) => {
            let id = resolve_id(&client, Lookup::Maintenance, &args.name).await?;
            let result = client.call("maintenance.delete", Params::ids(&[id])).await?;
            ctx.report(&format!("Maintenance '{}' deleted", args.name), &result);
            Ok(())
        }
        MaintenanceCommands::Remove(args) => {
            let result = client.call("maintenance.delete", Params::ids(&args.ids)).await?;
            ctx.report(
                &format!("Deleted maintenance period(s) {}", args.ids.join(", ")),
                &result,
            );
            Ok(())
        }
    }
}

async fn create_maintenance(
    client: &ZabbixClient,
    ctx: &Context,
    args: MaintenanceCreateArgs,
) -> Result<(), CliError> {
    let period = parse_interval(&args.period)?;
    let since = match &args.since {
        Some(value) => parse_time(value)?,
        None => Local::now().timestamp(),
    };
    let till = match &args.till {
        Some(value) => parse_time(value)?,
        None => window_end(since, period)?,
    };
    if till <= since {
        return Err(CliError::InvalidArgument(
            "--till must be later than --since".to_string(),
        ));
    }

    let hostids = resolve_ids(client, Lookup::Host, &args.host).await?;
    let groupids = resolve_ids(client, Lookup::HostGroup, &args.hostgroup).await?;
    if hostids.is_empty() && groupids.is_empty() {
        return Err(CliError::InvalidArgument(
            "at least one existing --host or --hostgroup is required".to_string(),
        ));
    }

    let result = client
        .call(
            "maintenance.create",
            Params::maintenance_create(
                &args.name,
                &hostids,
                &groupids,
                since,
                till,
                period.as_secs(),
                args.description.as_deref(),
            ),
        )
        .await?;
    let id = first_id(&result, "maintenanceids")?;
    ctx.report(
        &format!("Maintenance '{}' created (maintenanceid {})", args.name, id),
        &result,
    );
    Ok(())
}

/// End of a window of length `period` starting at `since`.
pub fn window_end(since: i64, period: Duration) -> Result<i64, CliError> {
    i64::try_from(period.as_secs())
        .ok()
        .and_then(|secs| since.checked_add(secs))
        .ok_or_else(|| CliError::InvalidArgument(format!("--period {:?} is too long", period)))
}

/// Unix seconds from `YYYY-MM-DD HH:MM[:SS]` local time or a plain number.
pub fn parse_time(value: &str) -> Result<i64, CliError> {
    let value = value.trim();
    if let Ok(secs) = value.parse::<i64>() {
        return Ok(secs);
    }

    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .and_then(|naive| Local.from_local_datetime(&naive).single())
        .map(|t| t.timestamp())
        .ok_or_else(|| {
            CliError::InvalidArgument(format!(
                "invalid time '{}' (expected \"YYYY-MM-DD HH:MM\" or Unix seconds)",
                value
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_forms() {
        assert_eq!(parse_time("1700000000").unwrap(), 1_700_000_000);

        let minutes = parse_time("2024-10-16 12:30").unwrap();
        let seconds = parse_time("2024-10-16 12:30:15").unwrap();
        assert_eq!(seconds - minutes, 15);

        assert!(parse_time("next tuesday").is_err());
    }

    #[test]
    fn test_window_end() {
        assert_eq!(
            window_end(1_700_000_000, Duration::from_secs(3600)).unwrap(),
            1_700_003_600
        );
        assert!(matches!(
            window_end(1_700_000_000, Duration::from_secs(u64::MAX)),
            Err(CliError::InvalidArgument(_))
        ));
        assert!(window_end(i64::MAX - 10, Duration::from_secs(60)).is_err());
    }
}
