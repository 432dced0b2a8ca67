//! Problems, events and alarms.

use zabbix_dna_core::api::{resolve_some, Lookup};
use zabbix_dna_core::protocol::labels::{format_clock, priority_name};
use zabbix_dna_core::protocol::records::{Event, Problem, Trigger};
use zabbix_dna_core::protocol::Params;
use zabbix_dna_core::text::split_list;
use zabbix_dna_core::ZabbixClient;

use crate::cli::{AckArgs, EventsArgs, ProblemArgs, ProblemCommands};
use crate::context::Context;
use crate::error::{ApiError, CliError};
use crate::output::Listing;

use super::trigger::trigger_listing;

/// Message attached when none is given.
pub const DEFAULT_ACK_MESSAGE: &str = "[Zabbix-DNA] Acknowledged via CLI";

/// Run problem command
pub async fn run_problem(args: ProblemArgs, ctx: &Context) -> Result<(), CliError> {
    let client = ctx.connect().await?;

    match args.command {
        ProblemCommands::List(args) => {
            let severities: Vec<u8> = args.severity.iter().map(|s| s.code()).collect();
            let problems: Vec<Problem> = client
                .get("problem.get", Params::problem_list(args.limit, &severities))
                .await?;
            ctx.emit(&problem_listing(&problems));
            Ok(())
        }
        ProblemCommands::Acknowledge(args) => {
            acknowledge(&client, ctx, &args.ids, &args).await
        }
        ProblemCommands::AcknowledgeTrigger(args) => {
            let mut eventids = Vec::new();
            for triggerid in &args.ids {
                let events: Vec<Event> = client
                    .get("event.get", Params::last_event_for_trigger(triggerid))
                    .await?;
                match events.into_iter().next() {
                    Some(event) => eventids.push(event.eventid),
                    None => tracing::warn!(triggerid = %triggerid, "trigger has no problem event"),
                }
            }
            if eventids.is_empty() {
                return Err(ApiError::NotFound {
                    kind: "event for trigger",
                    name: args.ids.join(","),
                }
                .into());
            }
            acknowledge(&client, ctx, &eventids, &args).await
        }
        ProblemCommands::Events(args) => list_events(&client, ctx, args).await,
        ProblemCommands::Alarms(args) => {
            let groupids = match &args.hostgroup {
                Some(names) => Some(resolve_some(&client, Lookup::HostGroup, &split_list(names)).await?),
                None => None,
            };
            let triggers: Vec<Trigger> = client
                .get(
                    "trigger.get",
                    Params::alarms(
                        args.description.as_deref(),
                        args.priority.map(|p| p.code()),
                        groupids.as_deref(),
                        args.unack,
                    ),
                )
                .await?;
            let mut listing = trigger_listing(&triggers);
            listing.kind = "alarms".to_string();
            ctx.emit(&listing);
            Ok(())
        }
    }
}

pub fn problem_listing(problems: &[Problem]) -> Listing {
    Listing::new(
        "problems",
        &["Event ID", "Time", "Severity", "Name", "Acknowledged", "Status"],
        problems,
        |p| {
            vec![
                p.eventid.clone(),
                format_clock(&p.clock),
                priority_name(&p.severity).to_string(),
                p.name.clone(),
                yes_no(&p.acknowledged).to_string(),
                if p.is_resolved() { "Resolved" } else { "Active" }.to_string(),
            ]
        },
    )
}

fn yes_no(flag: &str) -> &'static str {
    if flag == "1" {
        "Yes"
    } else {
        "No"
    }
}

async fn acknowledge(
    client: &ZabbixClient,
    ctx: &Context,
    eventids: &[String],
    args: &AckArgs,
) -> Result<(), CliError> {
    let message = args.message.as_deref().unwrap_or(DEFAULT_ACK_MESSAGE);
    let result = client
        .call("event.acknowledge", Params::acknowledge(eventids, message, args.close))
        .await?;

    let verb = if args.close { "acknowledged and closed" } else { "acknowledged" };
    ctx.report(
        &format!("{} event(s) {}: {}", eventids.len(), verb, eventids.join(", ")),
        &result,
    );
    Ok(())
}

async fn list_events(client: &ZabbixClient, ctx: &Context, args: EventsArgs) -> Result<(), CliError> {
    let triggerids = (!args.trigger_id.is_empty()).then_some(args.trigger_id.as_slice());
    let groupids = match &args.hostgroup {
        Some(names) => Some(resolve_some(client, Lookup::HostGroup, &split_list(names)).await?),
        None => None,
    };
    let hostids = match &args.host {
        Some(names) => Some(resolve_some(client, Lookup::Host, &split_list(names)).await?),
        None => None,
    };

    let events: Vec<Event> = client
        .get(
            "event.get",
            Params::event_list(triggerids, groupids.as_deref(), hostids.as_deref(), args.limit),
        )
        .await?;
    ctx.emit(&event_listing(&events));
    Ok(())
}

pub fn event_listing(events: &[Event]) -> Listing {
    Listing::new(
        "events",
        &["Event ID", "Time", "Severity", "Host", "Name", "Acknowledged"],
        events,
        |e| {
            vec![
                e.eventid.clone(),
                format_clock(&e.clock),
                priority_name(&e.severity).to_string(),
                e.hosts
                    .first()
                    .map(|h| h.display_name().to_string())
                    .unwrap_or_default(),
                e.name.clone(),
                yes_no(&e.acknowledged).to_string(),
            ]
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_rows() {
        let problems = vec![
            Problem {
                eventid: "901".to_string(),
                name: "CPU load is too high".to_string(),
                severity: "4".to_string(),
                clock: "not-a-clock".to_string(),
                acknowledged: "1".to_string(),
                r_eventid: "0".to_string(),
                ..Default::default()
            },
            Problem {
                eventid: "900".to_string(),
                name: "Disk full".to_string(),
                severity: "5".to_string(),
                r_eventid: "950".to_string(),
                ..Default::default()
            },
        ];

        let listing = problem_listing(&problems);
        assert_eq!(
            listing.rows[0],
            vec!["901", "not-a-clock", "High", "CPU load is too high", "Yes", "Active"]
        );
        assert_eq!(listing.rows[1][5], "Resolved");
        assert_eq!(listing.rows[1][2], "Disaster");
    }
}
