//! Conversion of Zabbix rows into telemetry.
//!
//! Items become gauge samples, problems become spans. Both conversions are
//! pure so one bad row never affects the rest of a tick.

use opentelemetry::KeyValue;

use crate::protocol::records::{Item, Problem};

/// One observation for an item gauge.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSample {
    /// Instrument name derived from the item key
    pub metric: String,
    pub key: String,
    pub name: String,
    pub units: String,
    pub value: f64,
    pub attributes: Vec<KeyValue>,
}

/// Why an item produced no sample.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    EmptyValue,
    NotNumeric(String),
}

/// A problem ready to be emitted as a span.
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemSpan {
    pub name: String,
    pub resolved: bool,
    pub attributes: Vec<KeyValue>,
}

/// Turn an item key such as `system.cpu.load[percpu,avg1]` into a valid
/// instrument name (`system.cpu.load_percpu_avg1`).
pub fn metric_name(key: &str) -> String {
    let mut name = String::with_capacity(key.len());
    for c in key.chars() {
        let c = if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-' | '/') {
            c
        } else {
            '_'
        };
        if c == '_' && name.ends_with('_') {
            continue;
        }
        name.push(c);
    }

    let mut name = name.trim_matches('_').to_string();
    if !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
        name = format!("zabbix_{}", name);
    }
    name.truncate(255);
    name
}

/// Build a gauge sample from an item's last value.
pub fn item_sample(item: &Item) -> Result<ItemSample, SkipReason> {
    let raw = item.lastvalue.trim();
    if raw.is_empty() {
        return Err(SkipReason::EmptyValue);
    }

    let value: f64 = raw
        .parse()
        .map_err(|_| SkipReason::NotNumeric(raw.to_string()))?;

    Ok(ItemSample {
        metric: metric_name(&item.key_),
        key: item.key_.clone(),
        name: item.name.clone(),
        units: item.units.clone(),
        value,
        attributes: vec![
            KeyValue::new("zabbix.itemid", item.itemid.clone()),
            KeyValue::new("zabbix.hostid", item.hostid.clone()),
            KeyValue::new("zabbix.host", item.host_label().to_string()),
            KeyValue::new("zabbix.key", item.key_.clone()),
        ],
    })
}

/// Samples for every usable item, plus how many were skipped.
pub fn collect_samples(items: &[Item]) -> (Vec<ItemSample>, usize) {
    let mut samples = Vec::with_capacity(items.len());
    let mut skipped = 0;

    for item in items {
        match item_sample(item) {
            Ok(sample) => samples.push(sample),
            Err(reason) => {
                tracing::debug!(itemid = %item.itemid, key = %item.key_, ?reason, "item skipped");
                skipped += 1;
            }
        }
    }

    (samples, skipped)
}

pub fn problem_span(problem: &Problem) -> ProblemSpan {
    let resolved = problem.is_resolved();

    let mut attributes = vec![
        KeyValue::new("zabbix.eventid", problem.eventid.clone()),
        KeyValue::new("zabbix.objectid", problem.objectid.clone()),
        KeyValue::new("zabbix.severity", problem.severity.clone()),
        KeyValue::new("zabbix.clock", problem.clock.clone()),
        KeyValue::new("zabbix.resolved", resolved),
    ];

    if resolved {
        attributes.push(KeyValue::new("zabbix.r_eventid", problem.r_eventid.clone()));
    }

    if problem.severity == "0" {
        attributes.push(KeyValue::new("zabbix.problem_type", "not_classified"));
    }

    for tag in &problem.tags {
        attributes.push(KeyValue::new(
            format!("zabbix.tag.{}", tag.tag),
            tag.value.clone(),
        ));
    }

    ProblemSpan {
        name: problem.name.clone(),
        resolved,
        attributes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::records::{HostRef, Tag};

    fn attr(attrs: &[KeyValue], key: &str) -> Option<String> {
        attrs
            .iter()
            .find(|kv| kv.key.as_str() == key)
            .map(|kv| kv.value.to_string())
    }

    fn item(key: &str, lastvalue: &str) -> Item {
        Item {
            itemid: "23".to_string(),
            hostid: "10084".to_string(),
            name: "CPU load".to_string(),
            key_: key.to_string(),
            lastvalue: lastvalue.to_string(),
            value_type: "0".to_string(),
            hosts: vec![HostRef {
                host: "zbx".to_string(),
                name: "Zabbix server".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_metric_name_sanitizing() {
        assert_eq!(metric_name("system.cpu.load[percpu,avg1]"), "system.cpu.load_percpu_avg1");
        assert_eq!(metric_name("vfs.fs.size[/,pfree]"), "vfs.fs.size_/_pfree");
        assert_eq!(metric_name("agent.ping"), "agent.ping");
        assert_eq!(metric_name("1min"), "zabbix_1min");
    }

    #[test]
    fn test_numeric_item_becomes_sample() {
        let sample = item_sample(&item("system.cpu.load", "0.75")).unwrap();
        assert_eq!(sample.value, 0.75);
        assert_eq!(
            attr(&sample.attributes, "zabbix.host"),
            Some("Zabbix server".to_string())
        );
        assert_eq!(
            attr(&sample.attributes, "zabbix.itemid"),
            Some("23".to_string())
        );
    }

    #[test]
    fn test_non_numeric_items_are_skipped() {
        assert_eq!(item_sample(&item("k", "")), Err(SkipReason::EmptyValue));
        assert_eq!(
            item_sample(&item("k", "up")),
            Err(SkipReason::NotNumeric("up".to_string()))
        );

        let items = vec![item("a", "1"), item("b", "n/a"), item("c", "2.5"), item("d", "")];
        let (samples, skipped) = collect_samples(&items);
        assert_eq!(samples.len(), 2);
        assert_eq!(skipped, 2);
        assert_eq!(samples[1].key, "c");
    }

    #[test]
    fn test_resolved_problem() {
        let problem = Problem {
            eventid: "100".to_string(),
            name: "High CPU".to_string(),
            severity: "4".to_string(),
            r_eventid: "105".to_string(),
            ..Default::default()
        };
        let span = problem_span(&problem);
        assert!(span.resolved);
        assert_eq!(span.name, "High CPU");
        assert_eq!(attr(&span.attributes, "zabbix.resolved"), Some("true".to_string()));
        assert_eq!(
            attr(&span.attributes, "zabbix.r_eventid"),
            Some("105".to_string())
        );
    }

    #[test]
    fn test_unresolved_problem() {
        for r_eventid in ["", "0"] {
            let problem = Problem {
                eventid: "100".to_string(),
                r_eventid: r_eventid.to_string(),
                severity: "0".to_string(),
                tags: vec![Tag {
                    tag: "scope".to_string(),
                    value: "availability".to_string(),
                }],
                ..Default::default()
            };
            let span = problem_span(&problem);
            assert!(!span.resolved);
            assert_eq!(attr(&span.attributes, "zabbix.resolved"), Some("false".to_string()));
            assert!(attr(&span.attributes, "zabbix.r_eventid").is_none());
            assert_eq!(
                attr(&span.attributes, "zabbix.problem_type"),
                Some("not_classified".to_string())
            );
            assert_eq!(
                attr(&span.attributes, "zabbix.tag.scope"),
                Some("availability".to_string())
            );
        }
    }
}
