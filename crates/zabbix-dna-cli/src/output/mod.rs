//! Output formatting for CLI results.

pub mod json;
pub mod table;

pub use json::JsonOutput;
pub use table::TableOutput;

use serde::Serialize;
use serde_json::{json, Value};
use zabbix_dna_core::config::OutputFormat;

/// Rows ready for display plus the raw records behind them.
///
/// `records` is an array for lists and a single object for detail views.
#[derive(Debug, Clone)]
pub struct Listing {
    /// Plural noun used in summaries and as the JSON key, e.g. `hosts`
    pub kind: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub records: Value,
}

impl Listing {
    /// One row per record, in the order the server returned them.
    pub fn new<T, F>(kind: &str, headers: &[&str], records: &[T], row: F) -> Self
    where
        T: Serialize,
        F: Fn(&T) -> Vec<String>,
    {
        Self {
            kind: kind.to_string(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: records.iter().map(row).collect(),
            records: serde_json::to_value(records).unwrap_or_else(|_| json!([])),
        }
    }

    /// Property/value view of a single record.
    pub fn details<T: Serialize>(kind: &str, record: &T, pairs: Vec<(&str, String)>) -> Self {
        Self {
            kind: kind.to_string(),
            headers: vec!["Property".to_string(), "Value".to_string()],
            rows: pairs
                .into_iter()
                .map(|(k, v)| vec![k.to_string(), v])
                .collect(),
            records: serde_json::to_value(record).unwrap_or_else(|_| json!({})),
        }
    }

    pub fn is_details(&self) -> bool {
        !self.records.is_array()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Output formatter trait
pub trait OutputFormatter {
    /// Format a list or detail view
    fn format_listing(&self, listing: &Listing) -> String;

    /// Format the outcome of a write call together with the raw result
    fn format_result(&self, message: &str, result: &Value) -> String;

    /// Format a generic message
    fn format_message(&self, message: &str) -> String;

    /// Format an error
    fn format_error(&self, error: &str) -> String;

    /// Format bulk operation results
    fn format_bulk_results(&self, results: &[(String, bool, String)]) -> String;
}

/// Get the formatter for the selected output format
pub fn get_formatter(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Json => Box::new(JsonOutput::new()),
        OutputFormat::Table => Box::new(TableOutput::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zabbix_dna_core::protocol::records::HostGroup;

    fn groups() -> Vec<HostGroup> {
        vec![
            HostGroup {
                groupid: "4".to_string(),
                name: "Zabbix servers".to_string(),
                ..Default::default()
            },
            HostGroup {
                groupid: "2".to_string(),
                name: "Linux servers".to_string(),
                ..Default::default()
            },
        ]
    }

    #[test]
    fn test_listing_keeps_record_order() {
        let listing = Listing::new("host groups", &["ID", "Name"], &groups(), |g| {
            vec![g.groupid.clone(), g.name.clone()]
        });

        assert_eq!(listing.len(), 2);
        assert_eq!(listing.rows[0], vec!["4", "Zabbix servers"]);
        assert_eq!(listing.records[1]["name"], "Linux servers");
        assert!(!listing.is_details());
    }

    #[test]
    fn test_details_listing() {
        let group = &groups()[0];
        let listing = Listing::details("host group", group, vec![("Name", group.name.clone())]);

        assert!(listing.is_details());
        assert_eq!(listing.headers, vec!["Property", "Value"]);
        assert_eq!(listing.records["groupid"], "4");
    }
}
