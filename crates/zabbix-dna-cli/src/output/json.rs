//! JSON-formatted output for CLI.

use serde::Serialize;
use serde_json::{json, Value};

use super::{Listing, OutputFormatter};

pub struct JsonOutput;

impl JsonOutput {
    pub fn new() -> Self {
        Self
    }

    fn to_json<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    /// `host groups` becomes `host_groups`
    fn key(kind: &str) -> String {
        kind.replace(' ', "_")
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for JsonOutput {
    fn format_listing(&self, listing: &Listing) -> String {
        if listing.is_details() {
            return Self::to_json(&listing.records);
        }

        let mut output = serde_json::Map::new();
        output.insert(Self::key(&listing.kind), listing.records.clone());
        output.insert("count".to_string(), json!(listing.len()));
        Self::to_json(&Value::Object(output))
    }

    fn format_result(&self, message: &str, result: &Value) -> String {
        Self::to_json(&json!({
            "message": message,
            "result": result
        }))
    }

    fn format_message(&self, message: &str) -> String {
        Self::to_json(&json!({ "message": message }))
    }

    fn format_error(&self, error: &str) -> String {
        Self::to_json(&json!({ "error": error }))
    }

    fn format_bulk_results(&self, results: &[(String, bool, String)]) -> String {
        let items: Vec<Value> = results
            .iter()
            .map(|(command, success, message)| {
                // Nested JSON output stays structured
                let message_value: Value =
                    serde_json::from_str(message).unwrap_or_else(|_| json!(message));

                json!({
                    "command": command,
                    "success": success,
                    "result": message_value
                })
            })
            .collect();

        let success_count = results.iter().filter(|(_, s, _)| *s).count();
        let fail_count = results.len() - success_count;

        Self::to_json(&json!({
            "results": items,
            "summary": {
                "total": results.len(),
                "succeeded": success_count,
                "failed": fail_count
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_is_keyed_by_kind_with_count() {
        let listing = Listing {
            kind: "host groups".to_string(),
            headers: vec!["ID".to_string()],
            rows: vec![vec!["4".to_string()]],
            records: json!([{"groupid": "4"}]),
        };

        let out: Value = serde_json::from_str(&JsonOutput::new().format_listing(&listing)).unwrap();
        assert_eq!(out["count"], 1);
        assert_eq!(out["host_groups"][0]["groupid"], "4");
    }

    #[test]
    fn test_details_print_the_record() {
        let listing = Listing {
            kind: "host".to_string(),
            headers: vec!["Property".to_string(), "Value".to_string()],
            rows: vec![vec!["Name".to_string(), "web01".to_string()]],
            records: json!({"hostid": "10105", "host": "web01"}),
        };

        let out: Value = serde_json::from_str(&JsonOutput::new().format_listing(&listing)).unwrap();
        assert_eq!(out["host"], "web01");
    }
}
