//! Table-formatted output for CLI.

use colored::*;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use serde_json::Value;

use super::{Listing, OutputFormatter};

pub struct TableOutput;

impl TableOutput {
    pub fn new() -> Self {
        Self
    }

    /// Colour severity and status columns.
    fn cell(header: &str, value: &str) -> Cell {
        let color = match (header, value) {
            ("Severity" | "Priority", "Disaster" | "High") => Some(Color::Red),
            ("Severity" | "Priority", "Average") => Some(Color::Yellow),
            ("Severity" | "Priority", "Warning") => Some(Color::DarkYellow),
            ("Severity" | "Priority", "Information") => Some(Color::Blue),
            ("Status" | "Availability", "Enabled" | "On" | "Available" | "OK") => Some(Color::Green),
            ("Status" | "Availability", "Disabled" | "Off" | "Unavailable" | "PROBLEM") => Some(Color::Red),
            _ => None,
        };

        match color {
            Some(c) => Cell::new(value).fg(c),
            None => Cell::new(value),
        }
    }
}

impl Default for TableOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TableOutput {
    fn format_listing(&self, listing: &Listing) -> String {
        if listing.is_empty() {
            return "No results found.".to_string();
        }

        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(listing.headers.clone());

        for row in &listing.rows {
            table.add_row(
                row.iter()
                    .enumerate()
                    .map(|(i, value)| {
                        let header = listing.headers.get(i).map(String::as_str).unwrap_or("");
                        Self::cell(header, value)
                    })
                    .collect::<Vec<_>>(),
            );
        }

        if listing.is_details() {
            table.to_string()
        } else {
            format!("{}\n\nFound {} {}", table, listing.len(), listing.kind)
        }
    }

    fn format_result(&self, message: &str, _result: &Value) -> String {
        format!("{} {}", "[OK]".green(), message)
    }

    fn format_message(&self, message: &str) -> String {
        message.to_string()
    }

    fn format_error(&self, error: &str) -> String {
        format!("{} {}", "Error:".red(), error)
    }

    fn format_bulk_results(&self, results: &[(String, bool, String)]) -> String {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Command", "Status", "Result"]);

        let mut success_count = 0;
        let mut fail_count = 0;

        for (command, success, message) in results {
            let status_cell = if *success {
                success_count += 1;
                Cell::new("OK").fg(Color::Green)
            } else {
                fail_count += 1;
                Cell::new("FAIL").fg(Color::Red)
            };

            table.add_row(vec![Cell::new(command), status_cell, Cell::new(message)]);
        }

        let summary = format!(
            "\nSummary: {} succeeded, {} failed",
            success_count.to_string().green(),
            fail_count.to_string().red()
        );

        format!("{}{}", table, summary)
    }
}
