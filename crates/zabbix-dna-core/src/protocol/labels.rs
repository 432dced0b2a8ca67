//! Human-readable labels for Zabbix numeric codes.

use chrono::{Local, TimeZone};
use serde::Serialize;

/// Trigger priority / problem severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    NotClassified,
    Information,
    Warning,
    Average,
    High,
    Disaster,
    Unknown,
}

impl Severity {
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "0" => Severity::NotClassified,
            "1" => Severity::Information,
            "2" => Severity::Warning,
            "3" => Severity::Average,
            "4" => Severity::High,
            "5" => Severity::Disaster,
            _ => Severity::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::NotClassified => "Not classified",
            Severity::Information => "Information",
            Severity::Warning => "Warning",
            Severity::Average => "Average",
            Severity::High => "High",
            Severity::Disaster => "Disaster",
            Severity::Unknown => "Unknown",
        }
    }
}

pub fn priority_name(code: &str) -> &'static str {
    Severity::from_code(code).as_str()
}

pub fn media_type_name(code: &str) -> &'static str {
    match code {
        "0" => "Email",
        "1" => "Script",
        "2" => "SMS",
        "4" => "WebHook",
        _ => "Other",
    }
}

pub fn event_source_name(code: &str) -> &'static str {
    match code {
        "0" => "Triggers",
        "1" => "Discovery",
        "2" => "Autoregistration",
        "3" => "Internal",
        "4" => "Service",
        _ => "Unknown",
    }
}

pub fn interface_type_name(code: &str) -> &'static str {
    match code {
        "1" => "Agent",
        "2" => "SNMP",
        "3" => "IPMI",
        "4" => "JMX",
        _ => "Unknown",
    }
}

pub fn permission_name(code: &str) -> &'static str {
    match code {
        "0" => "None",
        "2" => "Read-only",
        "3" => "Read-write",
        _ => "Unknown",
    }
}

/// Host `status`: 0 monitored, 1 unmonitored.
pub fn host_status_name(code: &str) -> &'static str {
    if code == "1" {
        "Off"
    } else {
        "On"
    }
}

pub fn maintenance_status_name(code: &str) -> &'static str {
    if code == "1" {
        "On"
    } else {
        "Off"
    }
}

pub fn availability_name(code: &str) -> &'static str {
    match code {
        "1" => "Available",
        "2" => "Unavailable",
        _ => "Unknown",
    }
}

pub fn proxy_mode_name(code: &str) -> &'static str {
    if code == "1" {
        "Passive"
    } else {
        "Active"
    }
}

pub fn proxy_compatibility_name(code: &str) -> &'static str {
    match code {
        "1" => "Compatible",
        "2" => "Incompatible",
        _ => "Undefined",
    }
}

pub fn maintenance_type_name(code: &str) -> &'static str {
    if code == "1" {
        "No data collection"
    } else {
        "With data collection"
    }
}

/// Generic enabled/disabled flag where 0 means enabled.
pub fn enabled_name(code: &str) -> &'static str {
    if code == "0" {
        "Enabled"
    } else {
        "Disabled"
    }
}

pub fn trigger_value_name(code: &str) -> &'static str {
    if code == "1" {
        "PROBLEM"
    } else {
        "OK"
    }
}

/// Format a Unix timestamp string as local `YYYY-MM-DD HH:MM:SS`.
///
/// Unparseable input is returned unchanged.
pub fn format_clock(clock: &str) -> String {
    clock
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(|secs| Local.timestamp_opt(secs, 0).single())
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| clock.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_names() {
        assert_eq!(priority_name("0"), "Not classified");
        assert_eq!(priority_name("3"), "Average");
        assert_eq!(priority_name("5"), "Disaster");
        assert_eq!(priority_name("9"), "Unknown");
        assert_eq!(priority_name(""), "Unknown");
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Disaster > Severity::High);
        assert!(Severity::from_code("1") < Severity::from_code("2"));
    }

    #[test]
    fn test_misc_labels() {
        assert_eq!(media_type_name("4"), "WebHook");
        assert_eq!(media_type_name("3"), "Other");
        assert_eq!(event_source_name("2"), "Autoregistration");
        assert_eq!(interface_type_name("2"), "SNMP");
        assert_eq!(permission_name("3"), "Read-write");
        assert_eq!(host_status_name("1"), "Off");
        assert_eq!(host_status_name("0"), "On");
        assert_eq!(proxy_mode_name("1"), "Passive");
        assert_eq!(proxy_compatibility_name("0"), "Undefined");
    }

    #[test]
    fn test_format_clock_passthrough() {
        assert_eq!(format_clock("not-a-time"), "not-a-time");
        assert_eq!(format_clock(""), "");
        assert_eq!(format_clock("0").len(), "1970-01-01 00:00:00".len());
    }
}
