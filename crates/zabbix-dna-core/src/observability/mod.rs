//! Zabbix to OpenTelemetry exporter.

pub mod collector;
pub mod exporter;
pub mod otlp;

pub use exporter::{
    parse_interval, ExportKind, Exporter, ExporterReport, ExporterState, TelemetrySink, TickOutcome,
};
pub use otlp::{GaugeSink, OtlpEngine, SpanSink, SCOPE_NAME};
