//! Shared core library for zabbix-dna.
//!
//! Holds the Zabbix JSON-RPC client, typed records, configuration, local
//! storage, the OTLP polling exporter and the salt-api client. The CLI crate
//! only adds argument parsing and presentation on top of this.

pub mod api;
pub mod config;
pub mod error;
pub mod observability;
pub mod protocol;
pub mod salt;
pub mod storage;
pub mod text;

pub use api::ZabbixClient;
pub use config::Config;
pub use error::{CoreError, Result};
