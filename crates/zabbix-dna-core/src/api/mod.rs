//! Zabbix API access.

pub mod client;
pub mod lookup;

pub use client::{ClientOptions, ZabbixClient};
pub use lookup::{resolve_id, resolve_ids, resolve_some, Lookup};
