//! Protocol layer for the Zabbix API.
//!
//! JSON-RPC envelopes, per-method parameter builders, typed result records
//! and the label tables used when rendering them.

pub mod jsonrpc;
pub mod labels;
pub mod params;
pub mod records;
pub mod response;

pub use params::Params;
