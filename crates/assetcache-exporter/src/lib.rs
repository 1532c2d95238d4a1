//! AssetCache exporter service library.
//!
//! Wires the status fetcher, metric registry, collection loop, and scrape
//! router into a running exporter. It is intended to be consumed by the
//! binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod collect;
pub mod config;
pub mod fetch;
pub mod ops;
pub mod registry;
pub mod router;
