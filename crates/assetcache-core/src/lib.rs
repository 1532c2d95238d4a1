//! AssetCache exporter core: status decoding, the metric catalog, and the
//! shared error surface.
//!
//! This crate holds everything that does not need a runtime: the typed view
//! over `AssetCacheManagerUtil status --json` output and the declarative
//! table of metrics derived from it. It intentionally carries no process or
//! HTTP dependencies so the extraction logic can be tested in isolation.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `ExporterError`/`Result` so one bad
//! status document never takes the exporter down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod catalog;
pub mod error;
pub mod status;

/// Shared result type.
pub use error::{ExporterError, Result};
