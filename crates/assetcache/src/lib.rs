//! Top-level facade crate for the assetcache exporter.
//!
//! Re-exports the core types and the exporter library so users can depend on
//! a single crate.

pub mod core {
    pub use assetcache_core::*;
}

pub mod exporter {
    pub use assetcache_exporter::*;
}
