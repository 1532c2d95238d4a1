//! Exporter configuration.
//!
//! The only externally recognized option is the scrape port, read from the
//! `PORT` environment variable. Everything else has fixed defaults. Config
//! errors are startup-fatal, unlike collection errors.

use std::time::Duration;

use assetcache_core::error::{ExporterError, Result};

pub const DEFAULT_PORT: u16 = 9923;
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
pub const DEFAULT_STATUS_COMMAND: &str = "AssetCacheManagerUtil";

#[derive(Debug, Clone)]
pub struct ExporterConfig {
    /// Scrape listener address; all interfaces by default.
    pub listen: String,
    /// Pause between collection cycles, also used after failed cycles.
    pub poll_interval: Duration,
    /// Status tool binary, resolved via PATH.
    pub status_command: String,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            listen: format!("0.0.0.0:{DEFAULT_PORT}"),
            poll_interval: DEFAULT_POLL_INTERVAL,
            status_command: DEFAULT_STATUS_COMMAND.to_string(),
        }
    }
}

impl ExporterConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env), with the environment injected so
    /// tests never mutate process state.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut cfg = Self::default();
        if let Some(raw) = lookup("PORT") {
            let port: u16 = raw
                .parse()
                .map_err(|_| ExporterError::Config(format!("PORT must be a port number, got {raw:?}")))?;
            if port == 0 {
                return Err(ExporterError::Config("PORT must not be 0".into()));
            }
            cfg.listen = format!("0.0.0.0:{port}");
        }
        Ok(cfg)
    }
}
