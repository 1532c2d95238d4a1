//! Status source: the external status tool invocation.

use async_trait::async_trait;
use tokio::process::Command;

use assetcache_core::error::{ExporterError, Result};
use assetcache_core::status::StatusSnapshot;

/// Where status snapshots come from. Production shells out to the status
/// tool; tests substitute scripted sources.
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// One fetch, one snapshot. No retries here; cadence is the collection
    /// loop's concern.
    async fn fetch(&self) -> Result<StatusSnapshot>;
}

/// Runs `AssetCacheManagerUtil status --json` and decodes its output.
pub struct AssetCacheManagerUtil {
    command: String,
}

impl AssetCacheManagerUtil {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

#[async_trait]
impl StatusSource for AssetCacheManagerUtil {
    async fn fetch(&self) -> Result<StatusSnapshot> {
        let output = Command::new(&self.command)
            .args(["status", "--json"])
            .output()
            .await
            .map_err(|e| ExporterError::Process(format!("failed to launch {}: {e}", self.command)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExporterError::Process(format!(
                "{} exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        StatusSnapshot::from_tool_output(&stdout)
    }
}
