//! Collection loop: fetch -> extract -> update, on a fixed cadence.
//!
//! Failure tolerance is per-level: a failed fetch abandons the whole cycle,
//! a failing extractor skips only its own metric. Neither stops the loop,
//! and the registry keeps serving the last good values either way. Failed
//! cycles retry on the normal cadence; there is no backoff.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, warn};

use assetcache_core::catalog::MetricDef;
use assetcache_core::status::StatusSnapshot;

use crate::fetch::StatusSource;
use crate::registry::MetricRegistry;

pub struct CollectionLoop {
    source: Arc<dyn StatusSource>,
    catalog: Vec<MetricDef>,
    registry: Arc<MetricRegistry>,
    interval: Duration,
}

impl CollectionLoop {
    pub fn new(
        source: Arc<dyn StatusSource>,
        catalog: Vec<MetricDef>,
        registry: Arc<MetricRegistry>,
        interval: Duration,
    ) -> Self {
        Self {
            source,
            catalog,
            registry,
            interval,
        }
    }

    /// One fetch -> extract -> update pass.
    pub async fn run_cycle(&self) {
        let snapshot = match self.source.fetch().await {
            Ok(s) => s,
            Err(e) => {
                warn!(kind = e.kind().as_str(), error = %e, "status fetch failed; keeping last values");
                return;
            }
        };
        self.apply(&snapshot);
    }

    fn apply(&self, snapshot: &StatusSnapshot) {
        // Correlation label is re-read every cycle, never cached; the service
        // behind the tool can be replaced between cycles.
        let server_guid = match snapshot.str_field("ServerGUID") {
            Ok(guid) => guid.to_string(),
            Err(e) => {
                warn!(kind = e.kind().as_str(), error = %e, "snapshot has no usable ServerGUID; cycle abandoned");
                return;
            }
        };

        for def in &self.catalog {
            let observations = match (def.extract)(snapshot) {
                Ok(obs) => obs,
                Err(e) => {
                    warn!(
                        metric = def.name,
                        kind = e.kind().as_str(),
                        error = %e,
                        "extraction failed; metric skipped this cycle"
                    );
                    continue;
                }
            };
            for obs in observations {
                let mut labels: Vec<(&str, &str)> = Vec::with_capacity(obs.labels.len() + 1);
                labels.push(("server_guid", server_guid.as_str()));
                for (k, v) in &obs.labels {
                    labels.push((*k, v.as_str()));
                }
                if let Err(e) = self.registry.set(def.name, &labels, obs.value) {
                    warn!(metric = def.name, error = %e, "registry update failed");
                }
            }
        }
    }

    /// Run until the shutdown signal fires, one cycle per interval.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        loop {
            self.run_cycle().await;
            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = shutdown.changed() => {
                    debug!("collection loop stopping");
                    return;
                }
            }
        }
    }
}
