//! assetcache-exporter binary.
//!
//! Bridges `AssetCacheManagerUtil status --json` to a Prometheus scrape
//! endpoint: one collection task fetches and decodes the tool's output,
//! extracts every catalog metric, and writes the samples into the shared
//! registry; an axum server exposes `/metrics` independently of the loop's
//! timing. Runs until ctrl-c.

use std::sync::Arc;

use tokio::sync::watch;
use tracing_subscriber::{fmt, EnvFilter};

use assetcache_core::catalog;
use assetcache_exporter::{
    app_state::AppState, collect::CollectionLoop, config::ExporterConfig,
    fetch::AssetCacheManagerUtil, registry::MetricRegistry, router,
};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cfg = ExporterConfig::from_env().expect("config load failed");

    let defs = catalog::catalog();
    let registry =
        Arc::new(MetricRegistry::from_catalog(&defs).expect("metric registration failed"));

    let source = Arc::new(AssetCacheManagerUtil::new(cfg.status_command.clone()));
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let collection = CollectionLoop::new(source, defs, Arc::clone(&registry), cfg.poll_interval);
    let collector = tokio::spawn(collection.run(shutdown_rx));

    let state = AppState::new(cfg.clone(), Arc::clone(&registry));
    let app = router::build_router(state);

    tracing::info!(listen = %cfg.listen, "assetcache-exporter starting");
    let listener = tokio::net::TcpListener::bind(&cfg.listen)
        .await
        .expect("failed to bind");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            let _ = shutdown_tx.send(true);
        })
        .await
        .expect("server failed");

    let _ = collector.await;
}
