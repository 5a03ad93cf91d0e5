// src/lib.rs
// Public library surface for the binaries and integration tests.

pub mod api;
pub mod config;
pub mod history;
pub mod metrics;
pub mod page;

pub use crate::api::{router, AppState};
pub use crate::config::HistoryConfig;

use anyhow::Context;
use axum::Router;
use tracing::info;

use crate::history::HttpMonthSource;

/// Build the full application from a config: upstream HTTP source, routes, and
/// `/metrics` when enabled.
pub fn app_with_config(cfg: &HistoryConfig) -> anyhow::Result<Router> {
    let source = HttpMonthSource::from_config(cfg).context("building upstream http client")?;
    let mut router = api::router(AppState::new(source));

    if cfg.expose_metrics {
        let m = crate::metrics::Metrics::init()?;
        router = router.merge(m.router());
    }

    info!(
        target: "history",
        base_url = %cfg.base_url,
        timeout_secs = cfg.timeout_secs,
        metrics = cfg.expose_metrics,
        "history app configured"
    );
    Ok(router)
}

/// Build the application from `HistoryConfig::load_default()`.
pub async fn app() -> anyhow::Result<Router> {
    let cfg = HistoryConfig::load_default().context("loading history config")?;
    app_with_config(&cfg)
}
