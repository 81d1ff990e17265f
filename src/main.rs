//! FX news impact service: binary entrypoint.
//! Boots the Axum HTTP server, wiring routes, shared state, and metrics.

use fx_news_impact::api::{self, AppState};
use fx_news_impact::telemetry::{init_tracing, Metrics};
use shuttle_axum::ShuttleAxum;

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    init_tracing();

    let state = AppState::from_env()?;
    let mut router = api::router(state);

    match Metrics::init() {
        Ok(m) => router = router.merge(m.router()),
        Err(e) => tracing::warn!(error = ?e, "metrics disabled"),
    }

    tracing::info!("fx news impact service ready");
    Ok(router.into())
}
