//! Crop Advisor: binary entrypoint
//! Loads config and models, wires providers, and serves the Axum router on Shuttle.
//!
//! See `README.md` for the quickstart.

use anyhow::Context;
use shuttle_axum::ShuttleAxum;

use crop_advisor::config::AdvisorConfig;
use crop_advisor::logging::{init_tracing, DEFAULT_FILTER};
use crop_advisor::metrics::Metrics;
use crop_advisor::{router, AppState};

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    // This makes WEATHER_API_KEY and ADVISOR_CONFIG_PATH visible below.
    let _ = dotenvy::dotenv();

    init_tracing(DEFAULT_FILTER);

    let cfg = AdvisorConfig::load_default().context("loading advisor config")?;
    let state = AppState::from_config(&cfg).context("loading models and providers")?;

    let mut app = router(state);
    match Metrics::init() {
        Ok(m) => app = app.merge(m.router()),
        Err(e) => tracing::warn!(error = ?e, "prometheus recorder not installed, /metrics disabled"),
    }

    tracing::info!(days = cfg.forecast.days, "crop advisor ready");
    Ok(app.into())
}
