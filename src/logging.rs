// src/logging.rs
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter used when `RUST_LOG` is unset. Pipeline events log under short targets.
pub const DEFAULT_FILTER: &str = "crop_advisor=info,recommend=info,forecast=info,warn";

/// `ADVISOR_LOG_FORMAT=json` switches to one JSON object per line.
pub const ENV_LOG_FORMAT: &str = "ADVISOR_LOG_FORMAT";

/// Install the global subscriber, writing to stderr. Safe to call twice; the second call is a no-op.
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let json = std::env::var(ENV_LOG_FORMAT)
        .ok()
        .is_some_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    let res = if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .try_init()
    };

    if res.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
