use tracing_subscriber::EnvFilter;

use crate::config::RuntimeMode;

/// Install the global subscriber. `RUST_LOG` wins over the mode default.
pub fn init_tracing(mode: RuntimeMode) {
    let default_level = if mode.is_production() { "info" } else { "debug" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{default_level},hyper=info,reqwest=info")));

    // A subscriber may already be installed (tests).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
