//! Tracing subscriber setup shared by the binaries.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a global fmt subscriber.
///
/// `RUST_LOG` wins when set. Otherwise the binary's own crate and `tower_http`
/// log at `default_level`.
pub fn setup_logger(bin_name: &str, default_level: &str) {
    let crate_name = bin_name.replace('-', "_");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{crate_name}={default_level},tower_http={default_level}"
        ))
    });

    // try_init so that tests and repeated setup don't panic
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init();
}
