//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialise the global tracing subscriber.
///
/// `RUST_LOG` takes precedence. Otherwise `<crate>=<default_level>` and
/// `tower_http=<default_level>` are enabled, where `<crate>` is derived from
/// the binary name.
pub fn setup_logger(bin_name: &str, default_level: &str) {
    let crate_name = bin_name.replace('-', "_");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{crate_name}={default_level},linkup_server={default_level},tower_http={default_level}"
        ))
    });

    // try_init so that a second call (tests) does not panic
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_ansi(true))
        .try_init();
}
