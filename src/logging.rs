//! Tracing setup for the CLI.

use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter directives are read from this variable, e.g.
/// `ARCHTEST_LOG=archtest::analysis=debug`.
pub const LOG_ENV: &str = "ARCHTEST_LOG";

static INIT: Once = Once::new();

/// Install the global subscriber. Safe to call more than once.
pub fn init_tracing(verbose: bool) {
    INIT.call_once(|| {
        let default_level = if verbose { "archtest=debug" } else { "archtest=warn" };
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .with(filter)
            .init();
    });
}
