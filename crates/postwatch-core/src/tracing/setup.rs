//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter directives.
pub const LOG_ENV_VAR: &str = "POSTWATCH_LOG";

/// Filter used when `POSTWATCH_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "postwatch=info";

/// Initialize the postwatch tracing/logging system.
///
/// Reads `POSTWATCH_LOG` for per-module log levels, e.g.
/// `POSTWATCH_LOG=postwatch_analysis::outliers=debug,postwatch=info`.
///
/// Falls back to `postwatch=info` if `POSTWATCH_LOG` is not set or is invalid.
/// Logs go to stderr so stdout stays free for reports. Idempotent.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .init();
    });
}
