//! Logging initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the Motif logging system.
///
/// Reads the `MOTIF_LOG` environment variable for per-module log levels.
/// Format: `MOTIF_LOG=motif_core::service=debug,motif_core::vue=trace`
///
/// Falls back to `motif_core=info` if `MOTIF_LOG` is not set or is invalid.
///
/// This function is idempotent: calling it multiple times is safe.
pub fn init_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("MOTIF_LOG")
            .unwrap_or_else(|_| EnvFilter::new("motif_core=info"));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .init();
    });
}
