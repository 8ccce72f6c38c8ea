//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::defaults::DEFAULT_LOG_FILTER;
use crate::constants::LOG_ENV_VAR;

static INIT: Once = Once::new();

/// Initialize the LiSSA tracing/logging system.
///
/// Reads `LISSA_LOG` for per-subsystem log levels, e.g.
/// `LISSA_LOG=lissa_cache=debug,lissa_classifier=info`.
/// Falls back to `lissa=info` if `LISSA_LOG` is not set or is invalid.
///
/// Idempotent. Also tolerates a subscriber installed by the host process.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
