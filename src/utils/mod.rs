pub mod build_info;

use std::io;

use tracing_subscriber::{fmt, EnvFilter};

/// Default filter used when neither `RUST_LOG` nor the settings provide one.
pub const DEFAULT_LOG_FILTER: &str = "cashbook=info";

/// Initializes the global tracing subscriber. Logs go to stderr so command output
/// on stdout stays clean.
///
/// `RUST_LOG` wins over `filter`; an unparsable `filter` falls back to
/// [`DEFAULT_LOG_FILTER`]. Callers go through [`crate::init_with_filter`], which
/// runs this once per process.
pub(crate) fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
