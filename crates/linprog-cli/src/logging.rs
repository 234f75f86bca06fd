//! Diagnostics output on stderr.

use std::env;
use std::io;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber.
///
/// The filter comes from `level` when given, otherwise from `LINPROG_LOG`,
/// otherwise `warn`. `LINPROG_LOG_FORMAT` selects `pretty` (default) or
/// `json` lines.
pub fn init(level: Option<&str>) -> Result<(), String> {
    let directives = level
        .map(str::to_string)
        .or_else(|| env::var("LINPROG_LOG").ok())
        .unwrap_or_else(|| "warn".to_string());
    let filter = EnvFilter::try_new(&directives).map_err(|err| format!("Invalid log filter: {err}"))?;

    let format = env::var("LINPROG_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());
    if format.eq_ignore_ascii_case("json") {
        let layer = tracing_subscriber::fmt::layer().with_writer(io::stderr).json();
        tracing_subscriber::registry()
            .with(filter)
            .with(layer)
            .try_init()
            .map_err(|err| format!("Failed to initialize logging: {err}"))
    } else if format.eq_ignore_ascii_case("pretty") {
        let layer = tracing_subscriber::fmt::layer().with_writer(io::stderr).compact();
        tracing_subscriber::registry()
            .with(filter)
            .with(layer)
            .try_init()
            .map_err(|err| format!("Failed to initialize logging: {err}"))
    } else {
        Err("Invalid LINPROG_LOG_FORMAT (expected 'json' or 'pretty')".to_string())
    }
}
