//! Tracing subscriber setup for the `pantry` binary.
//!
//! The library only emits `tracing` events; nothing is printed unless a
//! subscriber is installed.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default filter for a verbosity count (`-v`, `-vv`)
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Initialize a tracing subscriber that writes compact logs to stderr.
///
/// `RUST_LOG` wins when set; otherwise the level comes from `verbose`.
/// Stdout stays free for `--json` event output.
pub fn init(verbose: u8) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose > 1)
        .with_level(true)
        .compact();

    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive(verbose)))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
