//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! Logs go to stderr so that report output on stdout stays machine-readable.
//! `RUST_LOG` takes precedence over the `-v` flag.

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Map the `-v` count to a level: warn, debug, trace.
pub fn level_for_verbosity(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the global subscriber.
pub fn init_logging(verbosity: u8) -> Result<(), Box<dyn std::error::Error>> {
    let level = level_for_verbosity(verbosity);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("csvlint={level},csvlint_cli={level}")));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbosity > 1)
                .compact(),
        )
        .try_init()?;

    Ok(())
}
