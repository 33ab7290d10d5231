use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the diagnostics subscriber.
///
/// Diagnostics go to stderr so they never interleave with the progress report
/// written to stdout. `RUST_LOG` takes precedence; otherwise the level is
/// `debug` when `debug` is set and `warn` when it is not.
pub fn init(debug: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let default_level = if debug { "debug" } else { "warn" };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .compact();

    let filter_layer =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
