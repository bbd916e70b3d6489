use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global `tracing` subscriber for the `skillindex` binary
///
/// Events go to stderr: stdout is reserved for command output, which
/// `search --json` and `show --json` keep machine-readable. `RUST_LOG`
/// takes precedence over the configured `level` when set.
///
/// # Errors
/// Fails if a global subscriber is already installed
pub fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .try_init()?;

    Ok(())
}
