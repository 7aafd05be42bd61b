use tracing_subscriber::{EnvFilter, prelude::*};

/// Installs the global subscriber. Logs go to stderr so stdout stays free for
/// machine readable output. Verbosity follows `RUST_LOG`, `info` by default.
pub fn init_tracing(app_name: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::debug!("tracing initialized for {app_name}");
    Ok(())
}
