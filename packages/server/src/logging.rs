use tracing_subscriber::EnvFilter;

/// Install the global `fmt` subscriber.
///
/// Levels come from `RUST_LOG`, defaulting to `info`. Repeated calls are
/// ignored so tests and binaries can share it.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
