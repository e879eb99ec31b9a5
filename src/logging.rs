use tracing_subscriber::{EnvFilter, fmt};

/// Install the stderr subscriber used by both binaries. `RUST_LOG`
/// overrides the default `info` level.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
