use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn,twenty=info";

/// Logs go to stderr so stdout stays machine-readable. `RUST_LOG` overrides
/// the default filter.
pub fn init() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
