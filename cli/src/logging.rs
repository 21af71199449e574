use tracing_subscriber::EnvFilter;

/// Initializes console logging.
///
/// Default log level is "info" with the service and gateway crates at debug;
/// override with RUST_LOG, e.g. RUST_LOG=service=trace cli
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,service=debug,backend_gateway=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}
