use tracing_subscriber::EnvFilter;

/// Logs go to stderr. `--debug` forces the `debug` level, otherwise
/// `RUST_LOG` decides and falls back to warnings only.
pub fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
