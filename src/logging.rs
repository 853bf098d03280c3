use tracing_subscriber::EnvFilter;

/// Installs the fmt subscriber on stderr, filtered by `RUST_LOG` (default `warn`).
///
/// stdout is left to the rendered page so `lookup --json` output stays parseable.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
