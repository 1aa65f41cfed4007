use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` wins over the crate default.
///
/// Output goes to stderr so `show` can pipe the document from stdout.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("openclaw_configure=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
