use tracing_subscriber::EnvFilter;

/// Default filter directive for the given switches. `quiet` wins over `verbose`.
pub fn filter_directive(quiet: bool, verbose: bool) -> &'static str {
    if quiet {
        "error"
    } else if verbose {
        "img_optimize=debug,info"
    } else {
        "warn"
    }
}

/// Installs the global tracing subscriber. `RUST_LOG` overrides the switches.
/// Calling it again is a no-op.
pub fn init_logging(quiet: bool, verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(quiet, verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
