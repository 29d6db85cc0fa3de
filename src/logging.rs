use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install a stderr logger. `RUST_LOG` wins when set; otherwise `verbose`
/// picks warn, info or debug for this crate.
///
/// Stdout is left alone so it only carries the run summary.
pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pubpage={level}")));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .try_init();
}
