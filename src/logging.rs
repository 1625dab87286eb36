use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs the stderr log subscriber.
///
/// Output defaults to warnings and errors; `RUST_LOG` overrides the filter.
/// Stdout is left alone because it carries the command's result.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
