use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Sends `tracing` output to `directory/file_name`, since stdout belongs to the renderer.
/// The filter comes from `RUST_LOG` and defaults to `info`.
///
/// Keep the returned guard alive until exit, dropping it flushes and stops the writer.
pub fn init_file_logging(directory: impl AsRef<Path>, file_name: &str) -> WorkerGuard {
    let file_appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    let filter_layer = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer().with_writer(writer).with_ansi(false);

    // A subscriber may already be installed, e.g. by a test harness
    if tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        tracing::debug!("Global subscriber already set, keeping it");
    }
    guard
}
