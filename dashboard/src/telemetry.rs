use std::sync::Once;

use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static INIT: Once = Once::new();

const DEFAULT_FILTER: &str = "info,dashboard=debug";

/// Installs the global subscriber: a console layer on stderr, so that CSV and
/// JSON written to stdout stay clean, plus an hourly rolling file in
/// `log_dir` when one is given. Later calls are no-ops.
///
/// The returned guard flushes the file writer when dropped; keep it alive
/// until the process exits.
pub fn setup_telemetry(log_dir: Option<&str>) -> Option<WorkerGuard> {
    let mut file_guard = None;
    INIT.call_once(|| {
        let file_appender = log_dir.and_then(|dir| {
            match RollingFileAppender::builder()
                .rotation(Rotation::HOURLY)
                .filename_prefix("dashboard")
                .filename_suffix("log")
                .max_log_files(48)
                .build(dir)
            {
                Ok(appender) => Some(appender),
                Err(e) => {
                    eprintln!(
                        "Warning: Failed to create log file appender: {}. Logging to stderr only.",
                        e
                    );
                    None
                }
            }
        });

        let stderr_layer = fmt::Layer::new()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
            );

        if let Some(file_appender) = file_appender {
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let file_layer = fmt::Layer::new()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_filter(EnvFilter::new(DEFAULT_FILTER));

            tracing_subscriber::registry()
                .with(stderr_layer)
                .with(file_layer)
                .init();
            file_guard = Some(guard);
        } else {
            tracing_subscriber::registry().with(stderr_layer).init();
        }
    });
    file_guard
}
