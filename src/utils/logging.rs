//! Logging setup and configuration

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub struct LoggingGuard {
    pub _guard: tracing_appender::non_blocking::WorkerGuard,
}

/// Console output plus a daily log file under `<output_dir>/logs`.
///
/// With `json_file` the file receives one JSON object per event, which keeps
/// the structured fields of saved calculations machine-readable.
pub fn setup_logging(output_dir: &Path, json_file: bool) -> Result<Arc<LoggingGuard>> {
    let file_name = if json_file { "arb-profit-calc.json.log" } else { "arb-profit-calc.log" };
    let file_appender = tracing_appender::rolling::daily(output_dir.join("logs"), file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let json_layer = json_file.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(non_blocking.clone())
            .with_current_span(false)
            .with_target(true)
    });
    let text_layer = (!json_file).then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_target(true)
            .with_ansi(false)
            .compact()
    });

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(true)
        )
        .with(json_layer)
        .with(text_layer)
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("info".parse()?)
        )
        .init();

    Ok(Arc::new(LoggingGuard { _guard: guard }))
}

pub fn setup_output_directories(output_dir: &Path) -> Result<()> {
    use std::fs;

    fs::create_dir_all(output_dir.join("logs"))?;
    fs::create_dir_all(output_dir.join("calculations"))?;

    Ok(())
}
