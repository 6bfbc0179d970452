use std::{path::Path, sync::LazyLock};

use anyhow::Result;
use tracing::level_filters::LevelFilter;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::{format::FmtSpan, writer::MakeWriterExt};

use super::dir::ensure_dir;

pub const CLI_PREFIX: &str = "cli";

const MAX_LOG_FILES: usize = 5;

/// Builds the daily rotated appender writing into `application_data_path/logs`.
fn file_appender(prefix: &str, application_data_path: &Path) -> Result<RollingFileAppender> {
    let log_dir = ensure_dir(application_data_path.join("logs"))?;
    Ok(RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .max_log_files(MAX_LOG_FILES)
        .filename_prefix(prefix)
        .build(log_dir)?)
}

/// Sends logs into a file under the application directory. Stdout only receives logs when
/// `show_std` is set, so regular command output stays clean.
pub fn enable_logging(
    prefix: &str,
    application_data_path: &Path,
    log_level: Option<LevelFilter>,
    show_std: bool,
) -> Result<()> {
    let appender = file_appender(prefix, application_data_path)?;
    let stdout = std::io::stdout.with_filter(move |_| show_std);

    let level = log_level
        .map(|v| v.to_string())
        .unwrap_or_else(|| std::env::var("RUST_LOG").unwrap_or_else(|_| "debug".into()));

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(format!(
            "{}={level}",
            env!("CARGO_PKG_NAME").replace("-", "_"),
        )))
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(stdout.and(appender))
        .with_ansi(show_std)
        .pretty()
        .init();
    Ok(())
}

pub static TEST_LOGGING: LazyLock<()> = LazyLock::new(|| {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::TRACE)
        .with_test_writer()
        .pretty()
        .init()
});
