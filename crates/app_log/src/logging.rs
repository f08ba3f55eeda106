//! Structured logging setup with tracing

use std::sync::OnceLock;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Keeps the non-blocking writer flushing for the lifetime of the process.
static APPENDER_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Initialize the logging system
pub fn init_logging() -> anyhow::Result<()> {
    let log_dir = super::log_dir();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "shutterdeck.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let _ = APPENDER_GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    #[cfg(debug_assertions)]
    {
        // Development: pretty console output + JSON file
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().pretty())
            .with(fmt::layer().json().with_writer(non_blocking))
            .init();
    }

    #[cfg(not(debug_assertions))]
    {
        // Release: JSON file only
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(non_blocking))
            .init();
    }

    tracing::info!("Logging initialized, dir: {:?}", log_dir);
    Ok(())
}

/// Delete log files older than the given number of days. Returns how many
/// files were removed.
pub fn cleanup_old_logs(days: u32) -> anyhow::Result<usize> {
    use std::time::{Duration, SystemTime};

    let log_dir = super::log_dir();
    if !log_dir.exists() {
        return Ok(0);
    }

    let threshold = SystemTime::now() - Duration::from_secs(u64::from(days) * 24 * 60 * 60);
    let mut deleted = 0;

    for entry in std::fs::read_dir(&log_dir)? {
        let entry = entry?;
        let path = entry.path();

        let is_log = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with("shutterdeck.log"));
        if !is_log {
            continue;
        }

        let expired = entry
            .metadata()
            .and_then(|m| m.modified())
            .map(|modified| modified < threshold)
            .unwrap_or(false);

        if expired && std::fs::remove_file(&path).is_ok() {
            tracing::debug!("Deleted old log: {:?}", path);
            deleted += 1;
        }
    }

    Ok(deleted)
}
