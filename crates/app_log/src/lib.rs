//! Shutterdeck logging & observability
//!
//! Structured logging, crash reporting and (in debug builds) lock deadlock
//! detection for all Shutterdeck processes.

mod logging;
mod panic_hook;

pub use logging::{cleanup_old_logs, init_logging};
pub use panic_hook::init_panic_hook;

use directories::ProjectDirs;
use std::path::PathBuf;

/// Directory where log files are written
pub fn log_dir() -> PathBuf {
    ProjectDirs::from("com", "Shutterdeck", "Shutterdeck")
        .map(|dirs| dirs.data_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("./logs"))
}

/// Initialize all observability features
pub fn init() -> anyhow::Result<()> {
    init_logging()?;
    init_panic_hook();

    #[cfg(debug_assertions)]
    spawn_deadlock_watch();

    Ok(())
}

#[cfg(debug_assertions)]
fn spawn_deadlock_watch() {
    use std::thread;
    use std::time::Duration;

    thread::spawn(|| loop {
        thread::sleep(Duration::from_secs(10));

        let deadlocks = parking_lot::deadlock::check_deadlock();
        for (i, threads) in deadlocks.iter().enumerate() {
            tracing::error!("Deadlock #{} involving {} threads", i, threads.len());
            for t in threads {
                tracing::error!("Thread {:#?}\n{:#?}", t.thread_id(), t.backtrace());
            }
        }
    });
}
