//! Panic hook for crash reporting

use backtrace::Backtrace;
use chrono::Local;
use std::panic::PanicHookInfo;

/// Install a panic hook that writes a crash report before the process dies
pub fn init_panic_hook() {
    std::panic::set_hook(Box::new(report_panic));
    tracing::debug!("Panic hook installed");
}

fn report_panic(info: &PanicHookInfo) {
    let backtrace = Backtrace::new();
    let thread = std::thread::current();

    let payload = info
        .payload()
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| info.payload().downcast_ref::<String>().map(String::as_str))
        .unwrap_or("<unknown>");

    let report = format!(
        "=== PANIC ===\n\
         Timestamp: {}\n\
         Thread: {}\n\
         Location: {:?}\n\
         Payload: {}\n\n\
         Stack Trace:\n{:?}",
        Local::now().to_rfc3339(),
        thread.name().unwrap_or("<unnamed>"),
        info.location(),
        payload,
        backtrace
    );

    // stderr is always available; the tracing pipeline may already be gone
    eprintln!("{report}");
    tracing::error!("{report}");

    let dump_name = format!("shutterdeck_crash_{}.txt", Local::now().format("%Y%m%d_%H%M%S"));
    let dump_path = std::env::temp_dir().join(dump_name);
    if let Err(e) = std::fs::write(&dump_path, &report) {
        eprintln!("Failed to write crash dump to {:?}: {}", dump_path, e);
    }
}
