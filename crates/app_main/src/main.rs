//! Shutterdeck - desktop photo library
//!
//! Main entry point for the UI process. The native menu lives in a
//! separate host shell process reached over a local socket.

mod app;
mod host;

use anyhow::Result;
use app_core::{AppConfig, DisconnectedMenuPort, JsonCatalog, LibraryStore, MenuPort, SignalBus};
use directories::ProjectDirs;
use std::path::PathBuf;
use std::sync::Arc;

fn main() -> Result<()> {
    // Logging and panic hook first
    app_log::init()?;

    if let Err(e) = app_log::cleanup_old_logs(7) {
        tracing::warn!("Failed to cleanup old logs: {}", e);
    }

    tracing::info!("Shutterdeck starting...");

    let config = AppConfig::load().unwrap_or_default();

    let catalog_path = config
        .library
        .catalog_path
        .clone()
        .unwrap_or_else(default_catalog_path);
    let store = LibraryStore::new(Arc::new(JsonCatalog::new(catalog_path)));

    let signals = SignalBus::new();

    let port: Arc<dyn MenuPort> = match host::IpcMenuPort::connect() {
        Ok(port) => {
            tracing::info!("Connected to host shell menu channel");
            port
        }
        Err(e) => {
            tracing::warn!("Host shell unavailable ({}); menu accelerators disabled", e);
            Arc::new(DisconnectedMenuPort)
        }
    };

    app::run(config, store, signals, port)
}

fn default_catalog_path() -> PathBuf {
    ProjectDirs::from("com", "Shutterdeck", "Shutterdeck")
        .map(|dirs| dirs.data_dir().join("catalog.json"))
        .unwrap_or_else(|| PathBuf::from("./catalog.json"))
}
