//! Shutterdeck host shell stub
//!
//! Owns the native "Export Selection" menu item on behalf of the UI
//! process. The UI toggles the item's enablement over a local socket and
//! receives click events back. This stub stands in for a real shell:
//! typing `export` on stdin triggers the menu item.

use anyhow::Result;
use interprocess::local_socket::{prelude::*, GenericNamespaced, ListenerOptions, SendHalf, Stream};
use menu_proto::{read_frame, socket_name, write_frame, MenuCommand, MenuEvent};
use parking_lot::Mutex;
use std::io::{BufRead, BufReader};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer())
        .init();

    let name = socket_name();
    tracing::info!("Menu host listening on {}", name);

    let listener = ListenerOptions::new()
        .name(name.clone().to_ns_name::<GenericNamespaced>()?)
        .create_sync()?;

    for conn in listener.incoming() {
        match conn {
            Ok(stream) => {
                tracing::info!("UI process connected");
                if serve(stream)? {
                    break;
                }
                tracing::info!("UI process disconnected");
            }
            Err(e) => tracing::warn!("Incoming connection failed: {}", e),
        }
    }

    Ok(())
}

/// Serve one UI connection. Returns true when a shutdown was requested.
fn serve(stream: Stream) -> Result<bool> {
    let (recv, send) = stream.split();
    let send = Arc::new(Mutex::new(send));
    let enabled = Arc::new(AtomicBool::new(false));

    spawn_menu_trigger(Arc::clone(&send), Arc::clone(&enabled));

    let mut reader = BufReader::new(recv);
    loop {
        let command: MenuCommand = match read_frame(&mut reader) {
            Ok(command) => command,
            Err(e) => {
                tracing::info!("Menu channel closed: {}", e);
                return Ok(false);
            }
        };

        match command {
            MenuCommand::SetExportEnabled(on) => {
                enabled.store(on, Ordering::Relaxed);
                tracing::info!(
                    "Export menu item {}",
                    if on { "enabled" } else { "disabled" }
                );
            }

            MenuCommand::Shutdown => {
                tracing::info!("Shutdown requested");
                return Ok(true);
            }
        }
    }
}

/// Stand-in for the native menu: an `export` line on stdin clicks the
/// item, honored only while it is enabled.
fn spawn_menu_trigger(send: Arc<Mutex<SendHalf>>, enabled: Arc<AtomicBool>) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines().map_while(Result::ok) {
            if line.trim() != "export" {
                continue;
            }

            if !enabled.load(Ordering::Relaxed) {
                tracing::info!("Export menu item is disabled, click ignored");
                continue;
            }

            if let Err(e) = write_frame(&mut *send.lock(), &MenuEvent::ExportClicked) {
                tracing::warn!("Failed to deliver menu click: {}", e);
                break;
            }
        }
    });
}
