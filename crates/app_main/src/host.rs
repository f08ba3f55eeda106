//! Local-socket client for the host shell menu channel
//!
//! Outbound commands are written directly; inbound events are pulled off
//! the socket by a reader thread and handed to whichever click listener is
//! currently registered. The listener slot holds at most one sender, so a
//! fresh registration starves any stale receiver instead of leaking it.

use app_core::MenuPort;
use crossbeam_channel::{unbounded, Receiver, Sender};
use interprocess::local_socket::{prelude::*, GenericNamespaced, SendHalf, Stream};
use menu_proto::{read_frame, socket_name, write_frame, MenuCommand, MenuEvent};
use parking_lot::Mutex;
use std::io::BufReader;
use std::sync::Arc;

pub struct IpcMenuPort {
    writer: Mutex<SendHalf>,
    listener: Arc<Mutex<Option<Sender<MenuEvent>>>>,
}

impl IpcMenuPort {
    /// Connect to the host shell and start the event reader thread.
    pub fn connect() -> anyhow::Result<Arc<Self>> {
        let name = socket_name().to_ns_name::<GenericNamespaced>()?;
        let stream = Stream::connect(name)?;
        let (recv, send) = stream.split();

        let listener: Arc<Mutex<Option<Sender<MenuEvent>>>> = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&listener);

        std::thread::Builder::new()
            .name("menu-events".to_string())
            .spawn(move || {
                let mut reader = BufReader::new(recv);
                loop {
                    match read_frame::<_, MenuEvent>(&mut reader) {
                        Ok(event) => match slot.lock().as_ref() {
                            Some(tx) => {
                                let _ = tx.send(event);
                            }
                            None => {
                                tracing::debug!("Menu event with no listener, dropped: {:?}", event)
                            }
                        },
                        Err(e) => {
                            tracing::info!("Host menu channel closed: {}", e);
                            break;
                        }
                    }
                }
            })?;

        Ok(Arc::new(Self {
            writer: Mutex::new(send),
            listener,
        }))
    }
}

impl MenuPort for IpcMenuPort {
    fn send_command(&self, command: MenuCommand) {
        // Fire-and-forget: a dead host shell only costs menu sync
        if let Err(e) = write_frame(&mut *self.writer.lock(), &command) {
            tracing::warn!("Failed to send menu command {:?}: {}", command, e);
        }
    }

    fn register_click_listener(&self) -> Receiver<MenuEvent> {
        let (tx, rx) = unbounded();
        *self.listener.lock() = Some(tx);
        rx
    }

    fn clear_click_listeners(&self) {
        *self.listener.lock() = None;
    }
}
