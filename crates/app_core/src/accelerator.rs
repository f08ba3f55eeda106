//! Host menu accelerator for the export action
//!
//! The host shell owns the native "Export Selection" menu item; this module
//! toggles its enablement and routes click events back to the view. At most
//! one click listener exists at a time: registering replaces any prior
//! listener at the port, and deactivation consumes the subscription, so
//! repeated activate/deactivate cycles cannot leak handlers.

use crossbeam_channel::Receiver;
use menu_proto::{MenuCommand, MenuEvent};
use std::sync::Arc;

/// UI-process side of the host menu channel
pub trait MenuPort: Send + Sync {
    /// Fire-and-forget command to the host shell
    fn send_command(&self, command: MenuCommand);

    /// Register interest in menu clicks. Replaces any previously
    /// registered listener; stale receivers go dead instead of leaking.
    fn register_click_listener(&self) -> Receiver<MenuEvent>;

    /// Drop every registered listener
    fn clear_click_listeners(&self);
}

/// Port used when no host shell is reachable; commands are dropped and no
/// click can ever arrive.
pub struct DisconnectedMenuPort;

impl MenuPort for DisconnectedMenuPort {
    fn send_command(&self, command: MenuCommand) {
        tracing::debug!("No host shell, dropping {:?}", command);
    }

    fn register_click_listener(&self) -> Receiver<MenuEvent> {
        let (_tx, rx) = crossbeam_channel::unbounded();
        rx
    }

    fn clear_click_listeners(&self) {}
}

/// Click subscription held while the accelerator is active. Deactivation
/// consumes it; without one, clicks are structurally unobservable.
struct AcceleratorSubscription {
    clicks: Receiver<MenuEvent>,
}

/// Enablement state machine for the export menu accelerator
pub struct ExportAccelerator {
    port: Arc<dyn MenuPort>,
    subscription: Option<AcceleratorSubscription>,
}

impl ExportAccelerator {
    pub fn new(port: Arc<dyn MenuPort>) -> Self {
        Self {
            port,
            subscription: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.subscription.is_some()
    }

    /// Enable the menu item and start listening for clicks. Deduped: an
    /// already-active accelerator is left untouched.
    pub fn activate(&mut self) {
        if self.subscription.is_some() {
            return;
        }

        self.port.send_command(MenuCommand::SetExportEnabled(true));
        let clicks = self.port.register_click_listener();
        self.subscription = Some(AcceleratorSubscription { clicks });
        tracing::debug!("Export accelerator activated");
    }

    /// Disable the menu item and drop the click listener. Safe to call
    /// any number of times, including before the first activation.
    pub fn deactivate(&mut self) {
        if self.subscription.take().is_none() {
            return;
        }

        self.port.send_command(MenuCommand::SetExportEnabled(false));
        self.port.clear_click_listeners();
        tracing::debug!("Export accelerator deactivated");
    }

    /// A pending menu click, observable only while active.
    pub fn poll_clicked(&self) -> Option<MenuEvent> {
        self.subscription
            .as_ref()
            .and_then(|sub| sub.clicks.try_recv().ok())
    }
}

impl Drop for ExportAccelerator {
    fn drop(&mut self) {
        self.deactivate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::Sender;
    use parking_lot::Mutex;

    /// Port double that records commands and lets tests inject clicks
    #[derive(Default)]
    struct RecordingPort {
        commands: Mutex<Vec<MenuCommand>>,
        registrations: Mutex<usize>,
        listener: Mutex<Option<Sender<MenuEvent>>>,
    }

    impl RecordingPort {
        fn click(&self) {
            if let Some(tx) = self.listener.lock().as_ref() {
                let _ = tx.send(MenuEvent::ExportClicked);
            }
        }

        fn commands(&self) -> Vec<MenuCommand> {
            self.commands.lock().clone()
        }
    }

    impl MenuPort for RecordingPort {
        fn send_command(&self, command: MenuCommand) {
            self.commands.lock().push(command);
        }

        fn register_click_listener(&self) -> Receiver<MenuEvent> {
            let (tx, rx) = crossbeam_channel::unbounded();
            *self.listener.lock() = Some(tx);
            *self.registrations.lock() += 1;
            rx
        }

        fn clear_click_listeners(&self) {
            *self.listener.lock() = None;
        }
    }

    #[test]
    fn test_activation_is_deduped() {
        let port = Arc::new(RecordingPort::default());
        let mut accel = ExportAccelerator::new(Arc::clone(&port) as Arc<dyn MenuPort>);

        accel.activate();
        accel.activate();
        accel.activate();

        assert!(accel.is_active());
        assert_eq!(port.commands(), vec![MenuCommand::SetExportEnabled(true)]);
        assert_eq!(*port.registrations.lock(), 1);
    }

    #[test]
    fn test_deactivation_is_idempotent() {
        let port = Arc::new(RecordingPort::default());
        let mut accel = ExportAccelerator::new(Arc::clone(&port) as Arc<dyn MenuPort>);

        // Never activated: nothing to tear down, nothing sent
        accel.deactivate();
        assert!(port.commands().is_empty());

        accel.activate();
        accel.deactivate();
        accel.deactivate();

        assert_eq!(
            port.commands(),
            vec![
                MenuCommand::SetExportEnabled(true),
                MenuCommand::SetExportEnabled(false),
            ]
        );
    }

    #[test]
    fn test_clicks_observable_only_while_active() {
        let port = Arc::new(RecordingPort::default());
        let mut accel = ExportAccelerator::new(Arc::clone(&port) as Arc<dyn MenuPort>);

        assert!(accel.poll_clicked().is_none());

        accel.activate();
        port.click();
        assert_eq!(accel.poll_clicked(), Some(MenuEvent::ExportClicked));
        assert!(accel.poll_clicked().is_none());

        // A click queued before deactivation is gone with the subscription
        port.click();
        accel.deactivate();
        assert!(accel.poll_clicked().is_none());
    }

    #[test]
    fn test_reactivation_replaces_listener() {
        let port = Arc::new(RecordingPort::default());
        let mut accel = ExportAccelerator::new(Arc::clone(&port) as Arc<dyn MenuPort>);

        accel.activate();
        accel.deactivate();
        accel.activate();

        assert_eq!(*port.registrations.lock(), 2);
        port.click();
        assert_eq!(accel.poll_clicked(), Some(MenuEvent::ExportClicked));
    }
}
