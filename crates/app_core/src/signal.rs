//! Process-local signal bus
//!
//! Application-level signals decouple the input layer from the views that
//! react to them. A subscription is a live channel receiver; dropping it
//! unsubscribes, so teardown cannot be forgotten.

use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::Mutex;
use std::sync::Arc;

/// Application-level signals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    /// A grid selection was confirmed (Enter)
    ConfirmSelection,
}

/// Fan-out bus for [`Signal`]s
#[derive(Default)]
pub struct SignalBus {
    subscribers: Mutex<Vec<(Signal, Sender<Signal>)>>,
}

impl SignalBus {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Subscribe to one signal. The subscription lives until dropped.
    pub fn subscribe(&self, signal: Signal) -> SignalSubscription {
        let (tx, rx) = unbounded();
        self.subscribers.lock().push((signal, tx));
        SignalSubscription { rx }
    }

    /// Deliver a signal to every live subscription, pruning dead ones.
    pub fn raise(&self, signal: Signal) {
        self.subscribers
            .lock()
            .retain(|(wanted, tx)| *wanted != signal || tx.send(signal).is_ok());
    }
}

/// Live subscription to a signal. Dropping it unsubscribes.
pub struct SignalSubscription {
    rx: Receiver<Signal>,
}

impl SignalSubscription {
    /// Next queued delivery, if any.
    pub fn try_next(&self) -> Option<Signal> {
        self.rx.try_recv().ok()
    }
}
