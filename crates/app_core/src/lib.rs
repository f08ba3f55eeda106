//! Shutterdeck core domain logic
//!
//! This crate contains:
//! - The library store (photos, current selection, diff flag)
//! - Screen selection for the library view
//! - Photo records and the catalog collaborator
//! - Signal bus and the export menu accelerator
//! - Commands, configuration and error types

pub mod accelerator;
pub mod catalog;
pub mod command;
pub mod config;
pub mod error;
pub mod photo;
pub mod screen;
pub mod signal;
pub mod store;

pub use accelerator::{DisconnectedMenuPort, ExportAccelerator, MenuPort};
pub use catalog::{JsonCatalog, PhotoSource};
pub use command::{Command, CommandId};
pub use config::{AppConfig, GeneralConfig, LibraryConfig};
pub use error::AppError;
pub use photo::{Orientation, PhotoId, PhotoRecord};
pub use screen::{is_edge, select_screen, Screen};
pub use signal::{Signal, SignalBus, SignalSubscription};
pub use store::{LibraryAction, LibraryState, LibraryStore, StoreHandle};

// Re-exported so UI code only needs the core crate for menu types.
pub use menu_proto::{MenuCommand, MenuEvent};
