//! UI components for the library screens

pub mod detail;
pub mod diff;
pub mod empty_state;
pub mod export_dialog;
pub mod grid;

pub use detail::{DetailAction, PictureDetail};
pub use diff::{split_layout, DiffAction, PictureDiff};
pub use empty_state::EmptyLibrary;
pub use export_dialog::{Dialog, DialogResult, ExportDialog, ExportRequest};
pub use grid::{GridAction, GridOutput, PhotoGrid};
