//! Shutterdeck UI layer
//!
//! Provides:
//! - egui-based library components
//! - The library view controller
//! - wgpu rendering pipeline
//! - Keymap-scoped input handling

pub mod components;
pub mod input;
pub mod library;
pub mod renderer;
pub mod theme;

pub use input::{InputHandler, KeymapBinding};
pub use library::{LibraryView, Modal};
pub use renderer::Renderer;
pub use theme::Theme;
