//! Application error types

use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    // ===== Recoverable Errors (notify user, continue) =====
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Unknown photo: {0}")]
    UnknownPhoto(u64),

    #[error("Menu channel error: {0}")]
    MenuChannel(String),

    // ===== Fatal Errors (application termination) =====
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Initialization failed: {0}")]
    Init(String),
}

impl AppError {
    /// Is this error recoverable?
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::Io(_)
                | AppError::Catalog(_)
                | AppError::UnknownPhoto(_)
                | AppError::MenuChannel(_)
        )
    }

    /// Is this a fatal error?
    pub fn is_fatal(&self) -> bool {
        !self.is_recoverable()
    }

    /// Get a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            AppError::Catalog(msg) => format!("Cannot read the photo catalog: {msg}"),
            AppError::UnknownPhoto(id) => format!("Photo no longer in the library (id {id})"),
            AppError::MenuChannel(_) => "Lost connection to the application menu".to_string(),
            _ => self.to_string(),
        }
    }
}

impl From<menu_proto::ProtoError> for AppError {
    fn from(e: menu_proto::ProtoError) -> Self {
        AppError::MenuChannel(e.to_string())
    }
}
