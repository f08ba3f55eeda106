//! Command ids for user actions

use serde::{Deserialize, Serialize};

/// Command identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommandId(pub String);

impl CommandId {
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    // Library commands
    pub const LIBRARY_CONFIRM: &'static str = "library.confirm";
    pub const LIBRARY_BACK: &'static str = "library.back";
    pub const LIBRARY_NEXT: &'static str = "library.next";
    pub const LIBRARY_PREV: &'static str = "library.prev";
    pub const LIBRARY_TOGGLE_FLAG: &'static str = "library.toggle_flag";
    pub const LIBRARY_TOGGLE_DIFF: &'static str = "library.toggle_diff";

    // App commands
    pub const APP_QUIT: &'static str = "app.quit";
}

/// A resolved user command
#[derive(Debug, Clone)]
pub struct Command {
    pub id: CommandId,
}

impl Command {
    pub fn new(id: &str) -> Self {
        Self {
            id: CommandId::new(id),
        }
    }
}
