//! Input handling and keybinding resolution
//!
//! Key chords resolve to commands only while a [`KeymapBinding`] is held,
//! so shortcuts are scoped to the view that acquired the binding. The
//! binding is a plain handle: acquire on mount, drop on unmount.

use app_core::Command;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{Key, ModifiersState, NamedKey};

/// Input handler that maps key chords to commands
pub struct InputHandler {
    /// Key string -> command id
    bindings: HashMap<String, String>,

    /// Current modifier state
    modifiers: ModifiersState,

    /// Live keymap scope; `None` or dead means no view is bound
    scope: Mutex<Weak<()>>,
}

impl InputHandler {
    /// Create a handler from a `command id -> key chords` map.
    pub fn new(bindings: HashMap<String, Vec<String>>) -> Self {
        // Invert the map: resolution goes key -> command
        let mut key_to_command = HashMap::new();
        for (command, keys) in bindings {
            for key in keys {
                key_to_command.insert(key.to_lowercase(), command.clone());
            }
        }

        Self {
            bindings: key_to_command,
            modifiers: ModifiersState::empty(),
            scope: Mutex::new(Weak::new()),
        }
    }

    /// Scope key resolution to the holder of the returned binding. A later
    /// bind supersedes an earlier one.
    pub fn bind(&self) -> KeymapBinding {
        let token = Arc::new(());
        *self.scope.lock() = Arc::downgrade(&token);
        KeymapBinding { _token: token }
    }

    fn is_bound(&self) -> bool {
        self.scope.lock().strong_count() > 0
    }

    /// Update modifier state
    pub fn update_modifiers(&mut self, modifiers: ModifiersState) {
        self.modifiers = modifiers;
    }

    /// Handle a key event and return the corresponding command
    pub fn handle_key(&self, event: &KeyEvent) -> Option<Command> {
        self.resolve(&event.logical_key, event.state)
    }

    /// Resolve a logical key press to a command, if one is bound and a
    /// keymap scope is active.
    pub fn resolve(&self, key: &Key, state: ElementState) -> Option<Command> {
        if state != ElementState::Pressed || !self.is_bound() {
            return None;
        }

        let key_str = key_to_string(key);
        if key_str.is_empty() {
            return None;
        }

        let chord = self.build_chord(&key_str);
        tracing::trace!("Key pressed: {}", chord);

        self.bindings
            .get(&chord.to_lowercase())
            .map(|id| Command::new(id))
    }

    /// Build a chord string with modifiers
    fn build_chord(&self, key: &str) -> String {
        let mut parts = Vec::new();

        if self.modifiers.control_key() {
            parts.push("Ctrl");
        }
        if self.modifiers.alt_key() {
            parts.push("Alt");
        }
        if self.modifiers.shift_key() {
            parts.push("Shift");
        }
        if self.modifiers.super_key() {
            parts.push("Super");
        }

        parts.push(key);
        parts.join("+")
    }
}

/// Keymap scope handle. Dropping it releases the scope.
pub struct KeymapBinding {
    _token: Arc<()>,
}

fn key_to_string(key: &Key) -> String {
    match key {
        Key::Named(named) => match named {
            NamedKey::Space => "Space".to_string(),
            NamedKey::Enter => "Return".to_string(),
            NamedKey::Tab => "Tab".to_string(),
            NamedKey::Escape => "Escape".to_string(),
            NamedKey::Backspace => "Backspace".to_string(),
            NamedKey::Delete => "Delete".to_string(),
            NamedKey::Home => "Home".to_string(),
            NamedKey::End => "End".to_string(),
            NamedKey::PageUp => "PageUp".to_string(),
            NamedKey::PageDown => "PageDown".to_string(),
            NamedKey::ArrowUp => "Up".to_string(),
            NamedKey::ArrowDown => "Down".to_string(),
            NamedKey::ArrowLeft => "Left".to_string(),
            NamedKey::ArrowRight => "Right".to_string(),
            _ => format!("{:?}", named),
        },
        Key::Character(c) => c.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use app_core::CommandId;

    fn handler() -> InputHandler {
        InputHandler::new(app_core::AppConfig::default().keybindings)
    }

    fn press(h: &InputHandler, key: Key) -> Option<Command> {
        h.resolve(&key, ElementState::Pressed)
    }

    #[test]
    fn test_resolution_requires_a_binding() {
        let h = handler();
        assert!(press(&h, Key::Named(NamedKey::Enter)).is_none());

        let binding = h.bind();
        let cmd = press(&h, Key::Named(NamedKey::Enter)).unwrap();
        assert_eq!(cmd.id.as_str(), CommandId::LIBRARY_CONFIRM);

        drop(binding);
        assert!(press(&h, Key::Named(NamedKey::Enter)).is_none());
    }

    #[test]
    fn test_character_and_named_keys() {
        let h = handler();
        let _binding = h.bind();

        let cmd = press(&h, Key::Character("f".into())).unwrap();
        assert_eq!(cmd.id.as_str(), CommandId::LIBRARY_TOGGLE_FLAG);

        let cmd = press(&h, Key::Named(NamedKey::Escape)).unwrap();
        assert_eq!(cmd.id.as_str(), CommandId::LIBRARY_BACK);

        assert!(press(&h, Key::Character("z".into())).is_none());
    }

    #[test]
    fn test_modifier_chord() {
        let mut h = handler();
        let _binding = h.bind();

        assert!(press(&h, Key::Character("q".into())).is_none());

        h.update_modifiers(ModifiersState::CONTROL);
        let cmd = press(&h, Key::Character("q".into())).unwrap();
        assert_eq!(cmd.id.as_str(), CommandId::APP_QUIT);
    }

    #[test]
    fn test_release_is_ignored() {
        let h = handler();
        let _binding = h.bind();

        assert!(h
            .resolve(&Key::Named(NamedKey::Enter), ElementState::Released)
            .is_none());
    }

    #[test]
    fn test_later_bind_supersedes() {
        let h = handler();
        let first = h.bind();
        let second = h.bind();

        // The first binding no longer scopes resolution once superseded
        drop(second);
        assert!(press(&h, Key::Named(NamedKey::Enter)).is_none());
        drop(first);
    }
}
