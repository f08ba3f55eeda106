//! Application configuration

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub library: LibraryConfig,
    pub keybindings: HashMap<String, Vec<String>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            library: LibraryConfig::default(),
            keybindings: default_keybindings(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub theme: String,
    pub start_maximized: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            start_maximized: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Catalog file holding resolved photo records; defaults to the
    /// application data directory when unset.
    pub catalog_path: Option<PathBuf>,

    /// Grid tile size in logical pixels
    pub tile_size: u32,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            tile_size: 128,
        }
    }
}

impl AppConfig {
    /// Load configuration from file
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Self = toml::from_str(&content)?;
            tracing::info!("Configuration loaded from {:?}", config_path);
            Ok(config)
        } else {
            tracing::info!("Using default configuration");
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;

        tracing::info!("Configuration saved to {:?}", config_path);
        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("com", "Shutterdeck", "Shutterdeck")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("./config.toml"))
    }
}

fn default_keybindings() -> HashMap<String, Vec<String>> {
    let mut kb = HashMap::new();

    // Library
    kb.insert("library.confirm".into(), vec!["Return".into()]);
    kb.insert("library.back".into(), vec!["Escape".into(), "Backspace".into()]);
    kb.insert("library.next".into(), vec!["Right".into(), "l".into()]);
    kb.insert("library.prev".into(), vec!["Left".into(), "h".into()]);
    kb.insert("library.toggle_flag".into(), vec!["f".into()]);
    kb.insert("library.toggle_diff".into(), vec!["d".into()]);

    // App
    kb.insert("app.quit".into(), vec!["Ctrl+q".into()]);

    kb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_round_trip_through_toml() {
        let config = AppConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();

        assert_eq!(parsed.general.theme, "dark");
        assert_eq!(parsed.library.tile_size, 128);
        assert_eq!(parsed.keybindings, config.keybindings);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let parsed: AppConfig = toml::from_str("[general]\ntheme = \"light\"\n").unwrap();

        assert_eq!(parsed.general.theme, "light");
        assert_eq!(parsed.library.tile_size, 128);
        assert!(parsed.keybindings.contains_key("library.confirm"));
    }
}
