//! Application theming

use egui::{Color32, Visuals};

/// Application theme
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub background: Color32,
    pub surface: Color32,
    pub text: Color32,
    pub text_secondary: Color32,
    pub accent: Color32,
    pub flag: Color32,
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            background: Color32::from_rgb(28, 28, 30),
            surface: Color32::from_rgb(44, 44, 46),
            text: Color32::from_rgb(240, 240, 240),
            text_secondary: Color32::from_rgb(160, 160, 160),
            accent: Color32::from_rgb(100, 149, 237),
            flag: Color32::from_rgb(234, 179, 8),
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            background: Color32::from_rgb(248, 248, 248),
            surface: Color32::from_rgb(255, 255, 255),
            text: Color32::from_rgb(32, 32, 32),
            text_secondary: Color32::from_rgb(100, 100, 100),
            accent: Color32::from_rgb(59, 130, 246),
            flag: Color32::from_rgb(202, 138, 4),
        }
    }

    pub fn by_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Apply theme to egui
    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = if self.name == "light" {
            Visuals::light()
        } else {
            Visuals::dark()
        };

        visuals.panel_fill = self.background;
        visuals.window_fill = self.surface;
        visuals.selection.bg_fill = self.accent.gamma_multiply(0.4);

        ctx.set_visuals(visuals);
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
