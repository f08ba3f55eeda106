//! Empty-library screen

use egui::Ui;

/// Shown while the library has no photos
pub struct EmptyLibrary;

impl EmptyLibrary {
    pub fn ui(&self, ui: &mut Ui) {
        let available = ui.available_rect_before_wrap();

        ui.painter().text(
            available.center() - egui::vec2(0.0, 16.0),
            egui::Align2::CENTER_CENTER,
            "No photos yet",
            egui::FontId::proportional(24.0),
            egui::Color32::GRAY,
        );

        ui.painter().text(
            available.center() + egui::vec2(0.0, 16.0),
            egui::Align2::CENTER_CENTER,
            "Photos appear here once the catalog has been scanned",
            egui::FontId::proportional(13.0),
            egui::Color32::DARK_GRAY,
        );
    }
}
