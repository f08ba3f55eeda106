//! Single-photo detail screen

use app_core::{Orientation, PhotoRecord};
use egui::Ui;

/// Action returned from detail-screen interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailAction {
    Back,
    Prev,
    Next,
    ToggleFlag,
    ToggleDiff,
}

/// Detail screen for the open photo
#[derive(Default)]
pub struct PictureDetail;

impl PictureDetail {
    /// Render the detail screen. `at_edge` is true at either end of the
    /// collection and disables navigation in both directions.
    pub fn ui(&mut self, ui: &mut Ui, photo: &PhotoRecord, at_edge: bool) -> Option<DetailAction> {
        let mut action = None;

        ui.horizontal(|ui| {
            if ui.button("⬅ Library").clicked() {
                action = Some(DetailAction::Back);
            }

            ui.separator();

            if ui.add_enabled(!at_edge, egui::Button::new("◀")).clicked() {
                action = Some(DetailAction::Prev);
            }
            if ui.add_enabled(!at_edge, egui::Button::new("▶")).clicked() {
                action = Some(DetailAction::Next);
            }

            ui.separator();

            let flag_label = if photo.flagged { "⚑ Flagged" } else { "⚐ Flag" };
            if ui.button(flag_label).clicked() {
                action = Some(DetailAction::ToggleFlag);
            }

            if ui.button("⇄ Compare").clicked() {
                action = Some(DetailAction::ToggleDiff);
            }
        });

        ui.separator();

        self.render_photo(ui, photo);

        action
    }

    fn render_photo(&self, ui: &mut Ui, photo: &PhotoRecord) {
        let available = ui.available_rect_before_wrap();
        let painter = ui.painter();

        painter.rect_filled(available, 0.0, egui::Color32::from_rgb(24, 24, 26));

        // Placeholder frame standing in for the decoded image
        let side = available.width().min(available.height()) * 0.7;
        let frame_size = match photo.orientation {
            Orientation::Normal => egui::vec2(side, side * 0.75),
            Orientation::MinusNinety => egui::vec2(side * 0.75, side),
        };
        let frame = egui::Rect::from_center_size(available.center(), frame_size);
        painter.rect_stroke(frame, 4.0, egui::Stroke::new(1.5, egui::Color32::GRAY));

        painter.text(
            frame.center(),
            egui::Align2::CENTER_CENTER,
            &photo.name,
            egui::FontId::proportional(18.0),
            egui::Color32::LIGHT_GRAY,
        );

        let caption = match &photo.captured_at {
            Some(at) => format!("{} · captured {}", photo.thumb, at.format("%Y-%m-%d %H:%M")),
            None => photo.thumb.clone(),
        };
        painter.text(
            frame.center_bottom() + egui::vec2(0.0, 20.0),
            egui::Align2::CENTER_CENTER,
            caption,
            egui::FontId::proportional(12.0),
            egui::Color32::DARK_GRAY,
        );
    }
}
