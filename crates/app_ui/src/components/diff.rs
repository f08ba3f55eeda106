//! Comparison screen for the open photo
//!
//! Renders the photo side by side with its reference version.

use app_core::PhotoRecord;
use egui::{Rect, Ui};

/// Action returned from comparison-screen interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffAction {
    /// Leave comparison mode
    Back,
}

/// Side-by-side comparison screen
#[derive(Default)]
pub struct PictureDiff;

/// Split a viewport into two equal panes with a gap between them.
pub fn split_layout(viewport: Rect, gap: f32) -> (Rect, Rect) {
    let pane_width = (viewport.width() - gap) / 2.0;

    let left = Rect::from_min_size(viewport.min, egui::vec2(pane_width, viewport.height()));
    let right = Rect::from_min_size(
        egui::pos2(viewport.min.x + pane_width + gap, viewport.min.y),
        egui::vec2(pane_width, viewport.height()),
    );

    (left, right)
}

impl PictureDiff {
    pub fn ui(&mut self, ui: &mut Ui, photo: &PhotoRecord) -> Option<DiffAction> {
        let mut action = None;

        ui.horizontal(|ui| {
            if ui.button("⬅ Detail").clicked() {
                action = Some(DiffAction::Back);
            }
            ui.separator();
            ui.label(format!("Comparing {}", photo.name));
        });

        ui.separator();

        let available = ui.available_rect_before_wrap();
        let (left, right) = split_layout(available, 8.0);

        self.render_pane(ui, left, photo, "Reference");
        self.render_pane(ui, right, photo, "Current");

        action
    }

    fn render_pane(&self, ui: &Ui, pane: Rect, photo: &PhotoRecord, caption: &str) {
        let painter = ui.painter();

        painter.rect_filled(pane, 2.0, egui::Color32::from_rgb(24, 24, 26));

        let frame = Rect::from_center_size(pane.center(), pane.size() * 0.8);
        painter.rect_stroke(frame, 4.0, egui::Stroke::new(1.5, egui::Color32::GRAY));

        painter.text(
            frame.center(),
            egui::Align2::CENTER_CENTER,
            &photo.name,
            egui::FontId::proportional(14.0),
            egui::Color32::LIGHT_GRAY,
        );

        painter.text(
            pane.center_top() + egui::vec2(0.0, 14.0),
            egui::Align2::CENTER_CENTER,
            caption,
            egui::FontId::proportional(12.0),
            egui::Color32::GRAY,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_layout_halves_the_viewport() {
        let viewport = Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(808.0, 600.0));
        let (left, right) = split_layout(viewport, 8.0);

        assert_eq!(left.width(), 400.0);
        assert_eq!(right.width(), 400.0);
        assert_eq!(left.height(), 600.0);
        assert_eq!(right.min.x, 408.0);
    }
}
