//! Photo grid with multi-select highlighting
//!
//! Tiles are placeholder frames drawn from record metadata; thumbnail
//! bitmaps come from a separate pipeline and are not decoded here.

use app_core::{Orientation, PhotoRecord};
use egui::{Rect, Response, Ui, Vec2};

/// Action returned from grid interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridAction {
    /// Single click: highlight exactly this tile
    Highlight(usize),

    /// Ctrl-click: toggle this tile in the highlight set
    ToggleHighlight(usize),

    /// Double click: open this photo
    Open(usize),
}

/// Per-frame output of the grid
pub struct GridOutput {
    pub action: Option<GridAction>,

    /// Vertical scroll offset of the grid surface after this frame
    pub scroll_top: f32,
}

/// Thumbnail grid component
pub struct PhotoGrid {
    /// Tile edge length
    pub tile_size: f32,

    /// Columns, recomputed from the available width each frame
    columns: usize,
}

impl Default for PhotoGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl PhotoGrid {
    pub fn new() -> Self {
        Self {
            tile_size: 128.0,
            columns: 4,
        }
    }

    pub fn set_tile_size(&mut self, size: f32) {
        self.tile_size = size.clamp(64.0, 512.0);
    }

    /// Render the grid.
    ///
    /// `highlighted` is owned by the caller and only painted here;
    /// `restore_scroll` pins the scroll offset for this one frame.
    pub fn ui(
        &mut self,
        ui: &mut Ui,
        photos: &[PhotoRecord],
        highlighted: &[usize],
        restore_scroll: Option<f32>,
    ) -> GridOutput {
        let mut action = None;

        let item_width = self.tile_size + 16.0;
        self.columns = ((ui.available_width() / item_width).max(1.0)) as usize;

        let ctrl_held = ui.input(|i| i.modifiers.command || i.modifiers.ctrl);

        let mut scroll_area = egui::ScrollArea::vertical().auto_shrink([false, false]);
        if let Some(offset) = restore_scroll {
            scroll_area = scroll_area.vertical_scroll_offset(offset);
        }

        let output = scroll_area.show(ui, |ui| {
            egui::Grid::new("photo_grid")
                .num_columns(self.columns)
                .spacing(Vec2::new(8.0, 8.0))
                .show(ui, |ui| {
                    for (idx, photo) in photos.iter().enumerate() {
                        let is_highlighted = highlighted.contains(&idx);
                        let response = self.render_tile(ui, photo, is_highlighted);

                        if response.double_clicked() {
                            action = Some(GridAction::Open(idx));
                        } else if response.clicked() {
                            action = Some(if ctrl_held {
                                GridAction::ToggleHighlight(idx)
                            } else {
                                GridAction::Highlight(idx)
                            });
                        }

                        if (idx + 1) % self.columns == 0 {
                            ui.end_row();
                        }
                    }
                });
        });

        GridOutput {
            action,
            scroll_top: output.state.offset.y,
        }
    }

    /// Render a single placeholder tile
    fn render_tile(&self, ui: &mut Ui, photo: &PhotoRecord, is_highlighted: bool) -> Response {
        let item_size = Vec2::new(self.tile_size + 8.0, self.tile_size + 28.0);
        let (rect, response) = ui.allocate_exact_size(item_size, egui::Sense::click());

        if !ui.is_rect_visible(rect) {
            return response;
        }

        let painter = ui.painter();

        let bg = if is_highlighted {
            egui::Color32::from_rgba_unmultiplied(100, 150, 255, 80)
        } else if response.hovered() {
            egui::Color32::from_rgba_unmultiplied(100, 100, 100, 40)
        } else {
            egui::Color32::TRANSPARENT
        };
        painter.rect_filled(rect, 4.0, bg);

        if is_highlighted {
            painter.rect_stroke(
                rect,
                4.0,
                egui::Stroke::new(2.0, egui::Color32::from_rgb(100, 150, 255)),
            );
        }

        // Placeholder frame, rotated footprint for sideways photos
        let thumb_rect = Rect::from_min_size(
            rect.min + Vec2::new(4.0, 4.0),
            Vec2::splat(self.tile_size),
        );
        painter.rect_filled(thumb_rect, 2.0, egui::Color32::from_gray(40));

        let frame = match photo.orientation {
            Orientation::Normal => {
                Rect::from_center_size(thumb_rect.center(), Vec2::new(0.8, 0.6) * self.tile_size)
            }
            Orientation::MinusNinety => {
                Rect::from_center_size(thumb_rect.center(), Vec2::new(0.6, 0.8) * self.tile_size)
            }
        };
        painter.rect_stroke(frame, 2.0, egui::Stroke::new(1.0, egui::Color32::GRAY));

        if photo.flagged {
            painter.text(
                thumb_rect.right_top() + Vec2::new(-10.0, 10.0),
                egui::Align2::CENTER_CENTER,
                "⚑",
                egui::FontId::proportional(16.0),
                egui::Color32::from_rgb(234, 179, 8),
            );
        }

        let label_pos = egui::pos2(rect.center().x, thumb_rect.max.y + 12.0);
        let max_chars = (self.tile_size / 8.0) as usize;
        let name = if photo.name.len() > max_chars {
            format!("{}...", &photo.name[..max_chars.saturating_sub(3)])
        } else {
            photo.name.clone()
        };

        painter.text(
            label_pos,
            egui::Align2::CENTER_CENTER,
            name,
            egui::FontId::proportional(11.0),
            if is_highlighted {
                egui::Color32::WHITE
            } else {
                egui::Color32::LIGHT_GRAY
            },
        );

        response
    }

    pub fn columns(&self) -> usize {
        self.columns
    }
}
