//! Export dialog

use app_core::PhotoRecord;
use egui::{Align2, Context, Window};

/// Result of dialog interaction
pub enum DialogResult<T> {
    /// Still showing, nothing decided
    None,
    /// Confirmed
    Ok(T),
    /// Dismissed
    Cancel,
}

/// Common dialog trait
pub trait Dialog {
    type Output;
    fn ui(&mut self, ctx: &Context) -> DialogResult<Self::Output>;
    fn is_open(&self) -> bool;
    fn close(&mut self);
}

/// What the user asked to export. Encoding happens elsewhere.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub photos: Vec<PhotoRecord>,
    pub destination: String,
}

/// Modal export dialog over a snapshot of the highlighted photos
pub struct ExportDialog {
    open: bool,
    photos: Vec<PhotoRecord>,
    destination: String,
}

impl ExportDialog {
    pub fn new(photos: Vec<PhotoRecord>) -> Self {
        Self {
            open: true,
            photos,
            destination: String::new(),
        }
    }

    pub fn photos(&self) -> &[PhotoRecord] {
        &self.photos
    }
}

impl Dialog for ExportDialog {
    type Output = ExportRequest;

    fn ui(&mut self, ctx: &Context) -> DialogResult<ExportRequest> {
        if !self.open {
            return DialogResult::None;
        }

        let mut result = DialogResult::None;

        Window::new("Export Photos")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(format!(
                    "{} photo{} selected",
                    self.photos.len(),
                    if self.photos.len() == 1 { "" } else { "s" }
                ));

                for photo in self.photos.iter().take(5) {
                    ui.label(egui::RichText::new(&photo.name).weak());
                }
                if self.photos.len() > 5 {
                    ui.label(egui::RichText::new(format!("... and {} more", self.photos.len() - 5)).weak());
                }

                ui.add_space(8.0);

                ui.horizontal(|ui| {
                    ui.label("Destination:");
                    ui.text_edit_singleline(&mut self.destination);
                });

                ui.add_space(16.0);

                ui.horizontal(|ui| {
                    let can_export = !self.photos.is_empty() && !self.destination.is_empty();
                    if ui.add_enabled(can_export, egui::Button::new("Export")).clicked() {
                        result = DialogResult::Ok(ExportRequest {
                            photos: self.photos.clone(),
                            destination: self.destination.clone(),
                        });
                        self.open = false;
                    }

                    if ui.button("Cancel").clicked() {
                        result = DialogResult::Cancel;
                        self.open = false;
                    }
                });
            });

        result
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn close(&mut self) {
        self.open = false;
    }
}
