//! Library view controller
//!
//! Owns the transient UI state of the library (grid highlight set, saved
//! scroll offset, active modal) and renders exactly one of the four
//! screens derived from store state. Also keeps the host shell's export
//! menu accelerator in sync with whether exporting is currently possible:
//! active iff the grid is showing, no modal is up and at least one photo
//! is highlighted.

use crate::components::{
    Dialog, DialogResult, EmptyLibrary, ExportDialog, GridAction, PhotoGrid, PictureDetail,
    PictureDiff,
};
use crate::components::{DetailAction, DiffAction};
use crate::input::{InputHandler, KeymapBinding};
use app_core::screen::{select_screen, Screen};
use app_core::{
    Command, CommandId, ExportAccelerator, LibraryAction, LibraryState, MenuPort, PhotoRecord,
    Signal, SignalBus, SignalSubscription, StoreHandle,
};
use std::sync::Arc;

/// Overlay dialog state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Modal {
    #[default]
    None,
    Export,
}

/// Scroll-restoration callback supplied by the parent shell
pub type ScrollCallback = Box<dyn FnMut(f32)>;

pub struct LibraryView {
    store: StoreHandle,
    signals: Arc<SignalBus>,
    accelerator: ExportAccelerator,
    set_scroll_top: ScrollCallback,

    // Transient UI state, lives as long as the view
    highlighted: Vec<usize>,
    scroll_top: f32,
    surface_scroll: f32,
    modal: Modal,
    photos_to_export: Vec<PhotoRecord>,

    // Listener handles; `None` while torn down
    confirm: Option<SignalSubscription>,
    keymap: Option<KeymapBinding>,

    // Screen components
    grid: PhotoGrid,
    detail: PictureDetail,
    diff: PictureDiff,
    empty: EmptyLibrary,
    dialog: Option<ExportDialog>,
}

impl LibraryView {
    pub fn new(
        store: StoreHandle,
        signals: Arc<SignalBus>,
        port: Arc<dyn MenuPort>,
        set_scroll_top: ScrollCallback,
    ) -> Self {
        Self {
            store,
            signals,
            accelerator: ExportAccelerator::new(port),
            set_scroll_top,
            highlighted: Vec::new(),
            scroll_top: 0.0,
            surface_scroll: 0.0,
            modal: Modal::None,
            photos_to_export: Vec::new(),
            confirm: None,
            keymap: None,
            grid: PhotoGrid::new(),
            detail: PictureDetail,
            diff: PictureDiff,
            empty: EmptyLibrary,
            dialog: None,
        }
    }

    /// Bring the view up: request the photo collection, bind event
    /// listeners and scope the keymap to this view.
    pub fn mount(&mut self, input: &InputHandler) {
        self.store.dispatch(LibraryAction::GetPhotos);
        self.bind_event_listeners();
        self.keymap = Some(input.bind());
    }

    /// Tear the view down. Safe to call even if listeners were never
    /// established.
    pub fn unmount(&mut self) {
        self.unbind_event_listeners();
        self.keymap = None;
    }

    fn bind_event_listeners(&mut self) {
        if self.confirm.is_none() {
            self.confirm = Some(self.signals.subscribe(Signal::ConfirmSelection));
        }
        if !self.highlighted.is_empty() {
            self.accelerator.activate();
        }
    }

    fn unbind_event_listeners(&mut self) {
        self.confirm = None;
        self.accelerator.deactivate();
    }

    /// Open the photo at `target`, or return to the grid with `None`.
    ///
    /// The mutation is dispatched to the store and becomes visible on a
    /// later pass. Leaving an open photo captures the surface scroll
    /// offset for one-shot restoration on the next grid render.
    pub fn select_current(&mut self, state: &LibraryState, target: Option<usize>) {
        self.store.dispatch(LibraryAction::SetCurrent(target));

        if state.current.is_some() {
            self.scroll_top = self.surface_scroll;
        }
    }

    /// Toggle the flag of the open photo. Without an open photo this is
    /// the caller's mistake and quietly does nothing.
    pub fn toggle_current_flag(&self, state: &LibraryState) {
        let Some(index) = state.current else { return };
        let Some(photo) = state.photos.get(index) else { return };
        self.store.dispatch(LibraryAction::ToggleFlag(photo.id));
    }

    /// Enter commits a single highlighted grid item; any other highlight
    /// count leaves the selection untouched.
    pub fn confirm_selection(&mut self, state: &LibraryState) {
        if let [index] = self.highlighted[..] {
            self.select_current(state, Some(index));
        }
    }

    /// Record the current scroll offset of the rendering surface.
    pub fn note_surface_scroll(&mut self, offset: f32) {
        self.surface_scroll = offset;
    }

    /// Drain queued signals and menu clicks. Runs once per frame, before
    /// store processing.
    pub fn pump(&mut self, state: &LibraryState) {
        loop {
            let confirmed = match &self.confirm {
                Some(sub) => sub.try_next().is_some(),
                None => false,
            };
            if !confirmed {
                break;
            }
            self.confirm_selection(state);
        }

        if self.accelerator.poll_clicked().is_some() {
            self.open_export_dialog(state);
        }
    }

    /// Post-update synchronization; runs after every state change and is
    /// harmless to repeat.
    pub fn after_update(&mut self, state: &LibraryState) {
        if state.current.is_some() || self.modal != Modal::None {
            self.accelerator.deactivate();
        } else if !self.highlighted.is_empty() {
            self.accelerator.activate();
        } else {
            self.accelerator.deactivate();
        }

        if state.current.is_none() && self.scroll_top > 0.0 {
            (self.set_scroll_top)(self.scroll_top);
            self.scroll_top = 0.0;
        }
    }

    /// Accelerator click: snapshot the highlighted photos and raise the
    /// export modal. Listeners stay down until the dialog closes.
    fn open_export_dialog(&mut self, state: &LibraryState) {
        self.unbind_event_listeners();

        self.photos_to_export = self
            .highlighted
            .iter()
            .filter_map(|&i| state.photos.get(i).cloned())
            .collect();
        self.dialog = Some(ExportDialog::new(self.photos_to_export.clone()));
        self.modal = Modal::Export;
    }

    /// Close the export dialog and re-establish listeners as on mount.
    pub fn close_export_dialog(&mut self) {
        self.bind_event_listeners();
        self.dialog = None;
        self.modal = Modal::None;
    }

    /// Route a resolved keymap command.
    pub fn handle_command(&mut self, command: &Command, state: &LibraryState) {
        match command.id.as_str() {
            CommandId::LIBRARY_BACK => {
                if state.current.is_some() {
                    self.select_current(state, None);
                } else {
                    self.highlighted.clear();
                }
            }

            CommandId::LIBRARY_NEXT => {
                if let Some(index) = state.current {
                    if index + 1 < state.photos.len() {
                        self.select_current(state, Some(index + 1));
                    }
                }
            }

            CommandId::LIBRARY_PREV => {
                if let Some(index) = state.current {
                    if index > 0 {
                        self.select_current(state, Some(index - 1));
                    }
                }
            }

            CommandId::LIBRARY_TOGGLE_FLAG => self.toggle_current_flag(state),

            CommandId::LIBRARY_TOGGLE_DIFF => {
                if state.current.is_some() {
                    self.store.dispatch(LibraryAction::ToggleDiff);
                }
            }

            other => tracing::debug!("Unhandled command: {}", other),
        }
    }

    pub fn modal(&self) -> Modal {
        self.modal
    }

    /// True while the view holds the keymap scope (mounted).
    pub fn keymap_bound(&self) -> bool {
        self.keymap.is_some()
    }

    pub fn highlighted(&self) -> &[usize] {
        &self.highlighted
    }

    pub fn photos_to_export(&self) -> &[PhotoRecord] {
        &self.photos_to_export
    }

    pub fn export_accelerator_active(&self) -> bool {
        self.accelerator.is_active()
    }

    fn apply_grid_action(&mut self, state: &LibraryState, action: GridAction) {
        match action {
            GridAction::Highlight(index) => {
                self.highlighted = vec![index];
            }
            GridAction::ToggleHighlight(index) => {
                match self.highlighted.iter().position(|&i| i == index) {
                    Some(at) => {
                        self.highlighted.remove(at);
                    }
                    None => {
                        self.highlighted.push(index);
                        self.highlighted.sort_unstable();
                    }
                }
            }
            GridAction::Open(index) => self.select_current(state, Some(index)),
        }
    }

    /// Render the selected screen plus any active modal.
    ///
    /// `restore_scroll` is the one-shot offset the parent hands back after
    /// a scroll-restoration request.
    pub fn ui(&mut self, ui: &mut egui::Ui, state: &LibraryState, restore_scroll: Option<f32>) {
        match select_screen(state) {
            Screen::Empty => self.empty.ui(ui),

            Screen::Grid { photos } => {
                let output = self.grid.ui(ui, photos, &self.highlighted, restore_scroll);
                self.surface_scroll = output.scroll_top;
                if let Some(action) = output.action {
                    self.apply_grid_action(state, action);
                }
            }

            Screen::Diff { photo } => {
                if let Some(DiffAction::Back) = self.diff.ui(ui, photo) {
                    self.store.dispatch(LibraryAction::ToggleDiff);
                }
            }

            Screen::Detail { photo, at_edge } => {
                match self.detail.ui(ui, photo, at_edge) {
                    Some(DetailAction::Back) => self.select_current(state, None),
                    Some(DetailAction::Prev) => {
                        self.handle_command(&Command::new(CommandId::LIBRARY_PREV), state)
                    }
                    Some(DetailAction::Next) => {
                        self.handle_command(&Command::new(CommandId::LIBRARY_NEXT), state)
                    }
                    Some(DetailAction::ToggleFlag) => self.toggle_current_flag(state),
                    Some(DetailAction::ToggleDiff) => {
                        self.store.dispatch(LibraryAction::ToggleDiff)
                    }
                    None => {}
                }
            }
        }

        if self.modal == Modal::Export {
            let ctx = ui.ctx().clone();
            if let Some(dialog) = &mut self.dialog {
                match dialog.ui(&ctx) {
                    DialogResult::Ok(request) => {
                        // Encoding is the export pipeline's business
                        tracing::info!(
                            "Export requested: {} photos to {}",
                            request.photos.len(),
                            request.destination
                        );
                        self.close_export_dialog();
                    }
                    DialogResult::Cancel => self.close_export_dialog(),
                    DialogResult::None => {}
                }
            }
        }
    }
}
