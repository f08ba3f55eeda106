//! Unidirectional library store
//!
//! Mutations flow one way: handlers dispatch `LibraryAction`s through a
//! `StoreHandle`, the store applies them on the UI thread during
//! `process_pending`, and the new state becomes visible on the next pass.
//! Dispatch is fire-and-forget; nothing observes a mutation synchronously.

use crate::{AppError, PhotoId, PhotoRecord, PhotoSource};
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::sync::Arc;

/// Store-owned state the library view renders from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LibraryState {
    pub photos: Vec<PhotoRecord>,

    /// Index of the open photo; `None` means no photo is open and the
    /// grid is showing.
    pub current: Option<usize>,

    /// Render the open photo in comparison mode
    pub diff: bool,
}

/// Actions accepted by the library store
#[derive(Debug, Clone)]
pub enum LibraryAction {
    /// Kick off a one-shot asynchronous catalog load
    GetPhotos,

    /// Completion of `GetPhotos`
    PhotosLoaded(Vec<PhotoRecord>),

    SetCurrent(Option<usize>),
    ToggleFlag(PhotoId),
    ToggleDiff,
}

/// Cheap, cloneable dispatcher for store actions
#[derive(Clone)]
pub struct StoreHandle {
    tx: Sender<LibraryAction>,
}

impl StoreHandle {
    pub fn dispatch(&self, action: LibraryAction) {
        if self.tx.send(action).is_err() {
            tracing::warn!("Library store is gone, action dropped");
        }
    }
}

/// The library store itself. Owned by the shell, processed once per frame.
pub struct LibraryStore {
    state: LibraryState,
    tx: Sender<LibraryAction>,
    rx: Receiver<LibraryAction>,
    source: Arc<dyn PhotoSource>,
}

impl LibraryStore {
    pub fn new(source: Arc<dyn PhotoSource>) -> Self {
        let (tx, rx) = unbounded();
        Self {
            state: LibraryState::default(),
            tx,
            rx,
            source,
        }
    }

    pub fn handle(&self) -> StoreHandle {
        StoreHandle { tx: self.tx.clone() }
    }

    pub fn state(&self) -> &LibraryState {
        &self.state
    }

    /// Apply every queued action. Returns true if the state changed.
    pub fn process_pending(&mut self) -> bool {
        let mut changed = false;
        while let Ok(action) = self.rx.try_recv() {
            changed |= self.apply(action);
        }
        changed
    }

    fn apply(&mut self, action: LibraryAction) -> bool {
        match action {
            LibraryAction::GetPhotos => {
                self.spawn_load();
                false
            }

            LibraryAction::PhotosLoaded(photos) => {
                tracing::info!("Library loaded: {} photos", photos.len());
                self.state.photos = photos;

                // A reload can shrink the collection out from under the
                // open photo; fall back to the grid.
                if let Some(index) = self.state.current {
                    if index >= self.state.photos.len() {
                        self.state.current = None;
                    }
                }
                true
            }

            LibraryAction::SetCurrent(current) => {
                let changed = self.state.current != current;
                self.state.current = current;
                changed
            }

            LibraryAction::ToggleFlag(id) => {
                match self.state.photos.iter_mut().find(|p| p.id == id) {
                    Some(photo) => {
                        photo.flagged = !photo.flagged;
                        true
                    }
                    None => {
                        tracing::warn!("{}", AppError::UnknownPhoto(id.0));
                        false
                    }
                }
            }

            LibraryAction::ToggleDiff => {
                self.state.diff = !self.state.diff;
                true
            }
        }
    }

    fn spawn_load(&self) {
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();

        std::thread::spawn(move || match source.load() {
            Ok(photos) => {
                let _ = tx.send(LibraryAction::PhotosLoaded(photos));
            }
            Err(e) => {
                // The render path never sees this; an empty library keeps
                // showing until a later load succeeds.
                tracing::error!("Catalog load failed: {}", e);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Orientation;
    use std::time::{Duration, Instant};

    struct FixedSource(Vec<PhotoRecord>);

    impl PhotoSource for FixedSource {
        fn load(&self) -> Result<Vec<PhotoRecord>, AppError> {
            Ok(self.0.clone())
        }
    }

    fn photo(id: u64) -> PhotoRecord {
        PhotoRecord {
            id: PhotoId(id),
            name: format!("IMG_{id:04}.jpg"),
            thumb: format!("thumbs/{id}.jpg"),
            orientation: Orientation::Normal,
            flagged: false,
            captured_at: None,
        }
    }

    fn store_with(photos: Vec<PhotoRecord>) -> LibraryStore {
        let mut store = LibraryStore::new(Arc::new(FixedSource(Vec::new())));
        store.apply(LibraryAction::PhotosLoaded(photos));
        store
    }

    #[test]
    fn test_dispatch_is_not_synchronous() {
        let mut store = store_with(vec![photo(1), photo(2)]);
        store.handle().dispatch(LibraryAction::SetCurrent(Some(1)));

        assert_eq!(store.state().current, None);
        assert!(store.process_pending());
        assert_eq!(store.state().current, Some(1));
    }

    #[test]
    fn test_get_photos_completes_asynchronously() {
        let mut store = LibraryStore::new(Arc::new(FixedSource(vec![photo(1)])));
        store.handle().dispatch(LibraryAction::GetPhotos);

        let deadline = Instant::now() + Duration::from_secs(2);
        while store.state().photos.is_empty() {
            assert!(Instant::now() < deadline, "load never completed");
            store.process_pending();
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(store.state().photos.len(), 1);
    }

    #[test]
    fn test_toggle_flag() {
        let mut store = store_with(vec![photo(1), photo(2)]);

        store.handle().dispatch(LibraryAction::ToggleFlag(PhotoId(2)));
        store.process_pending();
        assert!(store.state().photos[1].flagged);

        store.handle().dispatch(LibraryAction::ToggleFlag(PhotoId(2)));
        store.process_pending();
        assert!(!store.state().photos[1].flagged);
    }

    #[test]
    fn test_toggle_flag_unknown_photo_is_ignored() {
        let mut store = store_with(vec![photo(1)]);
        store.handle().dispatch(LibraryAction::ToggleFlag(PhotoId(99)));
        assert!(!store.process_pending());
    }

    #[test]
    fn test_reload_resets_out_of_range_current() {
        let mut store = store_with(vec![photo(1), photo(2), photo(3)]);
        store.apply(LibraryAction::SetCurrent(Some(2)));

        store.apply(LibraryAction::PhotosLoaded(vec![photo(1)]));
        assert_eq!(store.state().current, None);

        // An in-range current survives a reload
        store.apply(LibraryAction::SetCurrent(Some(0)));
        store.apply(LibraryAction::PhotosLoaded(vec![photo(1), photo(2)]));
        assert_eq!(store.state().current, Some(0));
    }
}
