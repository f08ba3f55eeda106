//! Screen selection for the library view
//!
//! Exactly one of four screens renders at any time, chosen
//! deterministically from the photo collection, the open-photo index and
//! the diff flag. The selection never fails: missing data degrades to the
//! empty screen, a stale index degrades to the grid.

use crate::{LibraryState, PhotoRecord};

/// The four mutually exclusive library screens
#[derive(Debug, PartialEq)]
pub enum Screen<'a> {
    /// Library has no photos yet
    Empty,

    /// No photo open: the thumbnail grid
    Grid { photos: &'a [PhotoRecord] },

    /// Open photo in comparison mode
    Diff { photo: &'a PhotoRecord },

    /// Open photo in normal detail mode
    Detail { photo: &'a PhotoRecord, at_edge: bool },
}

/// Derive the screen to render from store state.
pub fn select_screen(state: &LibraryState) -> Screen<'_> {
    let photos = &state.photos;
    if photos.is_empty() {
        return Screen::Empty;
    }

    let current = match state.current {
        None => return Screen::Grid { photos },
        Some(index) => index,
    };

    let photo = match photos.get(current) {
        Some(photo) => photo,
        None => {
            tracing::warn!(
                "Open photo index {} out of range ({} photos), showing grid",
                current,
                photos.len()
            );
            return Screen::Grid { photos };
        }
    };

    if state.diff {
        Screen::Diff { photo }
    } else {
        Screen::Detail {
            photo,
            at_edge: is_edge(current, photos.len()),
        }
    }
}

/// True at either end of the collection: the last index, or index 0.
///
/// Both navigation directions are treated as blocked at an edge; a
/// single-photo collection is an edge by both branches.
pub fn is_edge(index: usize, len: usize) -> bool {
    index + 1 == len || index == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Orientation, PhotoId};

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

    fn state(count: u64, current: Option<usize>, diff: bool) -> LibraryState {
        LibraryState {
            photos: (1..=count).map(photo).collect(),
            current,
            diff,
        }
    }

    #[test]
    fn test_empty_library_always_renders_empty() {
        // current and diff are irrelevant without photos
        for (current, diff) in [(None, false), (Some(0), false), (Some(3), true)] {
            assert_eq!(select_screen(&state(0, current, diff)), Screen::Empty);
        }
    }

    #[test]
    fn test_no_current_renders_grid_regardless_of_diff() {
        for diff in [false, true] {
            let s = state(3, None, diff);
            assert!(matches!(select_screen(&s), Screen::Grid { photos } if photos.len() == 3));
        }
    }

    #[test]
    fn test_current_with_diff_renders_diff() {
        let s = state(3, Some(1), true);
        match select_screen(&s) {
            Screen::Diff { photo } => assert_eq!(photo.id, PhotoId(2)),
            other => panic!("expected diff screen, got {other:?}"),
        }
    }

    #[test]
    fn test_current_without_diff_renders_detail() {
        let s = state(3, Some(1), false);
        match select_screen(&s) {
            Screen::Detail { photo, at_edge } => {
                assert_eq!(photo.id, PhotoId(2));
                assert!(!at_edge);
            }
            other => panic!("expected detail screen, got {other:?}"),
        }
    }

    #[test]
    fn test_out_of_range_current_falls_back_to_grid() {
        let s = state(2, Some(5), false);
        assert!(matches!(select_screen(&s), Screen::Grid { .. }));
    }

    #[test]
    fn test_is_edge() {
        // First and last index are edges, interior indices are not
        assert!(is_edge(0, 5));
        assert!(is_edge(4, 5));
        assert!(!is_edge(1, 5));
        assert!(!is_edge(3, 5));

        // A single photo is an edge by both branches
        assert!(is_edge(0, 1));
    }

    #[test]
    fn test_detail_edge_flags() {
        for (index, expected) in [(0, true), (1, false), (2, true)] {
            let s = state(3, Some(index), false);
            match select_screen(&s) {
                Screen::Detail { at_edge, .. } => assert_eq!(at_edge, expected, "index {index}"),
                other => panic!("expected detail screen, got {other:?}"),
            }
        }
    }
}
