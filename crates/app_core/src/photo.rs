//! Photo records as delivered by the catalog

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable identity of a photo across reloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhotoId(pub u64);

impl std::fmt::Display for PhotoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// EXIF-style orientation carried by catalog records.
///
/// The catalog encodes orientation as the numeric EXIF code; only code 8
/// (90 degrees counterclockwise) is distinguished, every other code
/// displays upright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub enum Orientation {
    #[default]
    Normal,
    MinusNinety,
}

impl From<u32> for Orientation {
    fn from(code: u32) -> Self {
        match code {
            8 => Orientation::MinusNinety,
            _ => Orientation::Normal,
        }
    }
}

impl From<Orientation> for u32 {
    fn from(orientation: Orientation) -> Self {
        match orientation {
            Orientation::Normal => 1,
            Orientation::MinusNinety => 8,
        }
    }
}

/// One photo in the library.
///
/// Records are immutable from the view's perspective; the flagged bit is
/// the only field the store ever mutates, and only through a dispatched
/// action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoRecord {
    pub id: PhotoId,
    pub name: String,

    /// Path to an already-rendered thumbnail; resolution and decoding are
    /// the catalog pipeline's business.
    pub thumb: String,

    #[serde(default)]
    pub orientation: Orientation,

    #[serde(default)]
    pub flagged: bool,

    #[serde(default)]
    pub captured_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_codes() {
        assert_eq!(Orientation::from(1), Orientation::Normal);
        assert_eq!(Orientation::from(8), Orientation::MinusNinety);
        // Unknown codes normalize to upright
        assert_eq!(Orientation::from(6), Orientation::Normal);
        assert_eq!(Orientation::from(0), Orientation::Normal);

        assert_eq!(u32::from(Orientation::Normal), 1);
        assert_eq!(u32::from(Orientation::MinusNinety), 8);
    }

    #[test]
    fn test_record_json_shape() {
        let json = r#"{
            "id": 42,
            "name": "IMG_0042.jpg",
            "thumb": "thumbs/42.jpg",
            "orientation": 8,
            "flagged": true
        }"#;

        let photo: PhotoRecord = serde_json::from_str(json).unwrap();
        assert_eq!(photo.id, PhotoId(42));
        assert_eq!(photo.orientation, Orientation::MinusNinety);
        assert!(photo.flagged);
        assert!(photo.captured_at.is_none());
    }
}
