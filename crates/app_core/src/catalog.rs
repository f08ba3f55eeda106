//! Photo catalog collaborators
//!
//! Scanning, decoding and thumbnailing happen elsewhere; by the time a
//! record reaches this crate it is fully resolved data.

use crate::{AppError, PhotoRecord};
use std::path::PathBuf;

/// Source of already-resolved photo records
pub trait PhotoSource: Send + Sync {
    fn load(&self) -> Result<Vec<PhotoRecord>, AppError>;
}

/// Catalog stored as a JSON array of photo records
pub struct JsonCatalog {
    path: PathBuf,
}

impl JsonCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl PhotoSource for JsonCatalog {
    fn load(&self) -> Result<Vec<PhotoRecord>, AppError> {
        if !self.path.exists() {
            // A fresh install has no catalog yet; that is an empty library
            tracing::info!("No catalog at {:?}, starting empty", self.path);
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        serde_json::from_str(&content).map_err(|e| AppError::Catalog(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PhotoId;

    #[test]
    fn test_load_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"[
                {"id": 1, "name": "a.jpg", "thumb": "thumbs/1.jpg"},
                {"id": 2, "name": "b.jpg", "thumb": "thumbs/2.jpg", "orientation": 8}
            ]"#,
        )
        .unwrap();

        let photos = JsonCatalog::new(&path).load().unwrap();
        assert_eq!(photos.len(), 2);
        assert_eq!(photos[0].id, PhotoId(1));
        assert_eq!(photos[1].name, "b.jpg");
    }

    #[test]
    fn test_missing_catalog_is_empty_library() {
        let dir = tempfile::tempdir().unwrap();
        let photos = JsonCatalog::new(dir.path().join("nope.json")).load().unwrap();
        assert!(photos.is_empty());
    }

    #[test]
    fn test_malformed_catalog_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonCatalog::new(&path).load().unwrap_err();
        assert!(matches!(err, AppError::Catalog(_)));
        assert!(err.is_recoverable());
    }
}
