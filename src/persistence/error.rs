//! Error types for region persistence.

use std::path::PathBuf;

use thiserror::Error;

use crate::geometry::GeometryError;

/// Failure to read or write a region file.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The file could not be read or written
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON, or the region could not be serialized
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON is not a GeoJSON object
    #[error("Invalid GeoJSON: {0}")]
    GeoJson(#[from] geojson::Error),

    /// Load was requested without choosing a file
    #[error("No file selected")]
    NoFileSelected,

    /// The file holds geometry that cannot be painted (points, lines)
    #[error("Unsupported geometry type: {0}")]
    UnsupportedGeometry(&'static str),

    /// Polygonal, but not something the brush can paint over
    #[error("Invalid region geometry: {0}")]
    InvalidGeometry(#[from] GeometryError),
}

impl PersistenceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
