//! Saving and loading the committed region as GeoJSON.
//!
//! File I/O is synchronous: a region file is a single small JSON document.
//! A failed load never touches the caller's state; callers only install the
//! returned region once the whole file has been read and decoded.
//!
//! ## Module Structure
//!
//! - [`codec`] - GeoJSON encoding and decoding
//! - [`error`] - [`PersistenceError`]

mod codec;
mod error;


use bevy::prelude::*;
use std::path::Path;

use crate::geometry::Region;

pub use codec::{decode_region, encode_region};
pub use error::PersistenceError;

/// Write the committed region to `path`. An empty store writes `null`.
pub fn save_region(path: &Path, region: Option<&Region>) -> Result<(), PersistenceError> {
    let json = encode_region(region)?;
    std::fs::write(path, json).map_err(|e| PersistenceError::io(path, e))?;
    info!(
        "Saved region ({} polygons) to {:?}",
        region.map_or(0, Region::polygon_count),
        path
    );
    Ok(())
}

/// Read a region file. `Ok(None)` means the file holds `null`.
pub fn load_region(path: &Path) -> Result<Option<Region>, PersistenceError> {
    let json = std::fs::read_to_string(path).map_err(|e| PersistenceError::io(path, e))?;
    let region = decode_region(&json)?;
    info!(
        "Loaded region ({} polygons) from {:?}",
        region.as_ref().map_or(0, Region::polygon_count),
        path
    );
    Ok(region)
}

/// [`load_region`] for a file picker result, where `None` means the user
/// dismissed the dialog.
pub fn load_region_selected(path: Option<&Path>) -> Result<Option<Region>, PersistenceError> {
    match path {
        Some(path) => load_region(path),
        None => Err(PersistenceError::NoFileSelected),
    }
}
