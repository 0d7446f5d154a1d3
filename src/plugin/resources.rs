//! Resource types for the paint plugin.

use bevy::prelude::*;
use std::path::PathBuf;

use crate::paint::MapHost;

/// Host map state as seen by the brush tool.
///
/// The host application keeps `zoom` current; the brush tool flips the
/// listening and panning flags, which the host applies to its map widget.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct MapView {
    pub zoom: i32,
    /// Whether pointer events should be routed to the brush tool
    pub listening: bool,
    /// Whether dragging the map pans it
    pub panning: bool,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            zoom: 0,
            listening: false,
            panning: true,
        }
    }
}

impl MapHost for MapView {
    fn zoom(&self) -> i32 {
        self.zoom
    }

    fn subscribe_pointer(&mut self) {
        self.listening = true;
    }

    fn unsubscribe_pointer(&mut self) {
        self.listening = false;
    }

    fn set_panning(&mut self, enabled: bool) {
        self.panning = enabled;
    }
}

#[derive(Resource, Default)]
pub struct RegionLoadError {
    pub message: Option<String>,
}

/// Resource tracking save errors for display to user.
#[derive(Resource, Default)]
pub struct RegionSaveError {
    pub message: Option<String>,
}

/// Resource tracking the region file last saved or loaded
#[derive(Resource, Default)]
pub struct CurrentRegionFile {
    pub path: Option<PathBuf>,
}
