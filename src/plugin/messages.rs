//! Message types exchanged with the host application.

use bevy::prelude::*;
use std::path::PathBuf;

use crate::geometry::{BrushAction, GeoPoint, Region};

/// Toolbar and menu actions
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub enum PaintCommand {
    StartDraw,
    StartErase,
    ToggleDraw,
    ToggleErase,
    Stop,
    /// The tool was removed from the map
    Detach,
    /// New brush radius in screen pixels
    SetRadius(f64),
    EraseAll,
}

/// Pointer events from the map, already projected to geographic coordinates
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    Down(GeoPoint),
    Move(GeoPoint),
    Up,
}

/// Save the committed region. Without a path, the current region file (or
/// the default save file) is used.
#[derive(Message, Debug, Clone, Default)]
pub struct SaveRegionRequest {
    pub path: Option<PathBuf>,
}

/// Replace the committed region with a file's contents. `None` means the
/// file dialog was dismissed.
#[derive(Message, Debug, Clone, Default)]
pub struct LoadRegionRequest {
    pub path: Option<PathBuf>,
}

/// The in-progress stroke changed and should be redrawn
#[derive(Message, Debug, Clone, PartialEq)]
pub struct StrokeUpdated {
    pub stroke: Region,
    pub action: BrushAction,
}

/// The committed region changed and should be redrawn
#[derive(Message, Debug, Clone, PartialEq)]
pub struct RegionUpdated {
    pub region: Option<Region>,
}
