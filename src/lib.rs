//! Brush-painted polygon regions on a map.
//!
//! A user arms a draw or erase brush and drags it across a map. Each pointer
//! sample becomes a geodesic disc; the discs of one drag are unioned into a
//! stroke, and when the pointer is lifted the stroke is unioned into (draw)
//! or subtracted from (erase) the committed region. The region is saved and
//! loaded as GeoJSON.
//!
//! [`paint::PaintSession`] is usable on its own with any [`paint::MapHost`];
//! [`plugin::PaintPolygonPlugin`] wires it into a bevy `App`.

pub mod config;
pub mod constants;
pub mod geometry;
pub mod paint;
pub mod paths;
pub mod persistence;
pub mod plugin;

pub use config::{BrushSettings, ConfigPlugin};
pub use geometry::{BrushAction, GeoPoint, Region};
pub use paint::{MapHost, PaintEvent, PaintSession, ToolMode};
pub use plugin::PaintPolygonPlugin;
