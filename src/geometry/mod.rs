//! Geometry primitives for brush painting.
//!
//! ## Module Structure
//!
//! - [`types`] - GeoPoint, Region, BrushAction and BrushSample value types
//! - [`engine`] - GeometryEngine trait and the `geo`-backed implementation
//! - [`scale`] - Pixel to meter conversion with a per-zoom cache

pub mod engine;
pub mod scale;
pub mod types;

pub use engine::{validate_region, GeoEngine, GeometryEngine, GeometryError};
pub use scale::{ground_resolution, ScaleResolver};
pub use types::{BrushAction, BrushSample, GeoPoint, Region};
