//! Value types shared by the geometry adapter and the paint engine.

use geo::{Area, Contains, MultiPolygon, Point, Polygon};
use serde::{Deserialize, Serialize};

/// A geographic position as supplied by the host map widget.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Both components are finite and inside the WGS84 range
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// GeoJSON axis order: x is longitude, y is latitude
    pub fn to_point(self) -> Point<f64> {
        Point::new(self.lng, self.lat)
    }
}

/// Painted geometry: a (possibly empty) multipolygon in lng/lat degrees.
///
/// Regions are values. Every boolean operation returns a new `Region`, so the
/// committed region and the in-progress stroke never share storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Region(MultiPolygon<f64>);

impl Region {
    /// A region that covers nothing
    pub fn empty() -> Self {
        Self(MultiPolygon::new(Vec::new()))
    }

    pub fn from_polygon(polygon: Polygon<f64>) -> Self {
        Self(MultiPolygon::new(vec![polygon]))
    }

    pub fn is_empty(&self) -> bool {
        self.0.0.is_empty()
    }

    pub fn polygon_count(&self) -> usize {
        self.0.0.len()
    }

    pub fn as_multi_polygon(&self) -> &MultiPolygon<f64> {
        &self.0
    }

    /// Planar area in square degrees. Only meaningful for comparisons.
    pub fn area(&self) -> f64 {
        self.0.unsigned_area()
    }

    pub fn contains(&self, point: GeoPoint) -> bool {
        self.0.contains(&point.to_point())
    }
}

impl From<MultiPolygon<f64>> for Region {
    fn from(multi_polygon: MultiPolygon<f64>) -> Self {
        Self(multi_polygon)
    }
}

impl From<Polygon<f64>> for Region {
    fn from(polygon: Polygon<f64>) -> Self {
        Self::from_polygon(polygon)
    }
}

/// What a stroke does to the committed region once the pointer is lifted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrushAction {
    Draw,
    Erase,
}

impl BrushAction {
    pub fn display_name(&self) -> &'static str {
        match self {
            BrushAction::Draw => "draw",
            BrushAction::Erase => "erase",
        }
    }
}

/// One pointer-movement sample captured during an active session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushSample {
    pub point: GeoPoint,
    pub zoom: i32,
    /// Brush radius in screen pixels at the time of capture
    pub radius_px: f64,
    pub action: BrushAction,
}
