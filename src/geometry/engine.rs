//! Boolean polygon algebra and brush disc construction.
//!
//! The paint engine only talks to geometry through [`GeometryEngine`], so a
//! failing operation always arrives as a [`GeometryError`] value that the
//! caller can drop, never as a panic in the middle of a stroke.

use geo::{BooleanOps, Coord, Destination, Haversine, LineString, Polygon};
use thiserror::Error;

use super::types::{GeoPoint, Region};
use crate::constants::DEFAULT_DISC_STEPS;

/// Failures reported by a geometry operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Disc radius is zero, negative or not finite.
    #[error("Invalid disc radius: {0} m")]
    InvalidRadius(f64),

    /// Disc center is outside the WGS84 range.
    #[error("Invalid coordinate: lat {lat}, lng {lng}")]
    InvalidCoordinate { lat: f64, lng: f64 },

    /// Operand is not a well-formed polygon set.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
}

/// Geometry capability used by the stroke tracker and the region store.
pub trait GeometryEngine: Send + Sync {
    /// Polygonal approximation of a disc of `radius_m` meters around `center`.
    fn circle_polygon(&self, center: GeoPoint, radius_m: f64) -> Result<Region, GeometryError>;

    /// Set union `a ∪ b`.
    fn union(&self, a: &Region, b: &Region) -> Result<Region, GeometryError>;

    /// Set difference `a − b`.
    fn difference(&self, a: &Region, b: &Region) -> Result<Region, GeometryError>;
}

/// [`GeometryEngine`] backed by the `geo` crate.
///
/// Discs are built on a sphere (haversine destination), boolean operations
/// run on lng/lat coordinates.
#[derive(Debug, Clone, Copy)]
pub struct GeoEngine {
    steps: usize,
}

impl GeoEngine {
    /// Engine approximating discs with `steps` vertices (at least 3)
    pub fn with_steps(steps: usize) -> Self {
        Self {
            steps: steps.max(3),
        }
    }

    pub fn steps(&self) -> usize {
        self.steps
    }
}

impl Default for GeoEngine {
    fn default() -> Self {
        Self::with_steps(DEFAULT_DISC_STEPS)
    }
}

impl GeometryEngine for GeoEngine {
    fn circle_polygon(&self, center: GeoPoint, radius_m: f64) -> Result<Region, GeometryError> {
        if !radius_m.is_finite() || radius_m <= 0.0 {
            return Err(GeometryError::InvalidRadius(radius_m));
        }
        if !center.is_valid() {
            return Err(GeometryError::InvalidCoordinate {
                lat: center.lat,
                lng: center.lng,
            });
        }

        let origin = center.to_point();
        let step = 360.0 / self.steps as f64;

        // Negative bearings walk the ring counter-clockwise (GeoJSON exterior winding)
        let mut coords: Vec<Coord<f64>> = (0..self.steps)
            .map(|i| Haversine::destination(origin, -(i as f64) * step, radius_m).into())
            .collect();
        coords.push(coords[0]);

        Ok(Region::from_polygon(Polygon::new(
            LineString::new(coords),
            Vec::new(),
        )))
    }

    fn union(&self, a: &Region, b: &Region) -> Result<Region, GeometryError> {
        validate_region(a)?;
        validate_region(b)?;

        if a.is_empty() {
            return Ok(b.clone());
        }
        if b.is_empty() {
            return Ok(a.clone());
        }

        Ok(Region::from(
            a.as_multi_polygon().union(b.as_multi_polygon()),
        ))
    }

    fn difference(&self, a: &Region, b: &Region) -> Result<Region, GeometryError> {
        validate_region(a)?;
        validate_region(b)?;

        if a.is_empty() {
            return Ok(Region::empty());
        }
        if b.is_empty() {
            return Ok(a.clone());
        }

        Ok(Region::from(
            a.as_multi_polygon().difference(b.as_multi_polygon()),
        ))
    }
}

/// Reject regions the boolean algebra cannot handle: non-finite coordinates
/// and rings with fewer than three distinct vertices.
pub fn validate_region(region: &Region) -> Result<(), GeometryError> {
    for (index, polygon) in region.as_multi_polygon().iter().enumerate() {
        let rings = std::iter::once(polygon.exterior()).chain(polygon.interiors());
        for ring in rings {
            if ring.0.len() < 4 {
                return Err(GeometryError::InvalidGeometry(format!(
                    "polygon {} has a ring with {} vertices",
                    index,
                    ring.0.len()
                )));
            }
            if ring.0.iter().any(|c| !c.x.is_finite() || !c.y.is_finite()) {
                return Err(GeometryError::InvalidGeometry(format!(
                    "polygon {} has a non-finite coordinate",
                    index
                )));
            }
        }
    }
    Ok(())
}
