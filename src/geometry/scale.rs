//! Screen-pixel to ground-distance conversion.

use std::collections::HashMap;

use crate::constants::{EARTH_CIRCUMFERENCE_METERS, TILE_SIZE_EXPONENT};

/// Web Mercator ground resolution in meters per pixel at `latitude` degrees.
pub fn ground_resolution(zoom: i32, latitude: f64) -> f64 {
    EARTH_CIRCUMFERENCE_METERS * latitude.to_radians().cos().abs()
        / 2f64.powi(zoom + TILE_SIZE_EXPONENT)
}

/// Memoized meters-per-pixel lookup, keyed by zoom level only.
///
/// The latitude of the first request at a zoom level is the one that sticks;
/// latitude barely moves within a stroke so later requests reuse that value.
#[derive(Debug, Clone, Default)]
pub struct ScaleResolver {
    meters_per_pixel: HashMap<i32, f64>,
}

impl ScaleResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn meters_per_pixel(&mut self, zoom: i32, latitude: f64) -> f64 {
        *self
            .meters_per_pixel
            .entry(zoom)
            .or_insert_with(|| ground_resolution(zoom, latitude))
    }

    /// Number of zoom levels resolved so far
    pub fn cached_levels(&self) -> usize {
        self.meters_per_pixel.len()
    }
}
