//! Centralized constants used across the crate.
//!
//! This module contains magic numbers and configuration values that are used
//! in multiple places or would benefit from being named constants.

/// Default brush radius in screen pixels
pub const DEFAULT_BRUSH_RADIUS: f64 = 30.0;

/// Smallest brush radius the slider allows, in screen pixels
pub const DEFAULT_MIN_BRUSH_RADIUS: f64 = 10.0;

/// Largest brush radius the slider allows, in screen pixels
pub const DEFAULT_MAX_BRUSH_RADIUS: f64 = 50.0;

/// Number of vertices used to approximate the brush disc.
/// Higher values give rounder strokes but slower boolean operations.
pub const DEFAULT_DISC_STEPS: usize = 64;

/// Equatorial circumference of the Earth in meters (Web Mercator ground resolution)
pub const EARTH_CIRCUMFERENCE_METERS: f64 = 40_075_016.686;

/// Tiles are 256 px wide, so zoom level `z` spans `2^(z + 8)` pixels around the equator
pub const TILE_SIZE_EXPONENT: i32 = 8;

/// File name used when saving the painted region without an explicit path
pub const DEFAULT_SAVE_FILE_NAME: &str = "map.json";
