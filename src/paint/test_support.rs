//! Shared fixtures for paint engine tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::geometry::{
    BrushAction, BrushSample, GeoEngine, GeoPoint, GeometryEngine, GeometryError, Region,
};

use super::host::MapHost;

/// Sample at zoom 10 with the default 30 px brush
pub fn sample(lat: f64, lng: f64, action: BrushAction) -> BrushSample {
    BrushSample {
        point: GeoPoint::new(lat, lng),
        zoom: 10,
        radius_px: 30.0,
        action,
    }
}

/// Delegates to [`GeoEngine`] but can be told to fail boolean operations.
#[derive(Debug, Default)]
pub struct FlakyEngine {
    inner: GeoEngine,
    fail_unions: bool,
    fail_differences: bool,
}

impl FlakyEngine {
    pub fn failing_unions() -> Self {
        Self {
            fail_unions: true,
            ..Self::default()
        }
    }

    pub fn failing_differences() -> Self {
        Self {
            fail_differences: true,
            ..Self::default()
        }
    }
}

impl GeometryEngine for FlakyEngine {
    fn circle_polygon(&self, center: GeoPoint, radius_m: f64) -> Result<Region, GeometryError> {
        self.inner.circle_polygon(center, radius_m)
    }

    fn union(&self, a: &Region, b: &Region) -> Result<Region, GeometryError> {
        if self.fail_unions {
            return Err(GeometryError::InvalidGeometry("forced union failure".into()));
        }
        self.inner.union(a, b)
    }

    fn difference(&self, a: &Region, b: &Region) -> Result<Region, GeometryError> {
        if self.fail_differences {
            return Err(GeometryError::InvalidGeometry(
                "forced difference failure".into(),
            ));
        }
        self.inner.difference(a, b)
    }
}

/// Counts disc constructions so tests can check each sample is applied once.
#[derive(Debug, Default, Clone)]
pub struct CountingEngine {
    inner: GeoEngine,
    pub discs: Arc<AtomicUsize>,
}

impl CountingEngine {
    pub fn disc_count(&self) -> usize {
        self.discs.load(Ordering::SeqCst)
    }
}

impl GeometryEngine for CountingEngine {
    fn circle_polygon(&self, center: GeoPoint, radius_m: f64) -> Result<Region, GeometryError> {
        self.discs.fetch_add(1, Ordering::SeqCst);
        self.inner.circle_polygon(center, radius_m)
    }

    fn union(&self, a: &Region, b: &Region) -> Result<Region, GeometryError> {
        self.inner.union(a, b)
    }

    fn difference(&self, a: &Region, b: &Region) -> Result<Region, GeometryError> {
        self.inner.difference(a, b)
    }
}

/// Host map double that records what the paint session asked of it.
#[derive(Debug, Clone)]
pub struct RecordingHost {
    pub zoom: i32,
    pub listening: bool,
    pub panning: bool,
    pub subscribe_calls: usize,
    pub unsubscribe_calls: usize,
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self {
            zoom: 10,
            listening: false,
            panning: true,
            subscribe_calls: 0,
            unsubscribe_calls: 0,
        }
    }
}

impl MapHost for RecordingHost {
    fn zoom(&self) -> i32 {
        self.zoom
    }

    fn subscribe_pointer(&mut self) {
        self.listening = true;
        self.subscribe_calls += 1;
    }

    fn unsubscribe_pointer(&mut self) {
        self.listening = false;
        self.unsubscribe_calls += 1;
    }

    fn set_panning(&mut self, enabled: bool) {
        self.panning = enabled;
    }
}
