//! In-progress stroke geometry.

use bevy::prelude::*;

use crate::geometry::{BrushSample, GeometryEngine, Region, ScaleResolver};

/// Geometry accumulated during the current pointer-down interval.
///
/// Draw and erase strokes accumulate the same way: every sample's disc is
/// unioned in. The subtractive effect of an erase stroke is applied only
/// when the stroke is committed.
#[derive(Debug, Clone, Default)]
pub struct StrokeTracker {
    stroke: Option<Region>,
}

impl StrokeTracker {
    /// Merge one sample's disc into the stroke.
    ///
    /// Returns `true` when the stroke changed. A sample whose disc or union
    /// fails is dropped and the previous stroke is kept.
    pub fn apply_sample(
        &mut self,
        sample: &BrushSample,
        engine: &dyn GeometryEngine,
        scale: &mut ScaleResolver,
    ) -> bool {
        let radius_m = sample.radius_px * scale.meters_per_pixel(sample.zoom, sample.point.lat);

        let disc = match engine.circle_polygon(sample.point, radius_m) {
            Ok(disc) => disc,
            Err(e) => {
                warn!("Skipping brush sample at {:?}: {}", sample.point, e);
                return false;
            }
        };

        let merged = match &self.stroke {
            None => disc,
            Some(current) => match engine.union(current, &disc) {
                Ok(merged) => merged,
                Err(e) => {
                    warn!("Failed to extend stroke at {:?}: {}", sample.point, e);
                    return false;
                }
            },
        };

        debug!(
            "Stroke now has {} polygon(s) after {} sample",
            merged.polygon_count(),
            sample.action.display_name()
        );
        self.stroke = Some(merged);
        true
    }

    pub fn stroke(&self) -> Option<&Region> {
        self.stroke.as_ref()
    }

    /// Hand the finished stroke over for commit, leaving the tracker empty
    pub fn take(&mut self) -> Option<Region> {
        self.stroke.take()
    }

    /// Discard the stroke without committing it
    pub fn reset(&mut self) {
        self.stroke = None;
    }
}
