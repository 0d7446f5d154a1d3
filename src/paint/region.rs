//! Committed region geometry.

use bevy::prelude::*;

use crate::geometry::{BrushAction, GeometryEngine, Region};

/// The cumulative painted area across all strokes.
///
/// `None` means nothing has been painted yet, which is distinct from an empty
/// region left behind after everything was erased. The region is only ever
/// replaced as a whole.
#[derive(Debug, Clone, Default)]
pub struct RegionStore {
    region: Option<Region>,
}

impl RegionStore {
    /// Merge a finished stroke into the committed region.
    ///
    /// The first stroke ever becomes the region as-is. Afterwards draw strokes
    /// are unioned and erase strokes are subtracted. When the boolean
    /// operation fails the previous region is kept and `false` is returned.
    pub fn commit(
        &mut self,
        stroke: &Region,
        action: BrushAction,
        engine: &dyn GeometryEngine,
    ) -> bool {
        let next = match &self.region {
            None => stroke.clone(),
            Some(current) => {
                let result = match action {
                    BrushAction::Draw => engine.union(current, stroke),
                    BrushAction::Erase => engine.difference(current, stroke),
                };
                match result {
                    Ok(next) => next,
                    Err(e) => {
                        warn!("Failed to commit {} stroke: {}", action.display_name(), e);
                        return false;
                    }
                }
            }
        };

        info!(
            "Committed {} stroke, region has {} polygon(s)",
            action.display_name(),
            next.polygon_count()
        );
        self.region = Some(next);
        true
    }

    pub fn region(&self) -> Option<&Region> {
        self.region.as_ref()
    }

    /// Forget everything painted so far
    pub fn clear(&mut self) {
        self.region = None;
    }

    /// Swap in a region wholesale (used when loading from disk)
    pub fn replace(&mut self, region: Region) {
        self.region = Some(region);
    }
}
