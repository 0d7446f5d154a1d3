//! Bevy integration for the brush tool.
//!
//! The host application writes [`PaintCommand`], [`PointerInput`] and the
//! load/save requests, keeps [`MapView::zoom`] current, and reads
//! [`StrokeUpdated`] / [`RegionUpdated`] to redraw.
//!
//! ## Module Structure
//!
//! - [`messages`] - Message types in and out
//! - [`resources`] - [`MapView`] host state and error resources
//! - [`systems`] - Systems driving the [`PaintSession`]

mod messages;
mod resources;
mod systems;


use bevy::prelude::*;

use crate::config::UpdateLastRegionPathRequest;
use crate::paint::PaintSession;

// Re-exports - Messages
pub use messages::{
    LoadRegionRequest, PaintCommand, PointerInput, RegionUpdated, SaveRegionRequest,
    StrokeUpdated,
};

// Re-exports - Resources
pub use resources::{CurrentRegionFile, MapView, RegionLoadError, RegionSaveError};

pub struct PaintPolygonPlugin;

impl Plugin for PaintPolygonPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PaintSession>()
            .init_resource::<MapView>()
            .init_resource::<RegionLoadError>()
            .init_resource::<RegionSaveError>()
            .init_resource::<CurrentRegionFile>()
            .add_message::<PaintCommand>()
            .add_message::<PointerInput>()
            .add_message::<SaveRegionRequest>()
            .add_message::<LoadRegionRequest>()
            .add_message::<StrokeUpdated>()
            .add_message::<RegionUpdated>()
            .add_message::<UpdateLastRegionPathRequest>()
            .add_systems(
                Update,
                (
                    systems::handle_paint_commands.run_if(on_message::<PaintCommand>),
                    systems::handle_pointer_input.run_if(on_message::<PointerInput>),
                    systems::load_region_system.run_if(on_message::<LoadRegionRequest>),
                    systems::save_region_system.run_if(on_message::<SaveRegionRequest>),
                    systems::forward_paint_events,
                )
                    .chain(),
            );
    }
}
