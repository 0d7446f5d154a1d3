//! Systems that route host messages through the [`PaintSession`].

use bevy::prelude::*;

use crate::config::UpdateLastRegionPathRequest;
use crate::paint::{PaintEvent, PaintSession};
use crate::persistence::{load_region_selected, save_region};

use super::messages::{
    LoadRegionRequest, PaintCommand, PointerInput, RegionUpdated, SaveRegionRequest,
    StrokeUpdated,
};
use super::resources::{CurrentRegionFile, MapView, RegionLoadError, RegionSaveError};

/// Apply toolbar and menu commands
pub fn handle_paint_commands(
    mut commands: MessageReader<PaintCommand>,
    mut session: ResMut<PaintSession>,
    mut map_view: ResMut<MapView>,
) {
    let host = &mut *map_view;
    for command in commands.read() {
        match *command {
            PaintCommand::StartDraw => session.start_draw(host),
            PaintCommand::StartErase => session.start_erase(host),
            PaintCommand::ToggleDraw => session.toggle_draw(host),
            PaintCommand::ToggleErase => session.toggle_erase(host),
            PaintCommand::Stop => session.stop(host),
            PaintCommand::Detach => session.detach(host),
            PaintCommand::SetRadius(radius) => {
                let applied = session.set_radius(radius);
                debug!("Brush radius set to {} px", applied);
            }
            PaintCommand::EraseAll => session.erase_all(),
        }
    }
}

/// Feed pointer events to the session in arrival order
pub fn handle_pointer_input(
    mut pointer: MessageReader<PointerInput>,
    mut session: ResMut<PaintSession>,
    mut map_view: ResMut<MapView>,
) {
    let host = &mut *map_view;
    for input in pointer.read() {
        match *input {
            PointerInput::Down(point) => session.pointer_down(point, host),
            PointerInput::Move(point) => session.pointer_move(point, host),
            PointerInput::Up => session.pointer_up(host),
        }
    }
}

/// Read a region file and install it. A failed load leaves the session untouched.
pub fn load_region_system(
    mut events: MessageReader<LoadRegionRequest>,
    mut session: ResMut<PaintSession>,
    mut load_error: ResMut<RegionLoadError>,
    mut current_file: ResMut<CurrentRegionFile>,
    mut config_events: MessageWriter<UpdateLastRegionPathRequest>,
) {
    for event in events.read() {
        match load_region_selected(event.path.as_deref()) {
            Ok(region) => {
                load_error.message = None;
                session.replace_region(region);
                if let Some(path) = &event.path {
                    current_file.path = Some(path.clone());
                    config_events.write(UpdateLastRegionPathRequest { path: path.clone() });
                }
            }
            Err(e) => {
                let message = format!("Failed to load region: {}", e);
                error!("{}", message);
                load_error.message = Some(message);
            }
        }
    }
}

/// Write the committed region to disk
pub fn save_region_system(
    mut events: MessageReader<SaveRegionRequest>,
    session: Res<PaintSession>,
    mut save_error: ResMut<RegionSaveError>,
    mut current_file: ResMut<CurrentRegionFile>,
    mut config_events: MessageWriter<UpdateLastRegionPathRequest>,
) {
    for event in events.read() {
        let path = event
            .path
            .clone()
            .or_else(|| current_file.path.clone())
            .unwrap_or_else(crate::paths::default_save_file);

        match save_region(&path, session.region()) {
            Ok(()) => {
                save_error.message = None;
                current_file.path = Some(path.clone());
                config_events.write(UpdateLastRegionPathRequest { path });
            }
            Err(e) => {
                let message = format!("Failed to save region: {}", e);
                error!("{}", message);
                save_error.message = Some(message);
            }
        }
    }
}

/// Publish the session's redraw notifications as messages
pub fn forward_paint_events(
    mut session: ResMut<PaintSession>,
    mut stroke_events: MessageWriter<StrokeUpdated>,
    mut region_events: MessageWriter<RegionUpdated>,
) {
    for event in session.drain_events() {
        match event {
            PaintEvent::StrokeUpdated { stroke, action } => {
                stroke_events.write(StrokeUpdated { stroke, action });
            }
            PaintEvent::RegionUpdated { region } => {
                region_events.write(RegionUpdated { region });
            }
        }
    }
}
