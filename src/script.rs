//! Headless replay of recorded brush interactions.
//!
//! A script is a JSON array of steps, for example:
//!
//! ```json
//! [
//!   { "step": "zoom", "level": 10 },
//!   { "step": "start_draw" },
//!   { "step": "down", "lat": 51.5, "lng": -0.1 },
//!   { "step": "move", "lat": 51.51, "lng": -0.1 },
//!   { "step": "up" }
//! ]
//! ```
//!
//! Each step is delivered to the plugin in its own frame, so steps are
//! applied strictly in script order.

use bevy::prelude::*;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use paint_polygon::config::{AppConfig, ConfigPlugin};
use paint_polygon::plugin::{
    LoadRegionRequest, MapView, PaintCommand, PaintPolygonPlugin, PointerInput, RegionLoadError,
    RegionSaveError, SaveRegionRequest,
};
use paint_polygon::{GeoPoint, PaintSession};

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Could not read script {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid script: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Load(String),

    #[error("{0}")]
    Save(String),
}

/// One recorded interaction
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum ScriptStep {
    StartDraw,
    StartErase,
    ToggleDraw,
    ToggleErase,
    Stop,
    SetRadius { radius: f64 },
    Zoom { level: i32 },
    Down { lat: f64, lng: f64 },
    Move { lat: f64, lng: f64 },
    Up,
    EraseAll,
}

/// What a replay produced
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaySummary {
    pub steps: usize,
    pub polygons: usize,
    pub output: PathBuf,
}

pub fn parse_script(json: &str) -> Result<Vec<ScriptStep>, ScriptError> {
    Ok(serde_json::from_str(json)?)
}

pub fn read_script(path: &Path) -> Result<Vec<ScriptStep>, ScriptError> {
    let json = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_script(&json)
}

/// Headless app with the config and paint plugins, already past startup
pub fn build_app(config: AppConfig) -> App {
    let mut app = App::new();
    app.insert_resource(config)
        .add_plugins(ConfigPlugin)
        .add_plugins(PaintPolygonPlugin);
    app.update();
    app
}

/// Run `steps` against `app`, optionally starting from a saved region, and
/// save the resulting region to `output`.
pub fn replay(
    app: &mut App,
    steps: &[ScriptStep],
    load: Option<&Path>,
    output: &Path,
) -> Result<ReplaySummary, ScriptError> {
    if let Some(path) = load {
        app.world_mut().write_message(LoadRegionRequest {
            path: Some(path.to_path_buf()),
        });
        app.update();
        if let Some(message) = app.world().resource::<RegionLoadError>().message.clone() {
            return Err(ScriptError::Load(message));
        }
    }

    for step in steps {
        apply_step(app, step);
        app.update();
    }

    app.world_mut().write_message(SaveRegionRequest {
        path: Some(output.to_path_buf()),
    });
    app.update();
    if let Some(message) = app.world().resource::<RegionSaveError>().message.clone() {
        return Err(ScriptError::Save(message));
    }

    let polygons = app
        .world()
        .resource::<PaintSession>()
        .region()
        .map_or(0, |region| region.polygon_count());
    info!(
        "Replayed {} steps, {} polygons written to {:?}",
        steps.len(),
        polygons,
        output
    );

    Ok(ReplaySummary {
        steps: steps.len(),
        polygons,
        output: output.to_path_buf(),
    })
}

fn apply_step(app: &mut App, step: &ScriptStep) {
    let world = app.world_mut();
    match *step {
        ScriptStep::StartDraw => {
            world.write_message(PaintCommand::StartDraw);
        }
        ScriptStep::StartErase => {
            world.write_message(PaintCommand::StartErase);
        }
        ScriptStep::ToggleDraw => {
            world.write_message(PaintCommand::ToggleDraw);
        }
        ScriptStep::ToggleErase => {
            world.write_message(PaintCommand::ToggleErase);
        }
        ScriptStep::Stop => {
            world.write_message(PaintCommand::Stop);
        }
        ScriptStep::SetRadius { radius } => {
            world.write_message(PaintCommand::SetRadius(radius));
        }
        ScriptStep::EraseAll => {
            world.write_message(PaintCommand::EraseAll);
        }
        ScriptStep::Zoom { level } => {
            world.resource_mut::<MapView>().zoom = level;
        }
        ScriptStep::Down { lat, lng } => {
            world.write_message(PointerInput::Down(GeoPoint::new(lat, lng)));
        }
        ScriptStep::Move { lat, lng } => {
            world.write_message(PointerInput::Move(GeoPoint::new(lat, lng)));
        }
        ScriptStep::Up => {
            world.write_message(PointerInput::Up);
        }
    }
}
