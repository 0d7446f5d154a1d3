//! Persisted tool configuration.
//!
//! The brush bounds and the last region file are kept in a small JSON file
//! (see [`crate::paths::config_file`]). A missing file means defaults; an
//! unreadable or corrupt one also means defaults, plus a
//! [`ConfigResetNotification`] telling the user why.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{
    DEFAULT_BRUSH_RADIUS, DEFAULT_DISC_STEPS, DEFAULT_MAX_BRUSH_RADIUS, DEFAULT_MIN_BRUSH_RADIUS,
};
use crate::paint::PaintSession;

/// System set for config loading (other plugins can run after this)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigLoaded;

/// Brush size bounds, all in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushSettings {
    pub radius: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    /// Vertices used to approximate the brush disc
    pub disc_steps: usize,
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self {
            radius: DEFAULT_BRUSH_RADIUS,
            min_radius: DEFAULT_MIN_BRUSH_RADIUS,
            max_radius: DEFAULT_MAX_BRUSH_RADIUS,
            disc_steps: DEFAULT_DISC_STEPS,
        }
    }
}

impl BrushSettings {
    /// Settings that are safe to use: finite values, `min <= max`, radius
    /// inside the bounds and at least a triangle for the disc.
    pub fn normalized(&self) -> Self {
        let defaults = Self::default();
        let finite_or = |value: f64, fallback: f64| {
            if value.is_finite() { value } else { fallback }
        };

        let mut min_radius = finite_or(self.min_radius, defaults.min_radius);
        let mut max_radius = finite_or(self.max_radius, defaults.max_radius);
        if min_radius > max_radius {
            std::mem::swap(&mut min_radius, &mut max_radius);
        }

        Self {
            radius: finite_or(self.radius, defaults.radius).clamp(min_radius, max_radius),
            min_radius,
            max_radius,
            disc_steps: self.disc_steps.max(3),
        }
    }
}

/// Application configuration persisted to disk
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfigData {
    #[serde(default)]
    pub brush: BrushSettings,

    /// Last region file saved or loaded (remembered, not auto-loaded)
    #[serde(default)]
    pub last_region_path: Option<PathBuf>,
}

/// Runtime configuration resource
#[derive(Resource)]
pub struct AppConfig {
    /// The persisted configuration data
    pub data: AppConfigData,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Whether config needs to be saved (dirty flag)
    pub dirty: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: AppConfigData::default(),
            config_path: crate::paths::config_file(),
            dirty: false,
        }
    }
}

/// Resource to notify user when config was reset to defaults
#[derive(Resource, Default)]
pub struct ConfigResetNotification {
    /// Whether to show the notification dialog
    pub show: bool,
    /// The reason for the reset (parse error, read error, etc.)
    pub reason: Option<String>,
}

/// Message to trigger config save
#[derive(Message)]
pub struct SaveConfigRequest;

/// Message to update the last region path in config
#[derive(Message)]
pub struct UpdateLastRegionPathRequest {
    pub path: PathBuf,
}

/// Result of loading config from disk
pub struct LoadConfigResult {
    pub config: AppConfig,
    /// Error message if config was reset to defaults due to an error
    pub reset_reason: Option<String>,
}

/// Load configuration from `config_path`
pub fn load_config(config_path: &Path) -> LoadConfigResult {
    let (data, reset_reason) = if config_path.exists() {
        match std::fs::read_to_string(config_path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(data) => {
                    info!("Loaded config from {:?}", config_path);
                    (data, None)
                }
                Err(e) => {
                    warn!("Failed to parse config file: {}", e);
                    (
                        AppConfigData::default(),
                        Some(format!("Configuration file was corrupted: {}", e)),
                    )
                }
            },
            Err(e) => {
                warn!("Failed to read config file: {}", e);
                (
                    AppConfigData::default(),
                    Some(format!("Could not read configuration file: {}", e)),
                )
            }
        }
    } else {
        info!("No config file found, using defaults");
        (AppConfigData::default(), None)
    };

    LoadConfigResult {
        config: AppConfig {
            data,
            config_path: config_path.to_path_buf(),
            dirty: false,
        },
        reset_reason,
    }
}

/// Save configuration to disk
pub fn save_config(config: &AppConfig) {
    match serde_json::to_string_pretty(&config.data) {
        Ok(json) => {
            if let Err(e) = std::fs::write(&config.config_path, json) {
                error!("Failed to save config: {}", e);
            } else {
                info!("Config saved to {:?}", config.config_path);
            }
        }
        Err(e) => {
            error!("Failed to serialize config: {}", e);
        }
    }
}

/// Startup system to load config from disk into the existing resource
fn load_config_system(
    mut config: ResMut<AppConfig>,
    mut reset_notification: ResMut<ConfigResetNotification>,
) {
    let result = load_config(&config.config_path);
    config.data = result.config.data;
    config.dirty = result.config.dirty;

    // Set notification if config was reset due to an error
    if let Some(reason) = result.reset_reason {
        reset_notification.show = true;
        reset_notification.reason = Some(reason);
    }
}

/// Startup system to hand the configured brush bounds to the paint session
fn apply_brush_config_system(config: Res<AppConfig>, session: Option<ResMut<PaintSession>>) {
    if let Some(mut session) = session {
        session.apply_brush_settings(&config.data.brush);
        debug!("Brush radius {} px", session.radius());
    }
}

/// System to save config when requested
fn save_config_system(
    mut events: MessageReader<SaveConfigRequest>,
    mut config: ResMut<AppConfig>,
) {
    for _ in events.read() {
        if config.dirty {
            save_config(&config);
            config.dirty = false;
        }
    }
}

/// System to update last region path
fn update_last_region_path_system(
    mut events: MessageReader<UpdateLastRegionPathRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        config.data.last_region_path = Some(event.path.clone());
        config.dirty = true;
        save_events.write(SaveConfigRequest);
    }
}

/// Loads [`AppConfig`] at startup and keeps it saved.
///
/// The config file location can be overridden by inserting an [`AppConfig`]
/// resource before adding the plugin.
pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AppConfig>()
            .init_resource::<ConfigResetNotification>()
            .add_message::<SaveConfigRequest>()
            .add_message::<UpdateLastRegionPathRequest>()
            .add_systems(
                Startup,
                (load_config_system, apply_brush_config_system)
                    .chain()
                    .in_set(ConfigLoaded),
            )
            .add_systems(
                Update,
                (
                    update_last_region_path_system
                        .run_if(on_message::<UpdateLastRegionPathRequest>),
                    save_config_system.run_if(on_message::<SaveConfigRequest>),
                )
                    .chain(),
            );
    }
}
