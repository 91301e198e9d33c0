use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    DEFAULT_AUTOSAVE_DEBOUNCE_MS, DEFAULT_CAPTURE_SETTLE_MS, DEFAULT_NAME_FIELDS,
};

/// System set for config loading (other plugins can run after this)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigLoaded;

/// Application configuration persisted to disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfigData {
    /// Region atlas to open; the bundled atlas is used when unset
    #[serde(default)]
    pub atlas_path: Option<PathBuf>,

    /// Feature properties tried, in order, for a region's display name
    #[serde(default = "default_name_fields")]
    pub name_fields: Vec<String>,

    /// File name proposed when exporting annotation data
    #[serde(default = "default_export_name")]
    pub default_export_name: String,

    /// File name proposed when exporting the map image
    #[serde(default = "default_image_name")]
    pub default_image_name: String,

    /// Quiet period after the last edit before the snapshot is saved
    #[serde(default = "default_autosave_debounce_ms")]
    pub autosave_debounce_ms: u64,

    /// Time overlays get to close before the map is captured
    #[serde(default = "default_capture_settle_ms")]
    pub capture_settle_ms: u64,

    /// Folder of the last export, used as the next dialog's starting point
    #[serde(default)]
    pub last_export_dir: Option<PathBuf>,
}

fn default_name_fields() -> Vec<String> {
    DEFAULT_NAME_FIELDS.iter().map(|f| f.to_string()).collect()
}

fn default_export_name() -> String {
    "region_annotations.json".to_string()
}

fn default_image_name() -> String {
    "region_map.png".to_string()
}

fn default_autosave_debounce_ms() -> u64 {
    DEFAULT_AUTOSAVE_DEBOUNCE_MS
}

fn default_capture_settle_ms() -> u64 {
    DEFAULT_CAPTURE_SETTLE_MS
}

impl Default for AppConfigData {
    fn default() -> Self {
        Self {
            atlas_path: None,
            name_fields: default_name_fields(),
            default_export_name: default_export_name(),
            default_image_name: default_image_name(),
            autosave_debounce_ms: default_autosave_debounce_ms(),
            capture_settle_ms: default_capture_settle_ms(),
            last_export_dir: None,
        }
    }
}

impl AppConfigData {
    pub fn autosave_debounce(&self) -> Duration {
        Duration::from_millis(self.autosave_debounce_ms)
    }

    pub fn capture_settle(&self) -> Duration {
        Duration::from_millis(self.capture_settle_ms)
    }

    pub fn atlas_file(&self) -> PathBuf {
        self.atlas_path
            .clone()
            .unwrap_or_else(crate::paths::bundled_atlas_file)
    }

    pub fn export_dir(&self) -> PathBuf {
        self.last_export_dir
            .clone()
            .unwrap_or_else(crate::paths::exports_dir)
    }
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

/// Message to remember the folder of a finished export
#[derive(Message)]
pub struct UpdateLastExportDirRequest {
    pub dir: PathBuf,
}

/// Result of loading config from disk
struct LoadConfigResult {
    data: AppConfigData,
    /// Error message if config was reset to defaults due to an error
    reset_reason: Option<String>,
}

/// Parse config file contents, falling back to defaults on corruption
fn parse_config(json: &str) -> LoadConfigResult {
    match serde_json::from_str(json) {
        Ok(data) => LoadConfigResult {
            data,
            reset_reason: None,
        },
        Err(e) => {
            warn!("Failed to parse config file: {}", e);
            LoadConfigResult {
                data: AppConfigData::default(),
                reset_reason: Some(format!("Configuration file was corrupted: {}", e)),
            }
        }
    }
}

/// Load configuration from disk
fn load_config(config_path: &std::path::Path) -> LoadConfigResult {
    if !config_path.exists() {
        info!("No config file found, using defaults");
        return LoadConfigResult {
            data: AppConfigData::default(),
            reset_reason: None,
        };
    }

    match std::fs::read_to_string(config_path) {
        Ok(json) => {
            let result = parse_config(&json);
            if result.reset_reason.is_none() {
                info!("Loaded config from {:?}", config_path);
            }
            result
        }
        Err(e) => {
            warn!("Failed to read config file: {}", e);
            LoadConfigResult {
                data: AppConfigData::default(),
                reset_reason: Some(format!("Could not read configuration file: {}", e)),
            }
        }
    }
}

/// Save configuration to disk
fn save_config(config: &AppConfig) {
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
    config.data = result.data;
    config.dirty = false;

    // Set notification if config was reset due to an error
    if let Some(reason) = result.reset_reason {
        reset_notification.show = true;
        reset_notification.reason = Some(reason);
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

/// System to update the last export folder
fn update_last_export_dir_system(
    mut events: MessageReader<UpdateLastExportDirRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        if config.data.last_export_dir.as_ref() == Some(&event.dir) {
            continue;
        }
        config.data.last_export_dir = Some(event.dir.clone());
        config.dirty = true;
        save_events.write(SaveConfigRequest);
    }
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AppConfig>()
            .init_resource::<ConfigResetNotification>()
            .add_message::<SaveConfigRequest>()
            .add_message::<UpdateLastExportDirRequest>()
            .add_systems(Startup, load_config_system.in_set(ConfigLoaded))
            .add_systems(
                Update,
                (
                    update_last_export_dir_system.run_if(on_message::<UpdateLastExportDirRequest>),
                    save_config_system.run_if(on_message::<SaveConfigRequest>),
                )
                    .chain(),
            );
    }
}
