//! Viewer configuration with persistence
//!
//! Configuration is read from `~/.config/plenamente/viewer.toml`. Every field
//! is optional in the file; missing ones take their defaults.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use plenamente_core::{Color, Transform, Vec3, Viewport};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::camera::CameraConfig;
use crate::error::ConfigError;
use crate::hover::HoverSettings;
use crate::labels::LabelTable;
use crate::legend::{default_legend, LegendEntry};
use crate::partition::{AnchorMode, PartPattern, DEFAULT_PART_PREFIX};

/// All viewer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Directory relative model paths are resolved against
    pub asset_dir: PathBuf,
    /// The brain model, relative to `asset_dir`
    pub model_path: PathBuf,
    /// Name prefix of Part Groups, followed by digits
    pub part_prefix: String,
    pub anchor: AnchorMode,
    pub colors: ColorConfig,
    pub placement: PlacementConfig,
    pub camera: CameraConfig,
    /// Viewport used when the host does not report one
    pub viewport: Viewport,
    /// Labels added to, or replacing, the built-in ones
    pub labels: BTreeMap<String, String>,
    pub legend: Vec<LegendEntry>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from("public"),
            model_path: PathBuf::from("models/brain_project.glb"),
            part_prefix: DEFAULT_PART_PREFIX.to_string(),
            anchor: AnchorMode::default(),
            colors: ColorConfig::default(),
            placement: PlacementConfig::default(),
            camera: CameraConfig::default(),
            viewport: Viewport::default(),
            labels: BTreeMap::new(),
            legend: default_legend(),
        }
    }
}

impl ViewerConfig {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("plenamente"))
    }

    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("viewer.toml"))
    }

    /// Load the config from disk, or return defaults if missing or invalid
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            warn!("Could not determine config directory");
            return Self::default();
        };

        if !path.exists() {
            info!("No viewer config found, using defaults");
            return Self::default();
        }

        match Self::from_path(&path) {
            Ok(config) => {
                info!("Loaded viewer config from {:?}", path);
                config
            }
            Err(e) => {
                warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Read a config file
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&content)
    }

    /// Parse config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Save the config to disk
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let dir = Self::config_dir().ok_or(ConfigError::NoConfigDir)?;
        let path = dir.join("viewer.toml");

        fs::create_dir_all(&dir).map_err(|e| ConfigError::Io(dir.clone(), e))?;

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content).map_err(|e| ConfigError::Io(path.clone(), e))?;
        info!("Saved viewer config to {:?}", path);
        Ok(path)
    }

    /// Built-in labels with the configured ones applied on top
    pub fn label_table(&self) -> LabelTable {
        let mut table = LabelTable::with_defaults();
        table.extend(self.labels.clone());
        table
    }

    pub fn part_pattern(&self) -> PartPattern {
        PartPattern::new(self.part_prefix.clone())
    }

    /// Parsed colors and placement for the hover controller
    pub fn hover_settings(&self) -> Result<HoverSettings, ConfigError> {
        Ok(HoverSettings {
            default_color: self.colors.default_color()?,
            highlight_color: self.colors.highlight_color()?,
            placement: self.placement.transform(),
            anchor: self.anchor,
        })
    }
}

/// Part colors as CSS color strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    /// Color of parts that are not hovered
    pub default: String,
    /// Color of the hovered part
    pub highlight: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            default: "#ccc".to_string(),
            highlight: "orange".to_string(),
        }
    }
}

impl ColorConfig {
    pub fn default_color(&self) -> Result<Color, ConfigError> {
        Color::parse(&self.default).map_err(|source| ConfigError::InvalidColor {
            field: "colors.default",
            source,
        })
    }

    pub fn highlight_color(&self) -> Result<Color, ConfigError> {
        Color::parse(&self.highlight).map_err(|source| ConfigError::InvalidColor {
            field: "colors.highlight",
            source,
        })
    }
}

/// Where the model sits in the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    pub position: [f32; 3],
    /// Uniform scale
    pub scale: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            position: [0.0, -1.0, -1.1],
            scale: 1.8,
        }
    }
}

impl PlacementConfig {
    pub fn transform(&self) -> Transform {
        Transform::from_position_scale(Vec3::from(self.position), self.scale)
    }
}
