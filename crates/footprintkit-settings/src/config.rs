//! Engine configuration
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML files; the default file lives in the platform configuration
//! directory.
//!
//! Configuration is organized into sections:
//! - Units (pixels per inch, display unit)
//! - Geometry tessellation
//! - Palette icons
//! - Rendering (outline width, anchor markers)

use footprintkit_core::{
    GeometryOptions, LengthUnit, UnitScale, DEFAULT_CIRCLE_SEGMENTS, DEFAULT_CORNER_SEGMENTS,
    DEFAULT_PIXELS_PER_INCH,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};

const APP_DIR: &str = "footprintkit";
const CONFIG_FILE: &str = "config.toml";

/// Unit settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitSettings {
    /// Internal units per inch
    pub pixels_per_inch: f64,
    /// Unit lengths are shown in
    pub display_unit: LengthUnit,
}

impl Default for UnitSettings {
    fn default() -> Self {
        Self {
            pixels_per_inch: DEFAULT_PIXELS_PER_INCH,
            display_unit: LengthUnit::Mm,
        }
    }
}

/// Tessellation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometrySettings {
    /// Segments per full circle or ellipse
    pub circle_segments: usize,
    /// Segments per rounded corner
    pub corner_segments: usize,
}

impl Default for GeometrySettings {
    fn default() -> Self {
        Self {
            circle_segments: DEFAULT_CIRCLE_SEGMENTS,
            corner_segments: DEFAULT_CORNER_SEGMENTS,
        }
    }
}

/// Palette icon settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconSettings {
    /// Side of the icon square in pixels
    pub size: f64,
    /// Blank border around the icon in pixels
    pub padding: f64,
}

impl Default for IconSettings {
    fn default() -> Self {
        Self {
            size: 48.0,
            padding: 2.0,
        }
    }
}

/// Preview rendering settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Outline stroke width in screen pixels
    pub stroke_width: f64,
    /// Anchor marker diameter in internal units
    pub marker_size: f64,
    /// Margin around previews in internal units
    pub margin: f64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            stroke_width: 1.0,
            marker_size: 6.0,
            margin: 10.0,
        }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub units: UnitSettings,
    pub geometry: GeometrySettings,
    pub icon: IconSettings,
    pub render: RenderSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> ConfigResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

impl EngineConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default file location: `<config dir>/footprintkit/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no configuration directory on this platform".to_string())
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Load `path` if it exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            info!(path = %path.display(), "no configuration file, using defaults");
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML), creating parent directories
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e)))?;
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        debug!(path = %path.display(), "configuration saved");
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        let ppi = self.units.pixels_per_inch;
        if !(ppi.is_finite() && ppi > 0.0) {
            return Err(ConfigError::out_of_range("units.pixels_per_inch", ppi));
        }

        if self.geometry.circle_segments < 8 {
            return Err(ConfigError::out_of_range(
                "geometry.circle_segments",
                self.geometry.circle_segments,
            ));
        }
        if self.geometry.corner_segments == 0 {
            return Err(ConfigError::out_of_range(
                "geometry.corner_segments",
                self.geometry.corner_segments,
            ));
        }

        let icon = &self.icon;
        if !(icon.size.is_finite() && icon.size > 0.0) {
            return Err(ConfigError::out_of_range("icon.size", icon.size));
        }
        if !(icon.padding >= 0.0 && icon.padding * 2.0 < icon.size) {
            return Err(ConfigError::out_of_range("icon.padding", icon.padding));
        }

        let render = &self.render;
        for (key, value) in [
            ("render.stroke_width", render.stroke_width),
            ("render.marker_size", render.marker_size),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::out_of_range(key, value));
            }
        }
        if !(render.margin.is_finite() && render.margin >= 0.0) {
            return Err(ConfigError::out_of_range("render.margin", render.margin));
        }

        Ok(())
    }

    pub fn unit_scale(&self) -> UnitScale {
        UnitScale::new(self.units.pixels_per_inch)
    }

    /// Options handed to every part instance
    pub fn geometry_options(&self) -> GeometryOptions {
        GeometryOptions {
            scale: self.unit_scale(),
            circle_segments: self.geometry.circle_segments,
            corner_segments: self.geometry.corner_segments,
        }
    }

    /// Icon side left for geometry once padding is removed
    pub fn icon_content_size(&self) -> f64 {
        self.icon.size - 2.0 * self.icon.padding
    }
}
