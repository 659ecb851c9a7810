//! FootprintKit Settings Crate
//!
//! Loads, validates and saves the engine configuration.

pub mod config;
pub mod error;

pub use config::{EngineConfig, GeometrySettings, IconSettings, RenderSettings, UnitSettings};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
