//! # FootprintKit
//!
//! Parametric footprint geometry for schematic and layout editors. Each part
//! type (IEC inlets, jacks, pads, pots, pickups, ...) is a declarative
//! description of anchors, parameters and body slots; a [`PartInstance`]
//! turns that description into cached multi-part geometry.
//!
//! ## Architecture
//!
//! FootprintKit is organized as a workspace with multiple crates:
//!
//! 1. **footprintkit-core** - Lengths and units, points, error taxonomy
//! 2. **footprintkit-geometry** - Area algebra, transforms, anchors, body
//!    cache, part types, standard library, rendering delegation
//! 3. **footprintkit-settings** - Engine configuration files
//! 4. **footprintkit** - Preview renderer binary that integrates all crates

pub mod preview;

pub use footprintkit_core::{
    Error, GeometryError, GeometryOptions, GeometryResult, Length, LengthUnit, Point, Result,
    UnitError, UnitScale,
};
pub use footprintkit_geometry::{
    render_icon, render_instance, Area, Body, BodyPart, Color, IconGeometry, MirrorAxis, Orientation,
    Painter, ParamValue, PartInstance, PartLibrary, PartState, PartType, Pin, RasterPainter,
    RenderContext, SvgPainter, Transform,
};
pub use footprintkit_settings::{EngineConfig, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Console output on stderr filtered by `RUST_LOG` (default `info`). With
/// `json` set, events are written as JSON lines.
pub fn init_logging(json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true)
                    .with_line_number(true),
            )
            .try_init()?;
    }

    Ok(())
}
