//! # FootprintKit Geometry
//!
//! Parametric footprint geometry engine: area algebra over csgrs sketches,
//! the transform pipeline, anchor point sets, the generation-counted body
//! cache and the declarative part model interpreted by [`PartInstance`].
//!
//! ## Example
//!
//! ```no_run
//! use footprintkit_geometry::{PartLibrary, Point, GeometryOptions};
//!
//! let library = PartLibrary::standard();
//! let mut inlet = library
//!     .create("iec_socket", Point::new(100.0, 100.0), GeometryOptions::default())
//!     .unwrap();
//! inlet.rotate_about(Point::new(100.0, 100.0), 1).unwrap();
//! for part in inlet.parts() {
//!     println!("{}: {}", part.name, part.area.is_some());
//! }
//! ```

pub mod anchors;
pub mod area;
pub mod body;
pub mod cache;
pub mod icon;
pub mod library;
pub mod part;
pub mod render;
pub mod rounded;
pub mod transform;

pub use anchors::{Anchor, AnchorInfo, AnchorSet, Visibility};
pub use area::{Area, Bounds, Outline};
pub use body::{Body, BodyPart, Pin};
pub use cache::{BodyCache, CacheState};
pub use icon::IconGeometry;
pub use library::PartLibrary;
pub use part::{
    Color, ColorSource, Condition, Orientation, ParamDef, ParamKind, ParamValue, PartInstance,
    PartState, PartType, RotationMode, ShapeExpr, SlotDef, SlotStyle,
};
pub use render::{render_icon, render_instance, Painter, RasterPainter, RenderContext, SvgPainter};
pub use transform::{MirrorAxis, Transform};

pub use footprintkit_core::{
    GeometryError, GeometryOptions, GeometryResult, Length, LengthUnit, Point, UnitScale,
};
