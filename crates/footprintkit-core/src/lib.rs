//! # FootprintKit Core
//!
//! Core types shared by the FootprintKit crates: physical lengths and their
//! conversion into internal units, 2D points, geometry options, and the
//! error taxonomy.

pub mod error;
pub mod point;
pub mod units;

pub use error::{Error, GeometryError, GeometryResult, Result, UnitError};
pub use point::{Point, EPSILON};
pub use units::{
    GeometryOptions, Length, LengthUnit, UnitScale, DEFAULT_CIRCLE_SEGMENTS,
    DEFAULT_CORNER_SEGMENTS, DEFAULT_PIXELS_PER_INCH, MM_PER_INCH,
};
