//! Error handling for FootprintKit
//!
//! Provides the error taxonomy shared by every layer of the engine:
//! - Geometry errors (rejected setter calls, degenerate transforms)
//! - Unit errors (length parsing)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Geometry error type
///
/// Raised synchronously by setters and transform constructors. A part
/// instance that returns one of these is left in its previous valid state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A setter was given a value outside the part type's domain
    #[error("Invalid parameter '{param}': {reason}")]
    InvalidParameter {
        /// The parameter, variant, or anchor that was rejected.
        param: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// Degenerate or non-finite affine map
    #[error("Invalid transform: {reason}")]
    InvalidTransform {
        /// Why the transform was rejected.
        reason: String,
    },
}

impl GeometryError {
    /// Shorthand for [`GeometryError::InvalidParameter`]
    pub fn invalid_parameter(param: impl Into<String>, reason: impl Into<String>) -> Self {
        GeometryError::InvalidParameter {
            param: param.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for [`GeometryError::InvalidTransform`]
    pub fn invalid_transform(reason: impl Into<String>) -> Self {
        GeometryError::InvalidTransform {
            reason: reason.into(),
        }
    }

    /// Check if this is a rejected parameter
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, GeometryError::InvalidParameter { .. })
    }

    /// Check if this is a rejected transform
    pub fn is_invalid_transform(&self) -> bool {
        matches!(self, GeometryError::InvalidTransform { .. })
    }
}

/// Unit error type
///
/// Represents errors raised while parsing user-entered lengths.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitError {
    /// Unknown unit suffix
    #[error("Unknown length unit: {unit}")]
    UnknownUnit {
        /// The unrecognised suffix.
        unit: String,
    },

    /// Number could not be parsed
    #[error("Invalid number '{input}'")]
    InvalidNumber {
        /// The offending text.
        input: String,
    },

    /// Fraction with a zero denominator or a malformed shape
    #[error("Invalid fraction '{input}': {reason}")]
    InvalidFraction {
        /// The offending text.
        input: String,
        /// Why the fraction was rejected.
        reason: String,
    },
}

/// Main error type for FootprintKit
///
/// A unified error type that can represent any error from the core layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Unit error
    #[error(transparent)]
    Unit(#[from] UnitError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a geometry error
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, Error::Geometry(_))
    }
}

/// Result type for geometry operations
pub type GeometryResult<T> = std::result::Result<T, GeometryError>;

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
