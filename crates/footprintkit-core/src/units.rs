//! Unit conversion utilities
//!
//! Physical lengths (mm, inch, ...) are converted to the engine's internal
//! linear unit, "pixels", through a fixed pixels-per-inch factor supplied by
//! the host at startup. Supports decimal and fractional inch parsing and
//! formatting.

use crate::error::UnitError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Millimetres per inch
pub const MM_PER_INCH: f64 = 25.4;

/// Default resolution of the internal unit
pub const DEFAULT_PIXELS_PER_INCH: f64 = 200.0;

/// Default number of segments used to approximate a full circle
pub const DEFAULT_CIRCLE_SEGMENTS: usize = 48;

/// Default number of segments used for each rounded corner
pub const DEFAULT_CORNER_SEGMENTS: usize = 8;

/// Physical unit a [`Length`] is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    /// Internal units
    Px,
    /// Millimetres
    #[default]
    Mm,
    /// Centimetres
    Cm,
    /// Inches
    Inch,
    /// Thousandths of an inch
    Mil,
}

impl LengthUnit {
    /// Size of one unit in inches, `None` for internal pixels
    fn inches(self) -> Option<f64> {
        match self {
            Self::Px => None,
            Self::Mm => Some(1.0 / MM_PER_INCH),
            Self::Cm => Some(10.0 / MM_PER_INCH),
            Self::Inch => Some(1.0),
            Self::Mil => Some(0.001),
        }
    }

    /// Short label used when formatting ("mm", "in", ...)
    pub fn label(self) -> &'static str {
        match self {
            Self::Px => "px",
            Self::Mm => "mm",
            Self::Cm => "cm",
            Self::Inch => "in",
            Self::Mil => "mil",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for LengthUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "px" | "pixel" | "pixels" => Ok(Self::Px),
            "mm" | "millimeter" | "millimeters" | "millimetre" | "millimetres" => Ok(Self::Mm),
            "cm" => Ok(Self::Cm),
            "in" | "inch" | "inches" | "\"" => Ok(Self::Inch),
            "mil" | "mils" | "thou" => Ok(Self::Mil),
            other => Err(UnitError::UnknownUnit {
                unit: other.to_string(),
            }),
        }
    }
}

/// Host-supplied conversion factor between inches and internal units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitScale {
    pub pixels_per_inch: f64,
}

impl UnitScale {
    pub fn new(pixels_per_inch: f64) -> Self {
        Self { pixels_per_inch }
    }

    /// Convert internal units back into `unit`
    pub fn from_pixels(&self, pixels: f64, unit: LengthUnit) -> f64 {
        match unit.inches() {
            None => pixels,
            Some(inches) => pixels / self.pixels_per_inch / inches,
        }
    }
}

impl Default for UnitScale {
    fn default() -> Self {
        Self::new(DEFAULT_PIXELS_PER_INCH)
    }
}

/// A scalar length tagged with its physical unit
///
/// Immutable; conversion to internal units is a single multiplication and
/// therefore deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Length {
    value: f64,
    unit: LengthUnit,
}

impl Length {
    pub const fn new(value: f64, unit: LengthUnit) -> Self {
        Self { value, unit }
    }

    pub const fn mm(value: f64) -> Self {
        Self::new(value, LengthUnit::Mm)
    }

    pub const fn inch(value: f64) -> Self {
        Self::new(value, LengthUnit::Inch)
    }

    pub const fn px(value: f64) -> Self {
        Self::new(value, LengthUnit::Px)
    }

    pub const fn zero() -> Self {
        Self::px(0.0)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> LengthUnit {
        self.unit
    }

    /// Convert to internal units
    pub fn to_pixels(&self, scale: UnitScale) -> f64 {
        match self.unit.inches() {
            None => self.value,
            Some(inches) => self.value * inches * scale.pixels_per_inch,
        }
    }

    /// Re-express this length in another unit
    pub fn convert_to(&self, unit: LengthUnit, scale: UnitScale) -> Length {
        Length::new(scale.from_pixels(self.to_pixels(scale), unit), unit)
    }

    pub fn is_negative(&self) -> bool {
        self.value < 0.0
    }

    /// Format for display in `unit`, three decimal places
    pub fn format(&self, unit: LengthUnit, scale: UnitScale) -> String {
        format!("{:.3} {}", self.convert_to(unit, scale).value, unit.label())
    }

    /// Parse a user-entered length
    ///
    /// Accepts an optional unit suffix (`"2.5mm"`, `"0.1 in"`, `"40 mil"`) and
    /// whole-plus-fraction notation (`"1 1/2 in"`). Without a suffix the value
    /// is taken in `default_unit`.
    pub fn parse(input: &str, default_unit: LengthUnit) -> Result<Length, UnitError> {
        let input = input.trim();
        let split = input
            .char_indices()
            .rev()
            .take_while(|(_, c)| c.is_ascii_alphabetic() || *c == '"')
            .last()
            .map(|(i, _)| i)
            .unwrap_or(input.len());
        let (number, suffix) = input.split_at(split);
        let unit = if suffix.is_empty() {
            default_unit
        } else {
            suffix.parse()?
        };
        Ok(Length::new(parse_number(number.trim())?, unit))
    }
}

impl Default for Length {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.label())
    }
}

fn parse_number(input: &str) -> Result<f64, UnitError> {
    if input.is_empty() {
        return Err(UnitError::InvalidNumber {
            input: input.to_string(),
        });
    }
    if !input.contains('/') {
        return input.parse::<f64>().map_err(|_| UnitError::InvalidNumber {
            input: input.to_string(),
        });
    }

    let (negative, body) = match input.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, input),
    };

    let mut total = 0.0;
    for part in body.split_whitespace() {
        if part.contains('/') {
            let frac: Vec<&str> = part.split('/').collect();
            if frac.len() != 2 {
                return Err(UnitError::InvalidFraction {
                    input: input.to_string(),
                    reason: "expected numerator/denominator".to_string(),
                });
            }
            let num = frac[0].parse::<f64>().map_err(|_| UnitError::InvalidFraction {
                input: input.to_string(),
                reason: "invalid numerator".to_string(),
            })?;
            let den = frac[1].parse::<f64>().map_err(|_| UnitError::InvalidFraction {
                input: input.to_string(),
                reason: "invalid denominator".to_string(),
            })?;
            if den == 0.0 {
                return Err(UnitError::InvalidFraction {
                    input: input.to_string(),
                    reason: "division by zero".to_string(),
                });
            }
            total += num / den;
        } else {
            total += part.parse::<f64>().map_err(|_| UnitError::InvalidNumber {
                input: input.to_string(),
            })?;
        }
    }

    Ok(if negative { -total } else { total })
}

/// Everything a part instance needs to turn parameters into geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometryOptions {
    pub scale: UnitScale,
    /// Segments per full circle or ellipse
    pub circle_segments: usize,
    /// Segments per rounded corner arc
    pub corner_segments: usize,
}

impl GeometryOptions {
    pub fn with_scale(scale: UnitScale) -> Self {
        Self {
            scale,
            ..Self::default()
        }
    }
}

impl Default for GeometryOptions {
    fn default() -> Self {
        Self {
            scale: UnitScale::default(),
            circle_segments: DEFAULT_CIRCLE_SEGMENTS,
            corner_segments: DEFAULT_CORNER_SEGMENTS,
        }
    }
}
