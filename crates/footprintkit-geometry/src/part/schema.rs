//! Parameter schema for part types
//!
//! Every type-specific setter goes through [`ParamDef::validate`], so a value
//! outside the type's domain is rejected before the instance changes.

use footprintkit_core::{GeometryError, GeometryResult, Length, UnitScale};
use serde::{Deserialize, Serialize};
use std::fmt;

/// RGBA colour used for display-only parameters and slot styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rrggbb` or `#rrggbbaa`
    pub fn from_hex(input: &str) -> Option<Self> {
        let hex = input.trim().strip_prefix('#')?;
        let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Alpha as a 0..=1 opacity
    pub fn opacity(&self) -> f64 {
        f64::from(self.a) / 255.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Current value of a parameter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ParamValue {
    Length(Length),
    Count(u32),
    Flag(bool),
    Color(Color),
}

impl ParamValue {
    /// Numeric reading used by shape expressions: lengths become internal
    /// units, counts their value, flags 0 or 1. Colours have no magnitude.
    pub fn magnitude(&self, scale: UnitScale) -> f64 {
        match self {
            ParamValue::Length(l) => l.to_pixels(scale),
            ParamValue::Count(n) => f64::from(*n),
            ParamValue::Flag(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            ParamValue::Color(_) => 0.0,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            ParamValue::Flag(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            ParamValue::Color(c) => Some(*c),
            _ => None,
        }
    }

    fn kind_name(&self) -> &'static str {
        match self {
            ParamValue::Length(_) => "length",
            ParamValue::Count(_) => "count",
            ParamValue::Flag(_) => "flag",
            ParamValue::Color(_) => "color",
        }
    }
}

/// Domain of a parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamKind {
    /// Inclusive range; `max` of `None` is unbounded
    Length { min: Length, max: Option<Length> },
    Count { min: u32, max: u32 },
    Flag,
    Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParamDef {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: ParamKind,
    pub default: ParamValue,
    /// Display-only parameters (colours, labels) leave the body cache alone
    pub affects_geometry: bool,
}

impl ParamDef {
    /// Non-negative length, unbounded above
    pub fn length(key: &'static str, label: &'static str, default: Length) -> Self {
        Self {
            key,
            label,
            kind: ParamKind::Length {
                min: Length::zero(),
                max: None,
            },
            default: ParamValue::Length(default),
            affects_geometry: true,
        }
    }

    pub fn length_range(
        key: &'static str,
        label: &'static str,
        default: Length,
        min: Length,
        max: Length,
    ) -> Self {
        Self {
            kind: ParamKind::Length {
                min,
                max: Some(max),
            },
            ..Self::length(key, label, default)
        }
    }

    pub fn count(key: &'static str, label: &'static str, default: u32, min: u32, max: u32) -> Self {
        Self {
            key,
            label,
            kind: ParamKind::Count { min, max },
            default: ParamValue::Count(default),
            affects_geometry: true,
        }
    }

    pub fn flag(key: &'static str, label: &'static str, default: bool) -> Self {
        Self {
            key,
            label,
            kind: ParamKind::Flag,
            default: ParamValue::Flag(default),
            affects_geometry: true,
        }
    }

    /// Colours never affect geometry
    pub fn color(key: &'static str, label: &'static str, default: Color) -> Self {
        Self {
            key,
            label,
            kind: ParamKind::Color,
            default: ParamValue::Color(default),
            affects_geometry: false,
        }
    }

    pub fn validate(&self, value: &ParamValue, scale: UnitScale) -> GeometryResult<()> {
        let reject = |reason: String| Err(GeometryError::invalid_parameter(self.key, reason));
        match (&self.kind, value) {
            (ParamKind::Length { min, max }, ParamValue::Length(l)) => {
                let px = l.to_pixels(scale);
                if !px.is_finite() {
                    return reject("length is not finite".into());
                }
                if px < 0.0 {
                    return reject(format!("negative length {}", l.format(l.unit(), scale)));
                }
                if px + f64::EPSILON < min.to_pixels(scale) {
                    return reject(format!(
                        "{} is below the minimum {}",
                        l.format(l.unit(), scale),
                        min.format(l.unit(), scale)
                    ));
                }
                if let Some(max) = max {
                    if px > max.to_pixels(scale) + f64::EPSILON {
                        return reject(format!(
                            "{} exceeds the maximum {}",
                            l.format(l.unit(), scale),
                            max.format(l.unit(), scale)
                        ));
                    }
                }
                Ok(())
            }
            (ParamKind::Count { min, max }, ParamValue::Count(n)) => {
                if n < min || n > max {
                    reject(format!("{} is outside {}..={}", n, min, max))
                } else {
                    Ok(())
                }
            }
            (ParamKind::Flag, ParamValue::Flag(_)) | (ParamKind::Color, ParamValue::Color(_)) => {
                Ok(())
            }
            (_, other) => reject(format!("unexpected {} value", other.kind_name())),
        }
    }
}
