//! Transform pipeline
//!
//! A [`Transform`] is a pure 2D affine value built from a pivot and an angle
//! (or a mirror axis). The same value is applied to anchor points and to every
//! piece of a cached body so both always agree.

use footprintkit_core::{GeometryError, GeometryResult, Point};
use nalgebra::{Matrix3, Matrix4, Vector3};
use serde::{Deserialize, Serialize};

const SINGULAR_EPSILON: f64 = 1e-12;

/// Line a mirror reflects across
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MirrorAxis {
    /// Vertical line through the pivot: left and right swap
    Vertical,
    /// Horizontal line through the pivot: top and bottom swap
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    m: Matrix3<f64>,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            m: Matrix3::identity(),
        }
    }

    pub fn translation(dx: f64, dy: f64) -> Self {
        Self {
            m: Matrix3::new(1.0, 0.0, dx, 0.0, 1.0, dy, 0.0, 0.0, 1.0),
        }
    }

    /// Rotation by `angle` radians about `pivot`
    pub fn rotation(pivot: Point, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::rotation_sin_cos(pivot, s, c)
    }

    /// Rotation in degrees; multiples of 90 use exact sine and cosine
    pub fn rotation_degrees(pivot: Point, degrees: f64) -> Self {
        let (s, c) = sin_cos_degrees(degrees);
        Self::rotation_sin_cos(pivot, s, c)
    }

    /// Rotation by `turns` quarter turns (positive turns are clockwise on a
    /// y-down canvas)
    pub fn quarter_turns(pivot: Point, turns: i32) -> Self {
        Self::rotation_degrees(pivot, 90.0 * f64::from(turns))
    }

    fn rotation_sin_cos(pivot: Point, s: f64, c: f64) -> Self {
        // p' = pivot + R (p - pivot)
        let tx = pivot.x - c * pivot.x + s * pivot.y;
        let ty = pivot.y - s * pivot.x - c * pivot.y;
        Self {
            m: Matrix3::new(c, -s, tx, s, c, ty, 0.0, 0.0, 1.0),
        }
    }

    /// Reflection across `axis` through `pivot`
    pub fn mirror(axis: MirrorAxis, pivot: Point) -> Self {
        let m = match axis {
            MirrorAxis::Vertical => {
                Matrix3::new(-1.0, 0.0, 2.0 * pivot.x, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0)
            }
            MirrorAxis::Horizontal => {
                Matrix3::new(1.0, 0.0, 0.0, 0.0, -1.0, 2.0 * pivot.y, 0.0, 0.0, 1.0)
            }
        };
        Self { m }
    }

    /// Scale about `pivot`; a zero factor is rejected
    pub fn scale(sx: f64, sy: f64, pivot: Point) -> GeometryResult<Self> {
        let t = Self {
            m: Matrix3::new(
                sx,
                0.0,
                pivot.x - sx * pivot.x,
                0.0,
                sy,
                pivot.y - sy * pivot.y,
                0.0,
                0.0,
                1.0,
            ),
        };
        t.validate()?;
        Ok(t)
    }

    /// Build from the linear part `[a b; c d]` and translation `(tx, ty)`
    pub fn from_parts(a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> GeometryResult<Self> {
        let t = Self {
            m: Matrix3::new(a, b, tx, c, d, ty, 0.0, 0.0, 1.0),
        };
        t.validate()?;
        Ok(t)
    }

    /// `t1` applied first, then `t2`
    pub fn compose(t1: &Transform, t2: &Transform) -> Transform {
        t1.then(t2)
    }

    /// `self` applied first, then `next`
    pub fn then(&self, next: &Transform) -> Transform {
        Transform { m: next.m * self.m }
    }

    pub fn apply(&self, p: Point) -> Point {
        let v = self.m * Vector3::new(p.x, p.y, 1.0);
        Point::new(v.x, v.y)
    }

    pub fn determinant(&self) -> f64 {
        self.m[(0, 0)] * self.m[(1, 1)] - self.m[(0, 1)] * self.m[(1, 0)]
    }

    pub fn is_reflection(&self) -> bool {
        self.determinant() < 0.0
    }

    /// Reject singular or non-finite maps
    pub fn validate(&self) -> GeometryResult<()> {
        if self.m.iter().any(|v| !v.is_finite()) {
            return Err(GeometryError::invalid_transform("non-finite coefficient"));
        }
        if self.determinant().abs() < SINGULAR_EPSILON {
            return Err(GeometryError::invalid_transform(
                "degenerate map (zero scale collapses the plane)",
            ));
        }
        Ok(())
    }

    pub fn inverse(&self) -> GeometryResult<Transform> {
        self.validate()?;
        self.m
            .try_inverse()
            .map(|m| Transform { m })
            .ok_or_else(|| GeometryError::invalid_transform("matrix is not invertible"))
    }

    /// Embed in the 4x4 homogeneous form csgrs expects (z untouched)
    pub(crate) fn to_matrix4(&self) -> Matrix4<f64> {
        let m = &self.m;
        Matrix4::new(
            m[(0, 0)],
            m[(0, 1)],
            0.0,
            m[(0, 2)],
            m[(1, 0)],
            m[(1, 1)],
            0.0,
            m[(1, 2)],
            0.0,
            0.0,
            1.0,
            0.0,
            0.0,
            0.0,
            0.0,
            1.0,
        )
    }

    /// Uniform scale factor of the linear part (geometric mean of the axes)
    pub fn scale_factor(&self) -> f64 {
        self.determinant().abs().sqrt()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Sine and cosine of an angle in degrees, exact on the quarter turns
pub fn sin_cos_degrees(degrees: f64) -> (f64, f64) {
    let d = degrees.rem_euclid(360.0);
    if d == 0.0 {
        (0.0, 1.0)
    } else if d == 90.0 {
        (1.0, 0.0)
    } else if d == 180.0 {
        (0.0, -1.0)
    } else if d == 270.0 {
        (-1.0, 0.0)
    } else {
        d.to_radians().sin_cos()
    }
}
