//! Shape expressions
//!
//! A part type describes its body as a tree of primitives and boolean
//! operations over scalar expressions. The tree is evaluated against an
//! [`Env`] in the part's canonical frame (reference point at the origin,
//! default orientation, y pointing down) and is never evaluated against
//! already-transformed geometry.

use footprintkit_core::{GeometryOptions, Length, Point};
use std::ops::{Add, Mul, Neg, Sub};
use tracing::warn;

use super::schema::{ParamDef, ParamValue};
use crate::area::Area;
use crate::transform::Transform;

/// Everything a shape expression may read
#[derive(Debug, Clone, Copy)]
pub struct Env<'a> {
    pub options: GeometryOptions,
    pub variant: usize,
    pub variant_key: &'a str,
    pub params: &'a [ParamDef],
    pub values: &'a [ParamValue],
    /// Anchor positions in the canonical frame
    pub anchors: &'a [Point],
}

impl Env<'_> {
    pub fn param(&self, key: &str) -> Option<&ParamValue> {
        self.params
            .iter()
            .position(|def| def.key == key)
            .and_then(|i| self.values.get(i))
    }
}

/// A number in internal units (or a plain count)
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Fixed(Length),
    Number(f64),
    Param(&'static str),
    /// Indexed by variant; the last entry covers any later variants
    ByVariant(Vec<Scalar>),
    AnchorX(usize),
    AnchorY(usize),
    Add(Box<Scalar>, Box<Scalar>),
    Sub(Box<Scalar>, Box<Scalar>),
    Mul(Box<Scalar>, Box<Scalar>),
    Neg(Box<Scalar>),
}

pub fn mm(v: f64) -> Scalar {
    Scalar::Fixed(Length::mm(v))
}

pub fn inch(v: f64) -> Scalar {
    Scalar::Fixed(Length::inch(v))
}

/// Internal units, unaffected by the unit scale
pub fn px(v: f64) -> Scalar {
    Scalar::Fixed(Length::px(v))
}

pub fn num(v: f64) -> Scalar {
    Scalar::Number(v)
}

pub fn param(key: &'static str) -> Scalar {
    Scalar::Param(key)
}

pub fn by_variant(values: impl IntoIterator<Item = Scalar>) -> Scalar {
    Scalar::ByVariant(values.into_iter().collect())
}

impl Scalar {
    pub fn eval(&self, env: &Env<'_>) -> f64 {
        match self {
            Scalar::Fixed(l) => l.to_pixels(env.options.scale),
            Scalar::Number(v) => *v,
            Scalar::Param(key) => match env.param(key) {
                Some(v) => v.magnitude(env.options.scale),
                None => {
                    warn!(param = key, "shape refers to an unknown parameter");
                    0.0
                }
            },
            Scalar::ByVariant(values) => match values.get(env.variant).or(values.last()) {
                Some(v) => v.eval(env),
                None => 0.0,
            },
            Scalar::AnchorX(i) => env.anchors.get(*i).map_or(0.0, |p| p.x),
            Scalar::AnchorY(i) => env.anchors.get(*i).map_or(0.0, |p| p.y),
            Scalar::Add(a, b) => a.eval(env) + b.eval(env),
            Scalar::Sub(a, b) => a.eval(env) - b.eval(env),
            Scalar::Mul(a, b) => a.eval(env) * b.eval(env),
            Scalar::Neg(a) => -a.eval(env),
        }
    }

    pub fn half(self) -> Scalar {
        self * 0.5
    }
}

impl Add for Scalar {
    type Output = Scalar;
    fn add(self, rhs: Scalar) -> Scalar {
        Scalar::Add(Box::new(self), Box::new(rhs))
    }
}

impl Sub for Scalar {
    type Output = Scalar;
    fn sub(self, rhs: Scalar) -> Scalar {
        Scalar::Sub(Box::new(self), Box::new(rhs))
    }
}

impl Mul for Scalar {
    type Output = Scalar;
    fn mul(self, rhs: Scalar) -> Scalar {
        Scalar::Mul(Box::new(self), Box::new(rhs))
    }
}

impl Mul<f64> for Scalar {
    type Output = Scalar;
    fn mul(self, rhs: f64) -> Scalar {
        Scalar::Mul(Box::new(self), Box::new(Scalar::Number(rhs)))
    }
}

impl Neg for Scalar {
    type Output = Scalar;
    fn neg(self) -> Scalar {
        Scalar::Neg(Box::new(self))
    }
}

/// A point expression
pub type Vec2 = (Scalar, Scalar);

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Rect {
        x: Scalar,
        y: Scalar,
        w: Scalar,
        h: Scalar,
    },
    RoundRect {
        x: Scalar,
        y: Scalar,
        w: Scalar,
        h: Scalar,
        r: Scalar,
    },
    Circle {
        cx: Scalar,
        cy: Scalar,
        d: Scalar,
    },
    Ellipse {
        x: Scalar,
        y: Scalar,
        w: Scalar,
        h: Scalar,
    },
    Polygon(Vec<Vec2>),
    RoundedPolygon {
        points: Vec<Vec2>,
        radii: Vec<Scalar>,
    },
}

impl Primitive {
    fn eval(&self, env: &Env<'_>) -> Area {
        let opts = env.options;
        match self {
            Primitive::Rect { x, y, w, h } => {
                Area::rect(x.eval(env), y.eval(env), w.eval(env), h.eval(env))
            }
            Primitive::RoundRect { x, y, w, h, r } => Area::round_rect_with(
                x.eval(env),
                y.eval(env),
                w.eval(env),
                h.eval(env),
                r.eval(env),
                opts.corner_segments,
            ),
            Primitive::Circle { cx, cy, d } => {
                Area::circle_with(cx.eval(env), cy.eval(env), d.eval(env), opts.circle_segments)
            }
            Primitive::Ellipse { x, y, w, h } => Area::ellipse_with(
                x.eval(env),
                y.eval(env),
                w.eval(env),
                h.eval(env),
                opts.circle_segments,
            ),
            Primitive::Polygon(points) => Area::polygon(&eval_points(points, env)),
            Primitive::RoundedPolygon { points, radii } => {
                let radii: Vec<f64> = radii.iter().map(|r| r.eval(env)).collect();
                Area::rounded_polygon_with(&eval_points(points, env), &radii, opts.corner_segments)
            }
        }
    }
}

fn eval_points(points: &[Vec2], env: &Env<'_>) -> Vec<Point> {
    points
        .iter()
        .map(|(x, y)| Point::new(x.eval(env), y.eval(env)))
        .collect()
}

/// Predicate gating an optional shape or slot
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// True for any of the listed variant keys
    Variant(Vec<&'static str>),
    Flag(&'static str),
    Positive(Scalar),
    Not(Box<Condition>),
}

impl Condition {
    pub fn variant(keys: impl IntoIterator<Item = &'static str>) -> Self {
        Condition::Variant(keys.into_iter().collect())
    }

    pub fn eval(&self, env: &Env<'_>) -> bool {
        match self {
            Condition::Variant(keys) => keys.iter().any(|k| *k == env.variant_key),
            Condition::Flag(key) => env
                .param(key)
                .and_then(ParamValue::as_flag)
                .unwrap_or(false),
            Condition::Positive(s) => s.eval(env) > 0.0,
            Condition::Not(c) => !c.eval(env),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShapeExpr {
    Empty,
    Prim(Primitive),
    Union(Vec<ShapeExpr>),
    /// `hole` removed from `from`
    Subtract {
        from: Box<ShapeExpr>,
        hole: Box<ShapeExpr>,
    },
    Intersect(Box<ShapeExpr>, Box<ShapeExpr>),
    /// `count` copies spaced by `step`, centred on the original position
    Repeat {
        shape: Box<ShapeExpr>,
        count: Scalar,
        step: Vec2,
    },
    When(Condition, Box<ShapeExpr>),
}

impl ShapeExpr {
    pub fn rect(x: Scalar, y: Scalar, w: Scalar, h: Scalar) -> Self {
        ShapeExpr::Prim(Primitive::Rect { x, y, w, h })
    }

    /// Rectangle of size `w` x `h` centred on `(cx, cy)`
    pub fn centered_rect(cx: Scalar, cy: Scalar, w: Scalar, h: Scalar) -> Self {
        ShapeExpr::Prim(Primitive::Rect {
            x: cx - w.clone().half(),
            y: cy - h.clone().half(),
            w,
            h,
        })
    }

    pub fn centered_round_rect(cx: Scalar, cy: Scalar, w: Scalar, h: Scalar, r: Scalar) -> Self {
        ShapeExpr::Prim(Primitive::RoundRect {
            x: cx - w.clone().half(),
            y: cy - h.clone().half(),
            w,
            h,
            r,
        })
    }

    pub fn circle(cx: Scalar, cy: Scalar, d: Scalar) -> Self {
        ShapeExpr::Prim(Primitive::Circle { cx, cy, d })
    }

    pub fn ellipse(x: Scalar, y: Scalar, w: Scalar, h: Scalar) -> Self {
        ShapeExpr::Prim(Primitive::Ellipse { x, y, w, h })
    }

    pub fn polygon(points: Vec<Vec2>) -> Self {
        ShapeExpr::Prim(Primitive::Polygon(points))
    }

    pub fn rounded_polygon(points: Vec<Vec2>, radii: Vec<Scalar>) -> Self {
        ShapeExpr::Prim(Primitive::RoundedPolygon { points, radii })
    }

    pub fn union(self, other: ShapeExpr) -> Self {
        match self {
            ShapeExpr::Union(mut items) => {
                items.push(other);
                ShapeExpr::Union(items)
            }
            first => ShapeExpr::Union(vec![first, other]),
        }
    }

    pub fn subtract(self, hole: ShapeExpr) -> Self {
        ShapeExpr::Subtract {
            from: Box::new(self),
            hole: Box::new(hole),
        }
    }

    pub fn intersect(self, other: ShapeExpr) -> Self {
        ShapeExpr::Intersect(Box::new(self), Box::new(other))
    }

    pub fn repeat(self, count: Scalar, step: Vec2) -> Self {
        ShapeExpr::Repeat {
            shape: Box::new(self),
            count,
            step,
        }
    }

    pub fn when(self, condition: Condition) -> Self {
        ShapeExpr::When(condition, Box::new(self))
    }

    pub fn eval(&self, env: &Env<'_>) -> Area {
        match self {
            ShapeExpr::Empty => Area::empty(),
            ShapeExpr::Prim(p) => p.eval(env),
            ShapeExpr::Union(items) => {
                let areas: Vec<Area> = items.iter().map(|s| s.eval(env)).collect();
                Area::union_all(&areas)
            }
            ShapeExpr::Subtract { from, hole } => from.eval(env).subtract(&hole.eval(env)),
            ShapeExpr::Intersect(a, b) => a.eval(env).intersect(&b.eval(env)),
            ShapeExpr::Repeat { shape, count, step } => {
                let n = count.eval(env);
                if !n.is_finite() || n < 1.0 {
                    return Area::empty();
                }
                let n = n.round() as usize;
                let base = shape.eval(env);
                let (sx, sy) = (step.0.eval(env), step.1.eval(env));
                let mid = (n as f64 - 1.0) / 2.0;
                let copies: Vec<Area> = (0..n)
                    .map(|i| {
                        let k = i as f64 - mid;
                        base.map(&Transform::translation(k * sx, k * sy))
                    })
                    .collect();
                Area::union_all(&copies)
            }
            ShapeExpr::When(cond, shape) => {
                if cond.eval(env) {
                    shape.eval(env)
                } else {
                    Area::empty()
                }
            }
        }
    }
}
