//! Part type descriptions
//!
//! A [`PartType`] is plain data interpreted by [`crate::PartInstance`]:
//! variants, parameter schema, anchor layout rules and the ordered body
//! slots. Adding a footprint never means adding code to the engine.

use footprintkit_core::{GeometryError, GeometryResult, Point, UnitScale};

use super::expr::{Condition, Env, Scalar, ShapeExpr, Vec2};
use super::schema::{Color, ParamDef, ParamValue};
use crate::anchors::Visibility;
use crate::transform::sin_cos_degrees;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationMode {
    /// Quarter turns only
    Discrete,
    /// Any angle
    Continuous,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariantDef {
    pub key: &'static str,
    pub label: &'static str,
    pub anchor_count: usize,
}

/// How an anchor's canonical position is derived
#[derive(Debug, Clone, PartialEq)]
pub enum AnchorRule {
    /// The instance's reference point, always index 0
    Reference,
    /// Fixed offset from the reference
    Offset(Vec2),
    /// `(0, -radius)` rotated by `angle_deg` around `pivot`
    Orbit {
        pivot: Vec2,
        radius: Scalar,
        angle_deg: Scalar,
    },
    /// User-draggable; the value is the default offset
    Free(Vec2),
}

impl AnchorRule {
    pub fn is_derived(&self) -> bool {
        matches!(self, AnchorRule::Offset(_) | AnchorRule::Orbit { .. })
    }

    /// Canonical position; `free` overrides the default of a free anchor
    pub fn locate(&self, env: &Env<'_>, free: Option<Point>) -> Point {
        match self {
            AnchorRule::Reference => Point::ORIGIN,
            AnchorRule::Offset((dx, dy)) => Point::new(dx.eval(env), dy.eval(env)),
            AnchorRule::Orbit {
                pivot,
                radius,
                angle_deg,
            } => {
                let pivot = Point::new(pivot.0.eval(env), pivot.1.eval(env));
                let r = radius.eval(env);
                let (s, c) = sin_cos_degrees(angle_deg.eval(env));
                // R(angle) applied to (0, -r)
                pivot + Point::new(r * s, -r * c)
            }
            AnchorRule::Free((dx, dy)) => {
                free.unwrap_or_else(|| Point::new(dx.eval(env), dy.eval(env)))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnchorDef {
    pub name: &'static str,
    pub rule: AnchorRule,
    pub sticky: bool,
    pub visibility: Visibility,
    /// Body slot this anchor is the logical pin of
    pub part: Option<&'static str>,
}

impl AnchorDef {
    pub fn reference(name: &'static str) -> Self {
        Self {
            name,
            rule: AnchorRule::Reference,
            sticky: true,
            visibility: Visibility::WhenSelected,
            part: None,
        }
    }

    pub fn derived(name: &'static str, rule: AnchorRule) -> Self {
        Self {
            rule,
            ..Self::reference(name)
        }
    }

    pub fn free(name: &'static str, dx: Scalar, dy: Scalar) -> Self {
        Self {
            rule: AnchorRule::Free((dx, dy)),
            sticky: false,
            ..Self::reference(name)
        }
    }

    pub fn sticky(mut self, sticky: bool) -> Self {
        self.sticky = sticky;
        self
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn pin_of(mut self, part: &'static str) -> Self {
        self.part = Some(part);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorSource {
    Fixed(Color),
    /// Read from a colour parameter when drawn
    Param(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlotStyle {
    pub fill: Option<ColorSource>,
    pub stroke: ColorSource,
    /// Outline width in internal units
    pub stroke_width: f64,
}

impl SlotStyle {
    pub fn filled(fill: ColorSource, stroke: ColorSource) -> Self {
        Self {
            fill: Some(fill),
            stroke,
            stroke_width: 1.0,
        }
    }

    pub fn outline(stroke: ColorSource) -> Self {
        Self {
            fill: None,
            stroke,
            stroke_width: 1.0,
        }
    }
}

/// One named layer of a part's body
#[derive(Debug, Clone, PartialEq)]
pub struct SlotDef {
    pub name: &'static str,
    pub shape: ShapeExpr,
    /// A false condition makes the part absent rather than empty
    pub when: Option<Condition>,
    pub style: SlotStyle,
    pub in_icon: bool,
}

impl SlotDef {
    pub fn new(name: &'static str, shape: ShapeExpr, style: SlotStyle) -> Self {
        Self {
            name,
            shape,
            when: None,
            style,
            in_icon: true,
        }
    }

    pub fn only_when(mut self, condition: Condition) -> Self {
        self.when = Some(condition);
        self
    }

    pub fn hidden_in_icon(mut self) -> Self {
        self.in_icon = false;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PartType {
    pub key: &'static str,
    pub name: &'static str,
    pub category: &'static str,
    pub rotation: RotationMode,
    pub variants: Vec<VariantDef>,
    pub params: Vec<ParamDef>,
    pub anchors: Vec<AnchorDef>,
    pub slots: Vec<SlotDef>,
}

impl PartType {
    pub fn new(key: &'static str, name: &'static str, category: &'static str) -> Self {
        Self {
            key,
            name,
            category,
            rotation: RotationMode::Discrete,
            variants: Vec::new(),
            params: Vec::new(),
            anchors: Vec::new(),
            slots: Vec::new(),
        }
    }

    pub fn continuous(mut self) -> Self {
        self.rotation = RotationMode::Continuous;
        self
    }

    pub fn variant(mut self, key: &'static str, label: &'static str, anchor_count: usize) -> Self {
        self.variants.push(VariantDef {
            key,
            label,
            anchor_count,
        });
        self
    }

    pub fn param(mut self, def: ParamDef) -> Self {
        self.params.push(def);
        self
    }

    pub fn anchor(mut self, def: AnchorDef) -> Self {
        self.anchors.push(def);
        self
    }

    pub fn slot(mut self, def: SlotDef) -> Self {
        self.slots.push(def);
        self
    }

    pub fn variant_index(&self, key: &str) -> Option<usize> {
        self.variants.iter().position(|v| v.key == key)
    }

    pub fn param_index(&self, key: &str) -> Option<usize> {
        self.params.iter().position(|p| p.key == key)
    }

    pub fn slot_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.slots.iter().map(|s| s.name)
    }

    pub fn default_values(&self) -> Vec<ParamValue> {
        self.params.iter().map(|p| p.default).collect()
    }

    /// Structural checks run when a type is registered
    pub fn validate(&self) -> GeometryResult<()> {
        let reject = |reason: String| Err(GeometryError::invalid_parameter(self.key, reason));
        if self.variants.is_empty() {
            return reject("part type has no variants".into());
        }
        if !matches!(self.anchors.first().map(|a| &a.rule), Some(AnchorRule::Reference)) {
            return reject("anchor 0 must be the reference point".into());
        }
        if self.anchors[1..].iter().any(|a| a.rule == AnchorRule::Reference) {
            return reject("only anchor 0 may be the reference point".into());
        }
        for v in &self.variants {
            if v.anchor_count == 0 || v.anchor_count > self.anchors.len() {
                return reject(format!(
                    "variant '{}' needs {} anchors but {} are defined",
                    v.key,
                    v.anchor_count,
                    self.anchors.len()
                ));
            }
        }
        for def in &self.params {
            def.validate(&def.default, UnitScale::default())?;
        }
        for (i, slot) in self.slots.iter().enumerate() {
            if self.slots[..i].iter().any(|s| s.name == slot.name) {
                return reject(format!("duplicate slot '{}'", slot.name));
            }
        }
        Ok(())
    }
}
