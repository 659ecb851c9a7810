//! Declarative part model
//!
//! - `schema`: parameter definitions and values
//! - `expr`: scalar and shape expressions evaluated in the canonical frame
//! - `kind`: part types (variants, anchor rules, body slots)
//! - `instance`: the mutable per-instance aggregate

pub mod expr;
pub mod instance;
pub mod kind;
pub mod schema;

pub use expr::{by_variant, inch, mm, num, param, px, Condition, Env, Primitive, Scalar, ShapeExpr, Vec2};
pub use instance::{Orientation, PartInstance, PartState};
pub use kind::{
    AnchorDef, AnchorRule, ColorSource, PartType, RotationMode, SlotDef, SlotStyle, VariantDef,
};
pub use schema::{Color, ParamDef, ParamKind, ParamValue};
