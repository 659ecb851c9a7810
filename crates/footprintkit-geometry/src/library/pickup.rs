//! Guitar pickups
//!
//! The reference point is the pickup centre. Lead wires exit in a row
//! below the widest cover: two for a single coil, four for a humbucker.
//! Lead positions do not depend on the variant, so hot and ground stay put
//! when a single coil becomes a humbucker and the south coil leads are
//! appended on the outside.

use footprintkit_core::Length;

use super::{solid, themed, METAL, PLASTIC};
use crate::part::{
    by_variant, mm, param, AnchorDef, AnchorRule, Color, Condition, ParamDef, PartType, Scalar,
    ShapeExpr, SlotDef,
};

pub const KEY: &str = "pickup";

fn width() -> Scalar {
    by_variant([mm(18.0), mm(38.0)])
}

/// Lead row offset: humbucker half width plus clearance
const LEAD_DROP_MM: f64 = 23.0;

fn lead(name: &'static str, x: f64) -> AnchorDef {
    AnchorDef::derived(name, AnchorRule::Offset((mm(x), mm(LEAD_DROP_MM)))).pin_of("leads")
}

fn lead_pad(anchor: usize) -> ShapeExpr {
    ShapeExpr::circle(Scalar::AnchorX(anchor), Scalar::AnchorY(anchor), mm(2.0))
}

fn pole_row(y: Scalar) -> ShapeExpr {
    ShapeExpr::circle(mm(0.0), y, param("pole_diameter"))
        .repeat(param("pole_count"), (param("string_spacing"), mm(0.0)))
}

pub fn part_type() -> PartType {
    let length = param("length");
    let cover = ShapeExpr::centered_round_rect(
        mm(0.0),
        mm(0.0),
        length.clone(),
        width(),
        // single coils ask for more than fits and clamp to a stadium
        by_variant([mm(12.0), mm(3.0)]),
    );
    let ears = ShapeExpr::centered_round_rect(mm(0.0), mm(0.0), length.clone() + mm(16.0), mm(8.0), mm(4.0))
        .subtract(
            ShapeExpr::circle(mm(0.0), mm(0.0), mm(2.5))
                .repeat(Scalar::Number(2.0), (length + mm(8.0), mm(0.0))),
        );
    let humbucker = Condition::variant(["humbucker"]);
    let poles = pole_row(mm(0.0))
        .when(Condition::variant(["single_coil"]))
        .union(pole_row(-width() * 0.25).when(humbucker.clone()))
        .union(pole_row(width() * 0.25).when(humbucker.clone()));
    let leads = lead_pad(1)
        .union(lead_pad(2))
        .union(lead_pad(3).when(humbucker.clone()))
        .union(lead_pad(4).when(humbucker));

    PartType::new(KEY, "Pickup", "audio")
        .continuous()
        .variant("single_coil", "Single coil", 3)
        .variant("humbucker", "Humbucker", 5)
        .param(ParamDef::length_range(
            "length",
            "Cover length",
            Length::mm(70.0),
            Length::mm(40.0),
            Length::mm(100.0),
        ))
        .param(ParamDef::count("pole_count", "Pole pieces", 6, 1, 12))
        .param(ParamDef::length_range(
            "string_spacing",
            "String spacing",
            Length::mm(10.4),
            Length::mm(5.0),
            Length::mm(12.0),
        ))
        .param(ParamDef::length_range(
            "pole_diameter",
            "Pole diameter",
            Length::mm(5.0),
            Length::mm(1.0),
            Length::mm(8.0),
        ))
        .param(ParamDef::color("cover_color", "Cover colour", Color::rgb(0xf0, 0xec, 0xe0)))
        .anchor(AnchorDef::reference("center").sticky(false))
        .anchor(lead("hot", -2.5))
        .anchor(lead("ground", 2.5))
        .anchor(lead("south_start", -7.5))
        .anchor(lead("south_finish", 7.5))
        .slot(SlotDef::new("mount", ears, solid(PLASTIC)).hidden_in_icon())
        .slot(SlotDef::new("cover", cover, themed("cover_color")))
        .slot(SlotDef::new("poles", poles, solid(METAL)))
        .slot(SlotDef::new("leads", leads, solid(METAL)).hidden_in_icon())
}
