//! IEC 60320 panel inlets (C14, C20)
//!
//! Pin 0 (earth) is the reference point itself, not a pin offset above it.
//! Earth sits above the live/neutral pair: both are `pin_height` below it
//! (y grows downwards), `half_spacing` either side.

use footprintkit_core::Length;

use super::{solid, themed, METAL, PLASTIC};
use crate::part::{
    by_variant, mm, param, AnchorDef, AnchorRule, Color, Condition, ParamDef, PartType, Scalar, ShapeExpr,
    SlotDef, Vec2,
};

pub const KEY: &str = "iec_socket";

fn half_spacing() -> Scalar {
    by_variant([mm(7.0), mm(8.0)])
}

fn pin_height() -> Scalar {
    by_variant([mm(4.0), mm(5.0)])
}

/// Keyed inlet outline with chamfers on the earth side, shrunk by `inset`
fn inlet_outline(inset: f64) -> Vec<Vec2> {
    let w = by_variant([mm(24.5), mm(29.0)]) - mm(2.0 * inset);
    let h = by_variant([mm(16.0), mm(21.0)]) - mm(2.0 * inset);
    let chamfer = by_variant([mm(4.0), mm(5.0)]);
    let cy = pin_height().half();
    let half_w = || w.clone().half();
    let top = || cy.clone() - h.clone().half();
    let bottom = || cy.clone() + h.clone().half();
    vec![
        (-half_w() + chamfer.clone(), top()),
        (half_w() - chamfer.clone(), top()),
        (half_w(), top() + chamfer.clone()),
        (half_w(), bottom()),
        (-half_w(), bottom()),
        (-half_w(), top() + chamfer),
    ]
}

fn blade(anchor: usize) -> ShapeExpr {
    ShapeExpr::centered_rect(
        Scalar::AnchorX(anchor),
        Scalar::AnchorY(anchor),
        by_variant([mm(1.0), mm(1.5)]),
        by_variant([mm(4.0), mm(5.0)]),
    )
}

pub fn part_type() -> PartType {
    let cy = pin_height().half();
    let flange = ShapeExpr::centered_round_rect(
        mm(0.0),
        cy.clone(),
        by_variant([mm(48.0), mm(56.0)]),
        by_variant([mm(22.0), mm(27.0)]),
        param("flange_radius"),
    );
    let screws = ShapeExpr::circle(mm(0.0), cy, mm(3.2))
        .repeat(Scalar::Number(2.0), (by_variant([mm(40.0), mm(50.0)]), mm(0.0)))
        .when(Condition::Flag("screw_holes"));
    let recess = ShapeExpr::rounded_polygon(inlet_outline(1.5), vec![mm(0.5)]);
    let blades = blade(0).union(blade(1)).union(blade(2));

    PartType::new(KEY, "IEC inlet", "power")
        .variant("c14", "C14 (10 A)", 3)
        .variant("c20", "C20 (16 A)", 3)
        .param(ParamDef::flag("screw_holes", "Screw holes", true))
        .param(ParamDef::length_range(
            "flange_radius",
            "Flange corner radius",
            Length::mm(3.0),
            Length::mm(0.0),
            Length::mm(10.0),
        ))
        .param(ParamDef::color("body_color", "Body colour", Color::rgb(0x50, 0x50, 0x58)))
        .anchor(AnchorDef::reference("earth").pin_of("coupler"))
        .anchor(
            AnchorDef::derived("live", AnchorRule::Offset((-half_spacing(), pin_height())))
                .pin_of("coupler"),
        )
        .anchor(
            AnchorDef::derived("neutral", AnchorRule::Offset((half_spacing(), pin_height())))
                .pin_of("coupler"),
        )
        .slot(SlotDef::new("mount", flange.subtract(screws), themed("body_color")))
        .slot(SlotDef::new(
            "courtyard",
            ShapeExpr::rounded_polygon(inlet_outline(0.0), vec![mm(1.0)]),
            solid(PLASTIC),
        ))
        .slot(SlotDef::new("coupler", recess.subtract(blades), solid(METAL)))
}

