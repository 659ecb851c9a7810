//! Trimmer potentiometers in three pin layouts
//!
//! Flat trimmers put the wiper on the far side of a triangle; the vertical
//! inline package has all three pins in a row at 2.5 mm pitch.

use super::{solid, themed, METAL};
use crate::part::{
    by_variant, mm, AnchorDef, AnchorRule, Color, ParamDef, PartType, Scalar, ShapeExpr, SlotDef,
};

pub const KEY: &str = "trimmer";

fn wiper() -> (Scalar, Scalar) {
    (
        by_variant([mm(2.5), mm(5.0), mm(2.5)]),
        by_variant([mm(-5.0), mm(-10.0), mm(0.0)]),
    )
}

fn last_pin() -> (Scalar, Scalar) {
    (by_variant([mm(5.0), mm(10.0), mm(5.0)]), mm(0.0))
}

fn pin(anchor: usize) -> ShapeExpr {
    ShapeExpr::circle(Scalar::AnchorX(anchor), Scalar::AnchorY(anchor), mm(1.2))
}

pub fn part_type() -> PartType {
    // body centred between the outer pins and the wiper
    let cx = Scalar::AnchorX(2).half();
    let cy = Scalar::AnchorY(1).half();
    let body = ShapeExpr::centered_round_rect(
        cx.clone(),
        cy.clone(),
        by_variant([mm(6.5), mm(10.5), mm(9.5)]),
        by_variant([mm(6.5), mm(10.5), mm(4.5)]),
        mm(0.5),
    );
    let dial = by_variant([mm(4.0), mm(7.0), mm(3.0)]);
    let adjuster = ShapeExpr::circle(cx.clone(), cy.clone(), dial.clone()).subtract(
        ShapeExpr::centered_rect(cx, cy, dial * 1.2, mm(0.6)),
    );

    PartType::new(KEY, "Trimmer", "controls")
        .variant("flat_small", "Flat 6 mm", 3)
        .variant("flat_large", "Flat 10 mm", 3)
        .variant("vertical_inline", "Vertical inline", 3)
        .param(ParamDef::color("body_color", "Body colour", Color::rgb(0x20, 0x50, 0xa0)))
        .anchor(AnchorDef::reference("1").pin_of("pins"))
        .anchor(AnchorDef::derived("wiper", AnchorRule::Offset(wiper())).pin_of("pins"))
        .anchor(AnchorDef::derived("3", AnchorRule::Offset(last_pin())).pin_of("pins"))
        .slot(SlotDef::new("body", body, themed("body_color")))
        .slot(SlotDef::new("adjuster", adjuster, solid(Color::WHITE)))
        .slot(SlotDef::new("pins", pin(0).union(pin(1)).union(pin(2)), solid(METAL)).hidden_in_icon())
}
