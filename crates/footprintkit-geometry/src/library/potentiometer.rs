//! Rotary potentiometers with three terminals in a row
//!
//! Terminal 1 is the reference point; the wiper and terminal 3 follow at the
//! variant's pitch. The body sits above the terminals.

use footprintkit_core::Length;

use super::{solid, themed, METAL};
use crate::part::{
    by_variant, inch, mm, param, AnchorDef, AnchorRule, Color, Condition, ParamDef, PartType,
    Scalar, ShapeExpr, SlotDef,
};

pub const KEY: &str = "potentiometer";

fn pitch() -> Scalar {
    by_variant([mm(5.0), inch(0.3)])
}

/// Body centre, relative to the reference terminal
fn body_center() -> (Scalar, Scalar) {
    let cy = -param("body_size").half() + by_variant([mm(3.0), mm(-2.0)]);
    (pitch(), cy)
}

pub fn part_type() -> PartType {
    let (cx, cy) = body_center();
    let body = ShapeExpr::circle(cx.clone(), cy.clone(), param("body_size"));
    // D-shaft: the flat takes 1.5 mm off the top of the 1/4" shaft
    let shaft = ShapeExpr::circle(cx.clone(), cy.clone(), inch(0.25)).subtract(ShapeExpr::rect(
        cx.clone() - inch(0.2),
        cy.clone() - inch(0.2),
        inch(0.4),
        inch(0.075) + mm(1.5),
    ));

    let pcb_pins = ShapeExpr::circle(Scalar::AnchorX(1), Scalar::AnchorY(1), mm(2.0))
        .repeat(Scalar::Number(3.0), (pitch(), mm(0.0)))
        .when(Condition::variant(["pcb"]));
    let solder_lugs = ShapeExpr::centered_round_rect(
        Scalar::AnchorX(1),
        Scalar::AnchorY(1),
        mm(3.0),
        mm(6.0),
        mm(1.0),
    )
    .subtract(ShapeExpr::circle(Scalar::AnchorX(1), Scalar::AnchorY(1), mm(1.5)))
    .repeat(Scalar::Number(3.0), (pitch(), mm(0.0)))
    .when(Condition::variant(["solder_lug"]));

    PartType::new(KEY, "Potentiometer", "controls")
        .variant("pcb", "PCB mount", 3)
        .variant("solder_lug", "Solder lug", 3)
        .param(ParamDef::length_range(
            "body_size",
            "Body diameter",
            Length::mm(24.0),
            Length::mm(9.0),
            Length::mm(40.0),
        ))
        .param(ParamDef::color("body_color", "Body colour", Color::rgb(0x40, 0x60, 0x90)))
        .anchor(AnchorDef::reference("1").pin_of("terminals"))
        .anchor(
            AnchorDef::derived("wiper", AnchorRule::Offset((pitch(), mm(0.0)))).pin_of("terminals"),
        )
        .anchor(
            AnchorDef::derived("3", AnchorRule::Offset((pitch() * 2.0, mm(0.0))))
                .pin_of("terminals"),
        )
        .slot(SlotDef::new("body", body, themed("body_color")))
        .slot(SlotDef::new("terminals", pcb_pins.union(solder_lugs), solid(METAL)))
        .slot(SlotDef::new("shaft", shaft, solid(METAL)))
}
