//! Open-frame 1/4" jacks
//!
//! The tip lug is the reference point. The sleeve lug (and the ring lug on
//! stereo jacks) is placed by rotating around the bushing centre, which sits
//! one spring length below the tip.

use footprintkit_core::Length;

use super::{solid, themed, METAL};
use crate::part::{
    inch, mm, num, param, AnchorDef, AnchorRule, Color, Condition, ParamDef, PartType, Scalar,
    ShapeExpr, SlotDef,
};

pub const KEY: &str = "jack";

fn pivot() -> (Scalar, Scalar) {
    (mm(0.0), param("spring_length"))
}

fn lug(anchor: usize) -> ShapeExpr {
    ShapeExpr::centered_round_rect(
        Scalar::AnchorX(anchor),
        Scalar::AnchorY(anchor),
        inch(0.16),
        inch(0.25),
        inch(0.04),
    )
    .subtract(ShapeExpr::circle(
        Scalar::AnchorX(anchor),
        Scalar::AnchorY(anchor),
        inch(0.07),
    ))
}

pub fn part_type() -> PartType {
    let (px, py) = pivot();
    let frame = ShapeExpr::circle(px.clone(), py.clone(), param("body_diameter"))
        .subtract(ShapeExpr::circle(px, py, inch(0.375)));

    PartType::new(KEY, "1/4\" jack", "audio")
        .variant("mono", "Mono (TS)", 2)
        .variant("stereo", "Stereo (TRS)", 3)
        .param(ParamDef::length_range(
            "spring_length",
            "Spring length",
            Length::inch(0.5),
            Length::inch(0.25),
            Length::inch(1.0),
        ))
        .param(ParamDef::length_range(
            "body_diameter",
            "Body diameter",
            Length::inch(0.9),
            Length::inch(0.5),
            Length::inch(2.0),
        ))
        .param(ParamDef::color("body_color", "Body colour", Color::rgb(0x30, 0x30, 0x30)))
        .anchor(AnchorDef::reference("tip").pin_of("tip"))
        .anchor(
            AnchorDef::derived(
                "sleeve",
                AnchorRule::Orbit {
                    pivot: pivot(),
                    radius: param("spring_length"),
                    angle_deg: num(135.0),
                },
            )
            .pin_of("sleeve"),
        )
        .anchor(
            AnchorDef::derived(
                "ring",
                AnchorRule::Orbit {
                    pivot: pivot(),
                    radius: param("spring_length"),
                    angle_deg: num(-135.0),
                },
            )
            .pin_of("ring"),
        )
        .slot(SlotDef::new("body", frame, themed("body_color")))
        .slot(SlotDef::new("tip", lug(0), solid(METAL)))
        .slot(SlotDef::new("ring", lug(2), solid(METAL)).only_when(Condition::variant(["stereo"])))
        .slot(SlotDef::new("sleeve", lug(1), solid(METAL)))
}
