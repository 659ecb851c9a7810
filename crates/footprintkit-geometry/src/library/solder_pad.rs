//! Solder pads, square or round, optionally drilled

use footprintkit_core::Length;

use super::{solid, COPPER, MASK};
use crate::part::{
    mm, param, AnchorDef, Condition, ParamDef, PartType, Scalar, ShapeExpr, SlotDef,
};

pub const KEY: &str = "solder_pad";

fn land(size: Scalar) -> ShapeExpr {
    let square = ShapeExpr::centered_round_rect(
        mm(0.0),
        mm(0.0),
        size.clone(),
        size.clone(),
        param("corner_radius"),
    )
    .when(Condition::variant(["square"]));
    let round = ShapeExpr::circle(mm(0.0), mm(0.0), size).when(Condition::variant(["round"]));
    square.union(round)
}

pub fn part_type() -> PartType {
    let drill = ShapeExpr::circle(mm(0.0), mm(0.0), param("drill"))
        .when(Condition::Positive(param("drill")));
    let mask_size = param("size") + param("mask_margin") * 2.0;

    PartType::new(KEY, "Solder pad", "pcb")
        .continuous()
        .variant("square", "Square", 1)
        .variant("round", "Round", 1)
        .param(ParamDef::length_range(
            "size",
            "Pad size",
            Length::mm(2.0),
            Length::mm(0.2),
            Length::mm(20.0),
        ))
        .param(ParamDef::length_range(
            "drill",
            "Drill diameter",
            Length::mm(0.8),
            Length::mm(0.0),
            Length::mm(10.0),
        ))
        .param(ParamDef::length_range(
            "mask_margin",
            "Solder mask margin",
            Length::mm(0.1),
            Length::mm(0.0),
            Length::mm(2.0),
        ))
        .param(ParamDef::length("corner_radius", "Corner radius", Length::mm(0.0)))
        .anchor(AnchorDef::reference("pad").pin_of("pad"))
        .slot(SlotDef::new("mask", land(mask_size), solid(MASK)).hidden_in_icon())
        .slot(SlotDef::new("pad", land(param("size")).subtract(drill), solid(COPPER)))
}
