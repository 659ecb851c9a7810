//! Panel cutouts spanning the reference corner and a free opposite corner

use footprintkit_core::Length;

use super::OUTLINE;
use crate::anchors::Visibility;
use crate::part::{
    mm, param, AnchorDef, Color, ColorSource, Condition, ParamDef, PartType, Primitive, Scalar,
    ShapeExpr, SlotDef, SlotStyle,
};

pub const KEY: &str = "cutout";

pub fn part_type() -> PartType {
    let (w, h) = (Scalar::AnchorX(1), Scalar::AnchorY(1));
    let rectangle = ShapeExpr::Prim(Primitive::RoundRect {
        x: mm(0.0),
        y: mm(0.0),
        w: w.clone(),
        h: h.clone(),
        r: param("corner_radius"),
    })
    .when(Condition::variant(["rectangle"]));
    let ellipse = ShapeExpr::ellipse(mm(0.0), mm(0.0), w, h).when(Condition::variant(["ellipse"]));

    let style = SlotStyle {
        fill: Some(ColorSource::Param("fill_color")),
        stroke: ColorSource::Fixed(OUTLINE),
        stroke_width: 1.5,
    };

    PartType::new(KEY, "Cutout", "panel")
        .continuous()
        .variant("rectangle", "Rectangle", 2)
        .variant("ellipse", "Ellipse", 2)
        .param(ParamDef::length("corner_radius", "Corner radius", Length::mm(0.0)))
        .param(ParamDef::color("fill_color", "Fill colour", Color::rgba(0xff, 0xff, 0xff, 0x00)))
        .anchor(
            AnchorDef::reference("corner")
                .sticky(false)
                .visibility(Visibility::Always),
        )
        .anchor(AnchorDef::free("opposite", mm(20.0), mm(10.0)).visibility(Visibility::Always))
        .slot(SlotDef::new("cutout", rectangle.union(ellipse), style))
}
