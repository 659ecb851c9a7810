use footprintkit_geometry::{
    render_icon, render_instance, Color, ParamValue, Point, RasterPainter, RenderContext,
    SvgPainter,
};
use std::sync::Arc;

use crate::common::create;

#[test]
fn test_svg_of_iec_socket() {
    let mut inlet = create("iec_socket", Point::new(100.0, 100.0));
    let mut ctx = RenderContext::default();

    let mut svg = SvgPainter::new();
    render_instance(&mut inlet, &mut ctx, &mut svg, false);
    // three filled and stroked slots, anchors hidden until selected
    assert_eq!(svg.element_count(), 6);

    let mut selected = SvgPainter::new();
    render_instance(&mut inlet, &mut ctx, &mut selected, true);
    assert_eq!(selected.element_count(), 9);

    let bounds = inlet.body().bounds().unwrap();
    let doc = selected.finish(bounds, 5.0);
    assert_eq!(doc.matches("<circle").count(), 3);
    assert!(doc.trim_end().ends_with("</svg>"));
    assert_eq!(inlet.body_computations(), 1);
}

#[test]
fn test_colour_change_reaches_the_drawing() {
    let mut inlet = create("iec_socket", Point::new(0.0, 0.0));
    let mut ctx = RenderContext::default();
    let red = Color::rgb(0xff, 0x00, 0x00);
    inlet
        .set_param("body_color", ParamValue::Color(red))
        .unwrap();
    let mut svg = SvgPainter::new();
    render_instance(&mut inlet, &mut ctx, &mut svg, false);
    let doc = svg.finish(inlet.body().bounds().unwrap(), 0.0);
    assert!(doc.contains(&red.to_hex()));
}

#[test]
fn test_render_context_is_reused() {
    let mut jack = create("jack", Point::new(0.0, 0.0));
    let mut ctx = RenderContext::default();
    render_instance(&mut jack, &mut ctx, &mut SvgPainter::new(), true);
    let built = ctx.resources_built();
    assert!(built > 0);
    render_instance(&mut jack, &mut ctx, &mut SvgPainter::new(), true);
    assert_eq!(ctx.resources_built(), built);
}

#[test]
fn test_raster_png_of_jack() {
    let mut jack = create("jack", Point::new(0.0, 0.0));
    jack.set_variant("stereo").unwrap();
    let bounds = jack.body().bounds().unwrap();

    let mut ctx = RenderContext::default();
    let mut raster = RasterPainter::new(128, 128, bounds, 10.0).unwrap();
    render_instance(&mut jack, &mut ctx, &mut raster, true);
    assert!(raster
        .pixmap()
        .pixels()
        .iter()
        .any(|p| p.red() != 255 || p.green() != 255 || p.blue() != 255));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jack.png");
    raster.save_png(&path).unwrap();
    assert!(std::fs::metadata(&path).unwrap().len() > 0);
}

#[test]
fn test_icon_fits_and_is_cached() {
    let mut inlet = create("iec_socket", Point::new(300.0, 300.0));
    let icon = inlet.icon_geometry(64.0).unwrap();
    let bounds = icon.bounds().unwrap();
    assert!(bounds.min_x >= -1e-6 && bounds.min_y >= -1e-6);
    assert!(bounds.max_x <= 64.0 + 1e-6 && bounds.max_y <= 64.0 + 1e-6);
    assert!((bounds.width().max(bounds.height()) - 64.0).abs() < 1e-6);

    // geometry edits leave the icon alone until it is refreshed
    inlet
        .set_param("screw_holes", ParamValue::Flag(false))
        .unwrap();
    assert!(Arc::ptr_eq(&icon, &inlet.icon_geometry(64.0).unwrap()));

    let refreshed = inlet.refresh_icon_geometry(64.0).unwrap();
    assert!(!Arc::ptr_eq(&icon, &refreshed));
    assert_ne!(icon.parts, refreshed.parts);

    let larger = inlet.icon_geometry(128.0).unwrap();
    assert_eq!(larger.size, 128.0);
    assert!(inlet.icon_geometry(0.0).is_err());
}

#[test]
fn test_icon_skips_hidden_slots() {
    let mut pad = create("solder_pad", Point::new(0.0, 0.0));
    let icon = pad.icon_geometry(32.0).unwrap();
    let names: Vec<&str> = icon.parts.iter().map(|(name, _)| *name).collect();
    assert_eq!(names, vec!["pad"]);

    let mut ctx = RenderContext::default();
    let mut svg = SvgPainter::new();
    render_icon(&icon, pad.part_type(), &mut ctx, &mut svg);
    assert_eq!(svg.element_count(), 2);
}
