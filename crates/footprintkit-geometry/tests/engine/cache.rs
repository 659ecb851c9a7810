use footprintkit_geometry::{
    Color, Length, MirrorAxis, Orientation, ParamValue, PartInstance, Point,
};
use std::sync::Arc;

use crate::common::create;

#[test]
fn test_new_instance_starts_dirty() {
    let inlet = create("iec_socket", Point::new(0.0, 0.0));
    assert!(!inlet.is_body_clean());
    assert!(inlet.cached_body().is_none());
    assert_eq!(inlet.body_computations(), 0);
}

#[test]
fn test_body_is_idempotent() {
    let mut inlet = create("iec_socket", Point::new(10.0, 20.0));
    let first = inlet.body();
    let second = inlet.body();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(inlet.body_computations(), 1);
    assert!(inlet.is_body_clean());
    assert!(Arc::ptr_eq(&first, &inlet.cached_body().unwrap()));
}

#[test]
fn test_display_only_param_keeps_cache_clean() {
    let mut inlet = create("iec_socket", Point::new(0.0, 0.0));
    let body = inlet.body();
    let generation = inlet.body_generation();

    inlet
        .set_param("body_color", ParamValue::Color(Color::rgb(200, 10, 10)))
        .unwrap();
    assert!(inlet.is_body_clean());
    assert_eq!(inlet.body_generation(), generation);
    assert!(Arc::ptr_eq(&body, &inlet.body()));
    assert_eq!(inlet.body_computations(), 1);
}

#[test]
fn test_same_value_is_not_a_change() {
    let mut inlet = create("iec_socket", Point::new(0.0, 0.0));
    inlet.body();
    inlet.set_variant("c14").unwrap();
    inlet.set_orientation(Orientation::Default).unwrap();
    inlet.move_to(Point::new(0.0, 0.0)).unwrap();
    inlet
        .set_param("screw_holes", ParamValue::Flag(true))
        .unwrap();
    assert!(inlet.is_body_clean());
}

#[test]
fn test_rejected_setter_keeps_cache_clean() {
    let mut inlet = create("iec_socket", Point::new(0.0, 0.0));
    inlet.body();
    assert!(inlet.set_variant("c99").is_err());
    assert!(inlet
        .set_param("flange_radius", ParamValue::Length(Length::mm(-2.0)))
        .is_err());
    assert!(inlet.is_body_clean());
}

type Setter = fn(&mut PartInstance);

/// Every geometry-affecting setter dirties the cache and changes the body
#[test]
fn test_invalidation_is_complete() {
    let setters: [(&str, Setter); 7] = [
        ("variant", |p: &mut PartInstance| p.set_variant("c20").unwrap()),
        ("flange radius", |p: &mut PartInstance| {
            p.set_param("flange_radius", ParamValue::Length(Length::mm(6.0)))
                .unwrap()
        }),
        ("screw holes", |p: &mut PartInstance| {
            p.set_param("screw_holes", ParamValue::Flag(false)).unwrap()
        }),
        ("move", |p: &mut PartInstance| p.move_to(Point::new(50.0, -20.0)).unwrap()),
        ("orientation", |p: &mut PartInstance| {
            p.set_orientation(Orientation::Rotate270).unwrap()
        }),
        ("rotate about", |p: &mut PartInstance| {
            p.rotate_about(Point::new(-40.0, 10.0), 2).unwrap()
        }),
        ("mirror about", |p: &mut PartInstance| {
            p.mirror(MirrorAxis::Horizontal, Point::new(0.0, 300.0))
                .unwrap()
        }),
    ];

    for (name, set) in setters {
        let mut inlet = create("iec_socket", Point::new(0.0, 0.0));
        let before = inlet.body();
        let generation = inlet.body_generation();
        set(&mut inlet);
        assert!(!inlet.is_body_clean(), "{} left the cache clean", name);
        assert!(inlet.body_generation() > generation, "{}", name);
        let after = inlet.body();
        assert_ne!(before.parts, after.parts, "{} did not change the body", name);
        assert_eq!(inlet.body_computations(), 2, "{}", name);
    }
}

#[test]
fn test_anchor_drag_dirties_cache() {
    let mut cutout = create("cutout", Point::new(0.0, 0.0));
    let before = cutout.body();
    cutout.set_anchor_point(1, Point::new(80.0, 60.0)).unwrap();
    assert!(!cutout.is_body_clean());
    let after = cutout.body();
    assert_ne!(before.parts, after.parts);
    assert!(after.generation > before.generation);
}

#[test]
fn test_clean_body_readable_from_another_thread() {
    let mut jack = create("jack", Point::new(0.0, 0.0));
    let body = jack.body();
    let shared = Arc::clone(&body);
    let reader = std::thread::spawn(move || {
        shared
            .parts
            .iter()
            .filter(|p| p.area.is_some())
            .count()
    });
    jack.move_to(Point::new(30.0, 30.0)).unwrap();
    assert_eq!(reader.join().unwrap(), 3);
    // the snapshot the reader held is untouched by the edit
    assert!(!Arc::ptr_eq(&body, &jack.body()));
}
