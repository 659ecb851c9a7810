use footprintkit_geometry::{Length, MirrorAxis, ParamValue, Point};

use crate::common::{assert_close, create};

/// Spring length 0.5" at 200 px/in
const SPRING: f64 = 100.0;

fn orbit(reference: Point, spring: f64, degrees: f64) -> Point {
    let (s, c) = degrees.to_radians().sin_cos();
    Point::new(reference.x + spring * s, reference.y + spring - spring * c)
}

#[test]
fn test_mono_parts() {
    let mut jack = create("jack", Point::new(0.0, 0.0));
    assert_eq!(jack.anchor_count(), 2);
    let parts = jack.parts();
    let names: Vec<&str> = parts.iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["body", "tip", "ring", "sleeve"]);
    assert!(parts[2].area.is_none());
    assert!(parts.iter().filter(|p| p.name != "ring").all(|p| p.area.is_some()));
}

#[test]
fn test_sleeve_orbits_the_bushing() {
    let tip = Point::new(40.0, 60.0);
    let jack = create("jack", tip);
    assert_eq!(jack.anchor_point(0), Some(tip));
    assert_eq!(jack.anchor_name(1), Some("sleeve"));
    assert_close(jack.anchor_point(1).unwrap(), orbit(tip, SPRING, 135.0));
}

#[test]
fn test_mono_to_stereo_keeps_surviving_anchors() {
    let tip = Point::new(10.0, 10.0);
    let mut jack = create("jack", tip);
    let tip_before = jack.anchor_point(0).unwrap();
    let sleeve_before = jack.anchor_point(1).unwrap();

    jack.set_variant("stereo").unwrap();
    assert_eq!(jack.anchor_count(), 3);
    assert_eq!(jack.anchor_point(0), Some(tip_before));
    assert_eq!(jack.anchor_point(1), Some(sleeve_before));
    assert_eq!(jack.anchor_name(2), Some("ring"));
    assert_close(jack.anchor_point(2).unwrap(), orbit(tip, SPRING, -135.0));
    assert!(jack.body().part("ring").is_some());

    jack.set_variant("mono").unwrap();
    assert_eq!(jack.anchor_count(), 2);
    assert_eq!(jack.anchor_point(2), None);
    assert!(jack.body().part("ring").is_none());
    assert!(jack.body().has_slot("ring"));
}

#[test]
fn test_moving_the_tip_drags_the_sleeve() {
    let mut jack = create("jack", Point::new(0.0, 0.0));
    let target = Point::new(-25.0, 80.0);
    jack.set_anchor_point(0, target).unwrap();
    assert_eq!(jack.reference(), target);
    assert_close(jack.anchor_point(1).unwrap(), orbit(target, SPRING, 135.0));
}

#[test]
fn test_sleeve_is_not_directly_placeable() {
    let mut jack = create("jack", Point::new(0.0, 0.0));
    let before = jack.anchor_point(1).unwrap();
    let err = jack
        .set_anchor_point(1, Point::new(300.0, 300.0))
        .unwrap_err();
    assert!(err.is_invalid_parameter());
    assert_eq!(jack.anchor_point(1), Some(before));
    assert!(jack.set_anchor_point(5, Point::new(0.0, 0.0)).is_err());
}

#[test]
fn test_spring_length_moves_the_sleeve() {
    let mut jack = create("jack", Point::new(0.0, 0.0));
    jack.set_param("spring_length", ParamValue::Length(Length::inch(0.75)))
        .unwrap();
    assert_close(jack.anchor_point(1).unwrap(), orbit(Point::ORIGIN, 150.0, 135.0));

    let err = jack
        .set_param("spring_length", ParamValue::Length(Length::inch(2.0)))
        .unwrap_err();
    assert!(err.is_invalid_parameter());
}

#[test]
fn test_vertical_mirror_flips_the_sleeve() {
    let tip = Point::new(20.0, 20.0);
    let mut jack = create("jack", tip);
    let sleeve = jack.anchor_point(1).unwrap();
    jack.mirror(MirrorAxis::Vertical, tip).unwrap();
    assert!(jack.is_mirrored());
    assert_eq!(jack.anchor_point(0), Some(tip));

    let mirrored = jack.anchor_point(1).unwrap();
    assert_close(mirrored, Point::new(2.0 * tip.x - sleeve.x, sleeve.y));

    // mirroring twice is the identity
    jack.mirror(MirrorAxis::Vertical, tip).unwrap();
    assert!(!jack.is_mirrored());
    assert_close(jack.anchor_point(1).unwrap(), sleeve);
}
