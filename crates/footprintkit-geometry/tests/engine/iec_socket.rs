use footprintkit_geometry::{Orientation, ParamValue, Point, Transform};

use crate::common::{anchors, assert_close, create, mm};

#[test]
fn test_c14_default_layout() {
    let inlet = create("iec_socket", Point::new(100.0, 100.0));
    assert_eq!(inlet.anchor_count(), 3);
    assert_eq!(inlet.anchor_point(0), Some(Point::new(100.0, 100.0)));
    assert_eq!(inlet.anchor_name(0), Some("earth"));

    // earth sits one pin height above live and neutral
    let live = inlet.anchor_point(1).unwrap();
    let neutral = inlet.anchor_point(2).unwrap();
    assert_close(live, Point::new(100.0 - mm(7.0), 100.0 + mm(4.0)));
    assert_close(neutral, Point::new(100.0 + mm(7.0), 100.0 + mm(4.0)));
    assert!((live.y - 100.0 - mm(4.0)).abs() < 1e-9);
}

#[test]
fn test_c14_rotation_about_reference() {
    let pivot = Point::new(100.0, 100.0);
    let mut inlet = create("iec_socket", pivot);
    let before = anchors(&inlet);

    inlet.rotate_about(pivot, 1).unwrap();
    assert_eq!(inlet.orientation(), Orientation::Rotate90);
    assert_eq!(inlet.anchor_point(0), Some(pivot));

    let turn = Transform::rotation_degrees(pivot, 90.0);
    for i in 1..3 {
        assert_close(inlet.anchor_point(i).unwrap(), turn.apply(before[i]));
    }
}

#[test]
fn test_c14_parts() {
    let mut inlet = create("iec_socket", Point::new(100.0, 100.0));
    let parts = inlet.parts();
    let names: Vec<&str> = parts.iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["mount", "courtyard", "coupler"]);
    for part in &parts {
        let area = part.area.as_ref().unwrap();
        assert!(!area.is_empty(), "{} is empty", part.name);
    }

    // the coupler is cut by the three blades
    let coupler = parts[2].area.as_ref().unwrap();
    for p in anchors(&inlet) {
        assert!(!coupler.contains(p));
    }
    let courtyard = parts[1].area.as_ref().unwrap();
    assert!(courtyard.contains(Point::new(100.0, 100.0)));
}

#[test]
fn test_c20_widens_pins() {
    let mut inlet = create("iec_socket", Point::new(0.0, 0.0));
    inlet.set_variant("c20").unwrap();
    assert_eq!(inlet.anchor_count(), 3);
    assert_close(inlet.anchor_point(2).unwrap(), Point::new(mm(8.0), mm(5.0)));
    assert!(inlet.parts().iter().all(|p| p.area.is_some()));
}

#[test]
fn test_screw_holes_flag() {
    let mut inlet = create("iec_socket", Point::new(0.0, 0.0));
    let drilled = inlet.body().part("mount").unwrap().area();
    inlet
        .set_param("screw_holes", ParamValue::Flag(false))
        .unwrap();
    let solid = inlet.body().part("mount").unwrap().area();
    assert!(solid > drilled);
}

#[test]
fn test_discrete_rotation_rejects_angles() {
    let mut inlet = create("iec_socket", Point::new(0.0, 0.0));
    let err = inlet
        .set_orientation(Orientation::Angle(30.0))
        .unwrap_err();
    assert!(err.is_invalid_parameter());
    assert!(inlet
        .rotate_about_angle(Point::new(5.0, 5.0), 45.0)
        .is_err());
    assert_eq!(inlet.orientation(), Orientation::Default);
    assert!(inlet.rotate_about_angle(Point::new(5.0, 5.0), 180.0).is_ok());
    assert_eq!(inlet.orientation(), Orientation::Rotate180);
}
