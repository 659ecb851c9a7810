use footprintkit_geometry::rounded::{crossing_count, rounded_outline, signed_area};
use footprintkit_geometry::{MirrorAxis, Orientation, PartLibrary, Point};
use proptest::prelude::*;

use crate::common::{anchors, create};

fn close(a: &[Point], b: &[Point]) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .zip(b)
            .all(|(p, q)| (p.x - q.x).abs() < 1e-6 && (p.y - q.y).abs() < 1e-6)
}

/// Every (type, variant) pair in the standard library
fn every_variant() -> Vec<(&'static str, &'static str)> {
    PartLibrary::standard()
        .iter()
        .flat_map(|kind| kind.variants.iter().map(move |v| (kind.key, v.key)))
        .collect()
}

proptest! {
    #[test]
    fn prop_four_quarter_turns_restore_anchors(
        rx in -400.0f64..400.0,
        ry in -400.0f64..400.0,
        px in -400.0f64..400.0,
        py in -400.0f64..400.0,
    ) {
        let pivot = Point::new(px, py);
        for (key, variant) in every_variant() {
            let mut part = create(key, Point::new(rx, ry));
            part.set_variant(variant).unwrap();
            let start = anchors(&part);
            for _ in 0..4 {
                part.rotate_about(pivot, 1).unwrap();
                prop_assert_eq!(part.anchor_count(), start.len());
            }
            prop_assert_eq!(part.orientation(), Orientation::Default);
            prop_assert!(close(&anchors(&part), &start), "{}/{}", key, variant);
        }
    }

    #[test]
    fn prop_double_mirror_is_identity(
        px in -400.0f64..400.0,
        py in -400.0f64..400.0,
        turns in 0i32..4,
    ) {
        let pivot = Point::new(px, py);
        for (key, variant) in every_variant() {
            let mut part = create(key, Point::new(30.0, -10.0));
            part.set_variant(variant).unwrap();
            part.rotate_about(Point::ORIGIN, turns).unwrap();
            let start = anchors(&part);
            for axis in [MirrorAxis::Vertical, MirrorAxis::Horizontal] {
                part.mirror(axis, pivot).unwrap();
                part.mirror(axis, pivot).unwrap();
                prop_assert!(!part.is_mirrored());
                prop_assert!(close(&anchors(&part), &start), "{}/{}", key, variant);
            }
        }
    }

    #[test]
    fn prop_continuous_rotation_reverses(degrees in -720.0f64..720.0) {
        let mut pad = create("solder_pad", Point::new(12.0, 34.0));
        let pivot = Point::new(-50.0, 20.0);
        let start = anchors(&pad);
        pad.rotate_about_angle(pivot, degrees).unwrap();
        pad.rotate_about_angle(pivot, -degrees).unwrap();
        prop_assert!(close(&anchors(&pad), &start));
    }

    #[test]
    fn prop_rounded_rect_stays_simple(
        w in 1.0f64..50.0,
        h in 1.0f64..50.0,
        radius in 0.0f64..100.0,
        segments in 1usize..12,
    ) {
        let corners = [
            Point::new(0.0, 0.0),
            Point::new(w, 0.0),
            Point::new(w, h),
            Point::new(0.0, h),
        ];
        let ring = rounded_outline(&corners, &[radius], segments);
        prop_assert!(ring.len() >= 3);

        let area = signed_area(&ring);
        prop_assert!(area > 0.0);
        prop_assert!(area <= w * h + 1e-9);

        // a convex ring cannot cross itself
        let n = ring.len();
        for i in 0..n {
            let a = ring[i];
            let b = ring[(i + 1) % n];
            let c = ring[(i + 2) % n];
            prop_assert!((b - a).cross(&(c - b)) >= -1e-9);
        }
    }

    #[test]
    fn prop_rounded_star_stays_simple(
        spokes in prop::collection::vec(0.5f64..40.0, 3..12),
        radii in prop::collection::vec(0.0f64..60.0, 1..12),
        segments in 1usize..10,
    ) {
        // vertices at increasing angles form a simple, usually concave polygon
        let n = spokes.len();
        let star: Vec<Point> = spokes
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let t = std::f64::consts::TAU * i as f64 / n as f64;
                Point::new(r * t.cos(), r * t.sin())
            })
            .collect();
        prop_assert_eq!(crossing_count(&star), 0);

        let ring = rounded_outline(&star, &radii, segments);
        prop_assert!(ring.len() >= 3);
        prop_assert_eq!(crossing_count(&ring), 0);
        prop_assert!(signed_area(&ring) > 0.0);
    }
}

#[test]
fn test_rotation_is_exact_on_quarter_turns() {
    let mut inlet = create("iec_socket", Point::new(10.0, 20.0));
    inlet.rotate_about(Point::new(0.0, 0.0), 1).unwrap();
    assert_eq!(inlet.reference(), Point::new(-20.0, 10.0));
    inlet.rotate_about(Point::new(0.0, 0.0), -1).unwrap();
    assert_eq!(inlet.reference(), Point::new(10.0, 20.0));
    assert_eq!(inlet.orientation(), Orientation::Default);
}

#[test]
fn test_horizontal_mirror_turns_half_way() {
    let mut inlet = create("iec_socket", Point::new(0.0, 0.0));
    inlet
        .mirror(MirrorAxis::Horizontal, Point::new(0.0, 50.0))
        .unwrap();
    assert!(inlet.is_mirrored());
    assert_eq!(inlet.orientation(), Orientation::Rotate180);
    assert_eq!(inlet.reference(), Point::new(0.0, 100.0));

    // live and neutral end up above earth
    let earth = inlet.anchor_point(0).unwrap();
    assert!(inlet.anchor_point(1).unwrap().y < earth.y);
    assert!(inlet.anchor_point(2).unwrap().y < earth.y);
}
