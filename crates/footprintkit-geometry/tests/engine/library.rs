use footprintkit_geometry::{
    GeometryOptions, MirrorAxis, ParamValue, PartLibrary, Point, Visibility,
};

use crate::common::{anchors, assert_close, create, mm};

#[test]
fn test_every_variant_builds() {
    let library = PartLibrary::standard();
    assert_eq!(library.len(), 7);

    for kind in library.iter() {
        for variant in &kind.variants {
            let mut part = library
                .create(kind.key, Point::new(150.0, 150.0), GeometryOptions::default())
                .unwrap();
            part.set_variant(variant.key).unwrap();
            assert_eq!(part.anchor_count(), variant.anchor_count);

            let body = part.body();
            assert_eq!(body.parts.len(), kind.slots.len(), "{}", kind.key);
            let mut present = 0;
            for (name, area) in body.present() {
                assert!(!area.is_empty(), "{}/{}: {} is empty", kind.key, variant.key, name);
                present += 1;
            }
            assert!(present > 0, "{}/{} has no geometry", kind.key, variant.key);
            assert!(body.bounds().is_some());
        }
    }
}

#[test]
fn test_pins_are_the_sticky_anchors() {
    let library = PartLibrary::standard();
    for kind in library.iter() {
        let mut part = library
            .create(kind.key, Point::new(0.0, 0.0), GeometryOptions::default())
            .unwrap();
        let sticky: Vec<usize> = (0..part.anchor_count())
            .filter(|&i| part.is_anchor_sticky(i))
            .collect();
        let body = part.body();
        let pins: Vec<usize> = body.pins.iter().map(|p| p.index).collect();
        assert_eq!(pins, sticky, "{}", kind.key);
        for pin in &body.pins {
            assert_eq!(Some(pin.point), part.anchor_point(pin.index));
            assert_eq!(Some(pin.name), part.anchor_name(pin.index));
        }
    }
}

#[test]
fn test_unknown_key() {
    let library = PartLibrary::standard();
    let err = library
        .create("flux_capacitor", Point::ORIGIN, GeometryOptions::default())
        .unwrap_err();
    assert!(err.is_invalid_parameter());
}

#[test]
fn test_duplicate_registration_rejected() {
    let mut library = PartLibrary::standard();
    let kind = (*library.get("jack").unwrap()).clone();
    assert!(library.register(kind).is_err());
    assert_eq!(library.len(), 7);
}

#[test]
fn test_cutout_corners_are_free() {
    let mut cutout = create("cutout", Point::new(10.0, 10.0));
    assert!(cutout.body().pins.is_empty());
    assert_eq!(cutout.anchor_visibility(0), Some(Visibility::Always));
    assert_eq!(cutout.visible_anchors(false).len(), 2);

    cutout.set_anchor_point(1, Point::new(110.0, 60.0)).unwrap();
    let bounds = cutout.body().bounds().unwrap();
    assert!((bounds.width() - 100.0).abs() < 1e-6);
    assert!((bounds.height() - 50.0).abs() < 1e-6);
}

#[test]
fn test_pickup_pole_count() {
    let mut pickup = create("pickup", Point::new(0.0, 0.0));
    assert_eq!(pickup.body().part("poles").unwrap().piece_count(), 6);
    pickup.set_param("pole_count", ParamValue::Count(4)).unwrap();
    assert_eq!(pickup.body().part("poles").unwrap().piece_count(), 4);
    assert!(pickup
        .set_param("pole_count", ParamValue::Count(0))
        .is_err());
}

#[test]
fn test_resize_keeps_existing_anchors_for_every_type() {
    let library = PartLibrary::standard();
    let reference = Point::new(120.0, -40.0);

    for kind in library.iter() {
        for from in &kind.variants {
            for to in &kind.variants {
                if from.anchor_count == to.anchor_count {
                    continue;
                }
                let mut part = create(kind.key, reference);
                part.set_variant(from.key).unwrap();
                part.rotate_about(reference, 1).unwrap();
                part.mirror(MirrorAxis::Vertical, reference).unwrap();
                let before = anchors(&part);

                part.set_variant(to.key).unwrap();
                let after = anchors(&part);
                assert_eq!(after.len(), to.anchor_count);
                for (i, (a, b)) in before.iter().zip(&after).enumerate() {
                    assert!(
                        a.approx_eq(b),
                        "{}: {} -> {} moved anchor {}",
                        kind.key,
                        from.key,
                        to.key,
                        i
                    );
                }
                for p in after.iter().skip(before.len()) {
                    assert!(!p.approx_eq(&reference), "{}: new anchor on the reference", kind.key);
                }
            }
        }
    }
}

#[test]
fn test_humbucker_appends_south_leads() {
    let mut pickup = create("pickup", Point::new(0.0, 0.0));
    assert_eq!(pickup.anchor_count(), 3);
    let hot = pickup.anchor_point(1).unwrap();
    let ground = pickup.anchor_point(2).unwrap();
    assert_close(hot, Point::new(mm(-2.5), mm(23.0)));
    assert_close(ground, Point::new(mm(2.5), mm(23.0)));

    pickup.set_variant("humbucker").unwrap();
    assert_eq!(pickup.anchor_count(), 5);
    assert_close(pickup.anchor_point(1).unwrap(), hot);
    assert_close(pickup.anchor_point(2).unwrap(), ground);
    assert_close(pickup.anchor_point(3).unwrap(), Point::new(mm(-7.5), mm(23.0)));
    assert_close(pickup.anchor_point(4).unwrap(), Point::new(mm(7.5), mm(23.0)));
    assert_eq!(pickup.body().part("leads").unwrap().piece_count(), 4);

    pickup.set_variant("single_coil").unwrap();
    assert_eq!(pickup.anchor_count(), 3);
    assert_close(pickup.anchor_point(1).unwrap(), hot);
    assert_eq!(pickup.body().part("leads").unwrap().piece_count(), 2);
}
