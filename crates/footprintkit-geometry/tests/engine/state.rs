use footprintkit_geometry::{
    Color, GeometryOptions, Orientation, ParamValue, PartInstance, PartLibrary, PartState, Point,
};

use crate::common::{anchors, assert_close, create};

fn library() -> PartLibrary {
    PartLibrary::standard()
}

#[test]
fn test_cutout_round_trips_through_json() {
    let mut cutout = create("cutout", Point::new(40.0, 40.0));
    cutout.set_variant("ellipse").unwrap();
    cutout.set_anchor_point(1, Point::new(120.0, 90.0)).unwrap();
    cutout
        .set_orientation(Orientation::Angle(30.0))
        .unwrap();
    cutout
        .set_param("fill_color", ParamValue::Color(Color::rgb(0x10, 0x20, 0x30)))
        .unwrap();

    let state = cutout.snapshot();
    assert_eq!(state.type_key, "cutout");
    assert_eq!(state.variant, "ellipse");
    assert_eq!(state.free_anchors.len(), 1);

    let json = serde_json::to_string_pretty(&state).unwrap();
    let back: PartState = serde_json::from_str(&json).unwrap();
    assert_eq!(back, state);

    let kind = library().get("cutout").unwrap();
    let mut restored = PartInstance::restore(kind, &back, GeometryOptions::default()).unwrap();
    assert_eq!(restored.id(), cutout.id());
    assert_eq!(restored.orientation(), Orientation::Angle(30.0));
    for (a, b) in anchors(&restored).into_iter().zip(anchors(&cutout)) {
        assert_close(a, b);
    }
    assert_eq!(
        restored.param("fill_color"),
        Some(ParamValue::Color(Color::rgb(0x10, 0x20, 0x30)))
    );
    assert_eq!(restored.body().parts, cutout.body().parts);
}

#[test]
fn test_restore_rejects_mismatched_state() {
    let inlet = create("iec_socket", Point::new(0.0, 0.0));
    let state = inlet.snapshot();

    let err = PartInstance::restore(library().get("jack").unwrap(), &state, GeometryOptions::default())
        .unwrap_err();
    assert!(err.is_invalid_parameter());

    let mut bad_variant = state.clone();
    bad_variant.variant = "c99".to_string();
    assert!(PartInstance::restore(
        library().get("iec_socket").unwrap(),
        &bad_variant,
        GeometryOptions::default()
    )
    .is_err());

    let mut bad_angle = state;
    bad_angle.orientation = Orientation::Angle(45.0);
    assert!(PartInstance::restore(
        library().get("iec_socket").unwrap(),
        &bad_angle,
        GeometryOptions::default()
    )
    .is_err());
}

#[test]
fn test_missing_fields_take_defaults() {
    let json = r#"{
        "id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
        "type_key": "jack",
        "variant": "stereo",
        "reference": { "x": 5.0, "y": 6.0 }
    }"#;
    let state: PartState = serde_json::from_str(json).unwrap();
    assert_eq!(state.orientation, Orientation::Default);
    assert!(!state.mirrored);

    let jack = PartInstance::restore(
        library().get("jack").unwrap(),
        &state,
        GeometryOptions::default(),
    )
    .unwrap();
    assert_eq!(jack.anchor_count(), 3);
    assert_eq!(jack.reference(), Point::new(5.0, 6.0));
    assert_eq!(
        jack.param("spring_length"),
        library().get("jack").unwrap().default_values().first().copied()
    );
}
