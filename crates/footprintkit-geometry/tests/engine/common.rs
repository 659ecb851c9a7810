use footprintkit_geometry::{GeometryOptions, PartInstance, PartLibrary, Point};

pub fn create(key: &str, at: Point) -> PartInstance {
    PartLibrary::standard()
        .create(key, at, GeometryOptions::default())
        .unwrap()
}

/// Internal units for a length in millimetres at the default 200 px/in
pub fn mm(v: f64) -> f64 {
    v / 25.4 * 200.0
}

pub fn anchors(part: &PartInstance) -> Vec<Point> {
    (0..part.anchor_count())
        .map(|i| part.anchor_point(i).unwrap())
        .collect()
}

pub fn assert_close(a: Point, b: Point) {
    assert!(
        (a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6,
        "{:?} != {:?}",
        a,
        b
    );
}
