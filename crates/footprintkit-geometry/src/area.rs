//! Area algebra
//!
//! [`Area`] wraps a csgrs [`Sketch`] and is immutable once built. Every
//! primitive constructor and every boolean operation returns a new value;
//! nothing here ever fails. Degenerate input (zero size, fewer than three
//! vertices, non-finite coordinates) degrades to the empty area.
//!
//! Operation order matters for `subtract`: `plate.subtract(&hole)` removes
//! the hole from the plate, never the reverse.

use csgrs::sketch::Sketch;
use csgrs::traits::CSG;
use footprintkit_core::{GeometryResult, Point, DEFAULT_CIRCLE_SEGMENTS, DEFAULT_CORNER_SEGMENTS};
use lyon::math::point;
use lyon::path::{Path, PathEvent};
use nalgebra::{Matrix4, Vector3};
use std::fmt::Write;
use tracing::warn;

use crate::rounded::{rounded_outline, signed_area};
use crate::transform::Transform;

const AREA_EPSILON: f64 = 1e-9;

/// Axis-aligned bounds of an area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    fn include(&mut self, p: Point) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }
}

/// One connected piece of an area: an outer ring and its holes
#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    pub exterior: Vec<Point>,
    pub holes: Vec<Vec<Point>>,
}

impl Outline {
    pub fn area(&self) -> f64 {
        let outer = signed_area(&self.exterior).abs();
        let holes: f64 = self.holes.iter().map(|h| signed_area(h).abs()).sum();
        (outer - holes).max(0.0)
    }
}

#[derive(Debug, Clone)]
pub struct Area {
    sketch: Sketch<()>,
}

impl Area {
    pub fn empty() -> Self {
        Self {
            sketch: Sketch::new(),
        }
    }

    fn from_sketch(sketch: Sketch<()>) -> Self {
        Self { sketch }
    }

    fn from_ring(ring: &[Point]) -> Self {
        if ring.len() < 3 || ring.iter().any(|p| !p.is_finite()) {
            return Self::empty();
        }
        if signed_area(ring).abs() <= AREA_EPSILON {
            return Self::empty();
        }
        let pts: Vec<[f64; 2]> = ring.iter().map(|p| [p.x, p.y]).collect();
        Self::from_sketch(Sketch::polygon(&pts, None))
    }

    /// Axis-aligned rectangle with its top-left corner at `(x, y)`
    ///
    /// Negative sizes are normalised (the rectangle extends the other way).
    pub fn rect(x: f64, y: f64, w: f64, h: f64) -> Self {
        let (x, w) = normalize_span(x, w);
        let (y, h) = normalize_span(y, h);
        if !(w > AREA_EPSILON && h > AREA_EPSILON) || !x.is_finite() || !y.is_finite() {
            return Self::empty();
        }
        // Sketch::rectangle spans (0,0) to (w,h)
        let sketch = Sketch::rectangle(w, h, None);
        let shift = Matrix4::new_translation(&Vector3::new(x, y, 0.0));
        Self::from_sketch(sketch.transform(&shift))
    }

    /// Rectangle with rounded corners; `r` is clamped to half the shorter side
    pub fn round_rect(x: f64, y: f64, w: f64, h: f64, r: f64) -> Self {
        Self::round_rect_with(x, y, w, h, r, DEFAULT_CORNER_SEGMENTS)
    }

    pub fn round_rect_with(x: f64, y: f64, w: f64, h: f64, r: f64, corner_segments: usize) -> Self {
        let (x, w) = normalize_span(x, w);
        let (y, h) = normalize_span(y, h);
        if r <= AREA_EPSILON {
            return Self::rect(x, y, w, h);
        }
        let corners = [
            Point::new(x, y),
            Point::new(x + w, y),
            Point::new(x + w, y + h),
            Point::new(x, y + h),
        ];
        Self::rounded_polygon_with(&corners, &[r], corner_segments)
    }

    /// Circle centred on `(cx, cy)` with diameter `d`
    pub fn circle(cx: f64, cy: f64, d: f64) -> Self {
        Self::circle_with(cx, cy, d, DEFAULT_CIRCLE_SEGMENTS)
    }

    pub fn circle_with(cx: f64, cy: f64, d: f64, segments: usize) -> Self {
        if !(d > AREA_EPSILON) || !cx.is_finite() || !cy.is_finite() {
            return Self::empty();
        }
        let sketch = Sketch::circle(d / 2.0, segments.max(3), None);
        let shift = Matrix4::new_translation(&Vector3::new(cx, cy, 0.0));
        Self::from_sketch(sketch.transform(&shift))
    }

    /// Ellipse inscribed in the box with top-left corner `(x, y)`
    pub fn ellipse(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self::ellipse_with(x, y, w, h, DEFAULT_CIRCLE_SEGMENTS)
    }

    pub fn ellipse_with(x: f64, y: f64, w: f64, h: f64, segments: usize) -> Self {
        let (x, w) = normalize_span(x, w);
        let (y, h) = normalize_span(y, h);
        if !(w > AREA_EPSILON && h > AREA_EPSILON) {
            return Self::empty();
        }
        // Approximate ellipse with polygon
        let steps = segments.max(3);
        let (cx, cy) = (x + w / 2.0, y + h / 2.0);
        let ring: Vec<Point> = (0..steps)
            .map(|i| {
                let theta = std::f64::consts::TAU * (i as f64) / (steps as f64);
                Point::new(cx + w / 2.0 * theta.cos(), cy + h / 2.0 * theta.sin())
            })
            .collect();
        Self::from_ring(&ring)
    }

    /// Closed polygon through `points`
    pub fn polygon(points: &[Point]) -> Self {
        Self::from_ring(points)
    }

    /// Polygon whose corners are rounded with a per-vertex radius
    ///
    /// See [`crate::rounded`] for the clamping rule.
    pub fn rounded_polygon(points: &[Point], radii: &[f64]) -> Self {
        Self::rounded_polygon_with(points, radii, DEFAULT_CORNER_SEGMENTS)
    }

    pub fn rounded_polygon_with(points: &[Point], radii: &[f64], corner_segments: usize) -> Self {
        Self::from_ring(&rounded_outline(points, radii, corner_segments))
    }

    pub fn union(&self, other: &Area) -> Area {
        if other.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return other.clone();
        }
        Self::from_sketch(self.sketch.union(&other.sketch))
    }

    /// Remove `hole` from `self`
    pub fn subtract(&self, hole: &Area) -> Area {
        if self.is_empty() || hole.is_empty() {
            return self.clone();
        }
        Self::from_sketch(self.sketch.difference(&hole.sketch))
    }

    pub fn intersect(&self, other: &Area) -> Area {
        if self.is_empty() || other.is_empty() {
            return Self::empty();
        }
        Self::from_sketch(self.sketch.intersection(&other.sketch))
    }

    /// Union of every area in `parts`, in order
    pub fn union_all<'a>(parts: impl IntoIterator<Item = &'a Area>) -> Area {
        parts
            .into_iter()
            .fold(Area::empty(), |acc, next| acc.union(next))
    }

    /// Map every vertex through `t`; degenerate maps are rejected before any
    /// geometry is touched
    pub fn transform(&self, t: &Transform) -> GeometryResult<Area> {
        t.validate()?;
        Ok(self.map(t))
    }

    /// Like [`Area::transform`] for maps already known to be valid
    pub(crate) fn map(&self, t: &Transform) -> Area {
        if self.is_empty() {
            return Self::empty();
        }
        Self::from_sketch(self.sketch.transform(&t.to_matrix4()))
    }

    pub fn outlines(&self) -> Vec<Outline> {
        let mp = self.sketch.to_multipolygon();
        mp.0.iter()
            .map(|poly| Outline {
                exterior: ring_points(poly.exterior().0.iter().map(|c| (c.x, c.y))),
                holes: poly
                    .interiors()
                    .iter()
                    .map(|ring| ring_points(ring.0.iter().map(|c| (c.x, c.y))))
                    .collect(),
            })
            .filter(|o| o.exterior.len() >= 3)
            .collect()
    }

    /// Number of disjoint pieces
    pub fn piece_count(&self) -> usize {
        self.outlines().iter().filter(|o| o.area() > AREA_EPSILON).count()
    }

    pub fn area(&self) -> f64 {
        self.outlines().iter().map(Outline::area).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.outlines().iter().all(|o| o.area() <= AREA_EPSILON)
    }

    pub fn bounds(&self) -> Option<Bounds> {
        let mut bounds: Option<Bounds> = None;
        for outline in self.outlines() {
            for p in outline.exterior {
                match bounds.as_mut() {
                    Some(b) => b.include(p),
                    None => {
                        bounds = Some(Bounds {
                            min_x: p.x,
                            min_y: p.y,
                            max_x: p.x,
                            max_y: p.y,
                        })
                    }
                }
            }
        }
        bounds
    }

    /// Even-odd point containment over all rings
    pub fn contains(&self, p: Point) -> bool {
        let mut inside = false;
        for outline in self.outlines() {
            for ring in std::iter::once(&outline.exterior).chain(outline.holes.iter()) {
                if ring_crosses(ring, p) {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// Outline as a lyon path, one closed sub-path per ring
    pub fn to_path(&self) -> Path {
        let mut builder = Path::builder();
        for outline in self.outlines() {
            for ring in std::iter::once(&outline.exterior).chain(outline.holes.iter()) {
                let mut first = true;
                for p in ring {
                    let p = point(p.x as f32, p.y as f32);
                    if first {
                        builder.begin(p);
                        first = false;
                    } else {
                        builder.line_to(p);
                    }
                }
                if !first {
                    builder.close();
                }
            }
        }
        builder.build()
    }

    /// SVG path data (`M .. L .. Z`) for every ring, written from
    /// [`Area::to_path`]
    pub fn to_svg_path(&self) -> String {
        let mut svg = String::new();
        for event in self.to_path().iter() {
            match event {
                PathEvent::Begin { at } => {
                    let _ = write!(svg, "M {:.3} {:.3} ", at.x, at.y);
                }
                PathEvent::Line { to, .. }
                | PathEvent::Quadratic { to, .. }
                | PathEvent::Cubic { to, .. } => {
                    let _ = write!(svg, "L {:.3} {:.3} ", to.x, to.y);
                }
                PathEvent::End { close, .. } => {
                    if close {
                        svg.push_str("Z ");
                    }
                }
            }
        }
        svg.trim_end().to_string()
    }
}

impl Default for Area {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for Area {
    /// Equal by value: same rings, same vertices, same order
    fn eq(&self, other: &Self) -> bool {
        self.outlines() == other.outlines()
    }
}

fn normalize_span(start: f64, size: f64) -> (f64, f64) {
    if size < 0.0 {
        (start + size, -size)
    } else {
        (start, size)
    }
}

/// Convert a geo ring into points, dropping the closing duplicate
fn ring_points(coords: impl Iterator<Item = (f64, f64)>) -> Vec<Point> {
    let mut pts: Vec<Point> = coords.map(|(x, y)| Point::new(x, y)).collect();
    if pts.len() > 1 && pts[0] == pts[pts.len() - 1] {
        pts.pop();
    }
    if pts.iter().any(|p| !p.is_finite()) {
        warn!("dropping ring with non-finite coordinates");
        return Vec::new();
    }
    pts
}

fn ring_crosses(ring: &[Point], p: Point) -> bool {
    let mut crosses = false;
    let n = ring.len();
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        if (a.y > p.y) != (b.y > p.y) {
            let x = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x {
                crosses = !crosses;
            }
        }
    }
    crosses
}
