//! Rounded polygon outlines
//!
//! Each vertex has its incoming and outgoing edges trimmed back by the
//! requested corner radius, and the two trim points are joined by the
//! circular arc tangent to both edges. The trim length is clamped to half of
//! the shorter adjacent edge, so neighbouring corners never overlap.
//!
//! On concave outlines an arc can still reach across a non-adjacent edge.
//! Corners involved in such a crossing have their trim halved until the
//! ring is simple again; a corner that keeps crossing ends up sharp. A
//! simple input polygon therefore always yields a simple ring. Oversized
//! radii are never an error.

use footprintkit_core::Point;
use tracing::debug;

const COLLINEAR_EPSILON: f64 = 1e-9;

/// Halvings before a crossing corner falls back to a sharp vertex
const MAX_SHRINK_STEPS: u32 = 10;

/// Radius for vertex `i`: a single value applies to every corner, a short
/// list repeats its last entry, an empty list means sharp corners.
fn radius_for(radii: &[f64], i: usize) -> f64 {
    match radii.len() {
        0 => 0.0,
        1 => radii[0],
        n => radii[i.min(n - 1)],
    }
}

/// Trim length actually used at a vertex
pub fn clamped_trim(radius: f64, incoming: f64, outgoing: f64) -> f64 {
    if !radius.is_finite() || radius <= 0.0 {
        return 0.0;
    }
    radius.min(incoming / 2.0).min(outgoing / 2.0).max(0.0)
}

/// Append the outline of one corner: the vertex itself when sharp, else
/// the trim points joined by the tangent arc.
fn push_corner(prev: Point, cur: Point, next: Point, trim: f64, segments: usize, out: &mut Vec<Point>) {
    if trim <= COLLINEAR_EPSILON {
        out.push(cur);
        return;
    }

    let len_in = cur.distance_to(&prev);
    let len_out = cur.distance_to(&next);
    let u = (prev - cur) * (1.0 / len_in);
    let v = (next - cur) * (1.0 / len_out);
    let bisector = u + v;
    let bisector_len = bisector.length();
    if bisector_len <= COLLINEAR_EPSILON {
        // straight-through vertex, nothing to round
        out.push(cur);
        return;
    }

    // half of the interior angle between the two edges
    let half = (u.dot(&v).clamp(-1.0, 1.0)).acos() / 2.0;
    let arc_radius = trim * half.tan();
    if arc_radius <= COLLINEAR_EPSILON {
        out.push(cur);
        return;
    }

    let a = cur + u * trim;
    let b = cur + v * trim;
    let center = cur + bisector * (trim / half.cos() / bisector_len);

    let start = (a.y - center.y).atan2(a.x - center.x);
    let end = (b.y - center.y).atan2(b.x - center.x);
    let mut sweep = end - start;
    while sweep > std::f64::consts::PI {
        sweep -= std::f64::consts::TAU;
    }
    while sweep < -std::f64::consts::PI {
        sweep += std::f64::consts::TAU;
    }

    out.push(a);
    for step in 1..segments {
        let t = start + sweep * (step as f64) / (segments as f64);
        out.push(Point::new(
            center.x + arc_radius * t.cos(),
            center.y + arc_radius * t.sin(),
        ));
    }
    out.push(b);
}

/// Build the ring for the given trims; each point carries the index of
/// the corner that produced it.
fn build_ring(points: &[Point], trims: &[f64], segments: usize) -> Vec<(Point, usize)> {
    let n = points.len();
    let mut ring = Vec::with_capacity(n * (segments + 1));
    let mut corner = Vec::with_capacity(segments + 1);
    for i in 0..n {
        corner.clear();
        push_corner(
            points[(i + n - 1) % n],
            points[i],
            points[(i + 1) % n],
            trims[i],
            segments,
            &mut corner,
        );
        ring.extend(corner.iter().map(|&p| (p, i)));
    }

    // fully clamped neighbours meet at the same edge midpoint
    ring.dedup_by(|a, b| a.0.distance_to(&b.0) <= COLLINEAR_EPSILON);
    while ring.len() > 1 && ring[0].0.distance_to(&ring[ring.len() - 1].0) <= COLLINEAR_EPSILON {
        ring.pop();
    }
    ring
}

/// Proper crossing of segments `ab` and `cd`; touching does not count
fn segments_cross(a: Point, b: Point, c: Point, d: Point) -> bool {
    let d1 = (b - a).cross(&(c - a));
    let d2 = (b - a).cross(&(d - a));
    let d3 = (d - c).cross(&(a - c));
    let d4 = (d - c).cross(&(b - c));
    let opposite = |p: f64, q: f64| (p > COLLINEAR_EPSILON && q < -COLLINEAR_EPSILON)
        || (p < -COLLINEAR_EPSILON && q > COLLINEAR_EPSILON);
    opposite(d1, d2) && opposite(d3, d4)
}

/// Pairs of non-adjacent ring edges (by start index) that cross
fn crossing_edges(ring: &[Point]) -> Vec<(usize, usize)> {
    let m = ring.len();
    let mut crossings = Vec::new();
    if m < 4 {
        return crossings;
    }
    for i in 0..m {
        for j in (i + 2)..m {
            if i == 0 && j == m - 1 {
                continue;
            }
            if segments_cross(ring[i], ring[(i + 1) % m], ring[j], ring[(j + 1) % m]) {
                crossings.push((i, j));
            }
        }
    }
    crossings
}

/// Number of proper self-crossings of a closed ring
pub fn crossing_count(ring: &[Point]) -> usize {
    crossing_edges(ring).len()
}

/// Flatten a rounded polygon into a vertex ring (not explicitly closed)
pub fn rounded_outline(points: &[Point], radii: &[f64], corner_segments: usize) -> Vec<Point> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }
    let segments = corner_segments.max(1);

    let mut clamped = 0usize;
    let mut trims: Vec<f64> = (0..n)
        .map(|i| {
            let cur = points[i];
            let requested = radius_for(radii, i);
            let trim = clamped_trim(
                requested,
                cur.distance_to(&points[(i + n - 1) % n]),
                cur.distance_to(&points[(i + 1) % n]),
            );
            if trim + COLLINEAR_EPSILON < requested {
                clamped += 1;
            }
            trim
        })
        .collect();
    if clamped > 0 {
        debug!(corners = clamped, "rounded polygon radius clamped to half the shorter edge");
    }

    let mut shrink_steps = vec![0u32; n];
    loop {
        let ring = build_ring(points, &trims, segments);
        let flat: Vec<Point> = ring.iter().map(|(p, _)| *p).collect();
        let crossings = crossing_edges(&flat);
        if crossings.is_empty() {
            return flat;
        }

        let m = ring.len();
        let mut shrunk = false;
        let mut touched = vec![false; n];
        for (i, j) in crossings {
            for edge in [i, j] {
                touched[ring[edge].1] = true;
                touched[ring[(edge + 1) % m].1] = true;
            }
        }
        for (c, hit) in touched.into_iter().enumerate() {
            if !hit || trims[c] <= 0.0 {
                continue;
            }
            shrink_steps[c] += 1;
            trims[c] = if shrink_steps[c] >= MAX_SHRINK_STEPS {
                0.0
            } else {
                trims[c] / 2.0
            };
            shrunk = true;
        }

        if !shrunk {
            // the input polygon crosses itself; rounding cannot help
            return flat;
        }
        debug!(
            corners = shrink_steps.iter().filter(|&&s| s > 0).count(),
            "rounded polygon corners shrunk to keep the outline simple"
        );
    }
}

/// Signed shoelace area of a ring (positive when counter-clockwise in a
/// y-up frame)
pub fn signed_area(ring: &[Point]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..ring.len() {
        let a = ring[i];
        let b = ring[(i + 1) % ring.len()];
        sum += a.cross(&b);
    }
    sum / 2.0
}
