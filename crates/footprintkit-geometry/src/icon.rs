//! Icon geometry for palette thumbnails

use footprintkit_core::{GeometryResult, Point};

use crate::area::{Area, Bounds};
use crate::transform::Transform;

/// Body slots scaled and centred into a `size` x `size` square
#[derive(Debug, Clone, PartialEq)]
pub struct IconGeometry {
    pub size: f64,
    pub parts: Vec<(&'static str, Area)>,
}

impl IconGeometry {
    pub fn bounds(&self) -> Option<Bounds> {
        self.parts
            .iter()
            .filter_map(|(_, a)| a.bounds())
            .reduce(|acc, b| acc.union(&b))
    }
}

/// Uniformly scale `parts` so their joint bounds fill the square on the
/// longer side, centred on both axes
pub(crate) fn fit_icon(parts: Vec<(&'static str, Area)>, size: f64) -> GeometryResult<IconGeometry> {
    let Some(bounds) = parts
        .iter()
        .filter_map(|(_, a)| a.bounds())
        .reduce(|acc, b| acc.union(&b))
    else {
        return Ok(IconGeometry { size, parts });
    };
    let extent = bounds.width().max(bounds.height());
    if extent <= f64::EPSILON {
        return Ok(IconGeometry {
            size,
            parts: Vec::new(),
        });
    }
    let center = bounds.center();
    let s = size / extent;
    let fit = Transform::translation(-center.x, -center.y)
        .then(&Transform::scale(s, s, Point::ORIGIN)?)
        .then(&Transform::translation(size / 2.0, size / 2.0));
    let parts = parts
        .into_iter()
        .map(|(name, area)| Ok((name, area.transform(&fit)?)))
        .collect::<GeometryResult<Vec<_>>>()?;
    Ok(IconGeometry { size, parts })
}
