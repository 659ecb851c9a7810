//! Anchor point set
//!
//! The ordered, fixed-cardinality array of draggable points owned by one part
//! instance. Index is role: index 0 is always the reference point. Points are
//! only written by the owning [`crate::PartInstance`], which keeps them in
//! step with its body cache.

use footprintkit_core::Point;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// When an anchor marker is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Always,
    #[default]
    WhenSelected,
    Never,
}

impl Visibility {
    /// `selected` is the selection/drag flag supplied by the rendering layer
    pub fn is_visible(self, selected: bool) -> bool {
        match self {
            Visibility::Always => true,
            Visibility::WhenSelected => selected,
            Visibility::Never => false,
        }
    }
}

/// Static description of one anchor slot
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorInfo {
    pub name: Option<&'static str>,
    pub sticky: bool,
    pub visibility: Visibility,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Anchor {
    pub point: Point,
    pub info: AnchorInfo,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnchorSet {
    anchors: SmallVec<[Anchor; 4]>,
}

impl AnchorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    pub fn point(&self, i: usize) -> Option<Point> {
        self.anchors.get(i).map(|a| a.point)
    }

    pub fn get(&self, i: usize) -> Option<&Anchor> {
        self.anchors.get(i)
    }

    pub fn is_sticky(&self, i: usize) -> bool {
        self.anchors.get(i).is_some_and(|a| a.info.sticky)
    }

    pub fn visibility(&self, i: usize) -> Option<Visibility> {
        self.anchors.get(i).map(|a| a.info.visibility)
    }

    pub fn name(&self, i: usize) -> Option<&'static str> {
        self.anchors.get(i).and_then(|a| a.info.name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Anchor> {
        self.anchors.iter()
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.anchors.iter().map(|a| a.point)
    }

    /// Indices and points of anchors that should be drawn
    pub fn visible(&self, selected: bool) -> impl Iterator<Item = (usize, Point)> + '_ {
        self.anchors
            .iter()
            .enumerate()
            .filter(move |(_, a)| a.info.visibility.is_visible(selected))
            .map(|(i, a)| (i, a.point))
    }

    /// Change cardinality, keeping every surviving index untouched and
    /// seeding new indices from `seed`
    pub(crate) fn resize(&mut self, len: usize, mut seed: impl FnMut(usize) -> Anchor) {
        if len < self.anchors.len() {
            self.anchors.truncate(len);
            return;
        }
        for i in self.anchors.len()..len {
            self.anchors.push(seed(i));
        }
    }

    /// Relocate point `i` in place
    pub(crate) fn set_point(&mut self, i: usize, p: Point) {
        if let Some(anchor) = self.anchors.get_mut(i) {
            anchor.point = p;
        }
    }

    pub(crate) fn set_info(&mut self, i: usize, info: AnchorInfo) {
        if let Some(anchor) = self.anchors.get_mut(i) {
            anchor.info = info;
        }
    }
}
