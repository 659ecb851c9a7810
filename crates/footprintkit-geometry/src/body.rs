//! Multi-part body
//!
//! A [`Body`] is one immutable snapshot of an instance's geometry: the
//! ordered slots in draw order (back to front) plus the sticky anchors that
//! tie slots to logical pins. It is shared as `Arc<Body>` and is safe to
//! read from other threads while the owner keeps editing.

use footprintkit_core::Point;

use crate::area::{Area, Bounds};

/// One named slot; `area` is `None` when the variant omits it
#[derive(Debug, Clone, PartialEq)]
pub struct BodyPart {
    pub name: &'static str,
    pub area: Option<Area>,
}

/// Sticky anchor exposed to connectivity consumers
#[derive(Debug, Clone, PartialEq)]
pub struct Pin {
    pub index: usize,
    pub name: &'static str,
    pub point: Point,
    /// Slot holding the pin's geometry, if any
    pub part: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub generation: u64,
    pub parts: Vec<BodyPart>,
    pub pins: Vec<Pin>,
}

impl Body {
    /// Area of slot `name`; `None` both for unknown and absent slots
    pub fn part(&self, name: &str) -> Option<&Area> {
        self.parts
            .iter()
            .find(|p| p.name == name)
            .and_then(|p| p.area.as_ref())
    }

    pub fn has_slot(&self, name: &str) -> bool {
        self.parts.iter().any(|p| p.name == name)
    }

    /// Present parts in draw order
    pub fn present(&self) -> impl Iterator<Item = (&'static str, &Area)> {
        self.parts
            .iter()
            .filter_map(|p| p.area.as_ref().map(|a| (p.name, a)))
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.parts.iter().map(|p| p.name).collect()
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.present()
            .filter_map(|(_, a)| a.bounds())
            .reduce(|acc, b| acc.union(&b))
    }

    /// Union of every present part
    pub fn outline(&self) -> Area {
        Area::union_all(self.present().map(|(_, a)| a))
    }

    pub fn pin(&self, name: &str) -> Option<&Pin> {
        self.pins.iter().find(|p| p.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Body {
        Body {
            generation: 3,
            parts: vec![
                BodyPart {
                    name: "body",
                    area: Some(Area::rect(0.0, 0.0, 10.0, 10.0)),
                },
                BodyPart {
                    name: "ring",
                    area: None,
                },
                BodyPart {
                    name: "tip",
                    area: Some(Area::rect(20.0, 0.0, 5.0, 5.0)),
                },
            ],
            pins: vec![Pin {
                index: 0,
                name: "tip",
                point: Point::new(22.0, 2.0),
                part: Some("tip"),
            }],
        }
    }

    #[test]
    fn test_absent_slot_is_skipped() {
        let body = sample();
        assert!(body.has_slot("ring"));
        assert!(body.part("ring").is_none());
        assert_eq!(body.present().count(), 2);
        assert_eq!(body.names(), vec!["body", "ring", "tip"]);
    }

    #[test]
    fn test_bounds_and_outline() {
        let body = sample();
        let b = body.bounds().unwrap();
        assert!((b.max_x - 25.0).abs() < 1e-9);
        assert_eq!(body.outline().piece_count(), 2);
        assert_eq!(body.pin("tip").map(|p| p.index), Some(0));
    }

    #[test]
    fn test_body_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Body>();
        assert_send_sync::<std::sync::Arc<Body>>();
    }
}
