//! Standard part library
//!
//! Each module returns a [`PartType`] description; [`PartLibrary`] keeps them
//! in registration order and creates instances by key.

pub mod cutout;
pub mod iec_socket;
pub mod jack;
pub mod pickup;
pub mod potentiometer;
pub mod solder_pad;
pub mod trimmer;

use footprintkit_core::{GeometryError, GeometryOptions, GeometryResult, Point};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::part::{Color, ColorSource, PartInstance, PartType, SlotStyle};

pub(crate) const OUTLINE: Color = Color::rgb(0x20, 0x20, 0x20);
pub(crate) const METAL: Color = Color::rgb(0xc0, 0xc0, 0xc8);
pub(crate) const COPPER: Color = Color::rgb(0xd8, 0x8a, 0x3c);
pub(crate) const PLASTIC: Color = Color::rgb(0x3a, 0x3a, 0x40);
pub(crate) const MASK: Color = Color::rgba(0x2e, 0x8b, 0x57, 0x80);

pub(crate) fn solid(fill: Color) -> SlotStyle {
    SlotStyle::filled(ColorSource::Fixed(fill), ColorSource::Fixed(OUTLINE))
}

pub(crate) fn themed(param: &'static str) -> SlotStyle {
    SlotStyle::filled(ColorSource::Param(param), ColorSource::Fixed(OUTLINE))
}

#[derive(Debug, Clone, Default)]
pub struct PartLibrary {
    types: Vec<Arc<PartType>>,
}

impl PartLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every built-in footprint family
    pub fn standard() -> Self {
        let mut library = Self::new();
        for kind in [
            iec_socket::part_type(),
            jack::part_type(),
            solder_pad::part_type(),
            cutout::part_type(),
            potentiometer::part_type(),
            trimmer::part_type(),
            pickup::part_type(),
        ] {
            let key = kind.key;
            if let Err(e) = library.register(kind) {
                warn!(part = key, error = %e, "skipping invalid part type");
            }
        }
        debug!(types = library.len(), "standard part library loaded");
        library
    }

    /// Add a type; its key must be unique
    pub fn register(&mut self, kind: PartType) -> GeometryResult<Arc<PartType>> {
        kind.validate()?;
        if self.get(kind.key).is_some() {
            return Err(GeometryError::invalid_parameter(
                kind.key,
                "a part type with this key is already registered",
            ));
        }
        let kind = Arc::new(kind);
        self.types.push(Arc::clone(&kind));
        Ok(kind)
    }

    pub fn get(&self, key: &str) -> Option<Arc<PartType>> {
        self.types.iter().find(|t| t.key == key).cloned()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<PartType>> {
        self.types.iter()
    }

    pub fn keys(&self) -> Vec<&'static str> {
        self.types.iter().map(|t| t.key).collect()
    }

    pub fn in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Arc<PartType>> + 'a {
        self.types.iter().filter(move |t| t.category == category)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// New instance of type `key` with its reference point at `at`
    pub fn create(&self, key: &str, at: Point, options: GeometryOptions) -> GeometryResult<PartInstance> {
        let kind = self.get(key).ok_or_else(|| {
            GeometryError::invalid_parameter("part type", format!("unknown part type '{}'", key))
        })?;
        PartInstance::new(kind, at, options)
    }
}
