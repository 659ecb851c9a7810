//! Part instances
//!
//! [`PartInstance`] is the only mutable owner of a part's state. It keeps
//! canonical data (reference point, orientation, mirror flag, variant,
//! parameter values and the offsets of free anchors) and derives everything
//! else from it:
//!
//! - world anchor positions are recomputed from canonical data after every
//!   change, never rotated in place;
//! - the body is evaluated in the canonical frame and mapped through the
//!   placement transform exactly once per rebuild.
//!
//! Every setter validates before mutating, so a rejected call leaves the
//! instance untouched.

use footprintkit_core::{GeometryError, GeometryOptions, GeometryResult, Point};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, trace};
use uuid::Uuid;

use super::expr::Env;
use super::kind::{AnchorRule, PartType, RotationMode, VariantDef};
use super::schema::ParamValue;
use crate::anchors::{Anchor, AnchorInfo, AnchorSet, Visibility};
use crate::body::{Body, BodyPart, Pin};
use crate::cache::BodyCache;
use crate::icon::{fit_icon, IconGeometry};
use crate::transform::{MirrorAxis, Transform};

/// Rotation state of an instance about its reference point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum Orientation {
    #[default]
    Default,
    Rotate90,
    Rotate180,
    Rotate270,
    /// Any other angle in degrees; continuous types only
    Angle(f64),
}

impl Orientation {
    pub fn degrees(&self) -> f64 {
        match self {
            Orientation::Default => 0.0,
            Orientation::Rotate90 => 90.0,
            Orientation::Rotate180 => 180.0,
            Orientation::Rotate270 => 270.0,
            Orientation::Angle(d) => *d,
        }
    }

    /// Normalise into `[0, 360)`, snapping exact quarter turns to the named
    /// orientations
    pub fn from_degrees(degrees: f64) -> Self {
        let d = degrees.rem_euclid(360.0);
        if d == 0.0 {
            Orientation::Default
        } else if d == 90.0 {
            Orientation::Rotate90
        } else if d == 180.0 {
            Orientation::Rotate180
        } else if d == 270.0 {
            Orientation::Rotate270
        } else {
            Orientation::Angle(d)
        }
    }

    pub fn is_quarter_turn(&self) -> bool {
        !matches!(Orientation::from_degrees(self.degrees()), Orientation::Angle(_))
    }
}

/// Serialisable instance state handed to the document model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartState {
    pub id: Uuid,
    pub type_key: String,
    pub variant: String,
    pub reference: Point,
    #[serde(default)]
    pub orientation: Orientation,
    #[serde(default)]
    pub mirrored: bool,
    #[serde(default)]
    pub params: BTreeMap<String, ParamValue>,
    /// Canonical offsets of user-placed free anchors
    #[serde(default)]
    pub free_anchors: BTreeMap<usize, Point>,
}

#[derive(Debug)]
pub struct PartInstance {
    id: Uuid,
    kind: Arc<PartType>,
    options: GeometryOptions,
    variant: usize,
    values: Vec<ParamValue>,
    orientation: Orientation,
    mirrored: bool,
    reference: Point,
    free: Vec<Option<Point>>,
    anchors: AnchorSet,
    cache: BodyCache<Body>,
    icon: Option<Arc<IconGeometry>>,
}

impl PartInstance {
    /// New instance in the type's first variant with default parameters
    pub fn new(kind: Arc<PartType>, reference: Point, options: GeometryOptions) -> GeometryResult<Self> {
        kind.validate()?;
        check_point("reference", reference)?;
        let mut instance = Self {
            id: Uuid::new_v4(),
            values: kind.default_values(),
            free: vec![None; kind.anchors.len()],
            kind,
            options,
            variant: 0,
            orientation: Orientation::Default,
            mirrored: false,
            reference,
            anchors: AnchorSet::new(),
            cache: BodyCache::new(),
            icon: None,
        };
        instance.sync_anchors();
        Ok(instance)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn part_type(&self) -> &Arc<PartType> {
        &self.kind
    }

    pub fn options(&self) -> GeometryOptions {
        self.options
    }

    pub fn variant(&self) -> &VariantDef {
        &self.kind.variants[self.variant]
    }

    pub fn variant_index(&self) -> usize {
        self.variant
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn is_mirrored(&self) -> bool {
        self.mirrored
    }

    pub fn reference(&self) -> Point {
        self.reference
    }

    /// Canonical frame to world: mirror, then rotate, then move to the
    /// reference point
    pub fn placement(&self) -> Transform {
        let mut t = Transform::identity();
        if self.mirrored {
            t = Transform::mirror(MirrorAxis::Vertical, Point::ORIGIN);
        }
        t.then(&Transform::rotation_degrees(Point::ORIGIN, self.orientation.degrees()))
            .then(&Transform::translation(self.reference.x, self.reference.y))
    }

    fn env<'a>(&'a self, anchors: &'a [Point]) -> Env<'a> {
        Env {
            options: self.options,
            variant: self.variant,
            variant_key: self.kind.variants[self.variant].key,
            params: &self.kind.params,
            values: &self.values,
            anchors,
        }
    }

    fn anchor_count_for(&self, variant: usize) -> usize {
        self.kind.variants[variant].anchor_count
    }

    /// Anchor positions in the canonical frame; each rule may read the
    /// anchors before it
    fn canonical_anchors(&self) -> Vec<Point> {
        let count = self.anchor_count_for(self.variant);
        let mut points: Vec<Point> = Vec::with_capacity(count);
        for (i, def) in self.kind.anchors.iter().take(count).enumerate() {
            let p = {
                let env = self.env(&points);
                def.rule.locate(&env, self.free[i])
            };
            points.push(p);
        }
        points
    }

    fn anchor_info(&self, i: usize) -> AnchorInfo {
        let def = &self.kind.anchors[i];
        AnchorInfo {
            name: Some(def.name),
            sticky: def.sticky,
            visibility: def.visibility,
        }
    }

    fn sync_anchors(&mut self) {
        let canonical = self.canonical_anchors();
        let placement = self.placement();
        let world: Vec<Point> = canonical.iter().map(|p| placement.apply(*p)).collect();

        let infos: Vec<AnchorInfo> = (0..world.len()).map(|i| self.anchor_info(i)).collect();
        self.anchors.resize(world.len(), |i| Anchor {
            point: world[i],
            info: infos[i].clone(),
        });
        for (i, (p, info)) in world.into_iter().zip(infos).enumerate() {
            self.anchors.set_point(i, p);
            self.anchors.set_info(i, info);
        }
    }

    fn invalidate(&mut self) {
        self.sync_anchors();
        self.cache.invalidate();
    }

    pub fn anchors(&self) -> &AnchorSet {
        &self.anchors
    }

    pub fn anchor_count(&self) -> usize {
        self.anchors.len()
    }

    pub fn anchor_point(&self, i: usize) -> Option<Point> {
        self.anchors.point(i)
    }

    pub fn anchor_name(&self, i: usize) -> Option<&'static str> {
        self.anchors.name(i)
    }

    pub fn is_anchor_sticky(&self, i: usize) -> bool {
        self.anchors.is_sticky(i)
    }

    pub fn anchor_visibility(&self, i: usize) -> Option<Visibility> {
        self.anchors.visibility(i)
    }

    /// Anchors to draw given the host's selection/drag state
    pub fn visible_anchors(&self, selected: bool) -> Vec<(usize, Point)> {
        self.anchors.visible(selected).collect()
    }

    /// Relocate anchor `i`
    ///
    /// Anchor 0 moves the whole instance. Free anchors store the new position
    /// as a canonical offset. Anchors derived from the reference cannot be
    /// placed directly.
    pub fn set_anchor_point(&mut self, i: usize, p: Point) -> GeometryResult<()> {
        if i >= self.anchor_count() {
            return Err(GeometryError::invalid_parameter(
                format!("anchor {}", i),
                format!("index out of range (count {})", self.anchor_count()),
            ));
        }
        check_point("anchor", p)?;
        let kind = Arc::clone(&self.kind);
        match &kind.anchors[i].rule {
            AnchorRule::Reference => self.move_to(p),
            AnchorRule::Free(_) => {
                let local = self.placement().inverse()?.apply(p);
                if self.free[i] == Some(local) {
                    return Ok(());
                }
                self.free[i] = Some(local);
                self.invalidate();
                Ok(())
            }
            AnchorRule::Offset(_) | AnchorRule::Orbit { .. } => Err(GeometryError::invalid_parameter(
                kind.anchors[i].name,
                "position is derived from the reference point",
            )),
        }
    }

    /// Drag the reference point; every other anchor follows its rule
    pub fn move_to(&mut self, p: Point) -> GeometryResult<()> {
        check_point("reference", p)?;
        if p == self.reference {
            return Ok(());
        }
        self.reference = p;
        self.invalidate();
        Ok(())
    }

    /// Switch variant by key, resizing the anchor set
    ///
    /// Surviving anchors keep their index and role; new indices start at the
    /// position their rule derives.
    pub fn set_variant(&mut self, key: &str) -> GeometryResult<()> {
        let index = self.kind.variant_index(key).ok_or_else(|| {
            GeometryError::invalid_parameter("variant", format!("unknown variant '{}'", key))
        })?;
        if index == self.variant {
            return Ok(());
        }
        let count = self.anchor_count_for(index);
        for offset in self.free.iter_mut().skip(count) {
            *offset = None;
        }
        debug!(
            part = self.kind.key,
            from = self.kind.variants[self.variant].key,
            to = key,
            anchors = count,
            "variant changed"
        );
        self.variant = index;
        self.invalidate();
        Ok(())
    }

    pub fn param(&self, key: &str) -> Option<ParamValue> {
        self.kind.param_index(key).map(|i| self.values[i])
    }

    /// Set a type-specific parameter; display-only parameters leave the body
    /// cache clean
    pub fn set_param(&mut self, key: &str, value: ParamValue) -> GeometryResult<()> {
        let index = self.kind.param_index(key).ok_or_else(|| {
            GeometryError::invalid_parameter(key, format!("'{}' has no such parameter", self.kind.key))
        })?;
        let def = &self.kind.params[index];
        def.validate(&value, self.options.scale)?;
        if self.values[index] == value {
            return Ok(());
        }
        let affects_geometry = def.affects_geometry;
        self.values[index] = value;
        if affects_geometry {
            self.invalidate();
        } else {
            trace!(part = self.kind.key, param = key, "display parameter changed");
        }
        Ok(())
    }

    fn check_orientation(&self, orientation: Orientation) -> GeometryResult<Orientation> {
        let degrees = orientation.degrees();
        if !degrees.is_finite() {
            return Err(GeometryError::invalid_parameter("orientation", "angle is not finite"));
        }
        let normalized = Orientation::from_degrees(degrees);
        if self.kind.rotation == RotationMode::Discrete && !normalized.is_quarter_turn() {
            return Err(GeometryError::invalid_parameter(
                "orientation",
                format!("'{}' only rotates in quarter turns, got {} degrees", self.kind.key, degrees),
            ));
        }
        Ok(normalized)
    }

    /// Rotate about the reference point to an absolute orientation
    pub fn set_orientation(&mut self, orientation: Orientation) -> GeometryResult<()> {
        let orientation = self.check_orientation(orientation)?;
        if orientation == self.orientation {
            return Ok(());
        }
        self.orientation = orientation;
        self.invalidate();
        Ok(())
    }

    pub fn set_mirror(&mut self, mirrored: bool) {
        if mirrored != self.mirrored {
            self.mirrored = mirrored;
            self.invalidate();
        }
    }

    /// Rotate by `turns` quarter turns about an arbitrary pivot
    pub fn rotate_about(&mut self, pivot: Point, turns: i32) -> GeometryResult<()> {
        check_point("pivot", pivot)?;
        let turns = turns.rem_euclid(4);
        if turns == 0 {
            return Ok(());
        }
        let orientation =
            self.check_orientation(Orientation::Angle(self.orientation.degrees() + 90.0 * f64::from(turns)))?;
        self.reference = Transform::quarter_turns(pivot, turns).apply(self.reference);
        self.orientation = orientation;
        self.invalidate();
        Ok(())
    }

    /// Rotate by any angle in degrees about `pivot`
    ///
    /// Types with discrete rotation accept only quarter turns here.
    pub fn rotate_about_angle(&mut self, pivot: Point, degrees: f64) -> GeometryResult<()> {
        check_point("pivot", pivot)?;
        let orientation = self.check_orientation(Orientation::Angle(self.orientation.degrees() + degrees))?;
        if degrees.rem_euclid(360.0) == 0.0 {
            return Ok(());
        }
        self.reference = Transform::rotation_degrees(pivot, degrees).apply(self.reference);
        self.orientation = orientation;
        self.invalidate();
        Ok(())
    }

    /// Reflect the instance across `axis` through `pivot`
    pub fn mirror(&mut self, axis: MirrorAxis, pivot: Point) -> GeometryResult<()> {
        check_point("pivot", pivot)?;
        let degrees = self.orientation.degrees();
        // reflection composed with R(a) is R(-a) (vertical) or R(180 - a)
        // (horizontal) composed with the local x flip
        let turned = match axis {
            MirrorAxis::Vertical => -degrees,
            MirrorAxis::Horizontal => 180.0 - degrees,
        };
        let orientation = self.check_orientation(Orientation::Angle(turned))?;
        self.reference = Transform::mirror(axis, pivot).apply(self.reference);
        self.orientation = orientation;
        self.mirrored = !self.mirrored;
        self.invalidate();
        Ok(())
    }

    /// Current body, rebuilt from canonical data if anything changed
    pub fn body(&mut self) -> Arc<Body> {
        if let Some(body) = self.cache.current() {
            return body;
        }
        let body = self.build_body(self.cache.generation());
        self.cache.get_or_build(move |_| body)
    }

    /// The body if it is current, without rebuilding
    pub fn cached_body(&self) -> Option<Arc<Body>> {
        self.cache.current()
    }

    pub fn is_body_clean(&self) -> bool {
        self.cache.is_clean()
    }

    pub fn body_generation(&self) -> u64 {
        self.cache.generation()
    }

    /// Number of body rebuilds so far
    pub fn body_computations(&self) -> u64 {
        self.cache.computations()
    }

    /// Ordered `(name, area)` slots; absent parts are `None`
    pub fn parts(&mut self) -> Vec<BodyPart> {
        self.body().parts.clone()
    }

    fn build_body(&self, generation: u64) -> Body {
        let canonical = self.canonical_anchors();
        let env = self.env(&canonical);
        let placement = self.placement();
        let parts = self
            .kind
            .slots
            .iter()
            .map(|slot| {
                let present = slot.when.as_ref().is_none_or(|c| c.eval(&env));
                BodyPart {
                    name: slot.name,
                    area: present.then(|| slot.shape.eval(&env).map(&placement)),
                }
            })
            .collect();
        debug!(part = self.kind.key, generation, "body rebuilt");
        Body {
            generation,
            parts,
            pins: self.pins(),
        }
    }

    /// Sticky anchors with their names and pin slots
    pub fn pins(&self) -> Vec<Pin> {
        self.anchors
            .iter()
            .enumerate()
            .filter(|(_, a)| a.info.sticky)
            .map(|(i, a)| Pin {
                index: i,
                name: self.kind.anchors[i].name,
                point: a.point,
                part: self.kind.anchors[i].part,
            })
            .collect()
    }

    /// Palette thumbnail fitted into a `size` square
    ///
    /// Cached separately from the body and only rebuilt on request or when a
    /// different size is asked for.
    pub fn icon_geometry(&mut self, size: f64) -> GeometryResult<Arc<IconGeometry>> {
        match &self.icon {
            Some(icon) if icon.size == size => Ok(Arc::clone(icon)),
            _ => self.refresh_icon_geometry(size),
        }
    }

    pub fn refresh_icon_geometry(&mut self, size: f64) -> GeometryResult<Arc<IconGeometry>> {
        if !(size.is_finite() && size > 0.0) {
            return Err(GeometryError::invalid_parameter("icon size", "must be positive"));
        }
        let canonical = self.canonical_anchors();
        let env = self.env(&canonical);
        let parts = self
            .kind
            .slots
            .iter()
            .filter(|slot| slot.in_icon && slot.when.as_ref().is_none_or(|c| c.eval(&env)))
            .map(|slot| (slot.name, slot.shape.eval(&env)))
            .collect();
        let icon = Arc::new(fit_icon(parts, size)?);
        self.icon = Some(Arc::clone(&icon));
        Ok(icon)
    }

    pub fn snapshot(&self) -> PartState {
        PartState {
            id: self.id,
            type_key: self.kind.key.to_string(),
            variant: self.variant().key.to_string(),
            reference: self.reference,
            orientation: self.orientation,
            mirrored: self.mirrored,
            params: self
                .kind
                .params
                .iter()
                .zip(&self.values)
                .map(|(def, v)| (def.key.to_string(), *v))
                .collect(),
            free_anchors: self
                .free
                .iter()
                .enumerate()
                .filter_map(|(i, p)| p.map(|p| (i, p)))
                .collect(),
        }
    }

    /// Rebuild an instance from a snapshot, validating every field
    pub fn restore(kind: Arc<PartType>, state: &PartState, options: GeometryOptions) -> GeometryResult<Self> {
        if state.type_key != kind.key {
            return Err(GeometryError::invalid_parameter(
                "type_key",
                format!("state is for '{}', not '{}'", state.type_key, kind.key),
            ));
        }
        let mut instance = Self::new(kind, state.reference, options)?;
        instance.id = state.id;
        instance.set_variant(&state.variant)?;
        for (key, value) in &state.params {
            instance.set_param(key, *value)?;
        }
        instance.orientation = instance.check_orientation(state.orientation)?;
        instance.mirrored = state.mirrored;

        let count = instance.anchor_count();
        for (&i, &p) in &state.free_anchors {
            let is_free = i < count && matches!(instance.kind.anchors[i].rule, AnchorRule::Free(_));
            if !is_free {
                return Err(GeometryError::invalid_parameter(
                    format!("anchor {}", i),
                    "not a free anchor of this variant",
                ));
            }
            check_point("anchor", p)?;
            instance.free[i] = Some(p);
        }
        instance.invalidate();
        Ok(instance)
    }
}

fn check_point(what: &str, p: Point) -> GeometryResult<()> {
    if p.is_finite() {
        Ok(())
    } else {
        Err(GeometryError::invalid_parameter(what, "coordinates must be finite"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::part::expr::{param, px, ShapeExpr};
    use crate::part::kind::{AnchorDef, ColorSource, SlotDef, SlotStyle};
    use crate::part::schema::{Color, ParamDef};
    use footprintkit_core::{Length, UnitScale};

    fn options() -> GeometryOptions {
        GeometryOptions::with_scale(UnitScale::new(100.0))
    }

    fn block() -> Arc<PartType> {
        let style = SlotStyle::filled(ColorSource::Param("color"), ColorSource::Fixed(Color::BLACK));
        Arc::new(
            PartType::new("block", "Block", "test")
                .variant("one", "One", 2)
                .variant("two", "Two", 3)
                .param(ParamDef::length("width", "Width", Length::px(20.0)))
                .param(ParamDef::color("color", "Colour", Color::WHITE))
                .anchor(AnchorDef::reference("a"))
                .anchor(AnchorDef::derived("b", AnchorRule::Offset((param("width"), px(0.0)))))
                .anchor(AnchorDef::free("c", px(0.0), px(10.0)))
                .slot(SlotDef::new(
                    "plate",
                    ShapeExpr::rect(px(0.0), px(-5.0), param("width"), px(10.0)),
                    style,
                )),
        )
    }

    #[test]
    fn test_orientation_normalisation() {
        assert_eq!(Orientation::from_degrees(450.0), Orientation::Rotate90);
        assert_eq!(Orientation::from_degrees(-90.0), Orientation::Rotate270);
        assert_eq!(Orientation::from_degrees(30.0), Orientation::Angle(30.0));
        assert!(Orientation::Angle(180.0).is_quarter_turn());
    }

    #[test]
    fn test_rejected_setter_leaves_state() {
        let mut part = PartInstance::new(block(), Point::new(5.0, 5.0), options()).unwrap();
        let before = part.snapshot();
        assert!(part
            .set_param("width", ParamValue::Length(Length::px(-3.0)))
            .unwrap_err()
            .is_invalid_parameter());
        assert!(part.set_variant("three").is_err());
        assert!(part.set_orientation(Orientation::Angle(45.0)).is_err());
        assert!(part.set_anchor_point(1, Point::new(0.0, 0.0)).is_err());
        assert!(part.move_to(Point::new(f64::NAN, 0.0)).is_err());
        assert_eq!(part.snapshot(), before);
    }

    #[test]
    fn test_free_anchor_round_trips_through_placement() {
        let mut part = PartInstance::new(block(), Point::new(5.0, 5.0), options()).unwrap();
        part.set_variant("two").unwrap();
        part.set_orientation(Orientation::Rotate90).unwrap();
        part.set_anchor_point(2, Point::new(40.0, 40.0)).unwrap();
        assert!(part.anchor_point(2).unwrap().approx_eq(&Point::new(40.0, 40.0)));
        part.move_to(Point::new(15.0, 5.0)).unwrap();
        assert!(part.anchor_point(2).unwrap().approx_eq(&Point::new(50.0, 40.0)));
    }

    #[test]
    fn test_snapshot_restore() {
        let mut part = PartInstance::new(block(), Point::new(1.0, 2.0), options()).unwrap();
        part.set_variant("two").unwrap();
        part.set_param("width", ParamValue::Length(Length::px(30.0))).unwrap();
        part.set_anchor_point(2, Point::new(3.0, 30.0)).unwrap();
        part.mirror(MirrorAxis::Vertical, Point::new(50.0, 0.0)).unwrap();

        let state = part.snapshot();
        let json = serde_json::to_string(&state).unwrap();
        let back: PartState = serde_json::from_str(&json).unwrap();
        let restored = PartInstance::restore(block(), &back, options()).unwrap();
        assert_eq!(restored.id(), part.id());
        for i in 0..part.anchor_count() {
            assert!(restored.anchor_point(i).unwrap().approx_eq(&part.anchor_point(i).unwrap()));
        }

        let mut wrong = back.clone();
        wrong.free_anchors.insert(1, Point::ORIGIN);
        assert!(PartInstance::restore(block(), &wrong, options()).is_err());
    }
}
