//! Rendering delegation
//!
//! The engine never paints by itself. Hosts implement [`Painter`] (or use the
//! bundled SVG and tiny-skia painters) and pass a [`RenderContext`] holding
//! the paints and strokes built so far. The context belongs to the caller,
//! one per render target or thread.
//!
//! Slot styles are resolved against the instance's colour parameters at draw
//! time, which is why colour changes never touch the body cache.

use footprintkit_core::{Error, Point, Result};
use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::Path as FsPath;
use std::sync::Arc;
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Stroke, Transform as SkTransform};
use tracing::debug;

use crate::area::{Area, Bounds};
use crate::icon::IconGeometry;
use crate::part::{Color, ColorSource, ParamValue, PartInstance, PartType, SlotStyle};

const STICKY_MARKER: Color = Color::rgb(0xe0, 0x30, 0x30);
const LOOSE_MARKER: Color = Color::rgb(0x30, 0x80, 0xe0);

/// Per-target cache of drawing resources
#[derive(Debug)]
pub struct RenderContext {
    /// Anchor marker diameter in internal units
    pub marker_size: f64,
    /// Multiplier applied to every slot outline width
    pub stroke_scale: f64,
    paints: HashMap<Color, Paint<'static>>,
    strokes: HashMap<u64, Stroke>,
    svg_styles: HashMap<(Color, Option<u64>), String>,
    misses: usize,
}

impl RenderContext {
    pub fn new(marker_size: f64) -> Self {
        Self {
            marker_size,
            stroke_scale: 1.0,
            paints: HashMap::new(),
            strokes: HashMap::new(),
            svg_styles: HashMap::new(),
            misses: 0,
        }
    }

    pub fn with_stroke_scale(mut self, stroke_scale: f64) -> Self {
        self.stroke_scale = stroke_scale;
        self
    }

    /// Number of resources built so far
    pub fn resources_built(&self) -> usize {
        self.misses
    }

    fn ensure_paint(&mut self, color: Color) {
        if !self.paints.contains_key(&color) {
            let mut paint = Paint::default();
            paint.set_color_rgba8(color.r, color.g, color.b, color.a);
            paint.anti_alias = true;
            self.paints.insert(color, paint);
            self.misses += 1;
        }
    }

    fn ensure_stroke(&mut self, width: f64) {
        let key = width.to_bits();
        if !self.strokes.contains_key(&key) {
            let stroke = Stroke {
                width: width as f32,
                ..Default::default()
            };
            self.strokes.insert(key, stroke);
            self.misses += 1;
        }
    }

    pub fn paint(&mut self, color: Color) -> Option<&Paint<'static>> {
        self.ensure_paint(color);
        self.paints.get(&color)
    }

    pub fn paint_and_stroke(&mut self, color: Color, width: f64) -> Option<(&Paint<'static>, &Stroke)> {
        self.ensure_paint(color);
        self.ensure_stroke(width);
        Some((self.paints.get(&color)?, self.strokes.get(&width.to_bits())?))
    }

    /// SVG presentation attributes for a fill (`width` of `None`) or a stroke
    pub fn svg_style(&mut self, color: Color, width: Option<f64>) -> &str {
        let key = (color, width.map(f64::to_bits));
        if !self.svg_styles.contains_key(&key) {
            let style = match width {
                None => format!(
                    "fill=\"{}\" fill-opacity=\"{:.3}\" fill-rule=\"evenodd\" stroke=\"none\"",
                    color.to_hex(),
                    color.opacity()
                ),
                Some(w) => format!(
                    "fill=\"none\" stroke=\"{}\" stroke-opacity=\"{:.3}\" stroke-width=\"{:.3}\"",
                    color.to_hex(),
                    color.opacity(),
                    w
                ),
            };
            self.svg_styles.insert(key, style);
            self.misses += 1;
        }
        self.svg_styles.get(&key).map_or("", String::as_str)
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new(6.0)
    }
}

pub trait Painter {
    fn fill_area(&mut self, ctx: &mut RenderContext, area: &Area, color: Color);
    fn stroke_area(&mut self, ctx: &mut RenderContext, area: &Area, color: Color, width: f64);
    fn anchor_marker(&mut self, ctx: &mut RenderContext, at: Point, sticky: bool);
}

/// Accumulates SVG elements in world coordinates
#[derive(Debug, Default)]
pub struct SvgPainter {
    elements: String,
}

impl SvgPainter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn element_count(&self) -> usize {
        self.elements.lines().count()
    }

    /// Wrap the elements in a document whose view box is `bounds` plus
    /// `margin` on every side
    pub fn finish(self, bounds: Bounds, margin: f64) -> String {
        let mut svg = String::new();
        let _ = writeln!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"{:.3} {:.3} {:.3} {:.3}\">",
            bounds.min_x - margin,
            bounds.min_y - margin,
            bounds.width() + 2.0 * margin,
            bounds.height() + 2.0 * margin
        );
        svg.push_str(&self.elements);
        svg.push_str("</svg>\n");
        svg
    }
}

impl Painter for SvgPainter {
    fn fill_area(&mut self, ctx: &mut RenderContext, area: &Area, color: Color) {
        let d = area.to_svg_path();
        if !d.is_empty() {
            let _ = writeln!(self.elements, "<path d=\"{}\" {}/>", d, ctx.svg_style(color, None));
        }
    }

    fn stroke_area(&mut self, ctx: &mut RenderContext, area: &Area, color: Color, width: f64) {
        let d = area.to_svg_path();
        if !d.is_empty() {
            let _ = writeln!(
                self.elements,
                "<path d=\"{}\" {}/>",
                d,
                ctx.svg_style(color, Some(width))
            );
        }
    }

    fn anchor_marker(&mut self, ctx: &mut RenderContext, at: Point, sticky: bool) {
        let color = if sticky { STICKY_MARKER } else { LOOSE_MARKER };
        let r = ctx.marker_size / 2.0;
        let _ = writeln!(
            self.elements,
            "<circle cx=\"{:.3}\" cy=\"{:.3}\" r=\"{:.3}\" {}/>",
            at.x,
            at.y,
            r,
            ctx.svg_style(color, Some(1.0))
        );
    }
}

/// Paints into a tiny-skia pixmap through a world-to-pixel transform
pub struct RasterPainter {
    pixmap: Pixmap,
    view: SkTransform,
}

impl RasterPainter {
    /// Pixmap of `width` x `height` showing `bounds` (plus `margin`) scaled
    /// uniformly and centred
    pub fn new(width: u32, height: u32, bounds: Bounds, margin: f64) -> Option<Self> {
        let mut pixmap = Pixmap::new(width, height)?;
        pixmap.fill(tiny_skia::Color::WHITE);
        let (w, h) = (bounds.width() + 2.0 * margin, bounds.height() + 2.0 * margin);
        if !(w > 0.0 && h > 0.0) {
            return None;
        }
        let scale = (f64::from(width) / w).min(f64::from(height) / h);
        let center = bounds.center();
        let view = SkTransform::from_translate(-center.x as f32, -center.y as f32)
            .post_scale(scale as f32, scale as f32)
            .post_translate(width as f32 / 2.0, height as f32 / 2.0);
        Some(Self { pixmap, view })
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn save_png(&self, path: &FsPath) -> Result<()> {
        self.pixmap
            .save_png(path)
            .map_err(|e| Error::other(format!("failed to write {}: {}", path.display(), e)))
    }

    fn sk_path(area: &Area) -> Option<tiny_skia::Path> {
        let mut pb = PathBuilder::new();
        for outline in area.outlines() {
            for ring in std::iter::once(&outline.exterior).chain(outline.holes.iter()) {
                let mut points = ring.iter();
                let Some(first) = points.next() else {
                    continue;
                };
                pb.move_to(first.x as f32, first.y as f32);
                for p in points {
                    pb.line_to(p.x as f32, p.y as f32);
                }
                pb.close();
            }
        }
        pb.finish()
    }
}

impl Painter for RasterPainter {
    fn fill_area(&mut self, ctx: &mut RenderContext, area: &Area, color: Color) {
        let Some(path) = Self::sk_path(area) else {
            return;
        };
        if let Some(paint) = ctx.paint(color) {
            self.pixmap
                .fill_path(&path, paint, FillRule::EvenOdd, self.view, None);
        }
    }

    fn stroke_area(&mut self, ctx: &mut RenderContext, area: &Area, color: Color, width: f64) {
        let Some(path) = Self::sk_path(area) else {
            return;
        };
        // keep outlines a constant width on screen
        let width = width / f64::from(self.view.sx.abs().max(f32::EPSILON));
        if let Some((paint, stroke)) = ctx.paint_and_stroke(color, width) {
            self.pixmap.stroke_path(&path, paint, stroke, self.view, None);
        }
    }

    fn anchor_marker(&mut self, ctx: &mut RenderContext, at: Point, sticky: bool) {
        let color = if sticky { STICKY_MARKER } else { LOOSE_MARKER };
        let r = (ctx.marker_size / 2.0) as f32;
        let Some(path) = PathBuilder::from_circle(at.x as f32, at.y as f32, r) else {
            return;
        };
        if let Some(paint) = ctx.paint(color) {
            self.pixmap
                .fill_path(&path, paint, FillRule::Winding, self.view, None);
        }
    }
}

fn resolve(source: ColorSource, lookup: impl Fn(&str) -> Option<ParamValue>) -> Color {
    match source {
        ColorSource::Fixed(c) => c,
        ColorSource::Param(key) => lookup(key)
            .and_then(|v| v.as_color())
            .unwrap_or(Color::BLACK),
    }
}

fn paint_slot<P: Painter + ?Sized>(
    painter: &mut P,
    ctx: &mut RenderContext,
    area: &Area,
    style: &SlotStyle,
    lookup: impl Fn(&str) -> Option<ParamValue>,
) {
    if let Some(fill) = style.fill {
        painter.fill_area(ctx, area, resolve(fill, &lookup));
    }
    let width = style.stroke_width * ctx.stroke_scale;
    painter.stroke_area(ctx, area, resolve(style.stroke, &lookup), width);
}

/// Draw an instance's parts back to front, then its visible anchors
pub fn render_instance<P: Painter + ?Sized>(
    instance: &mut PartInstance,
    ctx: &mut RenderContext,
    painter: &mut P,
    selected: bool,
) {
    let body = instance.body();
    let kind = Arc::clone(instance.part_type());
    for (slot, part) in kind.slots.iter().zip(&body.parts) {
        if let Some(area) = &part.area {
            paint_slot(painter, ctx, area, &slot.style, |key| instance.param(key));
        }
    }
    for (i, at) in instance.visible_anchors(selected) {
        painter.anchor_marker(ctx, at, instance.is_anchor_sticky(i));
    }
    debug!(part = kind.key, generation = body.generation, "instance rendered");
}

/// Draw palette icon geometry with the type's default colours
pub fn render_icon<P: Painter + ?Sized>(
    icon: &IconGeometry,
    kind: &PartType,
    ctx: &mut RenderContext,
    painter: &mut P,
) {
    let lookup = |key: &str| kind.param_index(key).map(|i| kind.params[i].default);
    for (name, area) in &icon.parts {
        if let Some(slot) = kind.slots.iter().find(|s| s.name == *name) {
            paint_slot(painter, ctx, area, &slot.style, lookup);
        }
    }
}
