//! Preview rendering
//!
//! Writes part previews and palette icons to SVG or PNG files using the
//! engine configuration for scale, stroke widths and icon size.

use anyhow::{bail, Context, Result};
use footprintkit_geometry::{
    render_icon, render_instance, Bounds, PartInstance, PartLibrary, RasterPainter,
    RenderContext, SvgPainter,
};
use footprintkit_settings::EngineConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Preview file format, picked from the output extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("svg") => Ok(OutputFormat::Svg),
            Some("png") => Ok(OutputFormat::Png),
            other => bail!(
                "unsupported preview format '{}' (expected .svg or .png)",
                other.unwrap_or("")
            ),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
        }
    }
}

fn render_context(config: &EngineConfig) -> RenderContext {
    RenderContext::new(config.render.marker_size).with_stroke_scale(config.render.stroke_width)
}

/// Render one instance to `path`; `pixels` is the PNG side length
pub fn render_part(
    instance: &mut PartInstance,
    config: &EngineConfig,
    selected: bool,
    pixels: u32,
    path: &Path,
) -> Result<()> {
    let format = OutputFormat::from_path(path)?;
    let body = instance.body();
    let Some(bounds) = body.bounds() else {
        bail!("'{}' has no geometry to render", instance.part_type().key);
    };

    let mut ctx = render_context(config);
    let margin = config.render.margin;
    match format {
        OutputFormat::Svg => {
            let mut svg = SvgPainter::new();
            render_instance(instance, &mut ctx, &mut svg, selected);
            std::fs::write(path, svg.finish(bounds, margin))
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        OutputFormat::Png => {
            let mut raster = RasterPainter::new(pixels, pixels, bounds, margin)
                .context("preview has no drawable extent")?;
            render_instance(instance, &mut ctx, &mut raster, selected);
            raster.save_png(path)?;
        }
    }
    info!(part = instance.part_type().key, path = %path.display(), "preview written");
    Ok(())
}

/// Write a palette icon for every type in `library` into `dir`
pub fn render_palette(
    library: &PartLibrary,
    config: &EngineConfig,
    format: OutputFormat,
    dir: &Path,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let content = config.icon_content_size();
    let padding = config.icon.padding;
    let frame = Bounds {
        min_x: 0.0,
        min_y: 0.0,
        max_x: content,
        max_y: content,
    };
    let mut ctx = render_context(config);
    let mut written = Vec::with_capacity(library.len());

    for kind in library.iter() {
        let mut instance = library.create(kind.key, Default::default(), config.geometry_options())?;
        let icon = instance.icon_geometry(content)?;
        let path = dir.join(format!("{}.{}", kind.key, format.extension()));
        match format {
            OutputFormat::Svg => {
                let mut svg = SvgPainter::new();
                render_icon(&icon, kind, &mut ctx, &mut svg);
                std::fs::write(&path, svg.finish(frame, padding))
                    .with_context(|| format!("failed to write {}", path.display()))?;
            }
            OutputFormat::Png => {
                let side = config.icon.size.round().max(1.0) as u32;
                let mut raster = RasterPainter::new(side, side, frame, padding)
                    .context("icon has no drawable extent")?;
                render_icon(&icon, kind, &mut ctx, &mut raster);
                raster.save_png(&path)?;
            }
        }
        debug!(part = kind.key, path = %path.display(), "icon written");
        written.push(path);
    }
    info!(icons = written.len(), dir = %dir.display(), "palette written");
    Ok(written)
}
