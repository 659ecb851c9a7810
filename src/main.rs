use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use footprintkit::preview::{render_palette, render_part, OutputFormat};
use footprintkit::{
    init_logging, Color, EngineConfig, Length, MirrorAxis, Orientation, ParamValue, PartLibrary, Point,
    BUILD_DATE, VERSION,
};
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Engine configuration file (TOML or JSON)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the part types and their variants
    List,

    /// Render a single part preview
    Render {
        /// Part type key, e.g. iec_socket
        part: String,

        /// Output file (.svg or .png)
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Variant key
        #[arg(long)]
        variant: Option<String>,

        /// Parameter override, e.g. flange_radius=4mm or screw_holes=false
        #[arg(short = 'p', long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,

        /// Rotation in degrees about the reference point
        #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
        rotate: f64,

        /// Mirror left to right
        #[arg(long)]
        mirror: bool,

        /// Draw anchors as for a selected part
        #[arg(long)]
        selected: bool,

        /// PNG side length in pixels
        #[arg(long, default_value_t = 512)]
        pixels: u32,
    },

    /// Write palette icons for every part type
    Icons {
        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = "icons")]
        output: PathBuf,

        /// Write PNG instead of SVG
        #[arg(long)]
        png: bool,
    },

    /// Write the default configuration file
    InitConfig {
        /// Destination; the platform config directory when omitted
        #[arg(value_name = "FILE")]
        path: Option<PathBuf>,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<EngineConfig> {
    let path = match path {
        Some(path) => path.clone(),
        None => EngineConfig::default_path()?,
    };
    EngineConfig::load_or_default(&path).with_context(|| format!("Failed to load {}", path.display()))
}

/// Parse `key=value` against the parameter's current value type
fn parse_param(current: ParamValue, text: &str, config: &EngineConfig) -> Result<ParamValue> {
    Ok(match current {
        ParamValue::Length(_) => ParamValue::Length(Length::parse(text, config.units.display_unit)?),
        ParamValue::Count(_) => ParamValue::Count(text.parse().context("expected a whole number")?),
        ParamValue::Flag(_) => ParamValue::Flag(text.parse().context("expected true or false")?),
        ParamValue::Color(_) => {
            ParamValue::Color(Color::from_hex(text).context("expected #rrggbb")?)
        }
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.json_logs)?;
    debug!(version = VERSION, build_date = BUILD_DATE, "footprintkit starting");

    let config = load_config(cli.config.as_ref())?;
    let library = PartLibrary::standard();

    match cli.command {
        Command::List => {
            for kind in library.iter() {
                let variants: Vec<&str> = kind.variants.iter().map(|v| v.key).collect();
                println!("{:<14} {:<8} {} [{}]", kind.key, kind.category, kind.name, variants.join(", "));
            }
        }
        Command::Render {
            part,
            output,
            variant,
            params,
            rotate,
            mirror,
            selected,
            pixels,
        } => {
            let mut instance = library.create(&part, Point::ORIGIN, config.geometry_options())?;
            if let Some(variant) = variant {
                instance.set_variant(&variant)?;
            }
            for assignment in &params {
                let (key, text) = assignment
                    .split_once('=')
                    .with_context(|| format!("expected KEY=VALUE, got '{}'", assignment))?;
                let current = instance
                    .param(key)
                    .with_context(|| format!("'{}' has no parameter '{}'", part, key))?;
                let value = parse_param(current, text.trim(), &config)
                    .with_context(|| format!("invalid value for '{}'", key))?;
                instance.set_param(key, value)?;
            }
            if mirror {
                instance.mirror(MirrorAxis::Vertical, Point::ORIGIN)?;
            }
            instance.set_orientation(Orientation::from_degrees(instance.orientation().degrees() + rotate))?;
            render_part(&mut instance, &config, selected, pixels, &output)?;
            for i in 0..instance.anchor_count() {
                if let (Some(name), Some(p)) = (instance.anchor_name(i), instance.anchor_point(i)) {
                    println!("{:<14} {:>10.3} {:>10.3}", name, p.x, p.y);
                }
            }
        }
        Command::Icons { output, png } => {
            let format = if png { OutputFormat::Png } else { OutputFormat::Svg };
            let written = render_palette(&library, &config, format, &output)?;
            println!("Wrote {} icons to {}", written.len(), output.display());
        }
        Command::InitConfig { path } => {
            let path = match path {
                Some(path) => path,
                None => EngineConfig::default_path()?,
            };
            config.save_to_file(&path)?;
            println!("Wrote {}", path.display());
        }
    }

    Ok(())
}
