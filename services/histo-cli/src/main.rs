//! Command-line histogram artwork renderer.
//!
//! Decodes a source image, runs the render pipeline, and writes the
//! serialized artwork next to the input (or wherever `--output` points):
//! - Eight style presets, listable with `--list-styles`
//! - PNG, SVG, and PDF output
//! - Golden-ratio canvas unless `--height` overrides it

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use histo_common::{BackgroundMode, CancelToken, OutputFormat, PixelBuffer, RenderConfig};
use histo_pipeline::Pipeline;

#[derive(Parser, Debug)]
#[command(name = "histo")]
#[command(about = "Render an image's color histogram as artwork")]
struct Args {
    /// Source image (any format the image crate decodes)
    #[arg(required_unless_present = "list_styles")]
    input: Option<PathBuf>,

    /// Output file (default: input name with the format's extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Style preset name
    #[arg(short, long, default_value = "elegant_curves")]
    style: String,

    /// Output format: png, svg, pdf
    #[arg(short, long, default_value = "png")]
    format: String,

    /// Output width in pixels
    #[arg(short, long, default_value = "1200")]
    width: u32,

    /// Output height, overriding the golden-ratio rule
    #[arg(long)]
    height: Option<u32>,

    /// Background: white, dark, dominant, transparent
    #[arg(short, long, default_value = "white")]
    background: String,

    /// Draw grid lines behind the histogram
    #[arg(long)]
    grid: bool,

    /// Curve smoothing factor in [0, 1]
    #[arg(long, default_value = "0.7")]
    smoothing: f32,

    /// Histogram bins per channel
    #[arg(long, default_value = "256")]
    bins: usize,

    /// Print registered style names and exit
    #[arg(long)]
    list_styles: bool,

    /// Print dominant colors as JSON after rendering
    #[arg(long)]
    colors: bool,

    /// Log level
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let pipeline = Pipeline::new();

    if args.list_styles {
        for name in pipeline.style_names() {
            println!("{name}");
        }
        return Ok(());
    }

    let input = args
        .input
        .as_ref()
        .context("an input image is required")?;
    let format = parse_format(&args.format)?;
    let background = parse_background(&args.background)?;

    let cfg = RenderConfig {
        style: args.style.clone(),
        output_format: format,
        width: args.width,
        background,
        show_grid: args.grid,
        smoothing: args.smoothing,
        bins: args.bins,
        height_override: args.height,
    };

    let decoded = image::open(input)
        .with_context(|| format!("cannot decode {}", input.display()))?
        .to_rgb8();
    let (width, height) = decoded.dimensions();
    let pixels = PixelBuffer::new(width, height, decoded.into_raw())?;

    info!(
        input = %input.display(),
        source = %format!("{width}x{height}"),
        style = %cfg.style,
        "rendering"
    );

    let output = pipeline.run(&pixels, &cfg, &CancelToken::new())?;

    let path = match args.output {
        Some(path) => path,
        None => input.with_extension(format.extension()),
    };
    if path == *input {
        bail!("output would overwrite the input; pass --output");
    }
    std::fs::write(&path, &output.bytes)
        .with_context(|| format!("cannot write {}", path.display()))?;

    println!(
        "{} ({}x{}, {} bytes)",
        path.display(),
        output.width,
        output.height,
        output.bytes.len()
    );
    if args.colors {
        let hex: Vec<String> = output.dominant_colors.iter().map(|c| c.to_hex()).collect();
        println!("{}", serde_json::to_string(&hex)?);
    }

    Ok(())
}

fn parse_format(s: &str) -> Result<OutputFormat> {
    match s.to_lowercase().as_str() {
        "png" => Ok(OutputFormat::Png),
        "svg" => Ok(OutputFormat::Svg),
        "pdf" => Ok(OutputFormat::Pdf),
        other => bail!("unknown output format {other:?} (expected png, svg, or pdf)"),
    }
}

fn parse_background(s: &str) -> Result<BackgroundMode> {
    match s.to_lowercase().as_str() {
        "white" => Ok(BackgroundMode::White),
        "dark" => Ok(BackgroundMode::Dark),
        "dominant" => Ok(BackgroundMode::Dominant),
        "transparent" => Ok(BackgroundMode::Transparent),
        other => bail!(
            "unknown background {other:?} (expected white, dark, dominant, or transparent)"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format() {
        assert_eq!(parse_format("PNG").unwrap(), OutputFormat::Png);
        assert_eq!(parse_format("svg").unwrap(), OutputFormat::Svg);
        assert!(parse_format("gif").is_err());
    }

    #[test]
    fn test_parse_background() {
        assert_eq!(parse_background("Dark").unwrap(), BackgroundMode::Dark);
        assert!(parse_background("plaid").is_err());
    }
}
