//! signvote CLI — offline tuning tool for the sign-detection pipeline.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use signvote::{
    crop_roi, extract_mask, masked_hsv, score_colors, DetectorConfig, SignSize,
};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "signvote")]
#[command(about = "Detect colored answer signs in still images (ROI crop, silhouette mask, HSV palette scoring)")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run single-image detection and report the winning color.
    Detect(CliDetectArgs),

    /// Print the built-in color palette.
    PaletteInfo,
}

#[derive(Debug, Clone, Args)]
struct CliDetectArgs {
    /// Path to the input image (full frame; the ROI is cropped from it).
    #[arg(long)]
    image: PathBuf,

    /// Path to write the detection report (JSON). Prints to stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Path to a JSON config file; missing fields fall back to defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of active answer options; palette entries beyond this are
    /// never evaluated.
    #[arg(long, default_value = "4")]
    options: usize,

    /// Sign-size profile selecting the median-blur strength.
    #[arg(long, value_enum, default_value_t = SignSizeArg::Small)]
    sign_size: SignSizeArg,

    /// Override the gradient binarization threshold.
    #[arg(long)]
    edge_threshold: Option<u8>,

    /// Override the minimum contour area (pixels).
    #[arg(long)]
    min_contour_area: Option<f64>,

    /// Override the minimum color surface floor.
    #[arg(long)]
    min_color_area: Option<u64>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SignSizeArg {
    Large,
    Small,
}

impl SignSizeArg {
    fn to_core(self) -> SignSize {
        match self {
            Self::Large => SignSize::Large,
            Self::Small => SignSize::Small,
        }
    }
}

impl CliDetectArgs {
    fn to_config(&self) -> CliResult<DetectorConfig> {
        let mut config = match &self.config {
            Some(path) => DetectorConfig::from_json_file(path)?,
            None => DetectorConfig::default(),
        };
        config.sign_size = self.sign_size.to_core();
        if let Some(v) = self.edge_threshold {
            config.mask.edge_threshold = v;
        }
        if let Some(v) = self.min_contour_area {
            config.mask.min_contour_area = v;
        }
        if let Some(v) = self.min_color_area {
            config.colors.min_color_area = v;
        }
        Ok(config)
    }
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Detect(args) => run_detect(&args),
        Commands::PaletteInfo => run_palette_info(),
    }
}

// ── palette-info ───────────────────────────────────────────────────────

fn run_palette_info() -> CliResult<()> {
    let config = DetectorConfig::default();

    println!("signvote built-in palette (HSV, OpenCV scale)");
    println!("  acceptance floor:  {}", config.colors.min_color_area);
    println!(
        "  median blur:       large={} small={}",
        config.colors.median_blur_large, config.colors.median_blur_small
    );

    for (i, color) in config.colors.palette.iter().enumerate() {
        println!(
            "  [{}] {:<8} lower={:?} upper={:?}",
            i, color.name, color.range.lower, color.range.upper
        );
        if let Some(wrap) = &color.wrap_range {
            println!(
                "      {:<8} lower={:?} upper={:?} (hue wrap)",
                "", wrap.lower, wrap.upper
            );
        }
    }

    Ok(())
}

// ── detect ─────────────────────────────────────────────────────────────

/// Single-image detection report.
#[derive(serde::Serialize)]
struct DetectReport {
    image_size: [u32; 2],
    roi_size: [u32; 2],
    mask_found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    color_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    color_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    surface_score: Option<u64>,
}

fn run_detect(args: &CliDetectArgs) -> CliResult<()> {
    let config = args.to_config()?;

    tracing::info!("Loading image: {}", args.image.display());
    let img = image::open(&args.image)
        .map_err(|e| -> CliError {
            format!("failed to open image {}: {}", args.image.display(), e).into()
        })?
        .to_rgb8();
    let (w, h) = img.dimensions();
    tracing::info!("Image size: {}x{}", w, h);

    let roi = crop_roi(&img, &config.roi)
        .ok_or_else(|| -> CliError { "frame or ROI is empty".into() })?;
    let (rw, rh) = roi.dimensions();

    let mask = extract_mask(&roi, &config.mask);
    let detection = mask.as_ref().and_then(|m| {
        let hsv = masked_hsv(&roi, m);
        score_colors(
            &hsv,
            &config.colors,
            args.options,
            config.colors.median_kernel(config.sign_size),
        )
    });

    match detection {
        Some(d) => {
            let name = &config.colors.palette[d.index].name;
            tracing::info!("Detected {} (index {}, score {})", name, d.index, d.score);
        }
        None => tracing::info!("No sign color detected"),
    }

    let report = DetectReport {
        image_size: [w, h],
        roi_size: [rw, rh],
        mask_found: mask.is_some(),
        color_index: detection.map(|d| d.index),
        color_name: detection.map(|d| config.colors.palette[d.index].name.clone()),
        surface_score: detection.map(|d| d.score),
    };

    let json = serde_json::to_string_pretty(&report)?;
    match &args.out {
        Some(path) => {
            std::fs::write(path, &json)?;
            tracing::info!("Report written to {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}
