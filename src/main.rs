use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use keycrop_rs::image_pipeline::{
    BackgroundRemover, DetectedBox, EditConfig, ImageSize, Rectangle, RegionCropper,
    RequestedObject, transform_boxes,
};
use keycrop_rs::logger;

use tracing::{error, info};

#[derive(Parser)]
#[command(name = "keycrop", version, about = "Color-keyed background removal and region cropping")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Make every pixel matching a color transparent
    Remove {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        /// Named color, #rgb, #rrggbb, rgb(...) or rgba(...)
        #[arg(short, long, default_value = "white")]
        color: String,
        /// Euclidean RGB distance; defaults to KEYCROP_DEFAULT_TOLERANCE or 0
        #[arg(short, long)]
        tolerance: Option<u8>,
    },
    /// Crop regions listed in a JSON file
    Crop {
        #[arg(short, long)]
        input: PathBuf,
        /// JSON array of {"position":{"x","y"},"size":{"w","h"},"object"?}
        #[arg(short, long)]
        regions: PathBuf,
        #[arg(short, long)]
        output_dir: PathBuf,
        /// Also write the image with all regions made transparent
        #[arg(short, long)]
        background: bool,
    },
    /// Convert normalized detection boxes into pixel regions
    Boxes {
        /// JSON array of {"label","box_2d":[y_min,x_min,y_max,x_max]}
        #[arg(short, long)]
        detections: PathBuf,
        /// JSON array of {"name","description"}
        #[arg(long)]
        objects: PathBuf,
        #[arg(long)]
        width: u32,
        #[arg(long)]
        height: u32,
    },
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&raw).with_context(|| format!("parsing {}", path.display()))
}

fn run(cli: Cli, config: EditConfig) -> anyhow::Result<()> {
    match cli.command {
        Command::Remove { input, output, color, tolerance } => {
            let remover = BackgroundRemover::new(config);
            let stats = remover.remove_background_file(&input, &output, &color, tolerance)?;
            info!(
                "Removed {} of {} pixels ({:.2}%)",
                stats.removed_pixels,
                stats.total_pixels,
                stats.percentage()
            );
        }
        Command::Crop { input, regions, output_dir, background } => {
            let regions: Vec<Rectangle> = read_json(&regions)?;
            let cropper = RegionCropper::new(config);
            let metadata = cropper.crop_regions_file(&input, &regions, &output_dir, background)?;
            info!(
                "Wrote {} crops to {}",
                metadata.cropped_regions.len(),
                output_dir.display()
            );
        }
        Command::Boxes { detections, objects, width, height } => {
            let boxes: Vec<DetectedBox> = read_json(&detections)?;
            let requested: Vec<RequestedObject> = read_json(&objects)?;
            let rects = transform_boxes(&boxes, &requested, ImageSize { width, height })?;
            println!("{}", serde_json::to_string_pretty(&rects)?);
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    logger::init();

    let cli = Cli::parse();
    let config = EditConfig::from_env().context("loading configuration")?;

    info!("Starting keycrop...");
    info!("Default tolerance: {}", config.default_tolerance);
    info!(
        "Crop extraction: {}",
        if config.parallel_crops {
            "parallel"
        } else {
            "sequential"
        }
    );

    if let Err(e) = run(cli, config) {
        error!("Operation failed: {:#}", e);
        return Err(e);
    }

    Ok(())
}
