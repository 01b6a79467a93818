//! CLI for facial region decomposition.
//!
//! Usage:
//!   face-regions <tracker.json>                       # Human-readable output
//!   face-regions <tracker.json> --json                # API-shaped JSON output
//!   face-regions <tracker.json> -o result.json --json # Save to file
//!   face-regions <tracker.json> --image frame.png --annotated out.png
//!
//! The input file is one tracker result: image dimensions plus the
//! normalized landmark list, with `"landmarks": null` meaning no face.

use std::path::PathBuf;

use clap::Parser;
use face_regions::{
    decompose_with, DetectResult, IndexPolicy, NormalizedLandmark, OverlayAnnotator,
    RegionExtractor, RegionSpecTable, TrackerOutput,
};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "face-regions")]
#[command(author, version, about = "Facial region decomposition for makeup overlays", long_about = None)]
struct Args {
    /// Tracker output JSON file (normalized landmarks + image dimensions)
    #[arg(required = true)]
    input: PathBuf,

    /// Output as JSON
    #[arg(short, long)]
    json: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Source image to draw the debug overlay on
    #[arg(long)]
    image: Option<PathBuf>,

    /// Where to write the annotated PNG (requires --image)
    #[arg(long)]
    annotated: Option<PathBuf>,

    /// Fail on region indices outside the frame instead of dropping them
    #[arg(long)]
    strict: bool,
}

/// On-disk shape of one tracker result.
#[derive(Deserialize)]
struct TrackerFile {
    image_width: u32,
    image_height: u32,
    /// Absent or null means the tracker found no face.
    landmarks: Option<Vec<NormalizedLandmark>>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(&args.input)?;
    let input: TrackerFile = serde_json::from_str(&raw)?;

    let output = match input.landmarks {
        Some(landmarks) => TrackerOutput::Landmarks(landmarks),
        None => TrackerOutput::NoFace,
    };

    let table = RegionSpecTable::mediapipe_468();
    let policy = if args.strict {
        IndexPolicy::Strict
    } else {
        IndexPolicy::Permissive
    };
    let extractor = RegionExtractor::with_policy(policy);

    let result = decompose_with(
        &output,
        input.image_width,
        input.image_height,
        &table,
        &extractor,
    )?;

    let rendered = if args.json {
        serde_json::to_string_pretty(&result)?
    } else {
        human_readable(&result, &table)
    };

    match &args.output {
        Some(path) => std::fs::write(path, rendered)?,
        None => println!("{}", rendered),
    }

    if let Some(annotated_path) = &args.annotated {
        let image_path = args
            .image
            .as_ref()
            .ok_or("--annotated requires --image")?;
        write_annotated(image_path, annotated_path, &result)?;
    }

    Ok(())
}

fn human_readable(result: &DetectResult, table: &RegionSpecTable) -> String {
    let mut out = String::new();

    out.push_str(&format!("Region table: {}\n", table.version()));
    out.push_str(&format!("Face detected: {}\n", result.face_detected));

    if !result.face_detected {
        return out;
    }

    out.push_str(&format!("Landmarks: {}\n", result.num_landmarks));
    if let Some(bbox) = &result.bbox {
        out.push_str(&format!(
            "Bounding box: x={:.1} y={:.1} w={:.1} h={:.1}\n",
            bbox.x, bbox.y, bbox.width, bbox.height
        ));
    }

    out.push_str("Regions:\n");
    for region in &result.facial_regions {
        out.push_str(&format!(
            "  {:<16} {:>3} points  ({})\n",
            region.name,
            region.num_points(),
            if region.closed { "closed" } else { "open" }
        ));
    }

    out
}

fn write_annotated(
    image_path: &PathBuf,
    annotated_path: &PathBuf,
    result: &DetectResult,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut img = image::open(image_path)?.to_rgba8();

    let annotator = OverlayAnnotator::new();
    annotator.annotate(
        &mut img,
        &result.landmarks,
        result.bbox.as_ref(),
        &result.facial_regions,
    );

    img.save(annotated_path)?;
    Ok(())
}
