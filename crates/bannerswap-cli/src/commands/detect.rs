use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};

use bannerswap_core::detect::{
    detect_banner, ChromaBandPredictor, ComponentExtractor, DetectionConfig, MaskPredictor,
};
use bannerswap_core::io::frames::FrameSequence;
use bannerswap_core::io::mask_store::MaskStore;
use bannerswap_core::track::CornerTrack;

use super::parse_rgb;

#[derive(Args)]
pub struct DetectArgs {
    /// Input frame directory
    pub dir: PathBuf,

    /// Banner color to match, hex RGB (chroma predictor)
    #[arg(long, default_value = "#00b140")]
    pub color: String,

    /// RGB distance at which the match probability reaches zero
    #[arg(long, default_value = "80")]
    pub tolerance: f64,

    /// Probability cutoff for the binary mask
    #[arg(long, default_value = "0.5")]
    pub threshold: f32,

    /// Discard regions with pixel area at or below this
    #[arg(long, default_value = "100")]
    pub min_area: f64,

    /// Directory for per-frame mask artifacts
    #[arg(long, default_value = "saved_frame_mask")]
    pub mask_dir: PathBuf,

    /// Output corner-track file (JSON)
    #[arg(short, long, default_value = "track.json")]
    pub output: PathBuf,
}

pub fn run(args: &DetectArgs) -> Result<()> {
    let frames = FrameSequence::open(&args.dir)?;
    let masks = MaskStore::open(&args.mask_dir)?;
    let predictor = ChromaBandPredictor::new(parse_rgb(&args.color)?, args.tolerance);
    let extractor = ComponentExtractor;
    let config = DetectionConfig {
        value_threshold: args.threshold,
        filter_area_size: args.min_area,
    };

    let pb = ProgressBar::new(frames.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    pb.set_message("Detecting");

    let mut track = CornerTrack::new();
    for i in 0..frames.len() {
        let frame = frames.load(i)?;
        let prob = predictor.predict(&frame)?;
        match detect_banner(&prob, &config, &extractor) {
            Some(detection) => {
                masks.save(i, &detection.mask)?;
                track.push_detected(detection.quad);
            }
            None => {
                masks.save_empty(i)?;
                track.push_empty();
            }
        }
        pb.set_position(i as u64 + 1);
    }
    pb.finish_with_message("Done");

    let json = serde_json::to_string_pretty(&track)?;
    std::fs::write(&args.output, json)
        .with_context(|| format!("Failed to write track to {}", args.output.display()))?;

    println!(
        "\nDetected banner in {} of {} frames",
        track.detected_count(),
        track.len()
    );
    println!("Track saved to {}", args.output.display());
    Ok(())
}
