use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use bannerswap_core::stabilize::{stabilize, StabilizationConfig};
use bannerswap_core::track::CornerTrack;

#[derive(Args)]
pub struct StabilizeArgs {
    /// Corner-track file (JSON) from the detect step
    pub track: PathBuf,

    /// Frame width in pixels
    #[arg(long)]
    pub frame_width: u32,

    /// Expected banner width/height ratio
    #[arg(long, default_value = "6.6")]
    pub ratio: f64,

    /// Corner-to-center distance jump flagging instability
    #[arg(long, default_value = "5.0")]
    pub jump_threshold: f64,

    /// Output track file; defaults to overwriting the input
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &StabilizeArgs) -> Result<()> {
    let contents = std::fs::read_to_string(&args.track)
        .with_context(|| format!("Failed to read track {}", args.track.display()))?;
    let mut track: CornerTrack = serde_json::from_str(&contents).context("Invalid track file")?;

    let config = StabilizationConfig {
        ratio_constant: args.ratio,
        jump_threshold: args.jump_threshold,
        ..Default::default()
    };
    stabilize(&mut track, args.frame_width, &config)?;

    let out = args.output.as_ref().unwrap_or(&args.track);
    let json = serde_json::to_string_pretty(&track)?;
    std::fs::write(out, json)
        .with_context(|| format!("Failed to write track to {}", out.display()))?;

    println!(
        "Stabilized {} detected frames; track saved to {}",
        track.detected_count(),
        out.display()
    );
    Ok(())
}
