use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};

use bannerswap_core::detect::{ChromaBandPredictor, ComponentExtractor, DetectionConfig};
use bannerswap_core::pipeline::{run_pipeline, PipelineConfig, SourceType};

use super::parse_rgb;

#[derive(Args)]
pub struct RunArgs {
    /// Input frame directory (or single image with --image)
    pub input: PathBuf,

    /// Pipeline config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Replacement logo image
    #[arg(long, default_value = "logo.png")]
    pub logo: PathBuf,

    /// Banner color to match, hex RGB (chroma predictor)
    #[arg(long, default_value = "#00b140")]
    pub color: String,

    /// RGB distance at which the match probability reaches zero
    #[arg(long, default_value = "80")]
    pub tolerance: f64,

    /// Treat the input as a single still image
    #[arg(long)]
    pub image: bool,

    /// Output directory for composited frames
    #[arg(short, long, default_value = "output")]
    pub output: PathBuf,
}

pub fn run(args: &RunArgs) -> Result<()> {
    let config = if let Some(ref config_path) = args.config {
        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config {}", config_path.display()))?;
        toml::from_str(&contents).context("Invalid pipeline config")?
    } else {
        build_config_from_args(args)
    };

    println!("Bannerswap Pipeline");
    println!("  Input:   {}", config.input.display());
    println!("  Output:  {}", config.output.display());
    println!("  Logo:    {}", config.logo.display());
    println!("  Source:  {:?}", config.source_type);
    println!();

    let predictor = ChromaBandPredictor::new(parse_rgb(&args.color)?, args.tolerance);
    let extractor = ComponentExtractor;

    let pb = ProgressBar::new(1);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg:16} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );

    let summary = run_pipeline(&config, &predictor, &extractor, |stage, done, total| {
        pb.set_message(stage.to_string());
        pb.set_length(total as u64);
        pb.set_position(done as u64);
    })?;

    pb.finish_with_message("Done");
    println!(
        "\nComposited {} of {} frames into {}",
        summary.detected_frames,
        summary.total_frames,
        config.output.display()
    );
    Ok(())
}

fn build_config_from_args(args: &RunArgs) -> PipelineConfig {
    PipelineConfig {
        input: args.input.clone(),
        output: args.output.clone(),
        logo: args.logo.clone(),
        mask_dir: PathBuf::from("saved_frame_mask"),
        source_type: if args.image {
            SourceType::Image
        } else {
            SourceType::Sequence
        },
        model: Default::default(),
        detection: DetectionConfig::default(),
        stabilization: Default::default(),
    }
}
