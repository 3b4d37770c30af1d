use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use bannerswap_core::io::frames::FrameSequence;

#[derive(Args)]
pub struct InfoArgs {
    /// Input frame directory
    pub dir: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let frames = FrameSequence::open(&args.dir)?;
    let first = frames.load(0)?;
    let (width, height) = first.dimensions();

    println!("Directory:   {}", args.dir.display());
    println!("Frames:      {}", frames.len());
    println!("Dimensions:  {}x{}", width, height);
    println!(
        "First frame: {}",
        frames.file_name(0)?.to_string_lossy()
    );
    println!(
        "Last frame:  {}",
        frames.file_name(frames.len() - 1)?.to_string_lossy()
    );

    Ok(())
}
