//! Two-pass banner replacement over a frame sequence.
//!
//! Pass one detects the banner in every frame (in parallel) and persists the
//! per-frame masks; the corner track is then stabilized across time; pass two
//! replays the frames in order and composites the logo. The replay is
//! sequential because the sticky full-width estimate flows frame to frame.

mod config;
mod tracker;

pub use config::{ModelConfig, PipelineConfig, SourceType};
pub use tracker::Tracker;

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::composite::insert_logo;
use crate::detect::{detect_banner, Detection, MaskPredictor, QuadExtractor};
use crate::error::{BannerError, Result};
use crate::io::frames::{load_logo, save_frame, FrameSequence};
use crate::io::mask_store::MaskStore;
use crate::stabilize::stabilize;

/// Pipeline phase, for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineStage {
    Detection,
    Stabilization,
    Compositing,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineStage::Detection => write!(f, "detection"),
            PipelineStage::Stabilization => write!(f, "stabilization"),
            PipelineStage::Compositing => write!(f, "compositing"),
        }
    }
}

/// Outcome counts for a completed run.
#[derive(Clone, Copy, Debug)]
pub struct PipelineSummary {
    pub total_frames: usize,
    pub detected_frames: usize,
}

/// Run the full pipeline: detect, stabilize, composite.
///
/// Calls `on_progress(stage, items_done, items_total)` as frames complete
/// within each stage. For [`SourceType::Image`] the stabilization stage is
/// skipped and the single detection is composited as-is.
pub fn run_pipeline(
    config: &PipelineConfig,
    predictor: &dyn MaskPredictor,
    extractor: &dyn QuadExtractor,
    on_progress: impl Fn(PipelineStage, usize, usize) + Send + Sync,
) -> Result<PipelineSummary> {
    let frames = match config.source_type {
        SourceType::Sequence => FrameSequence::open(&config.input)?,
        SourceType::Image => FrameSequence::single(&config.input),
    };
    let total = frames.len();
    let masks = MaskStore::open(&config.mask_dir)?;
    let logo = load_logo(&config.logo)?;
    std::fs::create_dir_all(&config.output)?;

    let (frame_width, frame_height) = frames.load(0)?.dimensions();
    info!(
        total,
        frame_width, frame_height, "starting banner replacement"
    );

    // Pass one: per-frame detection, parallel across frames.
    let done = AtomicUsize::new(0);
    let detections: Vec<Result<Option<Detection>>> = (0..total)
        .into_par_iter()
        .map(|i| {
            let frame = frames.load(i)?;
            let prob = predictor.predict(&frame)?;
            let detection = detect_banner(&prob, &config.detection, extractor);
            let completed = done.fetch_add(1, Ordering::Relaxed) + 1;
            on_progress(PipelineStage::Detection, completed, total);
            Ok(detection)
        })
        .collect();

    let mut tracker = Tracker::new();
    for detection in detections {
        match detection? {
            Some(d) => {
                masks.save(tracker.frame_num, &d.mask)?;
                tracker.track.push_detected(d.quad);
            }
            None => {
                debug!(frame = tracker.frame_num, "no banner detected");
                masks.save_empty(tracker.frame_num)?;
                tracker.track.push_empty();
            }
        }
        tracker.frame_num += 1;
    }

    let detected = tracker.track.detected_count();
    if detected == 0 {
        return Err(BannerError::EmptyTrack);
    }
    info!(detected, total, "detection pass complete");

    // Temporal pass: only meaningful for a real sequence.
    if config.source_type == SourceType::Sequence {
        on_progress(PipelineStage::Stabilization, 0, 1);
        stabilize(&mut tracker.track, frame_width, &config.stabilization)?;
        on_progress(PipelineStage::Stabilization, 1, 1);
        info!("stabilization pass complete");
    }

    // Pass two: sequential replay and compositing.
    for i in 0..total {
        let mut frame = frames.load(i)?;
        tracker.detection_successful = false;

        if let Some(quad) = tracker.track.record(i).copied() {
            if let Some(mask) = masks.load(i)? {
                match insert_logo(&mut frame, &mask, &quad, &logo, tracker.old_width) {
                    Ok(width) => {
                        tracker.old_width = width;
                        tracker.detection_successful = true;
                    }
                    // Bad geometry spoils a single frame; it goes out
                    // unmodified and the run continues.
                    Err(err @ BannerError::DegenerateGeometry(_)) => {
                        warn!(frame = i, error = %err, "compositing failed, passing frame through");
                    }
                    Err(err) => return Err(err),
                }
            }
        }

        if !tracker.detection_successful {
            debug!(frame = i, "frame written without compositing");
        }
        let out_path = config.output.join(frames.file_name(i)?);
        save_frame(&frame, &out_path)?;
        on_progress(PipelineStage::Compositing, i + 1, total);
    }
    info!(out = %config.output.display(), "compositing pass complete");

    Ok(PipelineSummary {
        total_frames: total,
        detected_frames: detected,
    })
}
