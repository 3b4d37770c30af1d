//! Temporal stabilization of a corner track.
//!
//! Per-frame detections are noisy: under partial occlusion or motion blur one
//! side of the banner wanders while the other stays put. Raw interpolation
//! across bad frames would squash the banner's perspective; instead the
//! stable side's geometry (height, corner angle) plus the known width/height
//! ratio reconstructs where the unstable side must be.

use tracing::{debug, info};

use crate::consts::{CORRECTION_HALF_WINDOW, EPSILON, LEFT_BOUND_PX, RIGHT_BOUND_MARGIN};
use crate::error::{BannerError, Result};
use crate::smoothing::smooth_series;
use crate::track::CornerTrack;

use super::config::StabilizationConfig;
use super::features::{compute_features, FrameFeatures};

/// Which banner side a correction targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Stabilize all detected records of `track` in place.
///
/// Steps, in order:
/// 1. compute a frozen feature snapshot per detected frame;
/// 2. collect instability candidates from jumps in `dist_top_left`;
/// 3. flag each candidate's left/right side by its x movement;
/// 4. rectify right-side y coordinates along the top edge;
/// 5. rewrite flagged sides (and ratio-drifted frames) from the opposite
///    side's geometry;
/// 6. smooth all four y-coordinate series.
///
/// Fails without touching anything when the track has no detections, and
/// fails the whole pass on degenerate geometry or when no acceptable
/// smoothing window exists. The pass operates on the subsequence of detected
/// frames; empty frames are skipped, never invented.
pub fn stabilize(
    track: &mut CornerTrack,
    frame_width: u32,
    config: &StabilizationConfig,
) -> Result<()> {
    let frames = track.detected_frames();
    let n = frames.len();
    if n == 0 {
        return Err(BannerError::EmptyTrack);
    }
    info!(detected = n, total = track.len(), "stabilizing corner track");

    // Step 1: frozen feature snapshot. The correction pass reads heights and
    // angles from here even after x coordinates have been rewritten.
    let feats: Vec<FrameFeatures> = frames
        .iter()
        .map(|&f| compute_features(track.record(f).expect("detected frame")))
        .collect();

    // Step 2: jump candidates on the top-left corner-to-center distance.
    let mut candidates: Vec<usize> = Vec::new();
    for k in 1..n {
        let diff = feats[k].dist_top_left - feats[k - 1].dist_top_left;
        if diff.abs() > config.jump_threshold {
            candidates.push(k);
        }
    }

    // Step 3: per-side flags. Both sides of one frame may be flagged.
    let mut unstable_left = vec![false; n];
    let mut unstable_right = vec![false; n];
    for &k in &candidates {
        let cur = track.record(frames[k]).expect("detected frame");
        let prev = track.record(frames[k - 1]).expect("detected frame");
        if (cur.top_left.x - prev.top_left.x).abs() > config.min_px_move {
            unstable_left[k] = true;
        }
        if (cur.top_right.x - prev.top_right.x).abs() > config.min_px_move {
            unstable_right[k] = true;
        }
    }
    debug!(
        candidates = candidates.len(),
        left = unstable_left.iter().filter(|&&b| b).count(),
        right = unstable_right.iter().filter(|&&b| b).count(),
        "instability flags"
    );

    // Step 4: normalize vertical skew before reconstructing x. Right-side y
    // values are re-derived by extending the top edge linearly; the bottom
    // right additionally drops by the left height.
    for (k, &f) in frames.iter().enumerate() {
        let quad = track.record_mut(f).expect("detected frame");
        let span = quad.top_right.x - quad.top_left.x;
        if span.abs() < EPSILON {
            return Err(BannerError::DegenerateGeometry(format!(
                "zero top-edge width at frame {f}"
            )));
        }
        let slope = (quad.top_right.y - quad.top_left.y) / span;
        let origin = quad.top_left;
        quad.top_right.y = (quad.top_right.x - origin.x) * slope + origin.y;
        quad.bot_right.y = (quad.bot_right.x - origin.x) * slope + origin.y + feats[k].left_height;
    }

    // Step 5: main correction pass.
    let right_bound = frame_width as f64 - RIGHT_BOUND_MARGIN;
    let mut latest_unstable: Option<Side> = None;

    for k in 0..n {
        if unstable_right[k] {
            latest_unstable = Some(Side::Right);
            for p in window_around(k, n) {
                reconstruct_right(track, frames[p], &feats[p], config.ratio_constant);
            }
        }
        if unstable_left[k] {
            latest_unstable = Some(Side::Left);
            for p in window_around(k, n) {
                reconstruct_left(track, frames[p], &feats[p], config.ratio_constant);
            }
        }

        // Shape drifted from the expected ratio without an explicit flag:
        // re-apply the latest correction, gated so the anchoring side stays
        // inside the frame.
        if !unstable_left[k]
            && !unstable_right[k]
            && (feats[k].ratio - config.ratio_constant).abs() > config.ratio_tolerance
        {
            let quad = track.record(frames[k]).expect("detected frame");
            match latest_unstable {
                Some(Side::Left) if quad.top_right.x <= right_bound => {
                    reconstruct_left(track, frames[k], &feats[k], config.ratio_constant);
                }
                Some(Side::Right) if quad.top_left.x >= LEFT_BOUND_PX => {
                    reconstruct_right(track, frames[k], &feats[k], config.ratio_constant);
                }
                _ => {}
            }
        }
    }

    // Step 6: smooth the four y series independently.
    let smoothing = &config.smoothing;
    let columns: [(fn(&crate::geometry::Quad) -> f64, fn(&mut crate::geometry::Quad, f64)); 4] = [
        (|q| q.top_left.y, |q, v| q.top_left.y = v),
        (|q| q.top_right.y, |q, v| q.top_right.y = v),
        (|q| q.bot_left.y, |q, v| q.bot_left.y = v),
        (|q| q.bot_right.y, |q, v| q.bot_right.y = v),
    ];
    for (select, assign) in columns {
        let series = track.column(&frames, select);
        let smoothed = smooth_series(
            &series,
            smoothing.min_window,
            smoothing.max_window,
            smoothing.poly_degree,
            smoothing.smooth_threshold,
        )?;
        track.set_column(&frames, &smoothed, assign);
    }

    Ok(())
}

/// Correction window `[k - HW, k + HW)` clamped to the detected subsequence.
fn window_around(k: usize, n: usize) -> std::ops::Range<usize> {
    k.saturating_sub(CORRECTION_HALF_WINDOW)..(k + CORRECTION_HALF_WINDOW).min(n)
}

/// Rewrite the right side's x from the left side's geometry:
/// `x_right = x_left + left_height * ratio * angle / 90`.
fn reconstruct_right(track: &mut CornerTrack, frame: usize, feat: &FrameFeatures, ratio: f64) {
    let offset = feat.left_height * (ratio * feat.angle / 90.0);
    let quad = track.record_mut(frame).expect("detected frame");
    quad.top_right.x = quad.top_left.x + offset;
    quad.bot_right.x = quad.bot_left.x + offset;
}

/// Mirror of [`reconstruct_right`]: rewrite the left side's x from the right
/// side's geometry.
fn reconstruct_left(track: &mut CornerTrack, frame: usize, feat: &FrameFeatures, ratio: f64) {
    let offset = feat.right_height * (ratio * feat.angle / 90.0);
    let quad = track.record_mut(frame).expect("detected frame");
    quad.top_left.x = quad.top_right.x - offset;
    quad.bot_left.x = quad.bot_right.x - offset;
}
