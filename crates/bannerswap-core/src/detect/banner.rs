//! Per-frame banner detection from a probability mask.

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{DEFAULT_FILTER_AREA_SIZE, DEFAULT_VALUE_THRESHOLD};
use crate::geometry::{Point, Quad};

use super::extractor::{QuadExtractor, RegionQuad};

/// Detection-pass parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Probability cutoff for the binary mask.
    #[serde(default = "default_value_threshold")]
    pub value_threshold: f32,
    /// Regions with area at or below this are discarded.
    #[serde(default = "default_filter_area_size")]
    pub filter_area_size: f64,
}

fn default_value_threshold() -> f32 {
    DEFAULT_VALUE_THRESHOLD
}
fn default_filter_area_size() -> f64 {
    DEFAULT_FILTER_AREA_SIZE
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            value_threshold: DEFAULT_VALUE_THRESHOLD,
            filter_area_size: DEFAULT_FILTER_AREA_SIZE,
        }
    }
}

/// Successful per-frame detection: the banner quad plus the filled binary
/// mask of every surviving region (value 1 = banner pixel).
#[derive(Clone, Debug)]
pub struct Detection {
    pub quad: Quad,
    pub mask: Array2<u8>,
}

/// A region's four rectangle corners split into named sides.
struct SideSplit {
    top_left: Point,
    bot_left: Point,
    top_right: Point,
    bot_right: Point,
}

/// Assign the rectangle's corners to sides relative to its center: x below
/// the center is the left pair, and within a pair the smaller y is the top.
///
/// Returns `None` when the split is degenerate (a side without exactly one
/// top and one bottom point); such candidates are rejected rather than
/// carrying stale corner values forward.
fn split_sides(region: &RegionQuad) -> Option<SideSplit> {
    let xm = region.centroid.x;
    let ym = region.centroid.y;

    let mut left: Vec<Point> = Vec::with_capacity(2);
    let mut right: Vec<Point> = Vec::with_capacity(2);
    for p in &region.corners {
        if p.x < xm {
            left.push(*p);
        } else {
            right.push(*p);
        }
    }
    if left.len() != 2 || right.len() != 2 {
        return None;
    }

    let split_pair = |pair: &[Point]| -> Option<(Point, Point)> {
        match (pair[0].y < ym, pair[1].y < ym) {
            (true, false) => Some((pair[0], pair[1])),
            (false, true) => Some((pair[1], pair[0])),
            _ => None,
        }
    };

    let (top_left, bot_left) = split_pair(&left)?;
    let (top_right, bot_right) = split_pair(&right)?;
    Some(SideSplit {
        top_left,
        bot_left,
        top_right,
        bot_right,
    })
}

/// Detect the banner in one frame's probability mask.
///
/// Thresholds the mask, extracts candidate rectangles above the area filter,
/// assigns corners per side, and reconciles fragmented detections: a running
/// `center_left` / `center_right` (both seeded from the first candidate's
/// center x) lets a strictly more-left candidate take over the left pair and
/// a strictly more-right candidate the right pair. Returns `None` when no
/// region survives or every candidate has a degenerate corner split.
pub fn detect_banner(
    prob_mask: &Array2<f32>,
    config: &DetectionConfig,
    extractor: &dyn QuadExtractor,
) -> Option<Detection> {
    let binary = prob_mask.mapv(|v| v > config.value_threshold);
    let extracted = extractor.extract(&binary, config.filter_area_size);

    if extracted.regions.is_empty() {
        return None;
    }

    let mut quad: Option<Quad> = None;
    let mut center_left = 0.0_f64;
    let mut center_right = 0.0_f64;

    for region in &extracted.regions {
        let Some(split) = split_sides(region) else {
            debug!(
                area = region.area,
                "skipping region with degenerate corner split"
            );
            continue;
        };

        match quad.as_mut() {
            None => {
                quad = Some(Quad {
                    top_left: split.top_left,
                    top_right: split.top_right,
                    bot_left: split.bot_left,
                    bot_right: split.bot_right,
                });
                center_left = region.centroid.x;
                center_right = region.centroid.x;
            }
            Some(q) => {
                if region.centroid.x < center_left {
                    q.top_left = split.top_left;
                    q.bot_left = split.bot_left;
                    center_left = region.centroid.x;
                } else if region.centroid.x > center_right {
                    q.top_right = split.top_right;
                    q.bot_right = split.bot_right;
                    center_right = region.centroid.x;
                }
            }
        }
    }

    quad.map(|quad| Detection {
        quad,
        mask: extracted.filled,
    })
}
