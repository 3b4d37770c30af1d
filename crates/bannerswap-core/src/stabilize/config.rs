use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_JUMP_THRESHOLD, DEFAULT_MAX_WINDOW, DEFAULT_MIN_PX_MOVE, DEFAULT_MIN_WINDOW,
    DEFAULT_POLY_DEGREE, DEFAULT_RATIO_CONSTANT, DEFAULT_RATIO_TOLERANCE, DEFAULT_SMOOTH_THRESHOLD,
};

/// Parameters of the temporal stabilization pass.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StabilizationConfig {
    /// Expected banner width/height ratio; also drives side reconstruction.
    #[serde(default = "default_ratio_constant")]
    pub ratio_constant: f64,
    /// Frame-to-frame jump in `dist_top_left` above which a frame becomes an
    /// instability candidate.
    #[serde(default = "default_jump_threshold")]
    pub jump_threshold: f64,
    /// Minimum x movement for a candidate frame's side to be flagged.
    #[serde(default = "default_min_px_move")]
    pub min_px_move: f64,
    /// Ratio drift beyond which the most recently unstable side is rewritten.
    #[serde(default = "default_ratio_tolerance")]
    pub ratio_tolerance: f64,
    /// Final y-coordinate smoothing.
    #[serde(default)]
    pub smoothing: SmoothingConfig,
}

/// Adaptive Savitzky-Golay smoothing parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SmoothingConfig {
    /// Smallest window tried (odd, inclusive).
    #[serde(default = "default_min_window")]
    pub min_window: usize,
    /// Exclusive upper bound on window sizes.
    #[serde(default = "default_max_window")]
    pub max_window: usize,
    /// Polynomial degree of the local fit.
    #[serde(default = "default_poly_degree")]
    pub poly_degree: usize,
    /// Maximum pointwise deviation (pixels) an accepted window may introduce.
    #[serde(default = "default_smooth_threshold")]
    pub smooth_threshold: f64,
}

fn default_ratio_constant() -> f64 {
    DEFAULT_RATIO_CONSTANT
}
fn default_jump_threshold() -> f64 {
    DEFAULT_JUMP_THRESHOLD
}
fn default_min_px_move() -> f64 {
    DEFAULT_MIN_PX_MOVE
}
fn default_ratio_tolerance() -> f64 {
    DEFAULT_RATIO_TOLERANCE
}
fn default_min_window() -> usize {
    DEFAULT_MIN_WINDOW
}
fn default_max_window() -> usize {
    DEFAULT_MAX_WINDOW
}
fn default_poly_degree() -> usize {
    DEFAULT_POLY_DEGREE
}
fn default_smooth_threshold() -> f64 {
    DEFAULT_SMOOTH_THRESHOLD
}

impl Default for StabilizationConfig {
    fn default() -> Self {
        Self {
            ratio_constant: DEFAULT_RATIO_CONSTANT,
            jump_threshold: DEFAULT_JUMP_THRESHOLD,
            min_px_move: DEFAULT_MIN_PX_MOVE,
            ratio_tolerance: DEFAULT_RATIO_TOLERANCE,
            smoothing: SmoothingConfig::default(),
        }
    }
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            min_window: DEFAULT_MIN_WINDOW,
            max_window: DEFAULT_MAX_WINDOW,
            poly_degree: DEFAULT_POLY_DEGREE,
            smooth_threshold: DEFAULT_SMOOTH_THRESHOLD,
        }
    }
}
