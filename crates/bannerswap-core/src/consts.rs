/// Small epsilon to avoid division by zero in floating-point comparisons.
pub const EPSILON: f64 = 1e-10;

/// Default probability cutoff for turning a mask prediction into a binary mask.
pub const DEFAULT_VALUE_THRESHOLD: f32 = 0.5;

/// Default minimum region area (pixels) for a contour to count as a banner piece.
pub const DEFAULT_FILTER_AREA_SIZE: f64 = 100.0;

/// Default banner width/height ratio used to reconstruct an unstable side.
pub const DEFAULT_RATIO_CONSTANT: f64 = 6.6;

/// Default frame-to-frame jump (pixels) in the top-left corner-to-center
/// distance above which a frame becomes an instability candidate.
pub const DEFAULT_JUMP_THRESHOLD: f64 = 5.0;

/// Default minimum x movement (pixels) for a candidate frame's side to be
/// flagged unstable.
pub const DEFAULT_MIN_PX_MOVE: f64 = 9.0;

/// Default tolerance on the width/height ratio before the drift correction
/// rewrites the most recently unstable side.
pub const DEFAULT_RATIO_TOLERANCE: f64 = 0.05;

/// Half-width (frames) of the correction window rewritten around an
/// unstable frame.
pub const CORRECTION_HALF_WINDOW: usize = 10;

/// Reconstructed left-side anchors must stay at or beyond this x.
pub const LEFT_BOUND_PX: f64 = 2.0;

/// Reconstructed right-side anchors must stay this many pixels inside the
/// right frame edge.
pub const RIGHT_BOUND_MARGIN: f64 = 2.0;

/// Default smallest Savitzky-Golay window tried by the adaptive smoother.
pub const DEFAULT_MIN_WINDOW: usize = 5;

/// Default exclusive upper bound on Savitzky-Golay window sizes.
pub const DEFAULT_MAX_WINDOW: usize = 31;

/// Default polynomial degree for Savitzky-Golay smoothing.
pub const DEFAULT_POLY_DEGREE: usize = 3;

/// Default maximum pointwise deviation (pixels) a smoothed series may have
/// from the raw series.
pub const DEFAULT_SMOOTH_THRESHOLD: f64 = 5.0;

/// Default tile height for the mask predictor.
pub const DEFAULT_TILE_HEIGHT: usize = 256;

/// Default tile width for the mask predictor.
pub const DEFAULT_TILE_WIDTH: usize = 256;

/// Default number of channels the mask predictor consumes.
pub const DEFAULT_TILE_CHANNELS: usize = 3;

/// Default step (pixels) between prediction tiles in the full-frame sweep.
pub const DEFAULT_SWEEP_STEP: usize = 200;
