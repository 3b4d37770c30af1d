use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_SWEEP_STEP, DEFAULT_TILE_CHANNELS, DEFAULT_TILE_HEIGHT, DEFAULT_TILE_WIDTH,
};
use crate::detect::DetectionConfig;
use crate::stabilize::StabilizationConfig;

/// Full pipeline configuration, loadable from TOML.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Frame directory (or single image for `source_type = "image"`).
    pub input: PathBuf,
    /// Output directory for composited frames.
    pub output: PathBuf,
    /// Replacement logo image.
    pub logo: PathBuf,
    /// Directory for per-frame mask artifacts.
    #[serde(default = "default_mask_dir")]
    pub mask_dir: PathBuf,
    #[serde(default)]
    pub source_type: SourceType,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub detection: DetectionConfig,
    #[serde(default)]
    pub stabilization: StabilizationConfig,
}

fn default_mask_dir() -> PathBuf {
    PathBuf::from("saved_frame_mask")
}

/// What the input path points at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// A directory of numbered frame images; stabilization runs over the
    /// whole sequence.
    #[default]
    Sequence,
    /// A single still image; detections are composited as-is, without the
    /// temporal pass.
    Image,
}

/// Segmentation-model parameters passed through to [`MaskPredictor`]
/// implementations that tile the frame.
///
/// [`MaskPredictor`]: crate::detect::MaskPredictor
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_tile_height")]
    pub tile_height: usize,
    #[serde(default = "default_tile_width")]
    pub tile_width: usize,
    #[serde(default = "default_tile_channels")]
    pub tile_channels: usize,
    /// Step in pixels between prediction tiles in the full-frame sweep.
    #[serde(default = "default_sweep_step")]
    pub sweep_step: usize,
    /// Trained model weights, when a learned predictor is in use.
    #[serde(default)]
    pub weights_path: Option<PathBuf>,
}

fn default_tile_height() -> usize {
    DEFAULT_TILE_HEIGHT
}
fn default_tile_width() -> usize {
    DEFAULT_TILE_WIDTH
}
fn default_tile_channels() -> usize {
    DEFAULT_TILE_CHANNELS
}
fn default_sweep_step() -> usize {
    DEFAULT_SWEEP_STEP
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            tile_height: DEFAULT_TILE_HEIGHT,
            tile_width: DEFAULT_TILE_WIDTH,
            tile_channels: DEFAULT_TILE_CHANNELS,
            sweep_step: DEFAULT_SWEEP_STEP,
            weights_path: None,
        }
    }
}
