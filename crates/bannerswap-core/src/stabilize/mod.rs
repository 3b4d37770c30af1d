pub mod config;
pub mod features;

mod engine;

pub use config::{SmoothingConfig, StabilizationConfig};
pub use engine::{stabilize, Side};
pub use features::{compute_features, FrameFeatures};
