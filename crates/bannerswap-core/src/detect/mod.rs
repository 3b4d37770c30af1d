pub mod banner;
pub mod extractor;
pub mod predictor;

pub use banner::{detect_banner, Detection, DetectionConfig};
pub use extractor::{ComponentExtractor, ExtractedRegions, QuadExtractor, RegionQuad};
pub use predictor::{ChromaBandPredictor, MaskPredictor};
