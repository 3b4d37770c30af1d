use image::RgbImage;
use ndarray::Array2;

use crate::error::Result;

/// The segmentation model seam.
///
/// Implementations produce a full-resolution banner probability mask for a
/// frame, shape `(height, width)`, values in [0, 1]. How the mask is computed
/// (tiled neural-network inference, a classical color model, a cached result)
/// is the implementation's business; the pipeline only relies on this
/// contract.
pub trait MaskPredictor: Send + Sync {
    fn predict(&self, frame: &RgbImage) -> Result<Array2<f32>>;
}

/// Reference predictor that scores pixels by closeness to a target color.
///
/// Stands in for a trained segmentation model in tests and demos: banners
/// with a known dominant color (green screens, uniform LED boards) segment
/// well, anything else needs a real model behind [`MaskPredictor`].
#[derive(Clone, Debug)]
pub struct ChromaBandPredictor {
    /// Banner color to match, RGB.
    pub target: [u8; 3],
    /// Euclidean RGB distance at which the probability reaches zero.
    pub tolerance: f64,
}

impl ChromaBandPredictor {
    pub fn new(target: [u8; 3], tolerance: f64) -> Self {
        Self { target, tolerance }
    }
}

impl MaskPredictor for ChromaBandPredictor {
    fn predict(&self, frame: &RgbImage) -> Result<Array2<f32>> {
        let (w, h) = frame.dimensions();
        let mut prob = Array2::<f32>::zeros((h as usize, w as usize));

        for (x, y, pixel) in frame.enumerate_pixels() {
            let dr = pixel.0[0] as f64 - self.target[0] as f64;
            let dg = pixel.0[1] as f64 - self.target[1] as f64;
            let db = pixel.0[2] as f64 - self.target[2] as f64;
            let dist = (dr * dr + dg * dg + db * db).sqrt();
            let score = 1.0 - dist / self.tolerance.max(1.0);
            prob[[y as usize, x as usize]] = score.clamp(0.0, 1.0) as f32;
        }

        Ok(prob)
    }
}
