//! Per-frame binary mask persistence.
//!
//! The detection pass writes one mask artifact per frame; the replay pass
//! reads them back, keyed by frame index. Frames with no detection are
//! recorded with a 1x1 sentinel image so their "no banner" outcome survives
//! across the two passes.

use std::path::{Path, PathBuf};

use image::{GrayImage, Luma};
use ndarray::Array2;

use crate::error::Result;

#[derive(Clone, Debug)]
pub struct MaskStore {
    dir: PathBuf,
}

impl MaskStore {
    /// Open (and create if needed) a mask directory.
    pub fn open(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    fn path(&self, frame: usize) -> PathBuf {
        self.dir.join(format!("frame{frame}.png"))
    }

    /// Persist a detected mask (values 0/1) for a frame.
    pub fn save(&self, frame: usize, mask: &Array2<u8>) -> Result<()> {
        let (h, w) = mask.dim();
        let mut img = GrayImage::new(w as u32, h as u32);
        for ((row, col), &v) in mask.indexed_iter() {
            img.put_pixel(col as u32, row as u32, Luma([if v == 1 { 255 } else { 0 }]));
        }
        img.save(self.path(frame))?;
        Ok(())
    }

    /// Mark a frame as having no detection.
    pub fn save_empty(&self, frame: usize) -> Result<()> {
        let img = GrayImage::new(1, 1);
        img.save(self.path(frame))?;
        Ok(())
    }

    /// Load a frame's mask; `None` means the frame was recorded as empty.
    pub fn load(&self, frame: usize) -> Result<Option<Array2<u8>>> {
        let img = image::open(self.path(frame))?.to_luma8();
        let (w, h) = img.dimensions();
        if (w, h) == (1, 1) {
            return Ok(None);
        }

        let mut mask = Array2::<u8>::zeros((h as usize, w as usize));
        for (x, y, pixel) in img.enumerate_pixels() {
            mask[[y as usize, x as usize]] = u8::from(pixel.0[0] > 127);
        }
        Ok(Some(mask))
    }
}
