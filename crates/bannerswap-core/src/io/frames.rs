//! Frame-sequence I/O over a directory of numbered images.
//!
//! Post-production pipelines hand over footage as image sequences
//! (zero-padded PNG/TIFF file names); lexicographic order of the file names
//! is the frame order.

use std::path::{Path, PathBuf};

use image::RgbImage;

use crate::error::{BannerError, Result};

const FRAME_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "tif", "tiff"];

/// An ordered list of frame image paths.
#[derive(Clone, Debug)]
pub struct FrameSequence {
    paths: Vec<PathBuf>,
}

impl FrameSequence {
    /// Scan a directory for frame images, sorted by file name.
    pub fn open(dir: &Path) -> Result<Self> {
        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| {
                p.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| FRAME_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
            })
            .collect();
        paths.sort();

        if paths.is_empty() {
            return Err(BannerError::Pipeline(format!(
                "no frame images found in {}",
                dir.display()
            )));
        }
        Ok(Self { paths })
    }

    /// A sequence of exactly one image (still-image sources).
    pub fn single(path: &Path) -> Self {
        Self {
            paths: vec![path.to_path_buf()],
        }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn path(&self, index: usize) -> Result<&Path> {
        self.paths
            .get(index)
            .map(|p| p.as_path())
            .ok_or(BannerError::FrameIndexOutOfRange {
                index,
                total: self.paths.len(),
            })
    }

    /// File name of the frame, used to mirror the sequence into an output
    /// directory.
    pub fn file_name(&self, index: usize) -> Result<&std::ffi::OsStr> {
        self.path(index).map(|p| p.file_name().unwrap_or_default())
    }

    /// Decode one frame as RGB.
    pub fn load(&self, index: usize) -> Result<RgbImage> {
        let path = self.path(index)?;
        Ok(image::open(path)?.to_rgb8())
    }
}

/// Load a logo image as RGB.
pub fn load_logo(path: &Path) -> Result<RgbImage> {
    Ok(image::open(path)?.to_rgb8())
}

/// Save an RGB frame, format chosen from the file extension.
pub fn save_frame(frame: &RgbImage, path: &Path) -> Result<()> {
    frame.save(path)?;
    Ok(())
}
