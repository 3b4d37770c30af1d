use crate::track::CornerTrack;

/// Mutable per-run pipeline state with single-writer ownership.
///
/// `old_width` is read-modify-write in frame order during the compositing
/// pass; correctness depends on the "last known full width" being causally
/// prior, so frames are never composited out of order.
#[derive(Clone, Debug, Default)]
pub struct Tracker {
    /// Next frame index to be appended during detection.
    pub frame_num: usize,
    /// Last observed full (non-truncated) banner width.
    pub old_width: Option<f64>,
    /// Whether the most recently replayed frame was composited.
    pub detection_successful: bool,
    /// Per-frame corner records.
    pub track: CornerTrack,
}

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }
}
