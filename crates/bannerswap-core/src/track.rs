//! Append-only per-frame corner records.

use serde::{Deserialize, Serialize};

use crate::geometry::Quad;

/// Frame-indexed sequence of banner detections.
///
/// One slot per frame, in strictly increasing frame order; `None` marks a
/// frame where no banner was detected, which is distinct from any zero-valued
/// quad. The detection pass appends, the stabilizer mutates records in place,
/// the compositing pass reads. The track never shrinks.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CornerTrack {
    records: Vec<Option<Quad>>,
}

impl CornerTrack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a detected quad for the next frame.
    pub fn push_detected(&mut self, quad: Quad) {
        self.records.push(Some(quad));
    }

    /// Append an empty marker for a frame with no detection.
    pub fn push_empty(&mut self) {
        self.records.push(None);
    }

    /// The record for `frame`, or `None` when the frame is out of range or
    /// had no detection.
    pub fn record(&self, frame: usize) -> Option<&Quad> {
        self.records.get(frame).and_then(|r| r.as_ref())
    }

    pub fn record_mut(&mut self, frame: usize) -> Option<&mut Quad> {
        self.records.get_mut(frame).and_then(|r| r.as_mut())
    }

    /// Frame indices that carry a detection, in frame order.
    pub fn detected_frames(&self) -> Vec<usize> {
        self.records
            .iter()
            .enumerate()
            .filter_map(|(i, r)| r.as_ref().map(|_| i))
            .collect()
    }

    /// Number of frames that carry a detection.
    pub fn detected_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_some()).count()
    }

    /// Extract one coordinate across the given frames as a dense series.
    ///
    /// Panics if any of `frames` has no record; callers pass indices obtained
    /// from [`CornerTrack::detected_frames`].
    pub fn column<F>(&self, frames: &[usize], select: F) -> Vec<f64>
    where
        F: Fn(&Quad) -> f64,
    {
        frames
            .iter()
            .map(|&f| select(self.record(f).expect("frame has a record")))
            .collect()
    }

    /// Write one coordinate back across the given frames.
    pub fn set_column<F>(&mut self, frames: &[usize], values: &[f64], assign: F)
    where
        F: Fn(&mut Quad, f64),
    {
        debug_assert_eq!(frames.len(), values.len());
        for (&f, &v) in frames.iter().zip(values) {
            if let Some(quad) = self.record_mut(f) {
                assign(quad, v);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Option<Quad>> {
        self.records.iter()
    }
}
