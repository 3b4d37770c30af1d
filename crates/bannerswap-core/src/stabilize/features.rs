//! Derived per-frame features.
//!
//! Purely functional transforms of a corner record, computed once at the
//! start of a stabilization pass and then read as a frozen snapshot while the
//! pass rewrites coordinates. They are never persisted.

use crate::geometry::{Point, Quad};

#[derive(Clone, Debug)]
pub struct FrameFeatures {
    /// Mean of the two diagonal midpoints.
    pub center: Point,
    /// Corner-to-center distances.
    pub dist_top_left: f64,
    pub dist_top_right: f64,
    pub dist_bot_left: f64,
    pub dist_bot_right: f64,
    /// Side lengths.
    pub left_height: f64,
    pub right_height: f64,
    pub top_width: f64,
    pub bot_width: f64,
    /// Width/height ratio, `top_width / left_height`.
    pub ratio: f64,
    /// Angle at top-left between the vectors to top-right and bottom-left,
    /// degrees.
    pub angle: f64,
}

pub fn compute_features(quad: &Quad) -> FrameFeatures {
    let center = quad.center();
    FrameFeatures {
        center,
        dist_top_left: center.distance(&quad.top_left),
        dist_top_right: center.distance(&quad.top_right),
        dist_bot_left: center.distance(&quad.bot_left),
        dist_bot_right: center.distance(&quad.bot_right),
        left_height: quad.left_height(),
        right_height: quad.right_height(),
        top_width: quad.top_width(),
        bot_width: quad.bot_width(),
        ratio: quad.aspect_ratio(),
        angle: quad.corner_angle(),
    }
}
