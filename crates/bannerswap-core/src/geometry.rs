//! Planar geometry primitives shared by detection, stabilization and
//! compositing.
//!
//! All coordinates are f64 pixel positions with x growing rightwards and y
//! growing downwards, matching image row/column order.

use serde::{Deserialize, Serialize};

use crate::consts::EPSILON;

/// A 2D point in pixel coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn midpoint(a: &Point, b: &Point) -> Point {
        Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
    }
}

/// Angle in degrees between the vectors `a - origin` and `b - origin`.
///
/// Returns 90 when either vector is (near-)zero length, which keeps the
/// downstream side-reconstruction formula neutral instead of producing NaN.
pub fn angle_between(origin: &Point, a: &Point, b: &Point) -> f64 {
    let ax = a.x - origin.x;
    let ay = a.y - origin.y;
    let bx = b.x - origin.x;
    let by = b.y - origin.y;

    let norm_a = (ax * ax + ay * ay).sqrt();
    let norm_b = (bx * bx + by * by).sqrt();
    if norm_a < EPSILON || norm_b < EPSILON {
        return 90.0;
    }

    let cos_alpha = ((ax * bx + ay * by) / (norm_a * norm_b)).clamp(-1.0, 1.0);
    cos_alpha.acos().to_degrees()
}

/// A banner quadrilateral with canonically named corners.
///
/// A valid, non-degenerate detection satisfies `top_left.x < top_right.x`
/// and `top_left.y < bot_left.y`; the corner-assignment rule in the detector
/// enforces this structurally.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Quad {
    pub top_left: Point,
    pub top_right: Point,
    pub bot_left: Point,
    pub bot_right: Point,
}

impl Quad {
    /// Center as the mean of both diagonal midpoints.
    pub fn center(&self) -> Point {
        let d1 = Point::midpoint(&self.top_left, &self.bot_right);
        let d2 = Point::midpoint(&self.top_right, &self.bot_left);
        Point::midpoint(&d1, &d2)
    }

    pub fn left_height(&self) -> f64 {
        self.top_left.distance(&self.bot_left)
    }

    pub fn right_height(&self) -> f64 {
        self.top_right.distance(&self.bot_right)
    }

    pub fn top_width(&self) -> f64 {
        (self.top_left.x - self.top_right.x).abs()
    }

    pub fn bot_width(&self) -> f64 {
        (self.bot_left.x - self.bot_right.x).abs()
    }

    /// Width/height ratio of the banner, `top_width / left_height`.
    ///
    /// Returns infinity for a zero left height; the stabilizer's ratio-drift
    /// check treats that as maximal drift.
    pub fn aspect_ratio(&self) -> f64 {
        let h = self.left_height();
        if h < EPSILON {
            return f64::INFINITY;
        }
        self.top_width() / h
    }

    /// Angle at `top_left` between the vectors to `top_right` and `bot_left`,
    /// in degrees. Close to 90 for an upright rectangle and in [0, 180] for
    /// any non-degenerate quad.
    pub fn corner_angle(&self) -> f64 {
        angle_between(&self.top_left, &self.top_right, &self.bot_left)
    }

    /// True when both right-side corners sit strictly inside the frame's
    /// right edge (exclusive of the last column).
    pub fn right_side_in_frame(&self, frame_width: u32) -> bool {
        let edge = frame_width as f64 - 1.0;
        self.top_right.x.round() < edge && self.bot_right.x.round() < edge
    }

    /// True when both left-side corners sit strictly inside the frame's
    /// left edge.
    pub fn left_side_in_frame(&self) -> bool {
        self.top_left.x.round() > 0.0 && self.bot_left.x.round() > 0.0
    }
}
