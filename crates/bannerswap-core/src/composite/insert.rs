//! Logo insertion with frame-boundary truncation handling.

use image::RgbImage;
use ndarray::Array2;
use tracing::debug;

use crate::consts::EPSILON;
use crate::error::Result;
use crate::geometry::{Point, Quad};

use super::color::match_saturation;
use super::warp::{perspective_transform, warp_image};

/// Where the logo's corners must land, together with the sticky width to
/// carry into the next frame.
struct TargetPlacement {
    dst: [Point; 4],
    new_old_width: Option<f64>,
}

/// Resolve the three boundary regimes.
///
/// When the banner runs off the right edge, the detector only sees the
/// truncated part, so the off-frame corner x is extrapolated from the last
/// known full width and the y coordinates are stretched by the ratio of full
/// to observed width. The left edge mirrors this without the y correction.
/// Only a fully in-frame quad refreshes the sticky width.
fn resolve_placement(quad: &Quad, frame_width: u32, old_width: Option<f64>) -> TargetPlacement {
    let observed_width = (quad.top_right.x - quad.top_left.x).abs();

    if !quad.right_side_in_frame(frame_width) {
        if let Some(full_width) = old_width {
            if observed_width > EPSILON {
                let y_coef = full_width / observed_width;
                let transform_x = quad.top_left.x + full_width;
                let skew = (quad.top_right.y - quad.top_left.y).abs() * y_coef;
                let y_top = quad.top_left.y + skew;
                let y_bot = quad.bot_left.y + skew;
                return TargetPlacement {
                    dst: [
                        quad.top_left,
                        Point::new(transform_x, y_top),
                        quad.bot_left,
                        Point::new(transform_x, y_bot),
                    ],
                    new_old_width: old_width,
                };
            }
        }
        debug!("right-edge truncation without a known full width; using observed corners");
        return TargetPlacement {
            dst: [quad.top_left, quad.top_right, quad.bot_left, quad.bot_right],
            new_old_width: old_width,
        };
    }

    if !quad.left_side_in_frame() {
        if let Some(full_width) = old_width {
            let transform_x = quad.top_right.x - full_width;
            return TargetPlacement {
                dst: [
                    Point::new(transform_x, quad.top_left.y),
                    quad.top_right,
                    Point::new(transform_x, quad.bot_left.y),
                    quad.bot_right,
                ],
                new_old_width: old_width,
            };
        }
        debug!("left-edge truncation without a known full width; using observed corners");
        return TargetPlacement {
            dst: [quad.top_left, quad.top_right, quad.bot_left, quad.bot_right],
            new_old_width: old_width,
        };
    }

    // Fully in frame: remember the real banner width for later truncations.
    TargetPlacement {
        dst: [quad.top_left, quad.top_right, quad.bot_left, quad.bot_right],
        new_old_width: Some(observed_width),
    }
}

/// Composite `logo` into `frame` over the detected banner.
///
/// The logo is saturation-matched to the banner region, perspective-warped
/// onto the quad (with boundary extrapolation per [`resolve_placement`]) and
/// then written over every pixel where `mask` is 1. Returns the updated
/// sticky width.
pub fn insert_logo(
    frame: &mut RgbImage,
    mask: &Array2<u8>,
    quad: &Quad,
    logo: &RgbImage,
    old_width: Option<f64>,
) -> Result<Option<f64>> {
    let (frame_w, frame_h) = frame.dimensions();
    let (logo_w, logo_h) = logo.dimensions();

    let adjusted = match_saturation(logo, frame, quad);

    let placement = resolve_placement(quad, frame_w, old_width);

    let src = [
        Point::new(0.0, 0.0),
        Point::new(logo_w as f64 - 1.0, 0.0),
        Point::new(0.0, logo_h as f64 - 1.0),
        Point::new(logo_w as f64 - 1.0, logo_h as f64 - 1.0),
    ];
    let transform = perspective_transform(&src, &placement.dst)?;
    let warped = warp_image(&adjusted, &transform, frame_w, frame_h)?;

    let (mask_h, mask_w) = mask.dim();
    for y in 0..frame_h.min(mask_h as u32) {
        for x in 0..frame_w.min(mask_w as u32) {
            if mask[[y as usize, x as usize]] == 1 {
                frame.put_pixel(x, y, *warped.get_pixel(x, y));
            }
        }
    }

    Ok(placement.new_old_width)
}
