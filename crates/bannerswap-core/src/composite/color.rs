//! Saturation matching between the logo and the banner it replaces.
//!
//! A logo pasted at its authored colors looks flat or garish next to the
//! broadcast footage around it. Scaling the logo's saturation by the ratio of
//! mean saturations brings it into the scene's color mood without touching
//! hue or brightness.

use image::{Rgb, RgbImage};

use crate::consts::EPSILON;
use crate::geometry::Quad;

/// RGB (0..=255) to HSV: hue in degrees [0, 360), saturation and value in
/// [0, 1].
pub fn rgb_to_hsv(rgb: [u8; 3]) -> (f64, f64, f64) {
    let r = rgb[0] as f64 / 255.0;
    let g = rgb[1] as f64 / 255.0;
    let b = rgb[2] as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta < EPSILON {
        0.0
    } else if max == r {
        60.0 * (((g - b) / delta).rem_euclid(6.0))
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };

    let s = if max < EPSILON { 0.0 } else { delta / max };
    (h, s, max)
}

/// HSV back to RGB (0..=255).
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> [u8; 3] {
    let c = v * s;
    let hp = (h.rem_euclid(360.0)) / 60.0;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());

    let (r1, g1, b1) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let m = v - c;
    [
        ((r1 + m) * 255.0).round().clamp(0.0, 255.0) as u8,
        ((g1 + m) * 255.0).round().clamp(0.0, 255.0) as u8,
        ((b1 + m) * 255.0).round().clamp(0.0, 255.0) as u8,
    ]
}

/// Mean HSV saturation over a whole image.
pub fn mean_saturation(img: &RgbImage) -> f64 {
    let n = (img.width() as u64 * img.height() as u64).max(1);
    let sum: f64 = img.pixels().map(|p| rgb_to_hsv(p.0).1).sum();
    sum / n as f64
}

/// Mean HSV saturation over the axis-aligned region spanned by the quad's
/// top-left and bottom-right corners, clamped to the frame. Returns `None`
/// when the region is empty.
pub fn mean_region_saturation(frame: &RgbImage, quad: &Quad) -> Option<f64> {
    let (w, h) = frame.dimensions();
    let x0 = (quad.top_left.x.max(0.0) as u32).min(w);
    let y0 = (quad.top_left.y.max(0.0) as u32).min(h);
    let x1 = (quad.bot_right.x.max(0.0) as u32).min(w);
    let y1 = (quad.bot_right.y.max(0.0) as u32).min(h);
    if x1 <= x0 || y1 <= y0 {
        return None;
    }

    let mut sum = 0.0;
    let mut count = 0u64;
    for y in y0..y1 {
        for x in x0..x1 {
            sum += rgb_to_hsv(frame.get_pixel(x, y).0).1;
            count += 1;
        }
    }
    Some(sum / count as f64)
}

/// Scale the logo's saturation towards the banner region's saturation.
///
/// The coefficient is `mean(banner_s) / mean(logo_s)` rounded to two
/// decimals. A zero-saturation logo (grayscale) or an empty banner region
/// skips the adjustment and returns the logo unchanged.
pub fn match_saturation(logo: &RgbImage, frame: &RgbImage, quad: &Quad) -> RgbImage {
    let mean_logo = mean_saturation(logo);
    let Some(mean_banner) = mean_region_saturation(frame, quad) else {
        return logo.clone();
    };
    if mean_logo < EPSILON {
        return logo.clone();
    }

    let coef = (mean_banner / mean_logo * 100.0).round() / 100.0;

    let mut adjusted = logo.clone();
    for pixel in adjusted.pixels_mut() {
        let (h, s, v) = rgb_to_hsv(pixel.0);
        *pixel = Rgb(hsv_to_rgb(h, (s * coef).min(1.0), v));
    }
    adjusted
}
