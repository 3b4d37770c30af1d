use image::{Rgb, RgbImage};
use ndarray::Array2;

use bannerswap_core::geometry::{Point, Quad};

/// Axis-aligned quad with its top-left corner at `(x, y)`.
pub fn flat_quad(x: f64, y: f64, width: f64, height: f64) -> Quad {
    Quad {
        top_left: Point::new(x, y),
        top_right: Point::new(x + width, y),
        bot_left: Point::new(x, y + height),
        bot_right: Point::new(x + width, y + height),
    }
}

/// Solid-color frame with a solid banner rectangle painted over it.
///
/// The banner covers columns `x0..x1` and rows `y0..y1` (exclusive ends).
pub fn banner_frame(
    width: u32,
    height: u32,
    background: [u8; 3],
    banner: [u8; 3],
    (x0, x1): (u32, u32),
    (y0, y1): (u32, u32),
) -> RgbImage {
    let mut img = RgbImage::from_pixel(width, height, Rgb(background));
    for y in y0..y1 {
        for x in x0..x1 {
            img.put_pixel(x, y, Rgb(banner));
        }
    }
    img
}

/// Probability mask with a rectangle of 1.0 over a zero background.
pub fn rect_mask(
    height: usize,
    width: usize,
    (x0, x1): (usize, usize),
    (y0, y1): (usize, usize),
) -> Array2<f32> {
    let mut mask = Array2::<f32>::zeros((height, width));
    for y in y0..y1 {
        for x in x0..x1 {
            mask[[y, x]] = 1.0;
        }
    }
    mask
}

/// Binary insertion mask of 1s over the same rectangle layout.
pub fn rect_binary_mask(
    height: usize,
    width: usize,
    (x0, x1): (usize, usize),
    (y0, y1): (usize, usize),
) -> Array2<u8> {
    let mut mask = Array2::<u8>::zeros((height, width));
    for y in y0..y1 {
        for x in x0..x1 {
            mask[[y, x]] = 1;
        }
    }
    mask
}
