//! Perspective warping of the logo into the banner quad.

use image::{Rgb, RgbImage};
use nalgebra::{Matrix3, SMatrix, SVector};

use crate::error::{BannerError, Result};
use crate::geometry::Point;

/// Estimate the 3x3 perspective transform mapping each `src[i]` to `dst[i]`.
///
/// Solves the standard 8-unknown linear system with `h33 = 1`. Fails on
/// degenerate correspondences (three collinear points on either side).
pub fn perspective_transform(src: &[Point; 4], dst: &[Point; 4]) -> Result<Matrix3<f64>> {
    let mut a = SMatrix::<f64, 8, 8>::zeros();
    let mut b = SVector::<f64, 8>::zeros();

    for i in 0..4 {
        let (x, y) = (src[i].x, src[i].y);
        let (u, v) = (dst[i].x, dst[i].y);

        a[(2 * i, 0)] = x;
        a[(2 * i, 1)] = y;
        a[(2 * i, 2)] = 1.0;
        a[(2 * i, 6)] = -x * u;
        a[(2 * i, 7)] = -y * u;
        b[2 * i] = u;

        a[(2 * i + 1, 3)] = x;
        a[(2 * i + 1, 4)] = y;
        a[(2 * i + 1, 5)] = 1.0;
        a[(2 * i + 1, 6)] = -x * v;
        a[(2 * i + 1, 7)] = -y * v;
        b[2 * i + 1] = v;
    }

    let h = a.lu().solve(&b).ok_or_else(|| {
        BannerError::DegenerateGeometry("singular perspective correspondence".into())
    })?;

    Ok(Matrix3::new(
        h[0], h[1], h[2], h[3], h[4], h[5], h[6], h[7], 1.0,
    ))
}

/// Warp `src` through `transform` into an output image of `out_width` x
/// `out_height`, by inverse mapping with bilinear sampling. Out-of-bounds
/// source coordinates replicate the nearest border pixel.
pub fn warp_image(
    src: &RgbImage,
    transform: &Matrix3<f64>,
    out_width: u32,
    out_height: u32,
) -> Result<RgbImage> {
    let inverse = transform.try_inverse().ok_or_else(|| {
        BannerError::DegenerateGeometry("non-invertible perspective transform".into())
    })?;

    let mut out = RgbImage::new(out_width, out_height);
    for y in 0..out_height {
        for x in 0..out_width {
            let p = inverse * nalgebra::Vector3::new(x as f64, y as f64, 1.0);
            if p[2].abs() < 1e-12 {
                continue;
            }
            let sx = p[0] / p[2];
            let sy = p[1] / p[2];
            out.put_pixel(x, y, Rgb(bilinear_sample(src, sx, sy)));
        }
    }
    Ok(out)
}

/// Bilinear sample with border replication.
fn bilinear_sample(img: &RgbImage, x: f64, y: f64) -> [u8; 3] {
    let (w, h) = img.dimensions();
    let max_x = (w - 1) as f64;
    let max_y = (h - 1) as f64;
    let x = x.clamp(0.0, max_x);
    let y = y.clamp(0.0, max_y);

    let x0 = x.floor() as u32;
    let y0 = y.floor() as u32;
    let x1 = (x0 + 1).min(w - 1);
    let y1 = (y0 + 1).min(h - 1);
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = img.get_pixel(x0, y0).0;
    let p10 = img.get_pixel(x1, y0).0;
    let p01 = img.get_pixel(x0, y1).0;
    let p11 = img.get_pixel(x1, y1).0;

    let mut result = [0u8; 3];
    for c in 0..3 {
        let top = p00[c] as f64 * (1.0 - fx) + p10[c] as f64 * fx;
        let bottom = p01[c] as f64 * (1.0 - fx) + p11[c] as f64 * fx;
        result[c] = (top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0) as u8;
    }
    result
}
