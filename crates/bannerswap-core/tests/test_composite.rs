#[allow(dead_code)]
mod common;

use approx::assert_relative_eq;
use image::{Rgb, RgbImage};

use bannerswap_core::composite::color::{
    hsv_to_rgb, match_saturation, mean_saturation, rgb_to_hsv,
};
use bannerswap_core::composite::warp::{perspective_transform, warp_image};
use bannerswap_core::composite::insert_logo;
use bannerswap_core::geometry::Point;
use common::{flat_quad, rect_binary_mask};
use ndarray::Array2;

// ---------------------------------------------------------------------------
// Color conversion and saturation matching
// ---------------------------------------------------------------------------

#[test]
fn test_rgb_hsv_pure_red() {
    let (h, s, v) = rgb_to_hsv([255, 0, 0]);
    assert_relative_eq!(h, 0.0, epsilon = 1e-9);
    assert_relative_eq!(s, 1.0, epsilon = 1e-9);
    assert_relative_eq!(v, 1.0, epsilon = 1e-9);
}

#[test]
fn test_rgb_hsv_gray_has_zero_saturation() {
    let (_, s, v) = rgb_to_hsv([128, 128, 128]);
    assert_relative_eq!(s, 0.0, epsilon = 1e-9);
    assert!((v - 128.0 / 255.0).abs() < 1e-9);
}

#[test]
fn test_hsv_round_trip() {
    for rgb in [[200, 30, 60], [0, 177, 64], [12, 250, 180]] {
        let (h, s, v) = rgb_to_hsv(rgb);
        let back = hsv_to_rgb(h, s, v);
        for c in 0..3 {
            assert!(
                (rgb[c] as i32 - back[c] as i32).abs() <= 1,
                "{rgb:?} -> {back:?}"
            );
        }
    }
}

#[test]
fn test_match_saturation_desaturates_toward_gray_banner() {
    let logo = RgbImage::from_pixel(20, 10, Rgb([255, 0, 0]));
    let frame = RgbImage::from_pixel(100, 60, Rgb([90, 90, 90]));
    let quad = flat_quad(10.0, 10.0, 40.0, 20.0);

    let adjusted = match_saturation(&logo, &frame, &quad);
    // Gray banner drives the coefficient to zero.
    assert!(mean_saturation(&adjusted) < 0.01);
}

#[test]
fn test_match_saturation_grayscale_logo_unchanged() {
    let logo = RgbImage::from_pixel(20, 10, Rgb([128, 128, 128]));
    let frame = RgbImage::from_pixel(100, 60, Rgb([0, 200, 0]));
    let quad = flat_quad(10.0, 10.0, 40.0, 20.0);

    let adjusted = match_saturation(&logo, &frame, &quad);
    assert_eq!(adjusted, logo);
}

#[test]
fn test_match_saturation_empty_region_unchanged() {
    let logo = RgbImage::from_pixel(20, 10, Rgb([255, 0, 0]));
    let frame = RgbImage::from_pixel(100, 60, Rgb([0, 200, 0]));
    // Quad entirely outside the frame.
    let quad = flat_quad(500.0, 500.0, 40.0, 20.0);

    let adjusted = match_saturation(&logo, &frame, &quad);
    assert_eq!(adjusted, logo);
}

// ---------------------------------------------------------------------------
// Perspective transform and warping
// ---------------------------------------------------------------------------

#[test]
fn test_perspective_identity() {
    let corners = [
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(0.0, 5.0),
        Point::new(10.0, 5.0),
    ];
    let h = perspective_transform(&corners, &corners).unwrap();

    let p = h * nalgebra::Vector3::new(3.0, 4.0, 1.0);
    assert_relative_eq!(p[0] / p[2], 3.0, epsilon = 1e-9);
    assert_relative_eq!(p[1] / p[2], 4.0, epsilon = 1e-9);
}

#[test]
fn test_perspective_maps_corners() {
    let src = [
        Point::new(0.0, 0.0),
        Point::new(19.0, 0.0),
        Point::new(0.0, 9.0),
        Point::new(19.0, 9.0),
    ];
    let dst = [
        Point::new(30.0, 12.0),
        Point::new(95.0, 15.0),
        Point::new(31.0, 24.0),
        Point::new(96.0, 28.0),
    ];
    let h = perspective_transform(&src, &dst).unwrap();

    for i in 0..4 {
        let p = h * nalgebra::Vector3::new(src[i].x, src[i].y, 1.0);
        assert_relative_eq!(p[0] / p[2], dst[i].x, epsilon = 1e-6);
        assert_relative_eq!(p[1] / p[2], dst[i].y, epsilon = 1e-6);
    }
}

#[test]
fn test_perspective_collinear_points_error() {
    let src = [
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(2.0, 0.0),
        Point::new(3.0, 0.0),
    ];
    let dst = [
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(0.0, 5.0),
        Point::new(10.0, 5.0),
    ];
    assert!(perspective_transform(&src, &dst).is_err());
}

#[test]
fn test_warp_solid_color_fills_target() {
    let logo = RgbImage::from_pixel(20, 10, Rgb([0, 0, 255]));
    let src = [
        Point::new(0.0, 0.0),
        Point::new(19.0, 0.0),
        Point::new(0.0, 9.0),
        Point::new(19.0, 9.0),
    ];
    let dst = [
        Point::new(30.0, 12.0),
        Point::new(95.0, 12.0),
        Point::new(30.0, 24.0),
        Point::new(95.0, 24.0),
    ];
    let h = perspective_transform(&src, &dst).unwrap();
    let warped = warp_image(&logo, &h, 120, 40).unwrap();

    assert_eq!(*warped.get_pixel(60, 18), Rgb([0, 0, 255]));
    assert_eq!(*warped.get_pixel(32, 14), Rgb([0, 0, 255]));
}

// ---------------------------------------------------------------------------
// insert_logo
// ---------------------------------------------------------------------------

#[test]
fn test_insert_logo_overwrites_masked_pixels_only() {
    // Saturated green banner and saturated blue logo keep the saturation
    // coefficient at 1.0, so masked pixels come out pure blue.
    let mut frame = RgbImage::from_pixel(200, 100, Rgb([30, 30, 30]));
    for y in 20..30 {
        for x in 10..76 {
            frame.put_pixel(x, y, Rgb([0, 255, 0]));
        }
    }
    let mask = rect_binary_mask(100, 200, (10, 76), (20, 30));
    let quad = flat_quad(10.0, 20.0, 65.0, 9.0);
    let logo = RgbImage::from_pixel(66, 10, Rgb([0, 0, 255]));

    let new_width = insert_logo(&mut frame, &mask, &quad, &logo, None).unwrap();

    assert_eq!(new_width, Some(65.0));
    assert_eq!(*frame.get_pixel(40, 25), Rgb([0, 0, 255]));
    // Outside the mask nothing changes.
    assert_eq!(*frame.get_pixel(5, 25), Rgb([30, 30, 30]));
    assert_eq!(*frame.get_pixel(40, 50), Rgb([30, 30, 30]));
}

#[test]
fn test_insert_logo_in_frame_updates_sticky_width() {
    let mut frame = RgbImage::from_pixel(200, 100, Rgb([30, 30, 30]));
    let mask = Array2::<u8>::zeros((100, 200));
    let quad = flat_quad(10.0, 20.0, 65.0, 9.0);
    let logo = RgbImage::from_pixel(66, 10, Rgb([0, 0, 255]));

    let new_width = insert_logo(&mut frame, &mask, &quad, &logo, Some(80.0)).unwrap();
    assert_eq!(new_width, Some(65.0));
}

#[test]
fn test_insert_logo_right_truncation_keeps_sticky_width() {
    let mut frame = RgbImage::from_pixel(200, 100, Rgb([30, 30, 30]));
    let mask = Array2::<u8>::zeros((100, 200));
    // Right edge on the frame border: truncated.
    let quad = flat_quad(150.0, 20.0, 49.0, 9.0);
    let logo = RgbImage::from_pixel(66, 10, Rgb([0, 0, 255]));

    let new_width = insert_logo(&mut frame, &mask, &quad, &logo, Some(80.0)).unwrap();
    assert_eq!(new_width, Some(80.0));
}

#[test]
fn test_insert_logo_truncation_without_history() {
    let mut frame = RgbImage::from_pixel(200, 100, Rgb([30, 30, 30]));
    let mask = Array2::<u8>::zeros((100, 200));
    let quad = flat_quad(150.0, 20.0, 49.0, 9.0);
    let logo = RgbImage::from_pixel(66, 10, Rgb([0, 0, 255]));

    let new_width = insert_logo(&mut frame, &mask, &quad, &logo, None).unwrap();
    assert_eq!(new_width, None);
}

#[test]
fn test_insert_logo_left_truncation_keeps_sticky_width() {
    let mut frame = RgbImage::from_pixel(200, 100, Rgb([30, 30, 30]));
    let mask = Array2::<u8>::zeros((100, 200));
    // Left edge at x = 0: truncated on the left.
    let quad = flat_quad(0.0, 20.0, 49.0, 9.0);
    let logo = RgbImage::from_pixel(66, 10, Rgb([0, 0, 255]));

    let new_width = insert_logo(&mut frame, &mask, &quad, &logo, Some(80.0)).unwrap();
    assert_eq!(new_width, Some(80.0));
}
