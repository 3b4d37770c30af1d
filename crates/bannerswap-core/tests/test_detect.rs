#[allow(dead_code)]
mod common;

use bannerswap_core::detect::{
    detect_banner, ChromaBandPredictor, ComponentExtractor, DetectionConfig, MaskPredictor,
};
use common::{banner_frame, rect_mask};
use ndarray::Array2;

fn config() -> DetectionConfig {
    DetectionConfig {
        value_threshold: 0.5,
        filter_area_size: 100.0,
    }
}

// ---------------------------------------------------------------------------
// detect_banner
// ---------------------------------------------------------------------------

#[test]
fn test_detect_single_rectangle() {
    // 66x10 block, area 660, well above the filter.
    let mask = rect_mask(60, 120, (5, 71), (10, 20));
    let detection = detect_banner(&mask, &config(), &ComponentExtractor).unwrap();

    let q = &detection.quad;
    assert!((q.top_left.x - 5.0).abs() < 1.5, "top_left.x = {}", q.top_left.x);
    assert!((q.top_left.y - 10.0).abs() < 1.5);
    assert!((q.top_right.x - 70.0).abs() < 1.5);
    assert!((q.bot_left.y - 19.0).abs() < 1.5);
    assert!(q.top_left.y < q.bot_left.y);
    assert!(q.top_left.x < q.top_right.x);
}

#[test]
fn test_detect_fills_mask_for_surviving_region() {
    let mask = rect_mask(60, 120, (5, 71), (10, 20));
    let detection = detect_banner(&mask, &config(), &ComponentExtractor).unwrap();

    assert_eq!(detection.mask.dim(), (60, 120));
    assert_eq!(detection.mask[[15, 30]], 1);
    assert_eq!(detection.mask[[5, 30]], 0);
}

#[test]
fn test_detect_empty_mask_returns_none() {
    let mask = Array2::<f32>::zeros((60, 120));
    assert!(detect_banner(&mask, &config(), &ComponentExtractor).is_none());
}

#[test]
fn test_detect_filters_small_regions() {
    // 8x8 block, area 64, at or below the 100 px filter.
    let mask = rect_mask(60, 120, (5, 13), (10, 18));
    assert!(detect_banner(&mask, &config(), &ComponentExtractor).is_none());
}

#[test]
fn test_detect_keeps_large_region_drops_small() {
    // Areas 500 and 50 against the 100 px filter: the small region must not
    // stretch the quad or leak into the mask.
    let mut mask = rect_mask(60, 120, (10, 35), (10, 30));
    for y in 10..15 {
        for x in 60..70 {
            mask[[y, x]] = 1.0;
        }
    }

    let detection = detect_banner(&mask, &config(), &ComponentExtractor).unwrap();
    let q = &detection.quad;
    assert!((q.top_left.x - 10.0).abs() < 1.5, "top_left.x = {}", q.top_left.x);
    assert!(
        (q.top_right.x - 34.0).abs() < 1.5,
        "top_right.x = {}",
        q.top_right.x
    );
    assert!((q.bot_right.y - 29.0).abs() < 1.5);
    assert_eq!(detection.mask[[12, 65]], 0);
    assert_eq!(detection.mask[[15, 20]], 1);
}

#[test]
fn test_detect_threshold_is_strict() {
    let mut mask = Array2::<f32>::zeros((60, 120));
    // Exactly at the threshold: not above, so not banner.
    for y in 10..20 {
        for x in 5..71 {
            mask[[y, x]] = 0.5;
        }
    }
    assert!(detect_banner(&mask, &config(), &ComponentExtractor).is_none());
}

#[test]
fn test_detect_reconciles_split_banner() {
    // The banner fragments into two components; the combined quad must span
    // from the left fragment's left edge to the right fragment's right edge.
    let mut mask = rect_mask(60, 200, (5, 60), (10, 22));
    for y in 10..22 {
        for x in 120..180 {
            mask[[y, x]] = 1.0;
        }
    }

    let detection = detect_banner(&mask, &config(), &ComponentExtractor).unwrap();
    let q = &detection.quad;
    assert!((q.top_left.x - 5.0).abs() < 1.5, "top_left.x = {}", q.top_left.x);
    assert!(
        (q.top_right.x - 179.0).abs() < 1.5,
        "top_right.x = {}",
        q.top_right.x
    );
}

// ---------------------------------------------------------------------------
// ChromaBandPredictor
// ---------------------------------------------------------------------------

#[test]
fn test_chroma_predictor_scores_banner_high() {
    let frame = banner_frame(120, 60, [40, 40, 40], [0, 177, 64], (5, 71), (10, 20));
    let predictor = ChromaBandPredictor::new([0, 177, 64], 60.0);
    let prob = predictor.predict(&frame).unwrap();

    assert_eq!(prob.dim(), (60, 120));
    assert!(prob[[15, 30]] > 0.9);
    assert!(prob[[5, 30]] < 0.1);
}

#[test]
fn test_chroma_predictor_end_to_end_detection() {
    let frame = banner_frame(120, 60, [40, 40, 40], [0, 177, 64], (5, 71), (10, 20));
    let predictor = ChromaBandPredictor::new([0, 177, 64], 60.0);
    let prob = predictor.predict(&frame).unwrap();

    let detection = detect_banner(&prob, &config(), &ComponentExtractor).unwrap();
    assert!((detection.quad.top_left.x - 5.0).abs() < 1.5);
    assert!((detection.quad.bot_right.y - 19.0).abs() < 1.5);
}
