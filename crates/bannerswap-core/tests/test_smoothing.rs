use approx::assert_relative_eq;

use bannerswap_core::error::BannerError;
use bannerswap_core::smoothing::{savgol_filter, smooth_series};

// ---------------------------------------------------------------------------
// savgol_filter
// ---------------------------------------------------------------------------

#[test]
fn test_savgol_reproduces_cubic_exactly() {
    // A degree-3 filter leaves any cubic untouched, edges included.
    let series: Vec<f64> = (0..20)
        .map(|i| {
            let x = i as f64;
            0.5 * x * x * x - 2.0 * x * x + 3.0 * x - 7.0
        })
        .collect();

    let out = savgol_filter(&series, 7, 3).unwrap();
    for (a, b) in out.iter().zip(&series) {
        assert_relative_eq!(a, b, epsilon = 1e-6);
    }
}

#[test]
fn test_savgol_preserves_length() {
    let series = vec![1.0, 4.0, 2.0, 8.0, 5.0, 7.0, 3.0, 9.0, 6.0];
    let out = savgol_filter(&series, 5, 2).unwrap();
    assert_eq!(out.len(), series.len());
}

#[test]
fn test_savgol_reduces_noise_on_line() {
    let series: Vec<f64> = (0..30)
        .map(|i| i as f64 + if i % 2 == 0 { 0.5 } else { -0.5 })
        .collect();

    let out = savgol_filter(&series, 7, 2).unwrap();
    // Interior points should sit closer to the underlying line than the
    // raw samples do.
    for i in 5..25 {
        let raw_err = (series[i] - i as f64).abs();
        let smooth_err = (out[i] - i as f64).abs();
        assert!(smooth_err < raw_err, "index {i}: {smooth_err} >= {raw_err}");
    }
}

#[test]
fn test_savgol_rejects_even_window() {
    let series = vec![0.0; 10];
    assert!(matches!(
        savgol_filter(&series, 6, 2),
        Err(BannerError::InvalidSmoothingParams { .. })
    ));
}

#[test]
fn test_savgol_rejects_window_not_above_degree() {
    let series = vec![0.0; 10];
    assert!(matches!(
        savgol_filter(&series, 3, 3),
        Err(BannerError::InvalidSmoothingParams { .. })
    ));
}

#[test]
fn test_savgol_rejects_window_longer_than_series() {
    let series = vec![0.0; 5];
    assert!(matches!(
        savgol_filter(&series, 7, 2),
        Err(BannerError::InvalidSmoothingParams { .. })
    ));
}

// ---------------------------------------------------------------------------
// smooth_series (adaptive window sweep)
// ---------------------------------------------------------------------------

#[test]
fn test_smooth_series_constant_input_unchanged() {
    let series = vec![42.0; 25];
    let out = smooth_series(&series, 5, 31, 3, 5.0).unwrap();
    for v in out {
        assert_relative_eq!(v, 42.0, epsilon = 1e-6);
    }
}

#[test]
fn test_smooth_series_keeps_deviation_bounded() {
    let series: Vec<f64> = (0..40)
        .map(|i| 100.0 + (i as f64 * 0.7).sin() * 2.0)
        .collect();

    let out = smooth_series(&series, 5, 31, 3, 5.0).unwrap();
    for (s, r) in out.iter().zip(&series) {
        assert!((s - r).abs() < 5.0);
    }
}

#[test]
fn test_smooth_series_too_short() {
    let series = vec![1.0, 2.0, 3.0];
    assert!(matches!(
        smooth_series(&series, 5, 31, 3, 5.0),
        Err(BannerError::SeriesTooShort { len: 3, .. })
    ));
}

#[test]
fn test_smooth_series_no_acceptable_window() {
    // A hard step deviates past any tiny tolerance for every window.
    let mut series = vec![0.0; 10];
    series.extend(vec![1000.0; 10]);
    assert!(matches!(
        smooth_series(&series, 5, 31, 3, 1e-6),
        Err(BannerError::DegenerateSmoothing { .. })
    ));
}

#[test]
fn test_smooth_series_rejects_even_min_window() {
    let series = vec![0.0; 20];
    assert!(matches!(
        smooth_series(&series, 4, 31, 3, 5.0),
        Err(BannerError::InvalidSmoothingParams { .. })
    ));
}
