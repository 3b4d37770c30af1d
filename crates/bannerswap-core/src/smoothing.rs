//! Savitzky-Golay smoothing with an adaptive window sweep.
//!
//! The corner stabilizer smooths each y-coordinate series with the largest
//! window that keeps the smoothed series within a maximum pointwise deviation
//! of the raw series: heavy smoothing where the detector jitters, but never so
//! heavy that the banner visibly detaches from the video.

use nalgebra::{DMatrix, DVector};

use crate::error::{BannerError, Result};

/// Least-squares polynomial fit helper: returns `(A^T A)^-1 A^T` for the
/// Vandermonde matrix of `xs` up to `degree`.
fn vandermonde_pinv(xs: &[f64], degree: usize) -> Result<DMatrix<f64>> {
    let rows = xs.len();
    let cols = degree + 1;
    let a = DMatrix::from_fn(rows, cols, |i, j| xs[i].powi(j as i32));
    let ata = a.transpose() * &a;
    let inv = ata.try_inverse().ok_or_else(|| {
        BannerError::DegenerateGeometry("singular normal equations in polynomial fit".into())
    })?;
    Ok(inv * a.transpose())
}

/// Apply a Savitzky-Golay filter of the given odd `window` and polynomial
/// `degree` to `series`.
///
/// Interior samples are smoothed by convolution with the central fit weights;
/// the first and last half-windows are filled by evaluating a polynomial
/// fitted to the first/last `window` samples, so the output always has the
/// same length as the input.
pub fn savgol_filter(series: &[f64], window: usize, degree: usize) -> Result<Vec<f64>> {
    let n = series.len();
    if window % 2 == 0 || window <= degree || window > n {
        return Err(BannerError::InvalidSmoothingParams { window, degree });
    }

    let half = window / 2;

    // Central convolution weights: value of the local fit at x = 0.
    let xs: Vec<f64> = (0..window).map(|i| i as f64 - half as f64).collect();
    let pinv = vandermonde_pinv(&xs, degree)?;
    let weights: Vec<f64> = (0..window).map(|i| pinv[(0, i)]).collect();

    let mut out = vec![0.0; n];
    for i in half..n - half {
        let mut acc = 0.0;
        for (k, w) in weights.iter().enumerate() {
            acc += w * series[i - half + k];
        }
        out[i] = acc;
    }

    // Edge handling: fit one polynomial to each end window and evaluate it at
    // the positions the convolution could not cover.
    let edge_xs: Vec<f64> = (0..window).map(|i| i as f64).collect();
    let edge_pinv = vandermonde_pinv(&edge_xs, degree)?;

    let head = DVector::from_iterator(window, series[..window].iter().copied());
    let head_coeffs = &edge_pinv * head;
    for (i, slot) in out.iter_mut().take(half).enumerate() {
        *slot = eval_poly(head_coeffs.as_slice(), i as f64);
    }

    let tail = DVector::from_iterator(window, series[n - window..].iter().copied());
    let tail_coeffs = &edge_pinv * tail;
    for i in n - half..n {
        out[i] = eval_poly(tail_coeffs.as_slice(), (i - (n - window)) as f64);
    }

    Ok(out)
}

fn eval_poly(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}

/// Smooth `series` with the largest acceptable Savitzky-Golay window.
///
/// Odd windows from `min_window` (inclusive) to `max_window` (exclusive) are
/// tried in increasing order; a candidate is accepted whenever its maximum
/// pointwise deviation from the raw series stays below `max_deviation`, and a
/// later passing window unconditionally replaces an earlier one. Windows
/// larger than the series are skipped, so a short series clamps the sweep.
///
/// Errors with [`BannerError::DegenerateSmoothing`] when no window passes;
/// callers must treat that as "no smoothing available" rather than use a
/// partially smoothed series.
pub fn smooth_series(
    series: &[f64],
    min_window: usize,
    max_window: usize,
    degree: usize,
    max_deviation: f64,
) -> Result<Vec<f64>> {
    if min_window <= degree || min_window % 2 == 0 {
        return Err(BannerError::InvalidSmoothingParams {
            window: min_window,
            degree,
        });
    }
    if series.len() < min_window {
        return Err(BannerError::SeriesTooShort {
            len: series.len(),
            min_window,
        });
    }

    let mut best: Option<Vec<f64>> = None;

    for window in min_window..max_window {
        if window % 2 == 0 || window > series.len() {
            continue;
        }
        let candidate = savgol_filter(series, window, degree)?;
        let deviation = candidate
            .iter()
            .zip(series)
            .map(|(s, r)| (s - r).abs())
            .fold(0.0_f64, f64::max);
        if deviation < max_deviation {
            best = Some(candidate);
        }
    }

    best.ok_or(BannerError::DegenerateSmoothing {
        min_window,
        max_window,
        max_deviation,
    })
}
