//! Curvature proxy used to score sample importance.

use std::ops::Range;

/// Absolute discrete second difference `|y[i-1] - 2y[i] + y[i+1]|`.
///
/// Output has the same length as `y`; both ends are zero. Curves shorter
/// than three samples yield all zeros. Non-finite differences count as zero.
pub fn abs_second_difference(y: &[f64]) -> Vec<f64> {
    let mut out = vec![0.0; y.len()];
    if y.len() < 3 {
        return out;
    }
    for i in 1..y.len() - 1 {
        out[i] = second_difference_at(y, i);
    }
    out
}

#[inline]
pub(crate) fn second_difference_at(y: &[f64], i: usize) -> f64 {
    let d = (y[i - 1] - 2.0 * y[i] + y[i + 1]).abs();
    if d.is_finite() {
        d
    } else {
        0.0
    }
}

/// Mark window positions whose max-normalized curvature exceeds `threshold`.
///
/// `interior` holds the curvature of window positions `1..len-1`; `mask` is
/// indexed by window position. A flat interior marks nothing.
pub(crate) fn mark_above_threshold(interior: &[f64], threshold: f64, mask: &mut [bool]) {
    let max = interior.iter().copied().fold(0.0f64, f64::max);
    if max <= 0.0 || !max.is_finite() {
        return;
    }
    for (j, &c) in interior.iter().enumerate() {
        if c / max > threshold {
            mask[j + 1] = true;
        }
    }
}

/// Interior positions of a window, i.e. indices with both neighbors inside it.
pub(crate) fn interior(window: &Range<usize>) -> Range<usize> {
    if window.len() < 3 {
        window.start..window.start
    } else {
        window.start + 1..window.end - 1
    }
}
