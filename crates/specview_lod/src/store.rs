use std::ops::Range;
use std::sync::Arc;

use crate::curvature::{abs_second_difference, interior, second_difference_at};
use crate::error::{LodError, Result};
use crate::view::XRange;

/// Immutable base dataset: one x axis shared by N curves.
///
/// Invariants checked at construction:
/// - `x` is non-empty, finite and strictly increasing
/// - every curve has `x.len()` samples
///
/// Cloning is cheap (all sample buffers are shared), so a store can be handed
/// to any number of reducers or threads.
#[derive(Clone, Debug)]
pub struct SampleStore {
    x: Arc<[f64]>,
    curves: Arc<[Arc<[f64]>]>,
    domain: XRange,
    curvature: Option<Arc<[Arc<[f64]>]>>,
}

impl SampleStore {
    pub fn new(x: Vec<f64>, curves: Vec<Vec<f64>>) -> Result<Self> {
        if x.is_empty() {
            return Err(LodError::EmptyAxis);
        }
        if let Some(index) = x.iter().position(|v| !v.is_finite()) {
            return Err(LodError::NonMonotonicAxis { index });
        }
        if let Some(w) = x.windows(2).position(|w| w[0] >= w[1]) {
            return Err(LodError::NonMonotonicAxis { index: w + 1 });
        }
        for (curve, y) in curves.iter().enumerate() {
            if y.len() != x.len() {
                return Err(LodError::ShapeMismatch {
                    curve,
                    expected: x.len(),
                    actual: y.len(),
                });
            }
        }

        let domain = XRange {
            min: x[0],
            max: x[x.len() - 1],
        };
        Ok(Self {
            x: x.into(),
            curves: curves.into_iter().map(Arc::from).collect(),
            domain,
            curvature: None,
        })
    }

    /// Build a store from a row-major matrix in either orientation.
    ///
    /// `values` is `rows × cols`. Rows are taken as curves when
    /// `cols == x.len()`; otherwise, when `rows == x.len()`, the matrix is
    /// treated as samples × curves and transposed.
    pub fn from_matrix(x: Vec<f64>, values: &[f64], rows: usize, cols: usize) -> Result<Self> {
        let m = x.len();
        if rows.checked_mul(cols) != Some(values.len()) {
            return Err(LodError::ShapeMismatch {
                curve: 0,
                expected: rows.saturating_mul(cols),
                actual: values.len(),
            });
        }

        let curves: Vec<Vec<f64>> = if cols == m {
            values.chunks(cols.max(1)).take(rows).map(<[f64]>::to_vec).collect()
        } else if rows == m {
            (0..cols)
                .map(|c| (0..rows).map(|r| values[r * cols + c]).collect())
                .collect()
        } else {
            return Err(LodError::ShapeMismatch {
                curve: 0,
                expected: m,
                actual: cols,
            });
        };
        Self::new(x, curves)
    }

    /// Precompute per-curve curvature once, for stores that serve many zooms.
    pub fn with_curvature_cache(mut self) -> Self {
        if self.curvature.is_none() {
            let cache: Vec<Arc<[f64]>> = self
                .curves
                .iter()
                .map(|y| Arc::from(abs_second_difference(y)))
                .collect();
            tracing::trace!(curves = cache.len(), samples = self.len(), "curvature cache built");
            self.curvature = Some(cache.into());
        }
        self
    }

    pub fn has_curvature_cache(&self) -> bool {
        self.curvature.is_some()
    }

    /// Number of x samples.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn curve_count(&self) -> usize {
        self.curves.len()
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Global x bounds.
    pub fn domain(&self) -> XRange {
        self.domain
    }

    pub fn curve_at(&self, index: usize) -> Result<&[f64]> {
        self.curves
            .get(index)
            .map(|c| &c[..])
            .ok_or(LodError::OutOfRange {
                index,
                count: self.curves.len(),
            })
    }

    /// First index with `x >= value`.
    pub fn lower_bound_x(&self, value: f64) -> usize {
        self.x.partition_point(|&v| v < value)
    }

    /// First index with `x > value`.
    pub fn upper_bound_x(&self, value: f64) -> usize {
        self.x.partition_point(|&v| v <= value)
    }

    /// Indices satisfying `x_min <= x <= x_max`, as a half-open range.
    ///
    /// Bounds may be given in either order.
    pub fn window(&self, x_min: f64, x_max: f64) -> Result<Range<usize>> {
        if x_min.is_nan() || x_max.is_nan() {
            return Err(LodError::EmptyRange {
                min: x_min,
                max: x_max,
            });
        }
        let r = XRange::new(x_min, x_max);
        let start = self.lower_bound_x(r.min);
        let end = self.upper_bound_x(r.max);
        if end <= start {
            return Err(LodError::EmptyRange {
                min: r.min,
                max: r.max,
            });
        }
        Ok(start..end)
    }

    /// Visible indices and their x values for an x range.
    pub fn mask(&self, x_min: f64, x_max: f64) -> Result<(Range<usize>, &[f64])> {
        let range = self.window(x_min, x_max)?;
        let xs = &self.x[range.clone()];
        Ok((range, xs))
    }

    /// Min/max finite intensity over a window across all curves.
    pub fn y_range(&self, window: Range<usize>) -> Option<(f64, f64)> {
        let window = window.start.min(self.len())..window.end.min(self.len());
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for y in self.curves.iter() {
            for &v in &y[window.clone()] {
                if v.is_finite() {
                    min = min.min(v);
                    max = max.max(v);
                }
            }
        }
        if min <= max {
            Some((min, max))
        } else {
            None
        }
    }

    /// Curvature of one curve over the interior of `window`, written to `out`.
    ///
    /// Values are identical whether or not the cache is present: an interior
    /// sample's neighbors always lie inside the window.
    pub(crate) fn interior_curvature<'a>(
        &'a self,
        curve: usize,
        window: &Range<usize>,
        scratch: &'a mut Vec<f64>,
    ) -> &'a [f64] {
        let inner = interior(window);
        if let Some(cache) = &self.curvature {
            return &cache[curve][inner];
        }
        let y = &self.curves[curve];
        scratch.clear();
        scratch.extend(inner.map(|i| second_difference_at(y, i)));
        scratch
    }
}
