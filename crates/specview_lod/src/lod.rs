use std::ops::Range;

use crate::curvature::mark_above_threshold;
use crate::store::SampleStore;

/// Parameters for curvature-preserving decimation.
#[derive(Clone, Copy, Debug)]
pub struct AdaptiveParams {
    /// Max output points. Values below 2 are raised to 2 so both window ends fit.
    pub target_points: usize,
    /// Normalized-curvature level above which a sample is kept.
    pub feature_threshold: f64,
}

impl Default for AdaptiveParams {
    fn default() -> Self {
        Self {
            target_points: 1000,
            feature_threshold: 0.001,
        }
    }
}

/// Fixed-stride decimation of a window.
///
/// Keeps every `stride`-th index starting at `window.start`, with
/// `stride = max(len / target, 1)`. When that stride would still emit more
/// than `target + 1` samples it is raised to `ceil(len / target)`.
/// Windows that already fit are returned whole.
pub fn decimate_uniform(window: Range<usize>, target_points: usize) -> Vec<usize> {
    let count = window.len();
    let target = target_points.max(1);
    if count <= target {
        return window.collect();
    }

    let mut stride = (count / target).max(1);
    if count.div_ceil(stride) > target + 1 {
        stride = count.div_ceil(target);
    }
    window.step_by(stride).collect()
}

/// Curvature-preserving decimation of a window.
///
/// A sample is important when any curve's max-normalized second difference
/// exceeds the threshold there; the window's first and last samples always
/// are. If more samples are important than the budget allows, evenly spaced
/// entries of the important list are kept. Output is ascending and never
/// padded.
pub fn decimate_adaptive(
    store: &SampleStore,
    window: Range<usize>,
    params: AdaptiveParams,
) -> Vec<usize> {
    let count = window.len();
    let target = params.target_points.max(2);
    if count <= 2 || target >= count {
        return window.collect();
    }

    let mut important = vec![false; count];
    let mut scratch = Vec::new();
    for curve in 0..store.curve_count() {
        let c = store.interior_curvature(curve, &window, &mut scratch);
        mark_above_threshold(c, params.feature_threshold, &mut important);
    }
    important[0] = true;
    important[count - 1] = true;

    let kept: Vec<usize> = important
        .iter()
        .enumerate()
        .filter_map(|(i, &m)| m.then_some(window.start + i))
        .collect();

    if kept.len() <= target {
        return kept;
    }

    // Evenly spaced positions in the important list; the first and last
    // positions map to the window ends.
    let last = kept.len() - 1;
    (0..target)
        .map(|k| kept[k * last / (target - 1)])
        .collect()
}
