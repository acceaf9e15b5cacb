use serde::Serialize;

use crate::config::{ReducerConfig, Strategy};
use crate::error::Result;
use crate::lod::{decimate_adaptive, decimate_uniform, AdaptiveParams};
use crate::store::SampleStore;
use crate::transform::{DisplayTransform, RenderFrame};
use crate::view::XRange;

/// Which reduction produced a [`ReducedSeries`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReductionStrategy {
    /// The window already fit the budget.
    Identity,
    Uniform,
    Adaptive,
}

/// Reduced samples for one viewport, in store curve order.
///
/// Freshly allocated per request; never aliases the store.
#[derive(Clone, Debug, PartialEq)]
pub struct ReducedSeries {
    pub x: Vec<f64>,
    /// One entry per store curve, index-aligned with `x`.
    pub curves: Vec<Vec<f64>>,
    /// Store indices of the kept samples, ascending.
    pub indices: Vec<usize>,
    /// The viewport this series was reduced for.
    pub x_range: XRange,
    pub strategy: ReductionStrategy,
}

impl ReducedSeries {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Answers "which samples represent this view" for a shared store.
///
/// Holds no per-request state; `reduce` and `render` take `&self` and can run
/// concurrently from any thread.
#[derive(Clone, Debug)]
pub struct ViewportReducer {
    store: SampleStore,
    config: ReducerConfig,
}

impl ViewportReducer {
    pub fn new(store: SampleStore, config: ReducerConfig) -> Result<Self> {
        config.validate()?;
        let store = if config.cache_curvature {
            store.with_curvature_cache()
        } else {
            store
        };
        Ok(Self { store, config })
    }

    pub fn store(&self) -> &SampleStore {
        &self.store
    }

    pub fn config(&self) -> &ReducerConfig {
        &self.config
    }

    /// Strategy used for a window over `view` that exceeds the budget.
    pub fn strategy_for(&self, view: XRange) -> ReductionStrategy {
        match self.config.strategy {
            Strategy::Uniform => ReductionStrategy::Uniform,
            Strategy::Adaptive => ReductionStrategy::Adaptive,
            Strategy::Auto => {
                let domain = self.store.domain();
                if view.span() < domain.span() * self.config.adaptive_zoom_ratio {
                    ReductionStrategy::Adaptive
                } else {
                    ReductionStrategy::Uniform
                }
            }
        }
    }

    /// Mask the store to `view` and thin it to at most `budget` points
    /// (uniform may emit one extra).
    pub fn reduce(&self, view: XRange, budget: usize) -> Result<ReducedSeries> {
        let view = XRange::new(view.min, view.max);
        let window = self.store.window(view.min, view.max)?;
        let visible = window.len();
        let budget = budget.max(1);

        let (strategy, indices) = if visible <= budget {
            (ReductionStrategy::Identity, window.collect::<Vec<_>>())
        } else {
            match self.strategy_for(view) {
                ReductionStrategy::Adaptive => (
                    ReductionStrategy::Adaptive,
                    decimate_adaptive(
                        &self.store,
                        window,
                        AdaptiveParams {
                            target_points: budget,
                            feature_threshold: self.config.feature_threshold,
                        },
                    ),
                ),
                _ => (ReductionStrategy::Uniform, decimate_uniform(window, budget)),
            }
        };

        let xs = self.store.x();
        let x = indices.iter().map(|&i| xs[i]).collect();
        let mut curves = Vec::with_capacity(self.store.curve_count());
        for c in 0..self.store.curve_count() {
            let y = self.store.curve_at(c)?;
            curves.push(indices.iter().map(|&i| y[i]).collect());
        }

        tracing::debug!(
            view_min = view.min,
            view_max = view.max,
            visible,
            budget,
            kept = indices.len(),
            ?strategy,
            "reduced viewport"
        );

        Ok(ReducedSeries {
            x,
            curves,
            indices,
            x_range: view,
            strategy,
        })
    }

    /// Whole-domain reduction.
    pub fn overview(&self, budget: usize) -> Result<ReducedSeries> {
        self.reduce(self.store.domain(), budget)
    }

    /// Reduce and apply the display transform.
    pub fn render(
        &self,
        view: XRange,
        budget: usize,
        transform: &DisplayTransform,
    ) -> Result<RenderFrame> {
        transform.validate()?;
        Ok(transform.apply(&self.reduce(view, budget)?))
    }
}
