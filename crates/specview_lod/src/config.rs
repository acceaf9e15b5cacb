//! Reducer configuration

use serde::{Deserialize, Serialize};

use crate::error::{LodError, Result};

/// How a window is thinned when it exceeds the point budget.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Adaptive when zoomed in past `adaptive_zoom_ratio`, uniform otherwise.
    #[default]
    Auto,
    Uniform,
    Adaptive,
}

/// Tuning for [`ViewportReducer`](crate::ViewportReducer).
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ReducerConfig {
    /// Default point budget per request.
    pub target_points: usize,
    /// Lower bound applied to user-requested budgets.
    pub min_target_points: usize,
    /// Upper bound applied to user-requested budgets.
    pub max_target_points: usize,
    /// Normalized curvature above which a sample counts as a feature.
    pub feature_threshold: f64,
    /// Viewports narrower than this fraction of the domain use adaptive decimation.
    pub adaptive_zoom_ratio: f64,
    pub strategy: Strategy,
    /// Precompute curvature for the whole store once.
    pub cache_curvature: bool,
}

impl Default for ReducerConfig {
    fn default() -> Self {
        Self {
            target_points: 1000,
            min_target_points: 100,
            max_target_points: 5000,
            feature_threshold: 0.001,
            adaptive_zoom_ratio: 1.0 / 3.0,
            strategy: Strategy::Auto,
            cache_curvature: true,
        }
    }
}

impl ReducerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_target_points == 0 {
            return Err(LodError::InvalidConfig(
                "min_target_points must be at least 1".into(),
            ));
        }
        if self.min_target_points > self.max_target_points {
            return Err(LodError::InvalidConfig(format!(
                "min_target_points ({}) exceeds max_target_points ({})",
                self.min_target_points, self.max_target_points
            )));
        }
        if !self.feature_threshold.is_finite() || self.feature_threshold < 0.0 {
            return Err(LodError::InvalidConfig(format!(
                "feature_threshold must be a finite value >= 0, got {}",
                self.feature_threshold
            )));
        }
        if !(self.adaptive_zoom_ratio > 0.0 && self.adaptive_zoom_ratio <= 1.0) {
            return Err(LodError::InvalidConfig(format!(
                "adaptive_zoom_ratio must be in (0, 1], got {}",
                self.adaptive_zoom_ratio
            )));
        }
        Ok(())
    }

    /// Clamp a requested budget into `[min_target_points, max_target_points]`.
    pub fn clamp_budget(&self, requested: usize) -> usize {
        requested.clamp(self.min_target_points, self.max_target_points)
    }
}
