use serde::{Deserialize, Serialize};

use crate::error::{LodError, Result};
use crate::reducer::{ReducedSeries, ReductionStrategy};
use crate::view::XRange;

/// Display-time affine map applied to every reduced curve.
///
/// `y' = y * 10^height_scale_exponent + position * stack_offset_base * 10^stack_scale_exponent`
/// where `position` is the curve's slot in render order.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayTransform {
    pub stack_offset_base: f64,
    pub stack_scale_exponent: i32,
    pub height_scale_exponent: f64,
    /// Fill each curve to its baseline; reverses render order.
    pub fill_enabled: bool,
}

impl Default for DisplayTransform {
    fn default() -> Self {
        Self {
            stack_offset_base: 0.0,
            stack_scale_exponent: 4,
            height_scale_exponent: 0.0,
            fill_enabled: false,
        }
    }
}

impl DisplayTransform {
    pub fn validate(&self) -> Result<()> {
        if !self.stack_offset_base.is_finite() || self.stack_offset_base < 0.0 {
            return Err(LodError::InvalidConfig(format!(
                "stack_offset_base must be a finite value >= 0, got {}",
                self.stack_offset_base
            )));
        }
        if !self.height_scale_exponent.is_finite() {
            return Err(LodError::InvalidConfig(
                "height_scale_exponent must be finite".into(),
            ));
        }
        Ok(())
    }

    /// Vertical distance between neighboring curves in render order.
    pub fn stack_offset(&self) -> f64 {
        self.stack_offset_base * 10f64.powi(self.stack_scale_exponent)
    }

    pub fn height_multiplier(&self) -> f64 {
        10f64.powf(self.height_scale_exponent)
    }

    /// Curve ids in draw order.
    pub fn render_order(&self, curve_count: usize) -> Vec<usize> {
        if self.fill_enabled {
            (0..curve_count).rev().collect()
        } else {
            (0..curve_count).collect()
        }
    }

    pub fn apply(&self, reduced: &ReducedSeries) -> RenderFrame {
        let offset = self.stack_offset();
        let height = self.height_multiplier();
        let traces = self
            .render_order(reduced.curves.len())
            .into_iter()
            .enumerate()
            .map(|(position, curve)| {
                let base = position as f64 * offset;
                let y = reduced.curves[curve]
                    .iter()
                    .map(|v| v * height + base)
                    .collect();
                Trace { curve, y }
            })
            .collect();

        RenderFrame {
            x: reduced.x.clone(),
            traces,
            fill: self.fill_enabled,
            x_range: reduced.x_range,
            strategy: reduced.strategy,
        }
    }
}

/// One transformed curve; `curve` is the id in the store.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Trace {
    pub curve: usize,
    pub y: Vec<f64>,
}

/// Render-ready output: traces in draw order over a shared x.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderFrame {
    pub x: Vec<f64>,
    pub traces: Vec<Trace>,
    pub fill: bool,
    pub x_range: XRange,
    pub strategy: ReductionStrategy,
}

impl RenderFrame {
    pub fn point_count(&self) -> usize {
        self.x.len()
    }

    /// Finite y extent over all traces, for renderer auto-ranging.
    pub fn y_bounds(&self) -> Option<(f64, f64)> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in self.traces.iter().flat_map(|t| t.y.iter()) {
            if v.is_finite() {
                min = min.min(*v);
                max = max.max(*v);
            }
        }
        if min <= max {
            Some((min, max))
        } else {
            None
        }
    }
}
