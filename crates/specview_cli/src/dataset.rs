//! JSON dataset loading and synthetic spectra

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use specview_lod::SampleStore;
use std::fs;
use std::path::Path;

/// On-disk dataset: one shared x axis, `y[k]` is curve k.
#[derive(Debug, Deserialize, Serialize)]
pub struct Dataset {
    pub x: Vec<f64>,
    pub y: Vec<Vec<f64>>,
}

impl Dataset {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string(self).context("Failed to serialize dataset")?;
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
    }

    pub fn into_store(self) -> Result<SampleStore> {
        Ok(SampleStore::new(self.x, self.y)?)
    }

    /// Lorentzian-peak spectra over a 0..10 ppm axis.
    ///
    /// Each curve gets a few peaks whose positions drift with the curve index,
    /// plus a small deterministic ripple so flat regions are not exactly flat.
    pub fn synthetic(curves: usize, points: usize) -> Self {
        let points = points.max(2);
        let step = 10.0 / (points - 1) as f64;
        let x: Vec<f64> = (0..points).map(|i| i as f64 * step).collect();

        let y = (0..curves)
            .map(|k| {
                let shift = k as f64 * 0.01;
                let peaks = [
                    (1.2 + shift, 0.004, 1.0),
                    (3.7 - shift, 0.010, 0.6),
                    (3.75 - shift, 0.010, 0.55),
                    (7.1 + 2.0 * shift, 0.002, 2.5),
                ];
                x.iter()
                    .map(|&v| {
                        let signal: f64 = peaks
                            .iter()
                            .map(|&(c, w, h)| h / (1.0 + ((v - c) / w).powi(2)))
                            .sum();
                        signal + 1e-4 * (v * 37.0 + k as f64).sin()
                    })
                    .collect()
            })
            .collect();

        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_dataset_builds_a_store() {
        let store = Dataset::synthetic(3, 500).into_store().unwrap();
        assert_eq!(store.curve_count(), 3);
        assert_eq!(store.len(), 500);
        assert_eq!(store.domain().min, 0.0);
        assert!((store.domain().max - 10.0).abs() < 1e-9);
    }

    #[test]
    fn mismatched_json_is_rejected() {
        let ds: Dataset = serde_json::from_str(r#"{"x":[0.0,1.0],"y":[[1.0]]}"#).unwrap();
        assert!(ds.into_store().is_err());
    }
}
