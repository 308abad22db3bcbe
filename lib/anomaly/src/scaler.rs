//! Per-feature standardization fitted on a reference set

use crate::features::{FeatureVector, FEATURE_COUNT};
use serde::{Deserialize, Serialize};

/// Standardized feature values, ready for the isolation ensemble
pub type Sample = [f64; FEATURE_COUNT];

/// Mean/standard-deviation transform using population statistics.
/// Constant features get a unit scale so they standardize to zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StandardScaler {
    mean: Sample,
    scale: Sample,
}

impl StandardScaler {
    /// Fit on a non-empty reference set
    pub fn fit(vectors: &[FeatureVector]) -> Self {
        let n = vectors.len().max(1) as f64;
        let mut mean = [0.0; FEATURE_COUNT];
        let mut scale = [1.0; FEATURE_COUNT];

        for v in vectors {
            for (m, x) in mean.iter_mut().zip(v.as_slice()) {
                *m += x;
            }
        }
        for m in &mut mean {
            *m /= n;
        }

        for (i, s) in scale.iter_mut().enumerate() {
            let variance = vectors
                .iter()
                .map(|v| (v.get(i) - mean[i]).powi(2))
                .sum::<f64>()
                / n;
            let std = variance.sqrt();
            *s = if std > f64::EPSILON { std } else { 1.0 };
        }

        Self { mean, scale }
    }

    #[inline]
    pub fn transform(&self, vector: &FeatureVector) -> Sample {
        let mut out = [0.0; FEATURE_COUNT];
        for (i, o) in out.iter_mut().enumerate() {
            *o = (vector.get(i) - self.mean[i]) / self.scale[i];
        }
        out
    }

    pub fn mean(&self) -> &Sample {
        &self.mean
    }

    pub fn scale(&self) -> &Sample {
        &self.scale
    }
}
