//! Baseline model: standardization plus an isolation ensemble
//!
//! The model starts `Unfitted`. A successful [`BaselineModel::fit`] builds
//! the whole new state off to the side and swaps it in under a short write
//! lock, so concurrent scorers keep seeing the previous fit until the swap.
//! Fits themselves are serialized: one writer at a time.

use crate::config::AnomalyConfig;
use crate::features::FeatureVector;
use crate::forest::IsolationForest;
use crate::scaler::StandardScaler;
use docscope_core::{Error, Result};
use parking_lot::{Mutex, RwLock};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::sync::Arc;

/// Minimum reference vectors needed for a fit
pub const MIN_FIT_SAMPLES: usize = 2;

/// Outcome of a fit request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FitOutcome {
    /// New state is in place
    Fitted { samples: usize },
    /// Too few samples; prior state (if any) is untouched
    Skipped { samples: usize },
}

impl FitOutcome {
    pub fn is_fitted(&self) -> bool {
        matches!(self, FitOutcome::Fitted { .. })
    }
}

/// Result of scoring one vector against the baseline
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnomalyScore {
    pub is_anomaly: bool,
    /// In [0, 1]; 0.5 sits exactly on the decision boundary
    pub normalized_score: f64,
    /// Signed distance from the boundary; positive means anomalous
    pub raw_score: f64,
}

#[derive(Debug)]
struct FittedBaseline {
    scaler: StandardScaler,
    forest: IsolationForest,
    samples: usize,
}

pub struct BaselineModel {
    config: AnomalyConfig,
    state: RwLock<Option<Arc<FittedBaseline>>>,
    /// Held for a whole fit so an older, slower fit cannot replace a newer one
    fit_guard: Mutex<()>,
}

impl BaselineModel {
    pub fn new(config: AnomalyConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state: RwLock::new(None),
            fit_guard: Mutex::new(()),
        })
    }

    pub fn config(&self) -> &AnomalyConfig {
        &self.config
    }

    pub fn is_fitted(&self) -> bool {
        self.state.read().is_some()
    }

    /// Number of vectors in the current fit
    pub fn sample_count(&self) -> Option<usize> {
        self.state.read().as_ref().map(|s| s.samples)
    }

    /// Isolation-score threshold derived from contamination
    pub fn threshold(&self) -> Option<f64> {
        self.state.read().as_ref().map(|s| s.forest.threshold())
    }

    /// Fit using the configured seed, or OS entropy when unseeded
    pub fn fit(&self, vectors: &[FeatureVector]) -> FitOutcome {
        let mut rng = match self.config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.fit_with_rng(vectors, &mut rng)
    }

    /// Fit with a caller-supplied random source
    pub fn fit_with_rng<R: Rng + ?Sized>(
        &self,
        vectors: &[FeatureVector],
        rng: &mut R,
    ) -> FitOutcome {
        let _writer = self.fit_guard.lock();

        if vectors.len() < MIN_FIT_SAMPLES {
            tracing::warn!(
                samples = vectors.len(),
                required = MIN_FIT_SAMPLES,
                "Need at least {} vectors to fit the baseline, skipping",
                MIN_FIT_SAMPLES
            );
            return FitOutcome::Skipped { samples: vectors.len() };
        }

        let scaler = StandardScaler::fit(vectors);
        let standardized: Vec<_> = vectors.iter().map(|v| scaler.transform(v)).collect();
        let forest = IsolationForest::fit(
            &standardized,
            self.config.n_estimators,
            self.config.max_samples,
            self.config.contamination,
            rng,
        );

        tracing::info!(
            samples = vectors.len(),
            trees = forest.n_trees(),
            threshold = forest.threshold(),
            "Baseline fitted"
        );

        let fitted = Arc::new(FittedBaseline {
            scaler,
            forest,
            samples: vectors.len(),
        });
        *self.state.write() = Some(fitted);

        FitOutcome::Fitted { samples: vectors.len() }
    }

    pub fn score(&self, vector: &FeatureVector) -> Result<AnomalyScore> {
        let fitted = self.state.read().clone().ok_or(Error::NotFitted)?;

        let sample = fitted.scaler.transform(vector);
        let raw_score = fitted.forest.decision(&sample);

        Ok(AnomalyScore {
            is_anomaly: raw_score > 0.0,
            normalized_score: normalize(raw_score),
            raw_score,
        })
    }
}

impl Default for BaselineModel {
    fn default() -> Self {
        Self {
            config: AnomalyConfig::default(),
            state: RwLock::new(None),
            fit_guard: Mutex::new(()),
        }
    }
}

/// Shift so the boundary lands on 0.5, then clamp to [0, 1]
#[inline]
fn normalize(raw_score: f64) -> f64 {
    (0.5 + raw_score).clamp(0.0, 1.0)
}
