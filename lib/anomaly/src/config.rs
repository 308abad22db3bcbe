use docscope_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Parameters governing a baseline fit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnomalyConfig {
    /// Number of isolation trees in the ensemble
    pub n_estimators: usize,
    /// Expected fraction of anomalies in the reference set
    pub contamination: f64,
    /// Subsample size per tree, capped at the reference set size
    pub max_samples: usize,
    /// Fixed seed for reproducible fits; `None` draws from OS entropy
    pub random_seed: Option<u64>,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            contamination: 0.1,
            max_samples: 256,
            random_seed: Some(42),
        }
    }
}

impl AnomalyConfig {
    pub fn validate(&self) -> Result<()> {
        if self.n_estimators == 0 {
            return Err(Error::InvalidConfig("n_estimators must be at least 1".to_string()));
        }
        if self.max_samples < 2 {
            return Err(Error::InvalidConfig("max_samples must be at least 2".to_string()));
        }
        if !(self.contamination > 0.0 && self.contamination <= 0.5) {
            return Err(Error::InvalidConfig(format!(
                "contamination must be in (0, 0.5], got {}",
                self.contamination
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }
}
