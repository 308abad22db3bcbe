//! Isolation forest over standardized samples
//!
//! Each tree recursively splits a random subsample on a random feature at a
//! random value inside that feature's observed range, until a point stands
//! alone or the depth bound is hit. Outliers separate from the bulk in fewer
//! splits, so a short average path length is the anomaly signal.

use crate::features::FEATURE_COUNT;
use crate::scaler::Sample;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

#[derive(Debug, Clone)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
    Leaf {
        size: usize,
    },
}

#[derive(Debug, Clone)]
struct IsolationTree {
    root: Node,
}

impl IsolationTree {
    fn build<R: Rng + ?Sized>(
        samples: &[Sample],
        indices: Vec<usize>,
        max_depth: usize,
        rng: &mut R,
    ) -> Self {
        Self {
            root: Self::grow(samples, indices, 0, max_depth, rng),
        }
    }

    fn grow<R: Rng + ?Sized>(
        samples: &[Sample],
        indices: Vec<usize>,
        depth: usize,
        max_depth: usize,
        rng: &mut R,
    ) -> Node {
        if indices.len() <= 1 || depth >= max_depth {
            return Node::Leaf { size: indices.len() };
        }

        // Only features that still vary inside this node can split it
        let mut candidates: Vec<(usize, f64, f64)> = Vec::with_capacity(FEATURE_COUNT);
        for feature in 0..FEATURE_COUNT {
            let (min, max) = indices
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &i| {
                    let x = samples[i][feature];
                    (lo.min(x), hi.max(x))
                });
            if min < max {
                candidates.push((feature, min, max));
            }
        }
        if candidates.is_empty() {
            return Node::Leaf { size: indices.len() };
        }

        let (feature, min, max) = candidates[rng.random_range(0..candidates.len())];
        let threshold = rng.random_range(min..max);
        let (left, right): (Vec<usize>, Vec<usize>) =
            indices.into_iter().partition(|&i| samples[i][feature] < threshold);

        Node::Split {
            feature,
            threshold,
            left: Box::new(Self::grow(samples, left, depth + 1, max_depth, rng)),
            right: Box::new(Self::grow(samples, right, depth + 1, max_depth, rng)),
        }
    }

    fn path_length(&self, sample: &Sample) -> f64 {
        let mut node = &self.root;
        let mut depth = 0.0;
        loop {
            match node {
                Node::Split { feature, threshold, left, right } => {
                    node = if sample[*feature] < *threshold {
                        left.as_ref()
                    } else {
                        right.as_ref()
                    };
                    depth += 1.0;
                }
                Node::Leaf { size } => return depth + average_path_length(*size),
            }
        }
    }
}

/// Expected path length of an unsuccessful BST search over `n` points
pub fn average_path_length(n: usize) -> f64 {
    match n {
        0 | 1 => 0.0,
        2 => 1.0,
        _ => {
            let n = n as f64;
            2.0 * ((n - 1.0).ln() + EULER_GAMMA) - 2.0 * (n - 1.0) / n
        }
    }
}

/// Ensemble of isolation trees with a contamination-calibrated threshold
#[derive(Debug, Clone)]
pub struct IsolationForest {
    trees: Vec<IsolationTree>,
    sample_size: usize,
    threshold: f64,
}

impl IsolationForest {
    /// Fit on at least two samples.
    ///
    /// Each tree draws its own seed from `rng`, so a seeded `rng` gives a
    /// bit-for-bit reproducible forest even though trees are built in parallel.
    pub fn fit<R: Rng + ?Sized>(
        samples: &[Sample],
        n_estimators: usize,
        max_samples: usize,
        contamination: f64,
        rng: &mut R,
    ) -> Self {
        let sample_size = max_samples.min(samples.len()).max(1);
        let max_depth = (sample_size as f64).log2().ceil().max(1.0) as usize;

        let plans: Vec<(u64, Vec<usize>)> = (0..n_estimators)
            .map(|_| {
                let indices = rand::seq::index::sample(rng, samples.len(), sample_size).into_vec();
                (rng.random::<u64>(), indices)
            })
            .collect();

        let trees: Vec<IsolationTree> = plans
            .into_par_iter()
            .map(|(seed, indices)| {
                let mut tree_rng = StdRng::seed_from_u64(seed);
                IsolationTree::build(samples, indices, max_depth, &mut tree_rng)
            })
            .collect();

        let mut forest = Self {
            trees,
            sample_size,
            threshold: 0.0,
        };

        let mut reference: Vec<f64> = samples.iter().map(|s| forest.anomaly_score(s)).collect();
        forest.threshold = quantile(&mut reference, 1.0 - contamination);
        forest
    }

    /// Mean path length across the ensemble
    pub fn mean_path_length(&self, sample: &Sample) -> f64 {
        if self.trees.is_empty() {
            return 0.0;
        }
        self.trees.iter().map(|t| t.path_length(sample)).sum::<f64>() / self.trees.len() as f64
    }

    /// Isolation score in (0, 1]; shorter paths score higher
    pub fn anomaly_score(&self, sample: &Sample) -> f64 {
        let c = average_path_length(self.sample_size);
        if c <= 0.0 {
            return 0.5;
        }
        2f64.powf(-self.mean_path_length(sample) / c)
    }

    /// Signed distance from the decision boundary; positive means anomalous
    pub fn decision(&self, sample: &Sample) -> f64 {
        self.anomaly_score(sample) - self.threshold
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size
    }
}

/// Linear-interpolated quantile; sorts `values` in place
fn quantile(values: &mut [f64], q: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(|a, b| a.total_cmp(b));
    let pos = q.clamp(0.0, 1.0) * (values.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    values[lo] + (values[hi] - values[lo]) * (pos - lo as f64)
}
