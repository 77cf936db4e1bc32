//! Random forest regression
//!
//! A bagged ensemble of CART regression trees. Each tree is grown on a
//! bootstrap sample of the training rows, considers every feature at every
//! split and minimises the summed squared error of its children. The
//! forest prediction is the mean of the tree outputs.
//!
//! All randomness comes from one seeded `StdRng`, so the same rows, targets
//! and parameters always produce an identical forest.

mod tree;

pub use tree::RegressionTree;

use crate::NUM_FEATURES;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Hyperparameters for growing a forest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForestParams {
    pub n_trees: usize,
    pub seed: u64,
    /// Maximum tree depth, `None` grows until leaves are pure
    pub max_depth: Option<usize>,
    /// Minimum number of rows a node needs to be split
    pub min_samples_split: usize,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            seed: 42,
            max_depth: None,
            min_samples_split: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RandomForest {
    trees: Vec<RegressionTree>,
}

impl RandomForest {
    /// Grows a forest on `rows` against `targets`.
    ///
    /// Returns `None` when there are no rows or no trees to grow.
    pub fn fit(
        rows: &[[f64; NUM_FEATURES]],
        targets: &[f64],
        params: &ForestParams,
    ) -> Option<Self> {
        let n = rows.len().min(targets.len());
        if n == 0 || params.n_trees == 0 {
            return None;
        }

        let mut rng = StdRng::seed_from_u64(params.seed);
        let trees = (0..params.n_trees)
            .map(|_| {
                let sample: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
                RegressionTree::fit(rows, targets, sample, params)
            })
            .collect();

        Some(Self { trees })
    }

    pub fn predict(&self, row: &[f64; NUM_FEATURES]) -> f64 {
        let total: f64 = self.trees.iter().map(|tree| tree.predict(row)).sum();
        total / self.trees.len() as f64
    }

    pub fn trees(&self) -> &[RegressionTree] {
        &self.trees
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}
