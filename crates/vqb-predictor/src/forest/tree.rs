//! CART regression tree

use super::ForestParams;
use crate::NUM_FEATURES;

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Leaf(f64),
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

struct SplitCandidate {
    feature: usize,
    threshold: f64,
    /// Summed squared error of both children
    score: f64,
}

/// A binary regression tree stored as a flat node arena, root at index 0
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionTree {
    nodes: Vec<Node>,
}

impl RegressionTree {
    /// Grows a tree over the rows selected by `sample` (indices may repeat)
    pub fn fit(
        rows: &[[f64; NUM_FEATURES]],
        targets: &[f64],
        sample: Vec<usize>,
        params: &ForestParams,
    ) -> Self {
        let mut tree = Self { nodes: Vec::new() };
        if sample.is_empty() {
            tree.nodes.push(Node::Leaf(0.0));
        } else {
            tree.grow(rows, targets, sample, 0, params);
        }
        tree
    }

    fn grow(
        &mut self,
        rows: &[[f64; NUM_FEATURES]],
        targets: &[f64],
        indices: Vec<usize>,
        depth: usize,
        params: &ForestParams,
    ) -> usize {
        let id = self.nodes.len();
        let (mean, mse) = mean_and_mse(targets, &indices);
        self.nodes.push(Node::Leaf(mean));

        let splittable = indices.len() >= params.min_samples_split.max(2)
            && params.max_depth.is_none_or(|max| depth < max)
            && mse > f64::EPSILON;
        if !splittable {
            return id;
        }

        let Some(split) = best_split(rows, targets, &indices) else {
            return id;
        };

        let (left, right): (Vec<usize>, Vec<usize>) = indices
            .into_iter()
            .partition(|&i| rows[i][split.feature] <= split.threshold);

        let left = self.grow(rows, targets, left, depth + 1, params);
        let right = self.grow(rows, targets, right, depth + 1, params);
        self.nodes[id] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        id
    }

    pub fn predict(&self, row: &[f64; NUM_FEATURES]) -> f64 {
        let mut id = 0;
        loop {
            match self.nodes.get(id) {
                Some(Node::Leaf(value)) => return *value,
                Some(Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    id = if row[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
                None => return 0.0,
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, Node::Leaf(_)))
            .count()
    }

    /// Number of levels, a single leaf has depth 1
    pub fn depth(&self) -> usize {
        self.depth_from(0)
    }

    fn depth_from(&self, id: usize) -> usize {
        match self.nodes.get(id) {
            Some(Node::Split { left, right, .. }) => {
                1 + self.depth_from(*left).max(self.depth_from(*right))
            }
            Some(Node::Leaf(_)) => 1,
            None => 0,
        }
    }
}

fn mean_and_mse(targets: &[f64], indices: &[usize]) -> (f64, f64) {
    if indices.is_empty() {
        return (0.0, 0.0);
    }
    let n = indices.len() as f64;
    let mean = indices.iter().map(|&i| targets[i]).sum::<f64>() / n;
    let mse = indices
        .iter()
        .map(|&i| (targets[i] - mean).powi(2))
        .sum::<f64>()
        / n;
    (mean, mse)
}

/// Finds the split with the lowest summed squared error over all features.
/// Thresholds sit halfway between consecutive distinct values; ties keep the
/// first candidate found.
fn best_split(
    rows: &[[f64; NUM_FEATURES]],
    targets: &[f64],
    indices: &[usize],
) -> Option<SplitCandidate> {
    let n = indices.len();
    let total_sum: f64 = indices.iter().map(|&i| targets[i]).sum();
    let total_sq: f64 = indices.iter().map(|&i| targets[i] * targets[i]).sum();

    let mut order = indices.to_vec();
    let mut best: Option<SplitCandidate> = None;

    for feature in 0..NUM_FEATURES {
        order.sort_by(|&a, &b| rows[a][feature].total_cmp(&rows[b][feature]));

        let mut left_sum = 0.0;
        let mut left_sq = 0.0;
        for k in 1..n {
            let y = targets[order[k - 1]];
            left_sum += y;
            left_sq += y * y;

            let prev = rows[order[k - 1]][feature];
            let next = rows[order[k]][feature];
            if prev == next {
                continue;
            }

            let left_n = k as f64;
            let right_n = (n - k) as f64;
            let right_sum = total_sum - left_sum;
            let right_sq = total_sq - left_sq;
            let score = (left_sq - left_sum * left_sum / left_n)
                + (right_sq - right_sum * right_sum / right_n);

            if best.as_ref().is_none_or(|b| score < b.score) {
                let mut threshold = prev / 2.0 + next / 2.0;
                if threshold >= next {
                    threshold = prev;
                }
                best = Some(SplitCandidate {
                    feature,
                    threshold,
                    score,
                });
            }
        }
    }

    best
}
