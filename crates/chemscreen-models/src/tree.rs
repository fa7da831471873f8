//! Greedy CART regression tree used as the weak learner of the booster.
//!
//! Splits minimise the summed squared error of the two children. Candidate
//! thresholds sit halfway between consecutive distinct feature values, and a
//! split is only taken when both children keep `min_samples_leaf` samples.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy)]
pub struct TreeParams {
    pub max_depth: usize,
    pub min_samples_leaf: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    nodes: Vec<Node>,
}

struct BestSplit {
    feature: usize,
    threshold: f64,
    gain: f64,
    left: Vec<usize>,
    right: Vec<usize>,
}

/// Minimum squared-error reduction for a split to count.
const MIN_GAIN: f64 = 1e-12;

impl RegressionTree {
    /// Fit on the rows of `x` listed in `indices`.
    ///
    /// The squared-error reduction of every split is added to
    /// `importances[feature]`.
    pub fn fit(
        x: &[Vec<f64>],
        targets: &[f64],
        indices: &[usize],
        params: TreeParams,
        importances: &mut [f64],
    ) -> Self {
        let mut tree = Self { nodes: Vec::new() };
        tree.build(x, targets, indices.to_vec(), 0, params, importances);
        tree
    }

    fn build(
        &mut self,
        x: &[Vec<f64>],
        targets: &[f64],
        indices: Vec<usize>,
        depth: usize,
        params: TreeParams,
        importances: &mut [f64],
    ) -> usize {
        let id = self.nodes.len();
        let value = mean_of(targets, &indices);
        self.nodes.push(Node::Leaf { value });

        let min_leaf = params.min_samples_leaf.max(1);
        if depth >= params.max_depth || indices.len() < 2 * min_leaf {
            return id;
        }

        let Some(best) = best_split(x, targets, &indices, min_leaf) else {
            return id;
        };
        importances[best.feature] += best.gain;

        let left = self.build(x, targets, best.left, depth + 1, params, importances);
        let right = self.build(x, targets, best.right, depth + 1, params, importances);
        self.nodes[id] = Node::Split {
            feature: best.feature,
            threshold: best.threshold,
            left,
            right,
        };
        id
    }

    /// Index of the leaf node `row` falls into.
    pub fn apply(&self, row: &[f64]) -> usize {
        let mut id = 0;
        loop {
            match &self.nodes[id] {
                Node::Leaf { .. } => return id,
                Node::Split { feature, threshold, left, right } => {
                    id = if row[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }

    pub fn predict(&self, row: &[f64]) -> f64 {
        match &self.nodes[self.apply(row)] {
            Node::Leaf { value } => *value,
            Node::Split { .. } => unreachable!("apply always stops at a leaf"),
        }
    }

    /// Overwrite the value of a leaf (used for Newton leaf updates).
    pub fn set_leaf_value(&mut self, node: usize, new_value: f64) {
        if let Some(Node::Leaf { value }) = self.nodes.get_mut(node) {
            *value = new_value;
        }
    }

    pub fn n_leaves(&self) -> usize {
        self.nodes.iter().filter(|n| matches!(n, Node::Leaf { .. })).count()
    }

    pub fn depth(&self) -> usize {
        fn walk(nodes: &[Node], id: usize) -> usize {
            match &nodes[id] {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => 1 + walk(nodes, *left).max(walk(nodes, *right)),
            }
        }
        walk(&self.nodes, 0)
    }
}

fn mean_of(targets: &[f64], indices: &[usize]) -> f64 {
    if indices.is_empty() {
        return 0.0;
    }
    indices.iter().map(|&i| targets[i]).sum::<f64>() / indices.len() as f64
}

fn best_split(
    x: &[Vec<f64>],
    targets: &[f64],
    indices: &[usize],
    min_leaf: usize,
) -> Option<BestSplit> {
    let n = indices.len();
    let total: f64 = indices.iter().map(|&i| targets[i]).sum();
    let parent_term = total * total / n as f64;
    let n_features = x[indices[0]].len();

    let mut best: Option<(usize, f64, f64)> = None;
    let mut order = indices.to_vec();

    for feature in 0..n_features {
        order.sort_by(|&a, &b| {
            x[a][feature]
                .partial_cmp(&x[b][feature])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut left_sum = 0.0;
        for k in 1..n {
            left_sum += targets[order[k - 1]];
            let (lo, hi) = (x[order[k - 1]][feature], x[order[k]][feature]);
            if k < min_leaf || n - k < min_leaf || hi <= lo {
                continue;
            }
            let right_sum = total - left_sum;
            let gain = left_sum * left_sum / k as f64
                + right_sum * right_sum / (n - k) as f64
                - parent_term;
            if gain > MIN_GAIN && best.map_or(true, |(_, _, g)| gain > g) {
                best = Some((feature, lo + (hi - lo) / 2.0, gain));
            }
        }
    }

    let (feature, threshold, gain) = best?;
    let (left, right): (Vec<usize>, Vec<usize>) =
        indices.iter().partition(|&&i| x[i][feature] <= threshold);
    Some(BestSplit { feature, threshold, gain, left, right })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(max_depth: usize, min_samples_leaf: usize) -> TreeParams {
        TreeParams { max_depth, min_samples_leaf }
    }

    #[test]
    fn test_step_function_is_learned() {
        let x: Vec<Vec<f64>> = (0..20).map(|i| vec![i as f64, 0.0]).collect();
        let y: Vec<f64> = (0..20).map(|i| if i < 10 { 1.0 } else { 5.0 }).collect();
        let idx: Vec<usize> = (0..20).collect();
        let mut imp = vec![0.0; 2];

        let tree = RegressionTree::fit(&x, &y, &idx, params(3, 1), &mut imp);
        assert_eq!(tree.predict(&[3.0, 0.0]), 1.0);
        assert_eq!(tree.predict(&[15.0, 0.0]), 5.0);
        // one clean split suffices; children are pure
        assert_eq!(tree.n_leaves(), 2);
        assert!(imp[0] > 0.0);
        assert_eq!(imp[1], 0.0);
    }

    #[test]
    fn test_depth_limit_respected() {
        let x: Vec<Vec<f64>> = (0..64).map(|i| vec![i as f64]).collect();
        let y: Vec<f64> = (0..64).map(|i| (i * i) as f64).collect();
        let idx: Vec<usize> = (0..64).collect();
        let mut imp = vec![0.0; 1];

        let tree = RegressionTree::fit(&x, &y, &idx, params(2, 1), &mut imp);
        assert!(tree.depth() <= 2);
        assert!(tree.n_leaves() <= 4);
    }

    #[test]
    fn test_min_samples_leaf_blocks_small_children() {
        let x: Vec<Vec<f64>> = (0..6).map(|i| vec![i as f64]).collect();
        let y = vec![0.0, 0.0, 0.0, 0.0, 0.0, 9.0];
        let idx: Vec<usize> = (0..6).collect();
        let mut imp = vec![0.0; 1];

        let tree = RegressionTree::fit(&x, &y, &idx, params(4, 3), &mut imp);
        // the outlier cannot be isolated; only the 3/3 split is legal
        assert_eq!(tree.n_leaves(), 2);
        assert_eq!(tree.predict(&[5.0]), 3.0);
    }

    #[test]
    fn test_constant_target_is_single_leaf() {
        let x: Vec<Vec<f64>> = (0..10).map(|i| vec![i as f64]).collect();
        let y = vec![2.0; 10];
        let idx: Vec<usize> = (0..10).collect();
        let mut imp = vec![0.0; 1];
        let mut tree = RegressionTree::fit(&x, &y, &idx, params(4, 1), &mut imp);
        assert_eq!(tree.n_leaves(), 1);

        let leaf = tree.apply(&[0.0]);
        tree.set_leaf_value(leaf, -1.0);
        assert_eq!(tree.predict(&[7.0]), -1.0);
    }
}
