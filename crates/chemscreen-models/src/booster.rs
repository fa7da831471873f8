//! Stage-wise gradient boosting over [`RegressionTree`]s.

use std::collections::BTreeMap;

use chemscreen_common::{BoosterParams, ChemscreenError, Result};
use rand::{rngs::StdRng, seq::index, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::tree::{RegressionTree, TreeParams};

/// Newton-step denominators below this are treated as zero.
const MIN_HESSIAN: f64 = 1e-150;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Loss {
    /// Least squares regression.
    SquaredError,
    /// Logistic loss for binary 0/1 labels.
    BinomialDeviance,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradientBooster {
    loss: Loss,
    init: f64,
    learning_rate: f64,
    trees: Vec<RegressionTree>,
    importances: Vec<f64>,
}

pub(crate) fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

impl GradientBooster {
    pub fn fit(x: &[Vec<f64>], y: &[f64], loss: Loss, params: &BoosterParams) -> Result<Self> {
        params
            .validate()
            .map_err(|e| ChemscreenError::Model(format!("invalid booster parameters: {e}")))?;
        if x.is_empty() {
            return Err(ChemscreenError::Model("cannot fit booster on an empty corpus".into()));
        }
        if x.len() != y.len() {
            return Err(ChemscreenError::Model(format!(
                "feature rows ({}) and targets ({}) differ in length",
                x.len(),
                y.len()
            )));
        }
        let n = x.len();
        let n_features = x[0].len();

        let init = match loss {
            Loss::SquaredError => y.iter().sum::<f64>() / n as f64,
            Loss::BinomialDeviance => {
                if y.iter().any(|&v| v != 0.0 && v != 1.0) {
                    return Err(ChemscreenError::Model("binomial labels must be 0 or 1".into()));
                }
                let positives = y.iter().filter(|&&v| v == 1.0).count();
                if positives == 0 || positives == n {
                    return Err(ChemscreenError::Model(
                        "binomial labels must contain both classes".into(),
                    ));
                }
                let p = positives as f64 / n as f64;
                (p / (1.0 - p)).ln()
            }
        };

        let tree_params = TreeParams {
            max_depth: params.max_depth,
            min_samples_leaf: params.min_samples_leaf,
        };
        let n_sub = ((params.subsample * n as f64).round() as usize).clamp(1, n);
        let mut rng = StdRng::seed_from_u64(params.seed);
        let mut raw = vec![init; n];
        let mut importances = vec![0.0; n_features];
        let mut trees = Vec::with_capacity(params.n_estimators);

        for _ in 0..params.n_estimators {
            let fitted: Vec<f64> = match loss {
                Loss::SquaredError => raw.clone(),
                Loss::BinomialDeviance => raw.iter().map(|&r| sigmoid(r)).collect(),
            };
            let residuals: Vec<f64> = y.iter().zip(&fitted).map(|(t, p)| t - p).collect();

            let mut sample = if n_sub < n {
                index::sample(&mut rng, n, n_sub).into_vec()
            } else {
                (0..n).collect()
            };
            sample.sort_unstable();

            let mut tree = RegressionTree::fit(x, &residuals, &sample, tree_params, &mut importances);

            if loss == Loss::BinomialDeviance {
                let mut sums: BTreeMap<usize, (f64, f64)> = BTreeMap::new();
                for &i in &sample {
                    let entry = sums.entry(tree.apply(&x[i])).or_default();
                    entry.0 += residuals[i];
                    entry.1 += fitted[i] * (1.0 - fitted[i]);
                }
                for (leaf, (num, den)) in sums {
                    let step = if den.abs() < MIN_HESSIAN { 0.0 } else { num / den };
                    tree.set_leaf_value(leaf, step);
                }
            }

            for (r, row) in raw.iter_mut().zip(x) {
                *r += params.learning_rate * tree.predict(row);
            }
            trees.push(tree);
        }

        let total: f64 = importances.iter().sum();
        if total > 0.0 {
            for v in &mut importances {
                *v /= total;
            }
        }

        debug!(?loss, n_samples = n, n_trees = trees.len(), "booster fitted");
        Ok(Self {
            loss,
            init,
            learning_rate: params.learning_rate,
            trees,
            importances,
        })
    }

    pub fn loss(&self) -> Loss {
        self.loss
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Additive model output before any link function.
    pub fn raw_predict(&self, row: &[f64]) -> f64 {
        self.init
            + self.learning_rate * self.trees.iter().map(|t| t.predict(row)).sum::<f64>()
    }

    /// Regression value, or the positive-class probability for binomial loss.
    pub fn predict(&self, row: &[f64]) -> f64 {
        let raw = self.raw_predict(row);
        match self.loss {
            Loss::SquaredError => raw,
            Loss::BinomialDeviance => sigmoid(raw),
        }
    }

    /// Impurity-based importances, summing to 1 (all zero if no split was made).
    pub fn feature_importances(&self) -> &[f64] {
        &self.importances
    }
}
