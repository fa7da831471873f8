//! Scaler followed by one booster per output.

use chemscreen_common::{BoosterParams, ChemscreenError, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::booster::{GradientBooster, Loss};
use crate::scaler::StandardScaler;

/// Fitted, read-only pipeline. Rows are standardised once and then fed to
/// every estimator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScaledPipeline {
    scaler: StandardScaler,
    estimators: Vec<GradientBooster>,
}

impl ScaledPipeline {
    /// Single-output pipeline.
    pub fn fit(x: &[Vec<f64>], y: &[f64], loss: Loss, params: &BoosterParams) -> Result<Self> {
        let scaler = StandardScaler::fit(x)?;
        let scaled = scaler.transform_all(x);
        let estimator = GradientBooster::fit(&scaled, y, loss, params)?;
        Ok(Self { scaler, estimators: vec![estimator] })
    }

    /// Multi-output regression: one squared-error booster per target column,
    /// fitted in parallel on a shared scaler.
    pub fn fit_multi(x: &[Vec<f64>], targets: &[Vec<f64>], params: &BoosterParams) -> Result<Self> {
        if targets.is_empty() {
            return Err(ChemscreenError::Model("multi-output fit needs at least one target".into()));
        }
        let scaler = StandardScaler::fit(x)?;
        let scaled = scaler.transform_all(x);
        let estimators = targets
            .par_iter()
            .map(|y| GradientBooster::fit(&scaled, y, Loss::SquaredError, params))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { scaler, estimators })
    }

    pub fn n_features(&self) -> usize {
        self.scaler.n_features()
    }

    pub fn n_outputs(&self) -> usize {
        self.estimators.len()
    }

    pub fn estimators(&self) -> &[GradientBooster] {
        &self.estimators
    }

    /// One value per output, in target order.
    pub fn predict(&self, row: &[f64]) -> Result<Vec<f64>> {
        if row.len() != self.n_features() {
            return Err(ChemscreenError::Model(format!(
                "expected {} features, got {}",
                self.n_features(),
                row.len()
            )));
        }
        let scaled = self.scaler.transform(row);
        Ok(self.estimators.iter().map(|e| e.predict(&scaled)).collect())
    }
}
