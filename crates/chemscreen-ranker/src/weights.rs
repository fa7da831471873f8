//! Weight vector for the composite screening score.

use chemscreen_common::ScreeningConfig;
use serde::{Deserialize, Serialize};

/// The five component weights plus the flat rule-of-five penalty and jitter width.
/// Component weights sum to 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningWeights {
    /// Normalised pIC50 (potency proxy)
    pub potency: f64,
    /// Drug-likeness score (QED)
    pub qed: f64,
    /// Closeness of LogP to 2.5
    pub logp: f64,
    /// Low polar-surface-area bonus
    pub tpsa: f64,
    /// Low molecular-weight bonus
    pub mw: f64,
    /// Deducted once per exceeded MW / LogP / TPSA threshold
    pub ro5_penalty: f64,
    /// Std of the name-seeded tie-breaking jitter
    pub jitter_std: f64,
}

impl Default for ScreeningWeights {
    fn default() -> Self {
        ScreeningWeights::from(&ScreeningConfig::default())
    }
}

impl From<&ScreeningConfig> for ScreeningWeights {
    fn from(cfg: &ScreeningConfig) -> Self {
        Self {
            potency:     cfg.potency_weight,
            qed:         cfg.qed_weight,
            logp:        cfg.logp_weight,
            tpsa:        cfg.tpsa_weight,
            mw:          cfg.mw_weight,
            ro5_penalty: cfg.ro5_penalty,
            jitter_std:  cfg.jitter_std,
        }
    }
}

impl ScreeningWeights {
    fn component_sum(&self) -> f64 {
        self.potency + self.qed + self.logp + self.tpsa + self.mw
    }

    /// Validate that the component weights sum to ~1.0
    pub fn validate(&self) -> bool {
        (self.component_sum() - 1.0).abs() < 1e-6
    }

    /// Renormalise component weights so they sum to 1.0
    pub fn normalise(&mut self) {
        let sum = self.component_sum();
        if sum > 0.0 {
            self.potency /= sum;
            self.qed     /= sum;
            self.logp    /= sum;
            self.tpsa    /= sum;
            self.mw      /= sum;
        }
    }

    pub fn as_array(&self) -> [f64; 5] {
        [self.potency, self.qed, self.logp, self.tpsa, self.mw]
    }
}
