//! ADMET (Absorption, Distribution, Metabolism, Excretion, Toxicity) regressor.
//!
//! Five normalised scores in [0, 1], higher is better for every category
//! (Toxicity is reported as a safety score).

use std::collections::BTreeMap;
use std::fmt;

use chemscreen_common::{AdmetConfig, AdmetThresholds, ChemscreenError, Result, TierThresholds};
use chemscreen_molecules::DescriptorRecord;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::corpus::admet_corpus;
use crate::pipeline::ScaledPipeline;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AdmetCategory {
    Absorption,
    Distribution,
    Metabolism,
    Excretion,
    Toxicity,
}

impl AdmetCategory {
    pub const ALL: [AdmetCategory; 5] = [
        Self::Absorption,
        Self::Distribution,
        Self::Metabolism,
        Self::Excretion,
        Self::Toxicity,
    ];

    /// Position of this category's target column.
    pub fn index(self) -> usize {
        match self {
            Self::Absorption => 0,
            Self::Distribution => 1,
            Self::Metabolism => 2,
            Self::Excretion => 3,
            Self::Toxicity => 4,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Absorption => "Predicted oral absorption via GI tract (Caco-2 / F%)",
            Self::Distribution => "Volume of distribution / tissue binding estimate",
            Self::Metabolism => "Hepatic metabolic stability (CYP450 clearance)",
            Self::Excretion => "Renal clearance and half-life estimate",
            Self::Toxicity => "Safety score (hERG, AMES, hepatotoxicity composite)",
        }
    }

    pub fn thresholds(self, t: &AdmetThresholds) -> TierThresholds {
        match self {
            Self::Absorption => t.absorption,
            Self::Distribution => t.distribution,
            Self::Metabolism => t.metabolism,
            Self::Excretion => t.excretion,
            Self::Toxicity => t.toxicity,
        }
    }
}

impl fmt::Display for AdmetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrafficLight {
    Red,
    Amber,
    Green,
}

/// Green at or above `good`, amber at or above `moderate`, red below.
pub fn tier(score: f64, thresholds: &TierThresholds) -> TrafficLight {
    if score >= thresholds.good {
        TrafficLight::Green
    } else if score >= thresholds.moderate {
        TrafficLight::Amber
    } else {
        TrafficLight::Red
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdmetPrediction {
    pub scores: BTreeMap<AdmetCategory, f64>,
    /// Mean of the five scores, 3 dp.
    pub overall: f64,
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

#[derive(Debug, Clone)]
pub struct AdmetModel {
    pipeline: ScaledPipeline,
    thresholds: AdmetThresholds,
}

impl AdmetModel {
    /// Fit one booster per category; the five fits run on the rayon pool.
    pub fn train(cfg: &AdmetConfig) -> Result<Self> {
        cfg.thresholds.validate()?;
        let corpus = admet_corpus(cfg.n_samples, cfg.seed)?;
        let pipeline = ScaledPipeline::fit_multi(&corpus.features, &corpus.targets, &cfg.booster)?;
        if pipeline.n_outputs() != AdmetCategory::ALL.len() {
            return Err(ChemscreenError::Model(format!(
                "expected {} ADMET outputs, fitted {}",
                AdmetCategory::ALL.len(),
                pipeline.n_outputs()
            )));
        }
        info!(
            n_samples = cfg.n_samples,
            n_trees = cfg.booster.n_estimators,
            "ADMET regressor trained"
        );
        Ok(Self {
            pipeline,
            thresholds: cfg.thresholds.clone(),
        })
    }

    pub fn thresholds(&self) -> &AdmetThresholds {
        &self.thresholds
    }

    pub fn predict(&self, descriptors: &DescriptorRecord) -> Result<AdmetPrediction> {
        descriptors.validate()?;
        let raw = self.pipeline.predict(&descriptors.admet_features())?;

        let scores: BTreeMap<AdmetCategory, f64> = AdmetCategory::ALL
            .iter()
            .map(|&c| (c, round3(raw[c.index()].clamp(0.0, 1.0))))
            .collect();
        let overall = round3(scores.values().sum::<f64>() / scores.len() as f64);

        debug!(name = descriptors.name(), overall, "ADMET predicted");
        Ok(AdmetPrediction { scores, overall })
    }

    pub fn traffic_light(
        &self,
        scores: &BTreeMap<AdmetCategory, f64>,
    ) -> BTreeMap<AdmetCategory, TrafficLight> {
        scores
            .iter()
            .map(|(&c, &score)| (c, tier(score, &c.thresholds(&self.thresholds))))
            .collect()
    }
}
