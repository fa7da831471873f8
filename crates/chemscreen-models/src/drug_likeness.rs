//! Drug-likeness classifier: drug-like (1) vs decoy (0).

use std::fmt;

use chemscreen_common::{DrugLikenessConfig, Result};
use chemscreen_molecules::descriptors::CLASSIFIER_FEATURES;
use chemscreen_molecules::DescriptorRecord;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::booster::Loss;
use crate::corpus::{classifier_corpus, FeatureNoise};
use crate::pipeline::ScaledPipeline;
use crate::validation::cross_val_accuracy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrugLikenessLabel {
    #[serde(rename = "Drug-Like")]
    DrugLike,
    #[serde(rename = "Non Drug-Like")]
    NonDrugLike,
}

impl fmt::Display for DrugLikenessLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DrugLike => write!(f, "Drug-Like"),
            Self::NonDrugLike => write!(f, "Non Drug-Like"),
        }
    }
}

/// Confidence tier of a drug-like call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Confidence {
    Low,
    Moderate,
    High,
}

impl Confidence {
    pub fn from_probability(p: f64) -> Self {
        if p >= 0.75 {
            Self::High
        } else if p >= 0.5 {
            Self::Moderate
        } else {
            Self::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrugLikenessPrediction {
    /// P(drug-like), rounded to 4 dp.
    pub probability: f64,
    pub label: DrugLikenessLabel,
    pub confidence: Confidence,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedPrediction {
    pub name: String,
    #[serde(flatten)]
    pub prediction: DrugLikenessPrediction,
}

impl DrugLikenessPrediction {
    /// Label and confidence are read off the rounded probability, so the
    /// three reported fields always agree.
    pub fn from_probability(p: f64) -> Self {
        let probability = round4(p);
        let label = if probability >= 0.5 {
            DrugLikenessLabel::DrugLike
        } else {
            DrugLikenessLabel::NonDrugLike
        };
        Self {
            probability,
            label,
            confidence: Confidence::from_probability(probability),
        }
    }
}

fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}

#[derive(Debug, Clone)]
pub struct DrugLikenessModel {
    pipeline: ScaledPipeline,
    cv_accuracy: Option<f64>,
    importances: Vec<f64>,
}

impl DrugLikenessModel {
    /// Generate the synthetic corpus, fit the pipeline and record diagnostics.
    pub fn train(cfg: &DrugLikenessConfig) -> Result<Self> {
        let noise = (cfg.noise_std > 0.0).then_some(FeatureNoise {
            seed: cfg.noise_seed,
            std: cfg.noise_std,
        });
        let corpus = classifier_corpus(cfg.n_samples, cfg.seed, noise)?;

        let pipeline =
            ScaledPipeline::fit(&corpus.features, &corpus.labels, Loss::BinomialDeviance, &cfg.booster)?;

        let cv_accuracy = if cfg.cv_folds >= 2 {
            let acc = cross_val_accuracy(&corpus.features, &corpus.labels, cfg.cv_folds, &cfg.booster)?;
            Some(round4(acc))
        } else {
            None
        };

        let importances = pipeline
            .estimators()
            .first()
            .map(|e| e.feature_importances().iter().map(|&v| round4(v)).collect())
            .unwrap_or_default();

        info!(
            n_samples = corpus.len(),
            n_trees = cfg.booster.n_estimators,
            cv_accuracy = ?cv_accuracy,
            "Drug-likeness classifier trained"
        );

        Ok(Self { pipeline, cv_accuracy, importances })
    }

    pub fn predict(&self, descriptors: &DescriptorRecord) -> Result<DrugLikenessPrediction> {
        descriptors.validate()?;
        let p = self.pipeline.predict(&descriptors.classifier_features())?[0];
        let prediction = DrugLikenessPrediction::from_probability(p);
        debug!(
            name = descriptors.name(),
            probability = prediction.probability,
            label = %prediction.label,
            "drug-likeness predicted"
        );
        Ok(prediction)
    }

    pub fn predict_batch(&self, records: &[DescriptorRecord]) -> Result<Vec<NamedPrediction>> {
        records
            .iter()
            .map(|d| {
                Ok(NamedPrediction {
                    name: d.name().to_string(),
                    prediction: self.predict(d)?,
                })
            })
            .collect()
    }

    pub fn feature_names(&self) -> &'static [&'static str] {
        &CLASSIFIER_FEATURES
    }

    /// Mean stratified k-fold accuracy (4 dp), if cross-validation ran.
    pub fn cv_accuracy(&self) -> Option<f64> {
        self.cv_accuracy
    }

    /// Impurity importances (4 dp), aligned with [`Self::feature_names`].
    pub fn importances(&self) -> &[f64] {
        &self.importances
    }

    pub fn named_importances(&self) -> Vec<(&'static str, f64)> {
        CLASSIFIER_FEATURES.iter().copied().zip(self.importances.iter().copied()).collect()
    }
}
