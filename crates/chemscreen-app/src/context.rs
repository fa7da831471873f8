//! Process-wide screening state: configuration, trained models and scorer.
//!
//! Built once at startup and then only read, so a `&ScreeningContext` can be
//! handed to any number of callers.

use std::collections::BTreeMap;
use std::path::Path;

use chemscreen_common::{Config, Result};
use chemscreen_models::{
    AdmetCategory, AdmetModel, AdmetPrediction, DrugLikenessModel, DrugLikenessPrediction,
    TrafficLight,
};
use chemscreen_molecules::library::{
    compound_library, counts_by_target, summary_stats, LibrarySummary, SCREENING_TARGETS,
};
use chemscreen_molecules::profile::{radar_profile, RadarProfile};
use chemscreen_molecules::rules::{assess_all, RuleReport};
use chemscreen_molecules::DescriptorRecord;
use chemscreen_ranker::{CompositeScorer, ScoredCompound, ScreeningReport, ScreeningWeights};
use serde::Serialize;
use tracing::{info, warn};

/// Everything known about one descriptor record.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub name: String,
    pub descriptors: DescriptorRecord,
    pub rules: RuleReport,
    pub radar: RadarProfile,
    pub drug_likeness: DrugLikenessPrediction,
    pub admet: AdmetPrediction,
    pub traffic_lights: BTreeMap<AdmetCategory, TrafficLight>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TargetCount {
    pub target: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct LibraryReport {
    pub summary: LibrarySummary,
    pub counts_by_target: Vec<TargetCount>,
    pub ranked: Vec<ScoredCompound>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeatureImportance {
    pub feature: &'static str,
    pub importance: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Diagnostics {
    pub cv_accuracy: Option<f64>,
    pub feature_importances: Vec<FeatureImportance>,
    pub admet_descriptions: BTreeMap<AdmetCategory, &'static str>,
}

pub struct ScreeningContext {
    config: Config,
    drug_model: DrugLikenessModel,
    admet_model: AdmetModel,
    scorer: CompositeScorer,
}

impl ScreeningContext {
    /// Validate the configuration and train both models.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let mut weights = ScreeningWeights::from(&config.screening);
        if !weights.validate() {
            warn!(
                weights = ?weights.as_array(),
                "Screening weights do not sum to 1.0, renormalising"
            );
            weights.normalise();
        }

        let drug_model = DrugLikenessModel::train(&config.drug_likeness)?;
        let admet_model = AdmetModel::train(&config.admet)?;
        info!(compounds = compound_library().len(), "Screening context ready");

        Ok(Self {
            config,
            drug_model,
            admet_model,
            scorer: CompositeScorer::new(weights),
        })
    }

    /// Resolve configuration the usual way (see [`Config::load`]) and build.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        Self::new(Config::load(config_path)?)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn drug_model(&self) -> &DrugLikenessModel {
        &self.drug_model
    }

    pub fn admet_model(&self) -> &AdmetModel {
        &self.admet_model
    }

    pub fn scorer(&self) -> &CompositeScorer {
        &self.scorer
    }

    pub fn analyze(&self, descriptors: &DescriptorRecord) -> Result<AnalysisReport> {
        descriptors.validate()?;
        let drug_likeness = self.drug_model.predict(descriptors)?;
        let admet = self.admet_model.predict(descriptors)?;
        let traffic_lights = self.admet_model.traffic_light(&admet.scores);

        Ok(AnalysisReport {
            name: descriptors.name().to_string(),
            descriptors: descriptors.clone(),
            rules: assess_all(descriptors),
            radar: radar_profile(descriptors),
            drug_likeness,
            admet,
            traffic_lights,
        })
    }

    pub fn analyze_batch(&self, records: &[DescriptorRecord]) -> Result<Vec<AnalysisReport>> {
        records.iter().map(|d| self.analyze(d)).collect()
    }

    pub fn library_report(&self) -> LibraryReport {
        let library = compound_library();
        LibraryReport {
            summary: summary_stats(library),
            counts_by_target: counts_by_target(library)
                .into_iter()
                .map(|(target, count)| TargetCount { target, count })
                .collect(),
            ranked: self.scorer.rank_library(library),
        }
    }

    /// Top-N screening hits. `top_n` falls back to the configured default.
    pub fn screen(&self, target: Option<&str>, top_n: Option<usize>) -> ScreeningReport {
        if let Some(t) = target {
            if !SCREENING_TARGETS.iter().any(|s| s.eq_ignore_ascii_case(t)) {
                warn!(target = t, "Unknown screening target; ranking is target-independent");
            }
        }
        let top_n = top_n.unwrap_or(self.config.screening.top_n);
        self.scorer.screen(compound_library(), target, top_n)
    }

    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics {
            cv_accuracy: self.drug_model.cv_accuracy(),
            feature_importances: self
                .drug_model
                .named_importances()
                .into_iter()
                .map(|(feature, importance)| FeatureImportance { feature, importance })
                .collect(),
            admet_descriptions: AdmetCategory::ALL
                .iter()
                .map(|&c| (c, c.description()))
                .collect(),
        }
    }
}
