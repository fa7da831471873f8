//! Configuration loading for chemscreen.
//! Reads chemscreen.toml from the current directory or the path in the CHEMSCREEN_CONFIG env var.
//! YAML and JSON files are accepted as well, picked by file extension.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{ChemscreenError, Result};

pub const CONFIG_ENV_VAR: &str = "CHEMSCREEN_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "chemscreen.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub drug_likeness: DrugLikenessConfig,
    #[serde(default)]
    pub admet: AdmetConfig,
    #[serde(default)]
    pub screening: ScreeningConfig,
}

// ── Gradient boosting ────────────────────────────────────────────────────────

/// Hyperparameters shared by the boosted classifier and regressor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoosterParams {
    pub n_estimators: usize,
    pub max_depth: usize,
    pub learning_rate: f64,
    #[serde(default = "default_subsample")]
    pub subsample: f64,
    #[serde(default = "default_min_samples_leaf")]
    pub min_samples_leaf: usize,
    #[serde(default = "default_booster_seed")]
    pub seed: u64,
}

fn default_subsample()        -> f64   { 0.85 }
fn default_min_samples_leaf() -> usize { 1 }
fn default_booster_seed()     -> u64   { 42 }

impl BoosterParams {
    pub fn validate(&self) -> Result<()> {
        if self.n_estimators == 0 {
            return Err(ChemscreenError::Config("n_estimators must be at least 1".into()));
        }
        if self.max_depth == 0 {
            return Err(ChemscreenError::Config("max_depth must be at least 1".into()));
        }
        if !(self.learning_rate > 0.0 && self.learning_rate.is_finite()) {
            return Err(ChemscreenError::Config(format!(
                "learning_rate must be positive, got {}",
                self.learning_rate
            )));
        }
        if !(self.subsample > 0.0 && self.subsample <= 1.0) {
            return Err(ChemscreenError::Config(format!(
                "subsample must lie in (0, 1], got {}",
                self.subsample
            )));
        }
        if self.min_samples_leaf == 0 {
            return Err(ChemscreenError::Config("min_samples_leaf must be at least 1".into()));
        }
        Ok(())
    }
}

// ── Drug-likeness classifier ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrugLikenessConfig {
    /// Total corpus size; half drug-like, half decoys.
    #[serde(default = "default_classifier_samples")]
    pub n_samples: usize,
    #[serde(default = "default_classifier_seed")]
    pub seed: u64,
    /// Seed and std of the Gaussian noise added to every feature before fitting.
    #[serde(default)]
    pub noise_seed: u64,
    #[serde(default = "default_noise_std")]
    pub noise_std: f64,
    #[serde(default = "default_cv_folds")]
    pub cv_folds: usize,
    #[serde(default = "default_classifier_booster")]
    pub booster: BoosterParams,
}

fn default_classifier_samples() -> usize { 1500 }
fn default_classifier_seed()    -> u64   { 42 }
fn default_noise_std()          -> f64   { 0.01 }
fn default_cv_folds()           -> usize { 5 }

fn default_classifier_booster() -> BoosterParams {
    BoosterParams {
        n_estimators: 200,
        max_depth: 4,
        learning_rate: 0.08,
        subsample: 0.85,
        min_samples_leaf: 5,
        seed: 42,
    }
}

impl Default for DrugLikenessConfig {
    fn default() -> Self {
        Self {
            n_samples: default_classifier_samples(),
            seed: default_classifier_seed(),
            noise_seed: 0,
            noise_std: default_noise_std(),
            cv_folds: default_cv_folds(),
            booster: default_classifier_booster(),
        }
    }
}

// ── ADMET regressor ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdmetConfig {
    #[serde(default = "default_admet_samples")]
    pub n_samples: usize,
    #[serde(default = "default_admet_seed")]
    pub seed: u64,
    #[serde(default = "default_admet_booster")]
    pub booster: BoosterParams,
    #[serde(default)]
    pub thresholds: AdmetThresholds,
}

fn default_admet_samples() -> usize { 2000 }
fn default_admet_seed()    -> u64   { 7 }

fn default_admet_booster() -> BoosterParams {
    BoosterParams {
        n_estimators: 150,
        max_depth: 4,
        learning_rate: 0.1,
        subsample: 0.85,
        min_samples_leaf: 1,
        seed: 42,
    }
}

impl Default for AdmetConfig {
    fn default() -> Self {
        Self {
            n_samples: default_admet_samples(),
            seed: default_admet_seed(),
            booster: default_admet_booster(),
            thresholds: AdmetThresholds::default(),
        }
    }
}

/// Good / moderate cutoffs splitting a score axis into green, amber and red.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierThresholds {
    pub good: f64,
    pub moderate: f64,
}

impl TierThresholds {
    pub const fn new(good: f64, moderate: f64) -> Self {
        Self { good, moderate }
    }

    pub fn validate(&self, category: &str) -> Result<()> {
        let ordered = 0.0 <= self.moderate && self.moderate <= self.good && self.good <= 1.0;
        if !ordered {
            return Err(ChemscreenError::Config(format!(
                "{category} thresholds must satisfy 0 <= moderate <= good <= 1 (good={}, moderate={})",
                self.good, self.moderate
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdmetThresholds {
    #[serde(default = "default_absorption")]
    pub absorption: TierThresholds,
    #[serde(default = "default_distribution")]
    pub distribution: TierThresholds,
    #[serde(default = "default_metabolism")]
    pub metabolism: TierThresholds,
    #[serde(default = "default_excretion")]
    pub excretion: TierThresholds,
    #[serde(default = "default_toxicity")]
    pub toxicity: TierThresholds,
}

fn default_absorption()   -> TierThresholds { TierThresholds::new(0.6, 0.35) }
fn default_distribution() -> TierThresholds { TierThresholds::new(0.5, 0.3) }
fn default_metabolism()   -> TierThresholds { TierThresholds::new(0.65, 0.4) }
fn default_excretion()    -> TierThresholds { TierThresholds::new(0.55, 0.3) }
fn default_toxicity()     -> TierThresholds { TierThresholds::new(0.65, 0.4) }

impl Default for AdmetThresholds {
    fn default() -> Self {
        Self {
            absorption: default_absorption(),
            distribution: default_distribution(),
            metabolism: default_metabolism(),
            excretion: default_excretion(),
            toxicity: default_toxicity(),
        }
    }
}

impl AdmetThresholds {
    pub fn validate(&self) -> Result<()> {
        self.absorption.validate("Absorption")?;
        self.distribution.validate("Distribution")?;
        self.metabolism.validate("Metabolism")?;
        self.excretion.validate("Excretion")?;
        self.toxicity.validate("Toxicity")
    }
}

// ── Composite screening score ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningConfig {
    #[serde(default = "default_potency_weight")]
    pub potency_weight: f64,
    #[serde(default = "default_qed_weight")]
    pub qed_weight: f64,
    #[serde(default = "default_logp_weight")]
    pub logp_weight: f64,
    #[serde(default = "default_tpsa_weight")]
    pub tpsa_weight: f64,
    #[serde(default = "default_mw_weight")]
    pub mw_weight: f64,
    /// Flat deduction per exceeded rule-of-five threshold.
    #[serde(default = "default_ro5_penalty")]
    pub ro5_penalty: f64,
    #[serde(default = "default_jitter_std")]
    pub jitter_std: f64,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_potency_weight() -> f64   { 0.45 }
fn default_qed_weight()     -> f64   { 0.25 }
fn default_logp_weight()    -> f64   { 0.15 }
fn default_tpsa_weight()    -> f64   { 0.10 }
fn default_mw_weight()      -> f64   { 0.05 }
fn default_ro5_penalty()    -> f64   { 0.1 }
fn default_jitter_std()     -> f64   { 0.02 }
fn default_top_n()          -> usize { 10 }

impl Default for ScreeningConfig {
    fn default() -> Self {
        Self {
            potency_weight: default_potency_weight(),
            qed_weight: default_qed_weight(),
            logp_weight: default_logp_weight(),
            tpsa_weight: default_tpsa_weight(),
            mw_weight: default_mw_weight(),
            ro5_penalty: default_ro5_penalty(),
            jitter_std: default_jitter_std(),
            top_n: default_top_n(),
        }
    }
}

impl ScreeningConfig {
    pub fn validate(&self) -> Result<()> {
        let weights = [
            self.potency_weight,
            self.qed_weight,
            self.logp_weight,
            self.tpsa_weight,
            self.mw_weight,
            self.ro5_penalty,
            self.jitter_std,
        ];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ChemscreenError::Config(
                "screening weights, penalty and jitter must be finite and non-negative".into(),
            ));
        }
        Ok(())
    }
}

// ── Loading ──────────────────────────────────────────────────────────────────

impl Config {
    /// Resolve and load the configuration.
    ///
    /// Order: explicit path, then `CHEMSCREEN_CONFIG`, then `chemscreen.toml`
    /// in the working directory. Falls back to built-in defaults when no file
    /// is found on the implicit paths.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_path(path);
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return Self::from_path(Path::new(&path));
        }

        let local = PathBuf::from(DEFAULT_CONFIG_FILE);
        if local.exists() {
            return Self::from_path(&local);
        }

        warn!("No {} found, using built-in defaults", DEFAULT_CONFIG_FILE);
        Ok(Self::default())
    }

    /// Load from a file, choosing the format by extension (toml, yaml/yml, json).
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ChemscreenError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        let config: Config = match ext.as_str() {
            "yaml" | "yml" => serde_yaml::from_str(&content)?,
            "json" => serde_json::from_str(&content)?,
            _ => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.drug_likeness.booster.validate()?;
        self.admet.booster.validate()?;
        self.admet.thresholds.validate()?;
        self.screening.validate()?;

        if self.drug_likeness.n_samples < 2 * self.drug_likeness.cv_folds.max(1) {
            return Err(ChemscreenError::Config(format!(
                "drug_likeness.n_samples ({}) too small for {} folds",
                self.drug_likeness.n_samples, self.drug_likeness.cv_folds
            )));
        }
        if self.drug_likeness.cv_folds == 1 {
            return Err(ChemscreenError::Config(
                "drug_likeness.cv_folds must be 0 (disabled) or at least 2".into(),
            ));
        }
        if !(self.drug_likeness.noise_std.is_finite() && self.drug_likeness.noise_std >= 0.0) {
            return Err(ChemscreenError::Config(format!(
                "drug_likeness.noise_std must be finite and non-negative, got {}",
                self.drug_likeness.noise_std
            )));
        }
        if self.admet.n_samples == 0 {
            return Err(ChemscreenError::Config("admet.n_samples must be positive".into()));
        }
        Ok(())
    }
}
