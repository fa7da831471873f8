//! Shared fixtures for chemscreen integration tests.
//!
//! Training with the production defaults takes seconds; [`fast_config`]
//! shrinks corpora and ensembles so model tests stay quick while keeping the
//! same code paths.

use chemscreen_common::{AdmetConfig, BoosterParams, Config, DrugLikenessConfig};
use chemscreen_molecules::DescriptorRecord;

pub fn aspirin() -> DescriptorRecord {
    DescriptorRecord::core(180.16, 1.19, 1, 4, 63.6, 3)
        .with_qed(0.55)
        .with_name("Aspirin")
}

/// Violates every Lipinski and Veber rule.
pub fn oversized() -> DescriptorRecord {
    DescriptorRecord::core(900.0, 10.0, 6, 11, 200.0, 11)
        .with_qed(0.1)
        .with_name("Oversized")
}

/// Record carrying nothing but a name; every accessor falls back to defaults.
pub fn blank(name: &str) -> DescriptorRecord {
    DescriptorRecord::new().with_name(name)
}

fn fast_booster(n_estimators: usize, min_samples_leaf: usize) -> BoosterParams {
    BoosterParams {
        n_estimators,
        max_depth: 3,
        learning_rate: 0.2,
        subsample: 0.85,
        min_samples_leaf,
        seed: 42,
    }
}

pub fn fast_config() -> Config {
    Config {
        drug_likeness: DrugLikenessConfig {
            n_samples: 300,
            cv_folds: 3,
            booster: fast_booster(30, 5),
            ..DrugLikenessConfig::default()
        },
        admet: AdmetConfig {
            n_samples: 400,
            booster: fast_booster(40, 1),
            ..AdmetConfig::default()
        },
        ..Config::default()
    }
}

/// Parse a JSON descriptor mapping, panicking on malformed fixtures.
pub fn record_from_json(json: &str) -> DescriptorRecord {
    serde_json::from_str(json).expect("fixture JSON must be a descriptor mapping")
}
