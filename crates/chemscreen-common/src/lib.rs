//! chemscreen-common: Shared error type and configuration used across all chemscreen crates.

pub mod error;
pub mod config;

// Re-export commonly used types
pub use error::{ChemscreenError, Result};
pub use config::{
    AdmetConfig, AdmetThresholds, BoosterParams, Config, DrugLikenessConfig, ScreeningConfig,
    TierThresholds,
};
