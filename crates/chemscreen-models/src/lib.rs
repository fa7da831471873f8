//! chemscreen-models: toy property models trained once per process.
//!
//! Both models learn from synthetic corpora drawn with fixed seeds, so every
//! process start produces the same fitted pipelines:
//! 1. `drug_likeness`: binary gradient-boosted classifier (drug-like vs decoy)
//! 2. `admet`: five-output gradient-boosted regressor with traffic-light tiers

pub mod scaler;
pub mod tree;
pub mod booster;
pub mod pipeline;
pub mod corpus;
pub mod validation;
pub mod drug_likeness;
pub mod admet;

pub use admet::{AdmetCategory, AdmetModel, AdmetPrediction, TrafficLight};
pub use booster::{GradientBooster, Loss};
pub use drug_likeness::{Confidence, DrugLikenessLabel, DrugLikenessModel, DrugLikenessPrediction, NamedPrediction};
pub use pipeline::ScaledPipeline;
