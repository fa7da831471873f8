//! End-to-end training of both models on reduced corpora.

use std::sync::OnceLock;

use chemscreen_common::{Config, TierThresholds};
use chemscreen_models::admet::tier;
use chemscreen_models::{AdmetCategory, AdmetModel, DrugLikenessLabel, DrugLikenessModel, TrafficLight};
use chemscreen_molecules::compound_library;
use chemscreen_test_utils::{aspirin, blank, fast_config, oversized, record_from_json};

struct Trained {
    drug: DrugLikenessModel,
    admet: AdmetModel,
}

fn trained() -> &'static Trained {
    static MODELS: OnceLock<Trained> = OnceLock::new();
    MODELS.get_or_init(|| {
        let cfg = fast_config();
        Trained {
            drug: DrugLikenessModel::train(&cfg.drug_likeness).unwrap(),
            admet: AdmetModel::train(&cfg.admet).unwrap(),
        }
    })
}

#[test]
fn test_probability_bounded_and_label_consistent() {
    let model = &trained().drug;
    for compound in compound_library() {
        let p = model.predict(&compound.descriptors()).unwrap();
        assert!((0.0..=1.0).contains(&p.probability), "{}", compound.name);
        let expect = if p.probability >= 0.5 {
            DrugLikenessLabel::DrugLike
        } else {
            DrugLikenessLabel::NonDrugLike
        };
        assert_eq!(p.label, expect, "{}", compound.name);
    }
}

#[test]
fn test_classifier_separates_obvious_cases() {
    let model = &trained().drug;
    let good = model.predict(&aspirin()).unwrap();
    let bad = model.predict(&oversized()).unwrap();
    assert!(good.probability > bad.probability);
    assert_eq!(bad.label, DrugLikenessLabel::NonDrugLike);
}

#[test]
fn test_diagnostics_recorded() {
    let model = &trained().drug;
    let acc = model.cv_accuracy().expect("cv enabled in fast config");
    assert!(acc > 0.8 && acc <= 1.0, "{acc}");

    assert_eq!(model.importances().len(), model.feature_names().len());
    let total: f64 = model.importances().iter().sum();
    assert!((total - 1.0).abs() < 1e-3, "{total}");
    assert_eq!(model.named_importances()[0].0, "mw");
}

#[test]
fn test_batch_tags_names() {
    let model = &trained().drug;
    let unnamed = record_from_json(r#"{"mw": 250, "logp": 2.0}"#);
    let batch = model.predict_batch(&[aspirin(), unnamed]).unwrap();
    assert_eq!(batch[0].name, "Aspirin");
    assert_eq!(batch[1].name, "?");
    assert_eq!(batch[0].prediction, model.predict(&aspirin()).unwrap());
}

#[test]
fn test_non_finite_descriptor_rejected() {
    let model = &trained().drug;
    let rec = aspirin().with_logp(f64::NAN);
    assert!(model.predict(&rec).is_err());
    assert!(trained().admet.predict(&rec).is_err());
}

#[test]
fn test_admet_scores_bounded_and_overall_is_mean() {
    let model = &trained().admet;
    for compound in compound_library() {
        let pred = model.predict(&compound.descriptors()).unwrap();
        assert_eq!(pred.scores.len(), 5);
        for (category, score) in &pred.scores {
            assert!((0.0..=1.0).contains(score), "{} {category}", compound.name);
        }
        let mean = pred.scores.values().sum::<f64>() / 5.0;
        assert!((pred.overall - mean).abs() <= 0.0005 + 1e-12, "{}", compound.name);
    }
}

#[test]
fn test_traffic_lights_cover_every_category() {
    let model = &trained().admet;
    let pred = model.predict(&blank("Defaults")).unwrap();
    let lights = model.traffic_light(&pred.scores);
    let keys: Vec<AdmetCategory> = lights.keys().copied().collect();
    assert_eq!(keys, AdmetCategory::ALL.to_vec());
}

#[test]
fn test_custom_thresholds_drive_traffic_lights() {
    let defaults = fast_config().admet;
    let mut cfg = defaults.clone();
    // Scores are clipped to [0, 1] and these targets never reach 1.0.
    cfg.thresholds.distribution = TierThresholds::new(1.0, 0.0);
    cfg.thresholds.absorption = TierThresholds::new(0.0, 0.0);
    cfg.thresholds.toxicity = TierThresholds::new(1.0, 1.0);
    let model = AdmetModel::train(&cfg).unwrap();

    let pred = model.predict(&blank("Defaults")).unwrap();
    assert_eq!(pred, trained().admet.predict(&blank("Defaults")).unwrap());

    let lights = model.traffic_light(&pred.scores);
    assert_eq!(lights[&AdmetCategory::Distribution], TrafficLight::Amber);
    assert_eq!(lights[&AdmetCategory::Absorption], TrafficLight::Green);
    assert_eq!(lights[&AdmetCategory::Toxicity], TrafficLight::Red);
    for category in [AdmetCategory::Metabolism, AdmetCategory::Excretion] {
        let expected = tier(
            pred.scores[&category],
            &category.thresholds(&defaults.thresholds),
        );
        assert_eq!(lights[&category], expected, "{category}");
    }
}

#[test]
fn test_identical_config_gives_identical_predictions() {
    let cfg: Config = fast_config();
    let again = DrugLikenessModel::train(&cfg.drug_likeness).unwrap();
    let again_admet = AdmetModel::train(&cfg.admet).unwrap();
    for compound in compound_library().iter().take(5) {
        let d = compound.descriptors();
        assert_eq!(trained().drug.predict(&d).unwrap(), again.predict(&d).unwrap());
        assert_eq!(trained().admet.predict(&d).unwrap(), again_admet.predict(&d).unwrap());
    }
    assert_eq!(trained().drug.cv_accuracy(), again.cv_accuracy());
}
