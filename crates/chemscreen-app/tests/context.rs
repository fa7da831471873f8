//! Screening context built from a fast configuration.

use std::io::Write;
use std::sync::OnceLock;

use chemscreen_app::{parse_records, ScreeningContext};
use chemscreen_models::{AdmetCategory, DrugLikenessLabel};
use chemscreen_test_utils::{aspirin, fast_config, oversized};
use pretty_assertions::assert_eq;

fn context() -> &'static ScreeningContext {
    static CTX: OnceLock<ScreeningContext> = OnceLock::new();
    CTX.get_or_init(|| ScreeningContext::new(fast_config()).unwrap())
}

#[test]
fn test_analyze_aspirin() {
    let report = context().analyze(&aspirin()).unwrap();
    assert_eq!(report.name, "Aspirin");
    assert_eq!(report.rules.lipinski.violations, 0);
    assert!(report.rules.lipinski.passed);
    assert_eq!(report.rules.lipinski.label.as_deref(), Some("Drug-Like"));
    assert_eq!(report.drug_likeness.label, DrugLikenessLabel::DrugLike);
    assert_eq!(report.traffic_lights.len(), AdmetCategory::ALL.len());
}

#[test]
fn test_analyze_oversized_fails_every_rule() {
    let report = context().analyze(&oversized()).unwrap();
    assert_eq!(report.rules.lipinski.violations, 4);
    assert_eq!(report.rules.veber.violations, 2);
    assert_eq!(report.radar.tpsa, 0.0);
}

#[test]
fn test_screen_respects_top_n_and_echoes_target() {
    let ctx = context();
    let report = ctx.screen(Some("EGFR"), Some(3));
    assert_eq!(report.target.as_deref(), Some("EGFR"));
    assert_eq!(report.results.len(), 3);
    assert!(report.results.windows(2).all(|w| w[0].score >= w[1].score));

    let default_n = ctx.screen(None, None);
    assert_eq!(default_n.results.len(), ctx.config().screening.top_n);
}

#[test]
fn test_library_report() {
    let report = context().library_report();
    assert_eq!(report.summary.total_compounds, 20);
    assert_eq!(report.ranked.len(), 20);
    let counted: usize = report.counts_by_target.iter().map(|t| t.count).sum();
    assert_eq!(counted, 20);
    assert!(report.ranked.iter().all(|c| (0.01..=0.99).contains(&c.score)));
}

#[test]
fn test_diagnostics_serialise() {
    let diag = context().diagnostics();
    assert!(diag.cv_accuracy.is_some());
    assert_eq!(diag.feature_importances.len(), 7);
    let json = serde_json::to_value(&diag).unwrap();
    assert_eq!(json["feature_importances"][0]["feature"], "mw");
    assert!(json["admet_descriptions"]["Absorption"].is_string());
}

#[test]
fn test_batch_analysis_from_json() {
    let records = parse_records(
        r#"[{"name": "A", "mw": 250, "logp": 2.1}, {"mw": 900, "logp": 10, "tpsa": 200, "hbd": 6, "hba": 11, "rotbonds": 11}]"#,
    )
    .unwrap();
    let reports = context().analyze_batch(&records).unwrap();
    assert_eq!(reports[0].name, "A");
    assert_eq!(reports[1].name, "?");
    assert_eq!(reports[1].rules.lipinski.label.as_deref(), Some("Not Drug-Like"));
}

#[test]
fn test_invalid_config_file_rejected() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[admet.thresholds.toxicity]\ngood = 0.2\nmoderate = 0.5").unwrap();
    assert!(ScreeningContext::load(Some(file.path())).is_err());
}
