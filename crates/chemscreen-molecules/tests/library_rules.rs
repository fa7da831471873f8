//! Rule assessment over the reference library.

use chemscreen_molecules::library::{compound_library, find_compound};
use chemscreen_molecules::profile::radar_profile;
use chemscreen_molecules::rules::assess_all;
use chemscreen_molecules::DescriptorRecord;

#[test]
fn test_assessments_are_deterministic() {
    for compound in compound_library() {
        let d = compound.descriptors();
        assert_eq!(assess_all(&d), assess_all(&d), "{}", compound.name);
    }
}

#[test]
fn test_atorvastatin_fails_veber_on_rotatable_bonds() {
    let report = assess_all(&find_compound("Atorvastatin").unwrap().descriptors());
    assert!(!report.veber.passed);
    assert_eq!(report.veber.rule("RotBonds ≤ 10"), Some(false));
    // MW and LogP both exceed Ro5
    assert_eq!(report.lipinski.violations, 2);
    assert!(!report.lipinski.passed);
}

#[test]
fn test_known_oral_drugs_pass_lipinski() {
    for name in ["Aspirin", "Ibuprofen", "Paracetamol", "Fluoxetine", "Omeprazole"] {
        let report = assess_all(&find_compound(name).unwrap().descriptors());
        assert!(report.lipinski.passed, "{name} should pass Ro5");
        assert_eq!(report.lipinski.label.as_deref(), Some("Drug-Like"));
    }
}

#[test]
fn test_json_input_round_trips_through_assessors() {
    let rec: DescriptorRecord = serde_json::from_str(
        r#"{"mw": 900, "logp": 10, "tpsa": 200, "hbd": 6, "hba": 11, "rotbonds": 11}"#,
    )
    .unwrap();
    let report = assess_all(&rec);
    assert_eq!(report.lipinski.violations, 4);
    assert_eq!(report.veber.violations, 2);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["lipinski"]["label"], "Not Drug-Like");
    assert!(json["veber"].get("label").is_none());

    let profile = radar_profile(&rec);
    assert_eq!(profile.tpsa, 0.0);
}
