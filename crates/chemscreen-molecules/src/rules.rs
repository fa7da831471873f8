//! Rule-based drug-likeness filters.
//!
//! Each rule set is a fixed list of named threshold predicates. An assessment
//! counts the predicates that fail and compares the tally with the rule set's
//! violation tolerance.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::descriptors::DescriptorRecord;

type Predicate = fn(&DescriptorRecord) -> bool;

const LIPINSKI_RULES: [(&str, Predicate); 4] = [
    ("MW ≤ 500", |d| d.mw() <= 500.0),
    ("LogP ≤ 5", |d| d.logp() <= 5.0),
    ("HBD ≤ 5", |d| d.hbd() <= 5),
    ("HBA ≤ 10", |d| d.hba() <= 10),
];

const VEBER_RULES: [(&str, Predicate); 2] = [
    ("TPSA ≤ 140 Å²", |d| d.tpsa() <= 140.0),
    ("RotBonds ≤ 10", |d| d.rotbonds() <= 10),
];

const GHOSE_RULES: [(&str, Predicate); 4] = [
    ("MW 160–480", |d| (160.0..=480.0).contains(&d.mw())),
    ("LogP −0.4 to 5.6", |d| (-0.4..=5.6).contains(&d.logp())),
    ("HeavyAtoms 20–70", |d| (20..=70).contains(&d.heavy_atoms())),
    ("Molar Refractivity 40–130", |d| (40.0..=130.0).contains(&d.mr())),
];

/// The three rule sets and their violation tolerances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleSet {
    Lipinski,
    Veber,
    Ghose,
}

impl RuleSet {
    /// Maximum number of failed predicates that still counts as a pass.
    pub fn tolerance(self) -> u32 {
        match self {
            RuleSet::Lipinski | RuleSet::Ghose => 1,
            RuleSet::Veber => 0,
        }
    }

    fn rules(self) -> &'static [(&'static str, Predicate)] {
        match self {
            RuleSet::Lipinski => &LIPINSKI_RULES,
            RuleSet::Veber => &VEBER_RULES,
            RuleSet::Ghose => &GHOSE_RULES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleOutcome {
    pub rule: String,
    pub passed: bool,
}

/// Per-rule outcomes plus the violation tally for one rule set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleAssessment {
    pub rules: Vec<RuleOutcome>,
    pub violations: u32,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl RuleAssessment {
    /// Outcome of a single named rule.
    pub fn rule(&self, name: &str) -> Option<bool> {
        self.rules.iter().find(|r| r.rule == name).map(|r| r.passed)
    }
}

/// All three assessments for one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleReport {
    pub lipinski: RuleAssessment,
    pub veber: RuleAssessment,
    pub ghose: RuleAssessment,
}

pub fn assess(rule_set: RuleSet, descriptors: &DescriptorRecord) -> RuleAssessment {
    let rules: Vec<RuleOutcome> = rule_set
        .rules()
        .iter()
        .map(|(name, predicate)| RuleOutcome {
            rule: (*name).to_string(),
            passed: predicate(descriptors),
        })
        .collect();

    let violations = rules.iter().filter(|r| !r.passed).count() as u32;
    let passed = violations <= rule_set.tolerance();
    debug!(?rule_set, violations, passed, "rule assessment for {}", descriptors.name());

    RuleAssessment {
        rules,
        violations,
        passed,
        label: None,
    }
}

/// Lipinski's Rule of Five; tolerates one violation.
pub fn assess_lipinski(descriptors: &DescriptorRecord) -> RuleAssessment {
    let mut assessment = assess(RuleSet::Lipinski, descriptors);
    let label = if assessment.passed { "Drug-Like" } else { "Not Drug-Like" };
    assessment.label = Some(label.to_string());
    assessment
}

/// Veber oral-bioavailability rules; no violations allowed.
pub fn assess_veber(descriptors: &DescriptorRecord) -> RuleAssessment {
    assess(RuleSet::Veber, descriptors)
}

/// Ghose filter; tolerates one violation.
pub fn assess_ghose(descriptors: &DescriptorRecord) -> RuleAssessment {
    assess(RuleSet::Ghose, descriptors)
}

pub fn assess_all(descriptors: &DescriptorRecord) -> RuleReport {
    RuleReport {
        lipinski: assess_lipinski(descriptors),
        veber: assess_veber(descriptors),
        ghose: assess_ghose(descriptors),
    }
}
