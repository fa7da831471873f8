//! Reference compound library.
//! Known drugs plus four kinase-inhibitor candidates with literature descriptors,
//! potency and oral bioavailability. Read-only for the lifetime of the process.

use serde::Serialize;
use std::collections::HashSet;

use crate::descriptors::DescriptorRecord;

/// One library compound.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompoundEntry {
    pub name: &'static str,
    pub smiles: &'static str,
    pub mw: f64,
    pub logp: f64,
    pub hbd: u32,
    pub hba: u32,
    pub tpsa: f64,
    pub rotbonds: u32,
    pub qed: f64,
    pub drug_like: bool,
    /// Biological target
    pub target: &'static str,
    pub activity: &'static str,
    /// Half-maximal inhibitory concentration (nM)
    pub ic50_nm: f64,
    /// Oral bioavailability (%)
    pub bioavailability: u32,
}

impl CompoundEntry {
    pub fn descriptors(&self) -> DescriptorRecord {
        DescriptorRecord::core(self.mw, self.logp, self.hbd, self.hba, self.tpsa, self.rotbonds)
            .with_qed(self.qed)
            .with_name(self.name)
    }
}

#[allow(clippy::too_many_arguments)]
const fn entry(
    name: &'static str,
    smiles: &'static str,
    mw: f64,
    logp: f64,
    hbd: u32,
    hba: u32,
    tpsa: f64,
    rotbonds: u32,
    qed: f64,
    drug_like: bool,
    target: &'static str,
    activity: &'static str,
    ic50_nm: f64,
    bioavailability: u32,
) -> CompoundEntry {
    CompoundEntry {
        name,
        smiles,
        mw,
        logp,
        hbd,
        hba,
        tpsa,
        rotbonds,
        qed,
        drug_like,
        target,
        activity,
        ic50_nm,
        bioavailability,
    }
}

static KNOWN_DRUGS: [CompoundEntry; 20] = [
    entry("Aspirin", r"CC(=O)Oc1ccccc1C(=O)O", 180.16, 1.19, 1, 4, 63.6, 3, 0.55, true, "COX-1/2", "anti-inflammatory", 50.0, 80),
    entry("Ibuprofen", r"CC(C)Cc1ccc(cc1)C(C)C(=O)O", 206.29, 3.97, 1, 2, 37.3, 4, 0.67, true, "COX-1/2", "anti-inflammatory", 13.0, 100),
    entry("Paracetamol", r"CC(=O)Nc1ccc(O)cc1", 151.16, 0.91, 2, 3, 49.3, 2, 0.59, true, "COX-3", "analgesic", 25.0, 88),
    entry("Caffeine", r"Cn1cnc2c1c(=O)n(c(=O)n2C)C", 194.19, -0.07, 0, 6, 58.4, 0, 0.6, true, "Adenosine receptor", "stimulant", 44000.0, 100),
    entry("Metformin", r"CN(C)C(=N)NC(=N)N", 129.16, -1.43, 4, 5, 91.8, 2, 0.26, true, "AMPK", "antidiabetic", 100000.0, 55),
    entry("Atorvastatin", r"CC(C)c1c(C(=O)Nc2ccccc2F)c(-c2ccccc2)c(-c2ccc(F)cc2)n1CC[C@@H](O)C[C@@H](O)CC(=O)O", 558.64, 6.36, 4, 9, 111.0, 13, 0.45, false, "HMG-CoA reductase", "antihyperlipidemic", 8.2, 14),
    entry("Amlodipine", r"CCOC(=O)C1=C(COCCN)NC(C)=C(C(=O)OC)C1c1ccccc1Cl", 408.88, 3.0, 2, 8, 97.9, 9, 0.56, true, "L-type Ca channel", "antihypertensive", 0.9, 64),
    entry("Omeprazole", r"COc1ccc2[nH]c(S(=O)Cc3ncc(C)c(OC)c3C)nc2c1", 345.42, 2.23, 1, 7, 87.8, 5, 0.72, true, "H+/K+ ATPase", "proton pump inhibitor", 0.5, 65),
    entry("Sildenafil", r"CCCC1=NN(C)C(=O)c2[nH]c(-c3cc(S(=O)(=O)N4CCN(CC4)C)ccc3OCC)c3c(CCC)ccc(=O)nc23", 474.58, 1.9, 1, 9, 113.0, 6, 0.53, false, "PDE5", "vasodilator", 3.5, 40),
    entry("Fluoxetine", r"CNCCC(Oc1ccc(cc1)C(F)(F)F)c1ccccc1", 309.33, 4.05, 1, 2, 21.3, 7, 0.76, true, "SERT", "antidepressant", 25.8, 72),
    entry("Warfarin", r"OC(=O)c1ccccc1/C=C(\C)C(=O)c1ccccc1O", 308.33, 2.7, 1, 5, 63.6, 5, 0.5, true, "Vitamin K epoxide reductase", "anticoagulant", 1.0, 100),
    entry("Tamoxifen", r"CCC(=C(c1ccccc1)c1ccc(OCCN(C)C)cc1)c1ccccc1", 371.51, 6.3, 0, 2, 18.5, 8, 0.48, false, "Estrogen receptor", "antiestrogen", 2.0, 100),
    entry("Dexamethasone", r"C[C@@H]1C[C@H]2[C@@H]3CC(F)c4cc(=O)c(cc4[C@@]3(C)C[C@@H]2[C@@]1(O)C(=O)CO)O", 392.46, 1.83, 3, 7, 105.0, 2, 0.49, false, "Glucocorticoid receptor", "anti-inflammatory", 1.2, 80),
    entry("Ciprofloxacin", r"OC(=O)c1cn(C2CC2)c2cc(N3CCNCC3)c(F)cc2c1=O", 331.34, 0.28, 2, 8, 75.0, 2, 0.74, true, "DNA gyrase / Topoisomerase IV", "antibacterial", 1.0, 70),
    entry("Losartan", r"CCCCc1nc(Cl)c(CO)n1Cc1ccc(-c2ccccc2-c2tetrazol-5-yl)cc1", 422.92, 4.01, 2, 8, 96.5, 7, 0.62, true, "AT1 receptor", "antihypertensive", 20.0, 33),
    entry("Naloxone", r"O=C1CC[C@@H]2c3c(O)ccc4c3[C@@]2(CC1=O)[C@@H](O)CC4N(CC=C)CC=C", 327.37, 1.25, 2, 5, 65.8, 2, 0.33, true, "Opioid receptors", "opioid antagonist", 1.0, 2),
    entry("Compound_A7", r"Cc1ccc(NC(=O)c2ccc(CN3CCN(C)CC3)cc2)cc1Nc1nccc(-c2cccnc2)n1", 493.6, 3.6, 3, 9, 86.2, 7, 0.42, false, "EGFR", "kinase inhibitor", 0.1, 45),
    entry("Compound_B3", r"CN1CCN(c2ccc(Nc3ncc(F)c(Nc4cc(N(C)C)ccc4=O)n3)cc2)CC1", 460.54, 2.9, 3, 9, 78.5, 5, 0.55, true, "ALK", "kinase inhibitor", 0.5, 60),
    entry("Compound_C9", r"O=C(Nc1ccc(Oc2ccc(NC(=O)Nc3ccc(Cl)c(CF3)c3)cc2)cc1)c1ccc[nH]1", 500.89, 5.1, 4, 7, 92.4, 8, 0.38, false, "BRAF", "kinase inhibitor", 18.0, 30),
    entry("Compound_D2", r"CC(=O)Nc1ccc(-c2ccc(NC(=O)c3ccc(N(C)C)cc3)cc2)cc1", 389.46, 2.5, 2, 6, 71.3, 7, 0.63, true, "JAK2", "kinase inhibitor", 5.0, 70),
];

/// Targets offered by the screening query.
pub const SCREENING_TARGETS: [&str; 16] = [
    "COX-1/2", "EGFR", "HER2", "ALK", "BRAF", "MEK",
    "PI3K", "mTOR", "CDK4/6", "PARP", "JAK2", "VEGFR",
    "BCR-ABL", "HDAC", "Proteasome", "Topoisomerase",
];

/// Potency cutoff for the "high activity" tally (nM).
const HIGH_ACTIVITY_IC50_NM: f64 = 100.0;

pub fn compound_library() -> &'static [CompoundEntry] {
    &KNOWN_DRUGS
}

pub fn find_compound(name: &str) -> Option<&'static CompoundEntry> {
    KNOWN_DRUGS.iter().find(|c| c.name.eq_ignore_ascii_case(name))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LibrarySummary {
    pub total_compounds: usize,
    pub drug_like_count: usize,
    pub drug_like_pct: f64,
    pub avg_qed: f64,
    pub high_activity_count: usize,
    pub targets_covered: usize,
}

pub fn summary_stats(library: &[CompoundEntry]) -> LibrarySummary {
    let total = library.len();
    if total == 0 {
        return LibrarySummary {
            total_compounds: 0,
            drug_like_count: 0,
            drug_like_pct: 0.0,
            avg_qed: 0.0,
            high_activity_count: 0,
            targets_covered: 0,
        };
    }

    let drug_like = library.iter().filter(|c| c.drug_like).count();
    let qed_sum: f64 = library.iter().map(|c| c.qed).sum();
    let high_activity = library
        .iter()
        .filter(|c| c.ic50_nm < HIGH_ACTIVITY_IC50_NM)
        .count();
    let targets: HashSet<&str> = library.iter().map(|c| c.target).collect();

    LibrarySummary {
        total_compounds: total,
        drug_like_count: drug_like,
        drug_like_pct: (drug_like as f64 / total as f64 * 1000.0).round() / 10.0,
        avg_qed: (qed_sum / total as f64 * 1000.0).round() / 1000.0,
        high_activity_count: high_activity,
        targets_covered: targets.len(),
    }
}

/// Compound count per biological target, in first-seen order.
pub fn counts_by_target(library: &[CompoundEntry]) -> Vec<(&'static str, usize)> {
    let mut counts: Vec<(&'static str, usize)> = Vec::new();
    for c in library {
        match counts.iter_mut().find(|(t, _)| *t == c.target) {
            Some((_, n)) => *n += 1,
            None => counts.push((c.target, 1)),
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_summary_stats() {
        let stats = summary_stats(compound_library());
        assert_eq!(
            stats,
            LibrarySummary {
                total_compounds: 20,
                drug_like_count: 14,
                drug_like_pct: 70.0,
                avg_qed: 0.542,
                high_activity_count: 18,
                targets_covered: 19,
            }
        );
    }

    #[test]
    fn test_counts_by_target() {
        let counts = counts_by_target(compound_library());
        assert_eq!(counts[0], ("COX-1/2", 2));
        assert_eq!(counts.len(), 19);
        assert_eq!(counts.iter().map(|(_, n)| n).sum::<usize>(), 20);
    }

    #[test]
    fn test_entry_descriptors() {
        let aspirin = find_compound("aspirin").unwrap();
        let d = aspirin.descriptors();
        assert_eq!(d.name(), "Aspirin");
        assert_eq!(d.tpsa(), 63.6);
        assert_eq!(d.qed(), 0.55);
        // fsp3 is not tabulated and falls back
        assert_eq!(d.fsp3(), 0.3);
    }

    #[test]
    fn test_empty_library_summary() {
        assert_eq!(summary_stats(&[]).total_compounds, 0);
    }
}
