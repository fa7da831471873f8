//! Composite screening score.
//!
//! score = w_p·n(pIC50) + w_q·QED + w_l·(LogP closeness to 2.5)
//!       + w_t·(low TPSA bonus) + w_m·(low MW bonus) − P + jitter
//!
//! where P deducts a flat penalty for each exceeded rule-of-five threshold
//! (MW > 500, LogP > 5, TPSA > 140) and the jitter is drawn from a generator
//! seeded by the compound name, so ties break identically on every run.
//! The result is clipped to [0.01, 0.99] and rounded to 4 dp.

use chemscreen_molecules::{CompoundEntry, DescriptorRecord};
use rand::{rngs::StdRng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::normalise::normalize;
use crate::weights::ScreeningWeights;

/// Potency assumed when a candidate carries no IC50 (nM).
pub const DEFAULT_IC50_NM: f64 = 500.0;

const MIN_SCORE: f64 = 0.01;
const MAX_SCORE: f64 = 0.99;

/// Lower bound applied to IC50 before taking the logarithm (nM).
const MIN_IC50_NM: f64 = 0.001;

/// Descriptors plus measured potency for one compound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningCandidate {
    pub descriptors: DescriptorRecord,
    #[serde(default)]
    pub ic50_nm: Option<f64>,
}

impl ScreeningCandidate {
    pub fn new(descriptors: DescriptorRecord, ic50_nm: Option<f64>) -> Self {
        Self { descriptors, ic50_nm }
    }

    pub fn ic50_nm(&self) -> f64 {
        self.ic50_nm.unwrap_or(DEFAULT_IC50_NM)
    }
}

impl From<&CompoundEntry> for ScreeningCandidate {
    fn from(c: &CompoundEntry) -> Self {
        Self::new(c.descriptors(), Some(c.ic50_nm))
    }
}

/// Individual terms of one score, for display and debugging.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub pic50: f64,
    pub potency: f64,
    pub weighted_sum: f64,
    pub penalty: f64,
    pub jitter: f64,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoredCompound {
    #[serde(flatten)]
    pub compound: CompoundEntry,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScreeningReport {
    pub target: Option<String>,
    pub results: Vec<ScoredCompound>,
}

/// FNV-1a, 64-bit. Stable across platforms and releases, unlike the std hasher.
pub fn fnv1a_64(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    bytes.iter().fold(OFFSET_BASIS, |hash, b| {
        (hash ^ u64::from(*b)).wrapping_mul(PRIME)
    })
}

/// Deterministic N(0, std) draw keyed on the compound name.
pub fn name_jitter(name: &str, std: f64) -> f64 {
    let seed = fnv1a_64(name.as_bytes()) % 1000;
    let mut rng = StdRng::seed_from_u64(seed);
    match Normal::new(0.0, std) {
        Ok(dist) => dist.sample(&mut rng),
        Err(_) => 0.0,
    }
}

/// Convert IC50 in nanomolar to pIC50 = −log10(IC50 in molar).
pub fn pic50_from_nm(ic50_nm: f64) -> f64 {
    -(ic50_nm.max(MIN_IC50_NM) * 1e-9).log10()
}

fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}

/// Scorer for evaluating and ranking library compounds.
#[derive(Debug, Clone, Default)]
pub struct CompositeScorer {
    weights: ScreeningWeights,
}

impl CompositeScorer {
    pub fn new(weights: ScreeningWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScreeningWeights {
        &self.weights
    }

    pub fn breakdown(&self, candidate: &ScreeningCandidate) -> ScoreBreakdown {
        let d = &candidate.descriptors;
        let w = &self.weights;
        let (qed, logp, tpsa, mw) = (d.qed(), d.logp(), d.tpsa(), d.mw());

        let pic50 = pic50_from_nm(candidate.ic50_nm());
        // pIC50 4 (100 µM) .. 12 (1 pM)
        let potency = normalize(pic50, 4.0, 12.0, false);

        let mut penalty = 0.0;
        if mw > 500.0 {
            penalty += w.ro5_penalty;
        }
        if logp > 5.0 {
            penalty += w.ro5_penalty;
        }
        if tpsa > 140.0 {
            penalty += w.ro5_penalty;
        }

        let weighted_sum = w.potency * potency
            + w.qed * qed
            + w.logp * ((5.0 - (logp - 2.5).abs()) / 5.0).max(0.0)
            + w.tpsa * ((140.0 - tpsa) / 140.0).max(0.0)
            + w.mw * ((500.0 - mw) / 500.0).max(0.0);

        let jitter = name_jitter(d.name(), w.jitter_std);
        let raw = weighted_sum - penalty + jitter;
        let score = if raw.is_finite() {
            round4(raw.clamp(MIN_SCORE, MAX_SCORE))
        } else {
            MIN_SCORE
        };

        ScoreBreakdown { pic50, potency, weighted_sum, penalty, jitter, score }
    }

    /// Composite score in [0.01, 0.99].
    pub fn score(&self, candidate: &ScreeningCandidate) -> f64 {
        let b = self.breakdown(candidate);
        debug!(name = candidate.descriptors.name(), score = b.score, penalty = b.penalty, "scored candidate");
        b.score
    }

    /// Score every library compound and sort by score, best first.
    /// Equal scores keep library order.
    pub fn rank_library(&self, library: &[CompoundEntry]) -> Vec<ScoredCompound> {
        let mut scored: Vec<ScoredCompound> = library
            .iter()
            .map(|c| ScoredCompound {
                compound: c.clone(),
                score: self.score(&ScreeningCandidate::from(c)),
            })
            .collect();
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored
    }

    /// Top-N of the ranked library. The requested target is echoed back;
    /// scoring does not depend on it.
    pub fn screen(
        &self,
        library: &[CompoundEntry],
        target: Option<&str>,
        top_n: usize,
    ) -> ScreeningReport {
        let mut results = self.rank_library(library);
        results.truncate(top_n);
        ScreeningReport {
            target: target.map(str::to_string),
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str, mw: f64, logp: f64, tpsa: f64, qed: f64, ic50: f64) -> ScreeningCandidate {
        ScreeningCandidate::new(
            DescriptorRecord::core(mw, logp, 1, 4, tpsa, 3).with_qed(qed).with_name(name),
            Some(ic50),
        )
    }

    fn no_jitter() -> CompositeScorer {
        CompositeScorer::new(ScreeningWeights { jitter_std: 0.0, ..Default::default() })
    }

    #[test]
    fn test_fnv1a_reference_vectors() {
        assert_eq!(fnv1a_64(b""), 0xcbf29ce484222325);
        assert_eq!(fnv1a_64(b"a"), 0xaf63dc4c8601ec8c);
    }

    #[test]
    fn test_pic50_conversion() {
        assert!((pic50_from_nm(1.0) - 9.0).abs() < 1e-9);
        assert!((pic50_from_nm(1000.0) - 6.0).abs() < 1e-9);
        // floor at 0.001 nM → pIC50 12
        assert!((pic50_from_nm(0.0) - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_score_without_jitter_matches_formula() {
        // pIC50 = 8 → potency 0.5
        let c = candidate("Probe", 250.0, 2.5, 70.0, 0.6, 10.0);
        let b = no_jitter().breakdown(&c);
        let expected = 0.45 * 0.5 + 0.25 * 0.6 + 0.15 * 1.0 + 0.10 * 0.5 + 0.05 * 0.5;
        assert!((b.weighted_sum - expected).abs() < 1e-9);
        assert_eq!(b.penalty, 0.0);
        assert_eq!(b.score, round4(expected));
    }

    #[test]
    fn test_ro5_penalties_accumulate() {
        let c = candidate("Heavy", 650.0, 6.5, 180.0, 0.3, 10.0);
        let b = no_jitter().breakdown(&c);
        assert!((b.penalty - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_score_is_clipped() {
        let scorer = CompositeScorer::default();
        let worst = candidate("Worst", 1200.0, 12.0, 300.0, 0.0, 1e9);
        let best = ScreeningCandidate::new(
            DescriptorRecord::core(1.0, 2.5, 0, 0, 0.0, 0).with_qed(1.0).with_name("Best"),
            Some(1e-6),
        );
        assert_eq!(scorer.score(&worst), 0.01);
        assert!(scorer.score(&best) <= 0.99);
    }

    #[test]
    fn test_jitter_is_deterministic_per_name() {
        let a = name_jitter("Aspirin", 0.02);
        let b = name_jitter("Aspirin", 0.02);
        assert_eq!(a, b);
        assert_eq!(name_jitter("Aspirin", 0.0), 0.0);
    }

    #[test]
    fn test_missing_potency_defaults_to_500_nm() {
        let c = ScreeningCandidate::new(DescriptorRecord::new().with_name("Blank"), None);
        let b = no_jitter().breakdown(&c);
        assert!((b.pic50 - pic50_from_nm(500.0)).abs() < 1e-12);
    }
}
