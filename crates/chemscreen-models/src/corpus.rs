//! Seeded synthetic training corpora.
//!
//! Neither model has access to measured data. The classifier learns from
//! drug-like rows sampled inside the Lipinski/Veber envelope and decoy rows
//! sampled outside it; the ADMET regressor learns from a single broad
//! population whose targets are hand-written medicinal-chemistry heuristics
//! plus Gaussian noise. Both generators are pure functions of their seed.

use chemscreen_common::{ChemscreenError, Result};
use chemscreen_ranker::normalize;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::admet::AdmetCategory;

/// Binary-labelled rows in classifier feature order.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledCorpus {
    pub features: Vec<Vec<f64>>,
    /// 1.0 for drug-like, 0.0 for decoy.
    pub labels: Vec<f64>,
}

impl LabeledCorpus {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Rows in ADMET feature order plus one target column per category.
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionCorpus {
    pub features: Vec<Vec<f64>>,
    /// Indexed by [`AdmetCategory::index`].
    pub targets: [Vec<f64>; 5],
}

/// Gaussian regularisation noise added to every classifier feature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureNoise {
    pub seed: u64,
    pub std: f64,
}

fn gaussian(std: f64) -> Result<Normal<f64>> {
    Normal::new(0.0, std).map_err(|e| ChemscreenError::Model(format!("invalid noise std {std}: {e}")))
}

fn int(rng: &mut StdRng, lo: u32, hi: u32) -> f64 {
    f64::from(rng.gen_range(lo..hi))
}

fn drug_like_row(rng: &mut StdRng) -> Vec<f64> {
    vec![
        rng.gen_range(150.0..500.0),
        rng.gen_range(-1.0..5.0),
        int(rng, 0, 6),
        int(rng, 0, 11),
        rng.gen_range(20.0..130.0),
        int(rng, 0, 9),
        rng.gen_range(0.4..0.95),
    ]
}

/// Each of mw, logp, hbd, hba and tpsa independently lands above or below
/// the drug-like envelope.
fn decoy_row(rng: &mut StdRng) -> Vec<f64> {
    let mw = if rng.gen_bool(0.5) { rng.gen_range(500.0..900.0) } else { rng.gen_range(50.0..150.0) };
    let logp = if rng.gen_bool(0.5) { rng.gen_range(5.0..12.0) } else { rng.gen_range(-5.0..-1.5) };
    let hbd = if rng.gen_bool(0.5) { int(rng, 6, 15) } else { int(rng, 0, 3) };
    let hba = if rng.gen_bool(0.5) { int(rng, 11, 20) } else { int(rng, 0, 2) };
    let tpsa = if rng.gen_bool(0.5) { rng.gen_range(140.0..250.0) } else { rng.gen_range(5.0..20.0) };
    vec![
        mw,
        logp,
        hbd,
        hba,
        tpsa,
        int(rng, 10, 20),
        rng.gen_range(0.05..0.38),
    ]
}

/// `n / 2` drug-like rows followed by `n - n / 2` decoys.
pub fn classifier_corpus(n: usize, seed: u64, noise: Option<FeatureNoise>) -> Result<LabeledCorpus> {
    let mut rng = StdRng::seed_from_u64(seed);
    let n_pos = n / 2;

    let mut features = Vec::with_capacity(n);
    let mut labels = Vec::with_capacity(n);
    for _ in 0..n_pos {
        features.push(drug_like_row(&mut rng));
        labels.push(1.0);
    }
    for _ in n_pos..n {
        features.push(decoy_row(&mut rng));
        labels.push(0.0);
    }

    if let Some(noise) = noise {
        let dist = gaussian(noise.std)?;
        let mut noise_rng = StdRng::seed_from_u64(noise.seed);
        for v in features.iter_mut().flatten() {
            *v += dist.sample(&mut noise_rng);
        }
    }

    Ok(LabeledCorpus { features, labels })
}

fn clip_target(v: f64, hi: f64) -> f64 {
    v.clamp(0.05, hi)
}

/// Broad descriptor population with heuristic ADMET targets.
pub fn admet_corpus(n: usize, seed: u64) -> Result<RegressionCorpus> {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise_06 = gaussian(0.06)?;
    let noise_07 = gaussian(0.07)?;

    let mut features = Vec::with_capacity(n);
    let mut targets: [Vec<f64>; 5] = Default::default();

    for _ in 0..n {
        let mw = rng.gen_range(100.0..700.0);
        let logp = rng.gen_range(-3.0..8.0);
        let hbd = int(&mut rng, 0, 12);
        let hba = int(&mut rng, 0, 16);
        let tpsa = rng.gen_range(5.0..250.0);
        let rot = int(&mut rng, 0, 18);
        let qed = rng.gen_range(0.05..0.95);
        let fsp3 = rng.gen_range(0.0..1.0);

        let absorption = 0.6 * normalize(mw, 150.0, 450.0, true)
            + 0.2 * normalize(logp, -0.5, 4.5, false)
            + 0.2 * normalize(tpsa, 20.0, 100.0, true);
        let distribution = 0.4 * normalize(logp, 1.0, 4.5, false)
            + 0.4 * fsp3
            + 0.2 * normalize(hba, 0.0, 8.0, true);
        let metabolism = 0.5 * fsp3
            + 0.3 * normalize(logp, 0.0, 3.5, true)
            + 0.2 * qed;
        let excretion = 0.7 * normalize(mw, 100.0, 400.0, true)
            + 0.2 * normalize(hbd, 0.0, 5.0, false)
            + 0.1 * normalize(rot, 0.0, 8.0, true);
        let toxicity = 0.4 * normalize(logp, 0.0, 3.5, true)
            + 0.3 * qed
            + 0.2 * normalize(hba, 0.0, 8.0, true)
            + 0.1 * normalize(tpsa, 30.0, 120.0, false);

        let row_targets = [
            (AdmetCategory::Absorption, clip_target(absorption + noise_06.sample(&mut rng), 0.98)),
            (AdmetCategory::Distribution, clip_target(distribution + noise_07.sample(&mut rng), 0.95)),
            (AdmetCategory::Metabolism, clip_target(metabolism + noise_07.sample(&mut rng), 0.95)),
            (AdmetCategory::Excretion, clip_target(excretion + noise_07.sample(&mut rng), 0.95)),
            (AdmetCategory::Toxicity, clip_target(toxicity + noise_06.sample(&mut rng), 0.95)),
        ];
        for (category, value) in row_targets {
            targets[category.index()].push(value);
        }
        features.push(vec![mw, logp, hbd, hba, tpsa, rot, qed, fsp3]);
    }

    Ok(RegressionCorpus { features, targets })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifier_corpus_shape_and_balance() {
        let c = classifier_corpus(101, 42, None).unwrap();
        assert_eq!(c.len(), 101);
        assert!(c.features.iter().all(|r| r.len() == 7));
        let pos = c.labels.iter().filter(|&&l| l == 1.0).count();
        assert_eq!(pos, 50);
        // positives come first
        assert!(c.labels[..50].iter().all(|&l| l == 1.0));
    }

    #[test]
    fn test_drug_like_rows_inside_envelope() {
        let c = classifier_corpus(400, 3, None).unwrap();
        for row in &c.features[..200] {
            assert!((150.0..500.0).contains(&row[0]));
            assert!(row[2] <= 5.0 && row[3] <= 10.0 && row[5] <= 8.0);
            assert!((0.4..0.95).contains(&row[6]));
        }
        for row in &c.features[200..] {
            assert!(row[0] >= 500.0 || row[0] < 150.0);
            assert!(row[1] >= 5.0 || row[1] < -1.5);
            assert!(row[5] >= 10.0);
            assert!(row[6] < 0.38);
        }
    }

    #[test]
    fn test_corpus_is_seed_deterministic() {
        let noise = Some(FeatureNoise { seed: 0, std: 0.01 });
        assert_eq!(classifier_corpus(60, 42, noise).unwrap(), classifier_corpus(60, 42, noise).unwrap());
        assert_ne!(classifier_corpus(60, 42, None).unwrap(), classifier_corpus(60, 43, None).unwrap());
        assert_eq!(admet_corpus(50, 7).unwrap(), admet_corpus(50, 7).unwrap());
    }

    #[test]
    fn test_noise_perturbs_every_feature() {
        let clean = classifier_corpus(20, 42, None).unwrap();
        let noisy = classifier_corpus(20, 42, Some(FeatureNoise { seed: 0, std: 0.01 })).unwrap();
        for (a, b) in clean.features.iter().flatten().zip(noisy.features.iter().flatten()) {
            assert!(a != b && (a - b).abs() < 0.1);
        }
        assert!(classifier_corpus(20, 42, Some(FeatureNoise { seed: 0, std: -1.0 })).is_err());
    }

    #[test]
    fn test_admet_targets_within_clip_bounds() {
        let c = admet_corpus(300, 7).unwrap();
        assert!(c.features.iter().all(|r| r.len() == 8));
        for column in &c.targets {
            assert_eq!(column.len(), 300);
            assert!(column.iter().all(|v| (0.05..=0.98).contains(v)));
        }
        assert!(c.targets[AdmetCategory::Toxicity.index()].iter().all(|&v| v <= 0.95));
    }
}
