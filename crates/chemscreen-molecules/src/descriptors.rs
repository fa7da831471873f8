//! Descriptor records consumed by every assessor, scorer and model.
//!
//! A record is produced once per input structure by an upstream collaborator
//! and is immutable afterwards. Any descriptor that collaborator could not
//! compute is left empty; accessors then resolve it to the fallback values in
//! [`defaults`] instead of failing.

use chemscreen_common::{ChemscreenError, Result};
use serde::{Deserialize, Serialize};

/// Fallback values for descriptors missing from a record.
pub mod defaults {
    pub const MW: f64 = 300.0;
    pub const LOGP: f64 = 2.5;
    pub const HBD: u32 = 2;
    pub const HBA: u32 = 4;
    pub const TPSA: f64 = 70.0;
    pub const ROTBONDS: u32 = 4;
    pub const QED: f64 = 0.5;
    pub const FSP3: f64 = 0.3;
    pub const HEAVY_ATOMS: u32 = 25;
    pub const MR: f64 = 80.0;
    pub const NAME: &str = "?";
}

/// Feature order of the drug-likeness classifier input.
pub const CLASSIFIER_FEATURES: [&str; 7] = ["mw", "logp", "hbd", "hba", "tpsa", "rotbonds", "qed"];

/// Feature order of the ADMET regressor input.
pub const ADMET_FEATURES: [&str; 8] = ["mw", "logp", "hbd", "hba", "tpsa", "rotbonds", "qed", "fsp3"];

/// Count descriptors accept any non-negative whole number, so `1` and `1.0`
/// both read as 1. Errors name the offending key.
mod count {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    fn whole<'de, D: Deserializer<'de>>(d: D, key: &str) -> Result<Option<u32>, D::Error> {
        match Option::<f64>::deserialize(d)? {
            None => Ok(None),
            Some(v) if v.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&v) => {
                Ok(Some(v as u32))
            }
            Some(v) => Err(D::Error::custom(format!(
                "{key} must be a non-negative whole number, got {v}"
            ))),
        }
    }

    macro_rules! count_fields {
        ($($field:ident),*) => {$(
            pub(super) fn $field<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
                whole(d, stringify!($field))
            }
        )*};
    }

    count_fields!(hbd, hba, rotbonds, heavy_atoms, rings, aromatic_rings);
}

/// Computed molecular descriptors for one structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DescriptorRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    /// Molecular weight (Da)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mw: Option<f64>,
    /// Octanol/water partition coefficient
    #[serde(default, skip_serializing_if = "Option::is_none")]
    logp: Option<f64>,
    #[serde(default, deserialize_with = "count::hbd", skip_serializing_if = "Option::is_none")]
    hbd: Option<u32>,
    #[serde(default, deserialize_with = "count::hba", skip_serializing_if = "Option::is_none")]
    hba: Option<u32>,
    /// Topological polar surface area (Å²)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tpsa: Option<f64>,
    #[serde(default, deserialize_with = "count::rotbonds", skip_serializing_if = "Option::is_none")]
    rotbonds: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    qed: Option<f64>,
    /// Fraction of sp3-hybridised carbons
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fsp3: Option<f64>,
    #[serde(default, deserialize_with = "count::heavy_atoms", skip_serializing_if = "Option::is_none")]
    heavy_atoms: Option<u32>,
    #[serde(default, deserialize_with = "count::rings", skip_serializing_if = "Option::is_none")]
    rings: Option<u32>,
    #[serde(default, deserialize_with = "count::aromatic_rings", skip_serializing_if = "Option::is_none")]
    aromatic_rings: Option<u32>,
    /// Molar refractivity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mr: Option<f64>,
}

impl DescriptorRecord {
    /// An empty record; every accessor returns its fallback value.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record with the six core Lipinski/Veber descriptors set.
    pub fn core(mw: f64, logp: f64, hbd: u32, hba: u32, tpsa: f64, rotbonds: u32) -> Self {
        Self::new()
            .with_mw(mw)
            .with_logp(logp)
            .with_hbd(hbd)
            .with_hba(hba)
            .with_tpsa(tpsa)
            .with_rotbonds(rotbonds)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_mw(mut self, v: f64) -> Self {
        self.mw = Some(v);
        self
    }

    pub fn with_logp(mut self, v: f64) -> Self {
        self.logp = Some(v);
        self
    }

    pub fn with_hbd(mut self, v: u32) -> Self {
        self.hbd = Some(v);
        self
    }

    pub fn with_hba(mut self, v: u32) -> Self {
        self.hba = Some(v);
        self
    }

    pub fn with_tpsa(mut self, v: f64) -> Self {
        self.tpsa = Some(v);
        self
    }

    pub fn with_rotbonds(mut self, v: u32) -> Self {
        self.rotbonds = Some(v);
        self
    }

    pub fn with_qed(mut self, v: f64) -> Self {
        self.qed = Some(v);
        self
    }

    pub fn with_fsp3(mut self, v: f64) -> Self {
        self.fsp3 = Some(v);
        self
    }

    pub fn with_heavy_atoms(mut self, v: u32) -> Self {
        self.heavy_atoms = Some(v);
        self
    }

    pub fn with_rings(mut self, v: u32) -> Self {
        self.rings = Some(v);
        self
    }

    pub fn with_aromatic_rings(mut self, v: u32) -> Self {
        self.aromatic_rings = Some(v);
        self
    }

    pub fn with_mr(mut self, v: f64) -> Self {
        self.mr = Some(v);
        self
    }

    // ── Accessors (resolve missing values to defaults) ──────────────────────

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(defaults::NAME)
    }

    pub fn mw(&self) -> f64 {
        self.mw.unwrap_or(defaults::MW)
    }

    pub fn logp(&self) -> f64 {
        self.logp.unwrap_or(defaults::LOGP)
    }

    pub fn hbd(&self) -> u32 {
        self.hbd.unwrap_or(defaults::HBD)
    }

    pub fn hba(&self) -> u32 {
        self.hba.unwrap_or(defaults::HBA)
    }

    pub fn tpsa(&self) -> f64 {
        self.tpsa.unwrap_or(defaults::TPSA)
    }

    pub fn rotbonds(&self) -> u32 {
        self.rotbonds.unwrap_or(defaults::ROTBONDS)
    }

    pub fn qed(&self) -> f64 {
        self.qed.unwrap_or(defaults::QED)
    }

    pub fn fsp3(&self) -> f64 {
        self.fsp3.unwrap_or(defaults::FSP3)
    }

    pub fn heavy_atoms(&self) -> u32 {
        self.heavy_atoms.unwrap_or(defaults::HEAVY_ATOMS)
    }

    pub fn rings(&self) -> u32 {
        self.rings.unwrap_or(0)
    }

    pub fn aromatic_rings(&self) -> u32 {
        self.aromatic_rings.unwrap_or(0)
    }

    pub fn mr(&self) -> f64 {
        self.mr.unwrap_or(defaults::MR)
    }

    /// True when the upstream collaborator supplied an explicit name.
    pub fn has_name(&self) -> bool {
        self.name.is_some()
    }

    /// Reject non-finite descriptor values.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("mw", self.mw),
            ("logp", self.logp),
            ("tpsa", self.tpsa),
            ("qed", self.qed),
            ("fsp3", self.fsp3),
            ("mr", self.mr),
        ];
        for (key, value) in fields {
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(ChemscreenError::InvalidDescriptor(format!(
                        "{key} for '{}' is not a finite number ({v})",
                        self.name()
                    )));
                }
            }
        }
        Ok(())
    }

    /// Classifier input vector, ordered as [`CLASSIFIER_FEATURES`].
    pub fn classifier_features(&self) -> [f64; 7] {
        [
            self.mw(),
            self.logp(),
            self.hbd() as f64,
            self.hba() as f64,
            self.tpsa(),
            self.rotbonds() as f64,
            self.qed(),
        ]
    }

    /// Regressor input vector, ordered as [`ADMET_FEATURES`].
    pub fn admet_features(&self) -> [f64; 8] {
        let [mw, logp, hbd, hba, tpsa, rot, qed] = self.classifier_features();
        [mw, logp, hbd, hba, tpsa, rot, qed, self.fsp3()]
    }
}
