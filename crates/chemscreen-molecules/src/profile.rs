//! Radar (spider) profile of a descriptor record.
//!
//! Every axis is scaled to [0, 1] with 1 being the more favourable end, so
//! profiles of different compounds overlay directly.

use serde::{Deserialize, Serialize};

use crate::descriptors::DescriptorRecord;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarProfile {
    #[serde(rename = "MW")]
    pub mw: f64,
    #[serde(rename = "LogP")]
    pub logp: f64,
    #[serde(rename = "HBD")]
    pub hbd: f64,
    #[serde(rename = "HBA")]
    pub hba: f64,
    #[serde(rename = "TPSA")]
    pub tpsa: f64,
    #[serde(rename = "RotBonds")]
    pub rotbonds: f64,
    #[serde(rename = "QED")]
    pub qed: f64,
}

impl RadarProfile {
    pub fn axes(&self) -> [(&'static str, f64); 7] {
        [
            ("MW", self.mw),
            ("LogP", self.logp),
            ("HBD", self.hbd),
            ("HBA", self.hba),
            ("TPSA", self.tpsa),
            ("RotBonds", self.rotbonds),
            ("QED", self.qed),
        ]
    }
}

/// Inverted clip onto [0, hi], rounded to 3 dp.
fn inverted(value: f64, hi: f64) -> f64 {
    round3(1.0 - (value / hi).clamp(0.0, 1.0))
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

pub fn radar_profile(d: &DescriptorRecord) -> RadarProfile {
    RadarProfile {
        mw: inverted(d.mw(), 700.0),
        logp: inverted(d.logp().abs(), 7.0),
        hbd: inverted(d.hbd() as f64, 10.0),
        hba: inverted(d.hba() as f64, 15.0),
        tpsa: inverted(d.tpsa(), 200.0),
        rotbonds: inverted(d.rotbonds() as f64, 15.0),
        qed: d.qed(),
    }
}
