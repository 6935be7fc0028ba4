//! Synthetic source generator configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SynthConfig {
    /// Rows to generate. Default: 300.
    pub rows: Option<usize>,
    /// Share of misinformation rows. Default: 0.15.
    pub misinfo_ratio: Option<f64>,
    /// Generator seed. Default: 42.
    pub seed: Option<u64>,
}

impl SynthConfig {
    pub fn effective_rows(&self) -> usize {
        self.rows.unwrap_or(300)
    }

    pub fn effective_misinfo_ratio(&self) -> f64 {
        self.misinfo_ratio.unwrap_or(0.15)
    }

    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or(42)
    }
}
