use serde::{Deserialize, Serialize};

use crate::config::{ensure_within, ConfigError};

/// Decision thresholds applied after banding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Minimum final score (0–100) for an Accept once at least two skills match.
    pub accept_threshold: f64,
    pub enforce_mandatory_gate: bool,
    /// Fraction (0–1) of mandatory skills a candidate must hold when the gate is on.
    pub mandatory_min_coverage: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            accept_threshold: 60.0,
            enforce_mandatory_gate: false,
            mandatory_min_coverage: 0.5,
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_within("accept_threshold", self.accept_threshold, 0.0, 100.0)?;
        ensure_within(
            "mandatory_min_coverage",
            self.mandatory_min_coverage,
            0.0,
            1.0,
        )
    }
}
