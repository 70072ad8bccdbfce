use serde::{Deserialize, Serialize};

use super::super::domain::{ExtractedSkillSet, JobRequirement};
use super::config::ScoringConfig;

/// Screening outcome for one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Accept,
    Reject,
}

impl Decision {
    pub fn summary(&self) -> String {
        match self {
            Decision::Accept => "candidate accepted".to_string(),
            Decision::Reject => "candidate rejected".to_string(),
        }
    }

    pub fn is_accept(&self) -> bool {
        matches!(self, Decision::Accept)
    }
}

/// Record explaining a short-circuit on insufficient mandatory coverage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateRejection {
    pub reason: String,
    /// Configured minimum coverage fraction.
    pub threshold: f64,
    pub mandatory_coverage_pct: f64,
    pub matched_mandatory: Vec<String>,
    pub missing_mandatory: Vec<String>,
}

impl GateRejection {
    pub fn summary(&self) -> String {
        if self.missing_mandatory.is_empty() {
            format!(
                "rejected: mandatory coverage {:.2}% below {:.0}%",
                self.mandatory_coverage_pct,
                self.threshold * 100.0
            )
        } else {
            format!(
                "rejected: mandatory coverage {:.2}% below {:.0}%, missing {}",
                self.mandatory_coverage_pct,
                self.threshold * 100.0,
                self.missing_mandatory.join(", ")
            )
        }
    }
}

/// Hard gate on mandatory coverage. Only applies when enabled and the job declares
/// mandatory skills.
pub(crate) fn mandatory_gate(
    job: &JobRequirement,
    candidate: &ExtractedSkillSet,
    config: &ScoringConfig,
    coverage_pct: f64,
) -> Option<GateRejection> {
    if !config.enforce_mandatory_gate || job.mandatory_skills.is_empty() {
        return None;
    }

    let minimum = config.mandatory_min_coverage.clamp(0.0, 1.0);
    if coverage_pct / 100.0 >= minimum {
        return None;
    }

    let (matched_mandatory, missing_mandatory): (Vec<String>, Vec<String>) = job
        .mandatory_skills
        .iter()
        .cloned()
        .partition(|skill| candidate.contains(skill));

    Some(GateRejection {
        reason: "Mandatory coverage below threshold".to_string(),
        threshold: config.mandatory_min_coverage,
        mandatory_coverage_pct: coverage_pct,
        matched_mandatory,
        missing_mandatory,
    })
}

/// Final decision. Overrides whatever the band suggested.
pub(crate) fn decide(matched_count: usize, score: f64, config: &ScoringConfig) -> Decision {
    if matched_count <= 1 {
        Decision::Reject
    } else if score >= config.accept_threshold {
        Decision::Accept
    } else {
        Decision::Reject
    }
}
