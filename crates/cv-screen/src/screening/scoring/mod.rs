mod config;
mod policy;
mod rules;

pub use config::ScoringConfig;
pub use policy::{Decision, GateRejection};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{CandidateProfile, JobRequirement};
use crate::config::ConfigError;
use policy::{decide, mandatory_gate};

/// Stateless scorer applying the banded rubric to a job/candidate pair.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Scores in a fixed order: mandatory gate, band, bonuses, overlap nudge, clamp, and
    /// finally the decision override, which is the only authoritative decision.
    pub fn score(&self, job: &JobRequirement, candidate: &CandidateProfile) -> ScoreResult {
        let coverage = rules::mandatory_coverage(job, &candidate.skills);
        if let Some(rejection) = mandatory_gate(job, &candidate.skills, &self.config, coverage) {
            debug!(
                coverage,
                minimum = self.config.mandatory_min_coverage,
                missing = rejection.missing_mandatory.len(),
                "mandatory gate rejected candidate"
            );
            return ScoreResult {
                score: 0.0,
                decision: Decision::Reject,
                explanation: Explanation::MandatoryGate(rejection),
            };
        }

        let matches = rules::match_skills(job, &candidate.skills);
        let (band_base, provisional_decision) = rules::band(&matches);

        let education_match = rules::education_matches(job, candidate);
        let education_bonus = rules::education_bonus(education_match);
        let experience_bonus =
            rules::experience_bonus(job.min_years_experience, candidate.years_experience);
        let overlap_nudge = rules::overlap_nudge(matches.overall_pct);

        let raw = band_base + overlap_nudge + education_bonus + experience_bonus;
        let score = rules::round2(raw.clamp(0.0, 100.0));
        let decision = decide(matches.matched_count, score, &self.config);

        debug!(
            matched = matches.matched_count,
            band_base,
            score,
            ?decision,
            "scored candidate"
        );

        ScoreResult {
            score,
            decision,
            explanation: Explanation::Breakdown(ScoreBreakdown {
                matched_count: matches.matched_count,
                total_declared_skills: matches.total_declared,
                matched_required_skills: matches.matched_required,
                matched_preferred_skills: matches.matched_preferred,
                missing_required_skills: matches.missing_required,
                missing_preferred_skills: matches.missing_preferred,
                mandatory_coverage_pct: coverage,
                required_overlap_pct: matches.required_pct,
                preferred_overlap_pct: matches.preferred_pct,
                overall_overlap_pct: matches.overall_pct,
                education_required: job.required_education.clone(),
                education_candidate: candidate.education.clone(),
                education_match,
                min_years_experience: job.min_years_experience,
                candidate_years_experience: candidate.years_experience,
                components: ScoreComponents {
                    band_base,
                    provisional_decision,
                    education_bonus,
                    experience_bonus,
                    overlap_nudge: rules::round2(overlap_nudge),
                },
                accept_threshold: self.config.accept_threshold,
                enforce_mandatory_gate: self.config.enforce_mandatory_gate,
                mandatory_min_coverage: self.config.mandatory_min_coverage,
            }),
        }
    }
}

/// Individual contributions to the final score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponents {
    pub band_base: f64,
    /// Decision suggested by the band alone; advisory.
    pub provisional_decision: Decision,
    pub education_bonus: f64,
    pub experience_bonus: f64,
    pub overlap_nudge: f64,
}

/// Everything needed to reproduce a score without re-running it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub matched_count: usize,
    pub total_declared_skills: usize,
    pub matched_required_skills: Vec<String>,
    pub matched_preferred_skills: Vec<String>,
    pub missing_required_skills: Vec<String>,
    pub missing_preferred_skills: Vec<String>,
    pub mandatory_coverage_pct: f64,
    pub required_overlap_pct: f64,
    pub preferred_overlap_pct: f64,
    pub overall_overlap_pct: f64,
    pub education_required: Vec<String>,
    pub education_candidate: Vec<String>,
    pub education_match: bool,
    pub min_years_experience: Option<u32>,
    pub candidate_years_experience: Option<u32>,
    pub components: ScoreComponents,
    pub accept_threshold: f64,
    pub enforce_mandatory_gate: bool,
    pub mandatory_min_coverage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Explanation {
    Breakdown(ScoreBreakdown),
    MandatoryGate(GateRejection),
}

/// Final score in `[0, 100]`, the authoritative decision, and its explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: f64,
    pub decision: Decision,
    pub explanation: Explanation,
}

impl ScoreResult {
    pub fn summary(&self) -> String {
        match &self.explanation {
            Explanation::MandatoryGate(rejection) => rejection.summary(),
            Explanation::Breakdown(breakdown) => format!(
                "{} with score {:.2} ({} of {} skills matched)",
                self.decision.summary(),
                self.score,
                breakdown.matched_count,
                breakdown.total_declared_skills
            ),
        }
    }

    pub fn breakdown(&self) -> Option<&ScoreBreakdown> {
        match &self.explanation {
            Explanation::Breakdown(breakdown) => Some(breakdown),
            Explanation::MandatoryGate(_) => None,
        }
    }
}
