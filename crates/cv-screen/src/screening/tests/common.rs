use crate::screening::{
    CandidateProfile, ExtractedSkillSet, JobRequirement, ScoringConfig, ScoringEngine,
    SkillVocabulary,
};

pub(super) const PYTHON_RESUME: &str =
    "Experienced Python and SQL developer, 5 years experience, AWS certified";

pub(super) fn scenario_vocabulary() -> SkillVocabulary {
    SkillVocabulary::new(["Python", "SQL", "AWS"])
}

pub(super) fn job(required: &[&str], preferred: &[&str]) -> JobRequirement {
    JobRequirement::with_skills(required.iter().copied(), preferred.iter().copied())
}

pub(super) fn candidate(skills: &[&str]) -> CandidateProfile {
    CandidateProfile {
        skills: ExtractedSkillSet::new(skills.iter().copied()),
        education: Vec::new(),
        years_experience: None,
    }
}

pub(super) fn engine() -> ScoringEngine {
    ScoringEngine::default()
}

pub(super) fn gated_engine() -> ScoringEngine {
    ScoringEngine::new(ScoringConfig {
        enforce_mandatory_gate: true,
        ..ScoringConfig::default()
    })
    .expect("gate config is valid")
}
