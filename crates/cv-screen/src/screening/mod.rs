//! Extraction, normalization, requirement parsing, and scoring of resumes against jobs.
//!
//! Reference tables (vocabulary, aliases, degrees) are immutable once built and shared by
//! reference, so every function here is safe to call from any number of threads without
//! coordination. No function in this tree fails on unusual text: degenerate input yields
//! empty results.

pub mod chunker;
pub mod contacts;
pub mod domain;
pub mod education;
pub mod experience;
pub mod normalizer;
pub mod requirements;
pub mod scoring;
pub mod service;
pub mod skills;
pub mod source;
pub mod vocabulary;

#[cfg(test)]
mod tests;

pub use chunker::{ChunkerKind, NoopChunker, PhraseChunker, StopwordChunker};
pub use contacts::{extract_contacts, extract_job_titles, guess_name, ContactDetails};
pub use domain::{CandidateProfile, ExtractedSkillSet, JobRequirement};
pub use education::{extract_education, DegreeTable};
pub use experience::extract_years_experience;
pub use normalizer::{normalize_skill, normalize_skills, AliasTable};
pub use requirements::{parse_requirements, RequirementConfig, RequirementParser};
pub use scoring::{
    Decision, Explanation, GateRejection, ScoreBreakdown, ScoreComponents, ScoreResult,
    ScoringConfig, ScoringEngine,
};
pub use service::{CandidateScreening, ResumeDetails, ScreeningService};
pub use skills::{extract_skills, ExtractionConfig, SkillExtractor};
pub use source::{InlineText, PlainTextFile, TextSource};
pub use vocabulary::{SkillVocabulary, VocabularyError};

use regex::Regex;

/// Compiles a pattern literal that ships with this crate.
pub(crate) fn builtin_regex(pattern: &str) -> Regex {
    Regex::new(pattern)
        .unwrap_or_else(|err| panic!("built-in pattern {pattern:?} is invalid: {err}"))
}
