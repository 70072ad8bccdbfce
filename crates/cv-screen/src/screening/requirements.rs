//! Job-description parsing into a [`JobRequirement`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::chunker::{NoopChunker, PhraseChunker};
use super::domain::JobRequirement;
use super::education::DegreeTable;
use super::experience::extract_years_experience;
use super::normalizer::AliasTable;
use crate::config::{ensure_positive, ConfigError};

const MANDATORY_MARKER: &str = "mandatory";
const PREFERRED_MARKER: &str = "preferred";
const FALLBACK_FRAGMENTS: usize = 5;
const MIN_CHUNK_CHARS: usize = 2;
const MAX_CHUNK_CHARS: usize = 40;

/// Caps on the skill lists kept per job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequirementConfig {
    pub max_required_skills: usize,
    pub max_preferred_skills: usize,
}

impl Default for RequirementConfig {
    fn default() -> Self {
        Self {
            max_required_skills: 30,
            max_preferred_skills: 30,
        }
    }
}

impl RequirementConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("max_required_skills", self.max_required_skills)?;
        ensure_positive("max_preferred_skills", self.max_preferred_skills)
    }
}

/// Raw mandatory and preferred fragments of a job description, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionSplit {
    pub mandatory: Vec<String>,
    pub preferred: Vec<String>,
}

/// Splits a job description into raw mandatory and preferred fragments.
///
/// With a `mandatory` or `preferred` marker present (any case), each section runs from its
/// marker to the other marker or the end of the text. Without markers the first five
/// comma-separated fragments longer than two characters are taken as mandatory.
pub fn split_sections(text: &str) -> SectionSplit {
    let lowered = text.to_ascii_lowercase();
    let mandatory_at = lowered.find(MANDATORY_MARKER);
    let preferred_at = lowered.find(PREFERRED_MARKER);

    if mandatory_at.is_none() && preferred_at.is_none() {
        let mandatory = text
            .split(',')
            .map(str::trim)
            .filter(|fragment| fragment.chars().count() > 2)
            .take(FALLBACK_FRAGMENTS)
            .map(str::to_string)
            .collect();
        return SectionSplit {
            mandatory,
            preferred: Vec::new(),
        };
    }

    SectionSplit {
        mandatory: mandatory_at
            .map(|at| {
                section_fragments(text, &lowered, at + MANDATORY_MARKER.len(), PREFERRED_MARKER)
            })
            .unwrap_or_default(),
        preferred: preferred_at
            .map(|at| {
                section_fragments(text, &lowered, at + PREFERRED_MARKER.len(), MANDATORY_MARKER)
            })
            .unwrap_or_default(),
    }
}

fn section_fragments(text: &str, lowered: &str, start: usize, stop_marker: &str) -> Vec<String> {
    let mut body_start = start;
    if matches!(text.as_bytes().get(start), Some(b':' | b'-')) {
        body_start += 1;
    }
    let body_end = lowered[body_start..]
        .find(stop_marker)
        .map_or(text.len(), |offset| body_start + offset);

    text[body_start..body_end]
        .split(is_fragment_break)
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_fragment_break(c: char) -> bool {
    matches!(c, ',' | '\n' | ';' | '\u{2022}' | '-')
}

/// Turns job-description text into structured requirements.
#[derive(Clone)]
pub struct RequirementParser {
    config: RequirementConfig,
    chunker: Arc<dyn PhraseChunker>,
    aliases: &'static AliasTable,
    degrees: &'static DegreeTable,
}

impl RequirementParser {
    pub fn new(
        config: RequirementConfig,
        chunker: Arc<dyn PhraseChunker>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            chunker,
            aliases: AliasTable::builtin(),
            degrees: DegreeTable::builtin(),
        })
    }

    pub fn parse(&self, text: &str) -> JobRequirement {
        let sections = split_sections(text);

        let chunks: Vec<String> = if self.chunker.is_available() {
            self.chunker
                .chunks(text)
                .into_iter()
                .filter(|chunk| is_usable_chunk(chunk))
                .collect()
        } else {
            Vec::new()
        };

        let mut mandatory_skills = self.aliases.normalize_skills(&sections.mandatory);
        mandatory_skills.truncate(self.config.max_required_skills);

        let mut required_skills = self
            .aliases
            .normalize_skills(sections.mandatory.iter().chain(chunks.iter()));
        required_skills.truncate(self.config.max_required_skills);

        let mut preferred_skills = self.aliases.normalize_skills(&sections.preferred);
        preferred_skills.truncate(self.config.max_preferred_skills);

        let requirement = JobRequirement {
            mandatory_skills,
            required_skills,
            preferred_skills,
            required_education: self.degrees.extract(text),
            min_years_experience: extract_years_experience(text),
        };

        debug!(
            mandatory = requirement.mandatory_skills.len(),
            required = requirement.required_skills.len(),
            preferred = requirement.preferred_skills.len(),
            chunks = chunks.len(),
            "parsed job requirements"
        );

        requirement
    }
}

impl Default for RequirementParser {
    fn default() -> Self {
        Self {
            config: RequirementConfig::default(),
            chunker: Arc::new(NoopChunker),
            aliases: AliasTable::builtin(),
            degrees: DegreeTable::builtin(),
        }
    }
}

impl std::fmt::Debug for RequirementParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequirementParser")
            .field("config", &self.config)
            .field("chunker_available", &self.chunker.is_available())
            .finish()
    }
}

fn is_usable_chunk(chunk: &str) -> bool {
    let chunk = chunk.trim();
    (MIN_CHUNK_CHARS..=MAX_CHUNK_CHARS).contains(&chunk.chars().count())
        && chunk.chars().any(char::is_alphabetic)
}

/// Parses a job description with default caps and no phrase chunker.
pub fn parse_requirements(text: &str) -> JobRequirement {
    RequirementParser::default().parse(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_marked_sections() {
        let split = split_sections(
            "Mandatory: Python, SQL; AWS\nPreferred - Docker \u{2022} Kubernetes",
        );
        assert_eq!(split.mandatory, vec!["Python", "SQL", "AWS"]);
        assert_eq!(split.preferred, vec!["Docker", "Kubernetes"]);
    }

    #[test]
    fn sections_may_appear_in_either_order() {
        let split = split_sections("PREFERRED: Tableau\nMANDATORY: Excel, Power BI");
        assert_eq!(split.mandatory, vec!["Excel", "Power BI"]);
        assert_eq!(split.preferred, vec!["Tableau"]);
    }

    #[test]
    fn preferred_only_text_has_no_mandatory_fragments() {
        let split = split_sections("Preferred: Git");
        assert!(split.mandatory.is_empty());
        assert_eq!(split.preferred, vec!["Git"]);
    }

    #[test]
    fn unmarked_text_takes_first_five_comma_fragments() {
        let split = split_sections("Go, C, Rust, Kafka, gRPC, Redis, Linux, Terraform");
        assert_eq!(split.mandatory, vec!["Rust", "Kafka", "gRPC", "Redis", "Linux"]);
        assert!(split.preferred.is_empty());
    }

    #[test]
    fn parse_normalizes_and_collects_education_and_years() {
        let job = parse_requirements(
            "BSc required, at least 3 years of experience.\n\
             Mandatory: python, ms excel, node js\nPreferred: power bi",
        );
        assert_eq!(job.mandatory_skills, vec!["Python", "Excel", "Node.js"]);
        assert_eq!(job.preferred_skills, vec!["Power BI"]);
        assert!(job.required_education.contains(&"BSc".to_string()));
        assert_eq!(job.min_years_experience, Some(3));
    }

    #[test]
    fn required_list_appends_chunks_after_mandatory_items() {
        let parser = RequirementParser::new(
            RequirementConfig::default(),
            Arc::new(crate::screening::StopwordChunker::default()),
        )
        .expect("valid config");

        let job = parser.parse("Experience with data pipelines. Mandatory: SQL");
        assert_eq!(job.mandatory_skills, vec!["SQL"]);
        assert_eq!(job.required_skills.first().map(String::as_str), Some("SQL"));
        assert!(job.required_skills.contains(&"Data Pipelines".to_string()));
    }

    #[test]
    fn caps_apply_to_each_list() {
        let parser = RequirementParser::new(
            RequirementConfig {
                max_required_skills: 2,
                max_preferred_skills: 1,
            },
            Arc::new(NoopChunker),
        )
        .expect("valid config");

        let job = parser.parse("Mandatory: Excel, Word, Outlook\nPreferred: SAP, Tableau");
        assert_eq!(job.required_skills, vec!["Excel", "Word"]);
        assert_eq!(job.mandatory_skills, vec!["Excel", "Word"]);
        assert_eq!(job.preferred_skills, vec!["SAP"]);
    }

    #[test]
    fn zero_caps_are_rejected() {
        let config = RequirementConfig {
            max_required_skills: 0,
            ..RequirementConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroLimit {
                field: "max_required_skills"
            })
        );
    }

    #[test]
    fn empty_description_parses_to_empty_requirement() {
        assert_eq!(parse_requirements(""), JobRequirement::default());
    }
}
