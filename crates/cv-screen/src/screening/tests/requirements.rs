use std::sync::Arc;

use crate::screening::{
    parse_requirements, ChunkerKind, RequirementConfig, RequirementParser, StopwordChunker,
};

const POSTING: &str = "Data Analyst, MSc, minimum 3 years of experience.\n\
    Mandatory: SQL, ms excel; python\n\
    Preferred: powerbi \u{2022} Tableau";

#[test]
fn parses_a_marked_posting() {
    let job = parse_requirements(POSTING);

    assert_eq!(job.mandatory_skills, vec!["SQL", "Excel", "Python"]);
    assert_eq!(job.required_skills, job.mandatory_skills);
    assert_eq!(job.preferred_skills, vec!["Power BI", "Tableau"]);
    assert_eq!(job.min_years_experience, Some(3));
    assert!(job.required_education.contains(&"MSc".to_string()));
}

#[test]
fn unmarked_posting_falls_back_to_comma_fragments() {
    let job = parse_requirements("excel, word, outlook, SAP, tableau, jira, confluence");
    assert_eq!(job.mandatory_skills, vec!["Excel", "Word", "Outlook", "SAP", "Tableau"]);
    assert!(job.preferred_skills.is_empty());
}

#[test]
fn parsing_is_deterministic_with_a_chunker() {
    let parser = RequirementParser::new(
        RequirementConfig::default(),
        ChunkerKind::Stopword.build(),
    )
    .expect("valid config");

    let first = parser.parse(POSTING);
    let second = parser.parse(POSTING);
    assert_eq!(first, second);
    assert!(first.required_skills.len() >= first.mandatory_skills.len());
    assert_eq!(
        &first.required_skills[..first.mandatory_skills.len()],
        first.mandatory_skills.as_slice()
    );
}

#[test]
fn chunk_augmentation_respects_the_required_cap() {
    let parser = RequirementParser::new(
        RequirementConfig {
            max_required_skills: 4,
            max_preferred_skills: 30,
        },
        Arc::new(StopwordChunker::default()),
    )
    .expect("valid config");

    let job = parser.parse(POSTING);
    assert_eq!(job.required_skills.len(), 4);
    assert_eq!(job.mandatory_skills.len(), 3);
}
