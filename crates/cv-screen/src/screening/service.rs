use std::cmp::Ordering;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::contacts::{extract_contacts, extract_job_titles, guess_name, ContactDetails};
use super::domain::{CandidateProfile, ExtractedSkillSet, JobRequirement};
use super::education::DegreeTable;
use super::experience::extract_years_experience;
use super::normalizer::AliasTable;
use super::requirements::RequirementParser;
use super::scoring::{ScoreResult, ScoringEngine};
use super::skills::SkillExtractor;
use super::source::TextSource;
use super::vocabulary::SkillVocabulary;
use crate::config::{ConfigError, ScreeningConfig};

/// Headline details recovered from a resume alongside its skills.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeDetails {
    pub name: Option<String>,
    pub contacts: ContactDetails,
    pub job_titles: Vec<String>,
}

/// Outcome of screening one resume against a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateScreening {
    pub source: String,
    pub details: ResumeDetails,
    pub profile: CandidateProfile,
    pub result: ScoreResult,
}

/// Composes extraction, requirement parsing, and scoring over shared reference tables.
#[derive(Debug, Clone)]
pub struct ScreeningService {
    vocabulary: Arc<SkillVocabulary>,
    aliases: &'static AliasTable,
    degrees: &'static DegreeTable,
    extractor: SkillExtractor,
    parser: RequirementParser,
    engine: ScoringEngine,
}

impl ScreeningService {
    pub fn new(
        config: &ScreeningConfig,
        vocabulary: Arc<SkillVocabulary>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let chunker = config.phrase_chunker.build();
        if !chunker.is_available() {
            debug!("phrase chunking disabled");
        }

        Ok(Self {
            vocabulary,
            aliases: AliasTable::builtin(),
            degrees: DegreeTable::builtin(),
            extractor: SkillExtractor::new(config.extraction.clone(), Arc::clone(&chunker))?,
            parser: RequirementParser::new(config.requirements.clone(), chunker)?,
            engine: ScoringEngine::new(config.scoring.clone())?,
        })
    }

    /// Default configuration over the built-in vocabulary.
    pub fn with_defaults() -> Self {
        Self {
            vocabulary: Arc::new(SkillVocabulary::builtin().clone()),
            aliases: AliasTable::builtin(),
            degrees: DegreeTable::builtin(),
            extractor: SkillExtractor::default(),
            parser: RequirementParser::default(),
            engine: ScoringEngine::default(),
        }
    }

    pub fn vocabulary(&self) -> &SkillVocabulary {
        &self.vocabulary
    }

    pub fn parse_job(&self, text: &str) -> JobRequirement {
        self.parser.parse(text)
    }

    /// Vocabulary skills found in `text`, in canonical spelling.
    ///
    /// A normalized form replaces the extracted entry only when the vocabulary also carries
    /// it, so every reported skill remains a vocabulary entry.
    pub fn extract_skills(&self, text: &str) -> ExtractedSkillSet {
        self.extractor
            .extract(text, &self.vocabulary)
            .into_vec()
            .into_iter()
            .map(|skill| {
                let canonical = self.aliases.normalize_skill(&skill);
                if canonical != skill && self.vocabulary.contains(&canonical) {
                    canonical
                } else {
                    skill
                }
            })
            .collect()
    }

    pub fn profile(&self, text: &str) -> CandidateProfile {
        CandidateProfile {
            skills: self.extract_skills(text),
            education: self.degrees.extract(text),
            years_experience: extract_years_experience(text),
        }
    }

    pub fn details(&self, text: &str) -> ResumeDetails {
        ResumeDetails {
            name: guess_name(text),
            contacts: extract_contacts(text),
            job_titles: extract_job_titles(text),
        }
    }

    pub fn score(&self, job: &JobRequirement, candidate: &CandidateProfile) -> ScoreResult {
        self.engine.score(job, candidate)
    }

    pub fn screen(&self, job: &JobRequirement, source: &dyn TextSource) -> CandidateScreening {
        let text = source.text();
        let label = source.label();

        let profile = self.profile(&text);
        let result = self.score(job, &profile);
        info!(
            source = %label,
            skills = profile.skills.len(),
            score = result.score,
            decision = ?result.decision,
            "screened resume"
        );

        CandidateScreening {
            source: label,
            details: self.details(&text),
            profile,
            result,
        }
    }

    /// Screens every source and ranks the outcomes by score, highest first. Equal scores
    /// keep their input order.
    pub fn screen_all<'a, I>(&self, job: &JobRequirement, sources: I) -> Vec<CandidateScreening>
    where
        I: IntoIterator<Item = &'a dyn TextSource>,
    {
        if !job.declares_skills() {
            warn!("job declares no skills; every candidate will be rejected");
        }

        let mut screenings: Vec<CandidateScreening> = sources
            .into_iter()
            .map(|source| self.screen(job, source))
            .collect();
        screenings.sort_by(|a, b| {
            b.result
                .score
                .partial_cmp(&a.result.score)
                .unwrap_or(Ordering::Equal)
        });
        screenings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screening::source::InlineText;
    use crate::screening::Decision;

    #[test]
    fn normalized_forms_stay_inside_the_vocabulary() {
        let vocabulary = Arc::new(SkillVocabulary::new(["scikit-learn", "Python", "nodejs"]));
        let service = ScreeningService::new(&ScreeningConfig::default(), vocabulary)
            .expect("default config is valid");

        let skills = service.extract_skills("python, scikit-learn and nodejs services");
        assert_eq!(skills.as_slice(), ["Python", "nodejs", "scikit-learn"]);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = ScreeningConfig::default();
        config.scoring.accept_threshold = -1.0;
        let err = ScreeningService::new(&config, Arc::new(SkillVocabulary::new(["SQL"])))
            .expect_err("negative threshold");
        assert!(matches!(
            err,
            ConfigError::OutOfRange {
                field: "accept_threshold",
                ..
            }
        ));
    }

    #[test]
    fn screen_collects_details_and_scores() {
        let service = ScreeningService::with_defaults();
        let job = JobRequirement::with_skills(["Python", "SQL"], []);
        let resume = InlineText::new(
            "alex.txt",
            "Alex Morgan\nBackend Developer\nalex@example.com\nPython and SQL, 4 years",
        );

        let screening = service.screen(&job, &resume);
        assert_eq!(screening.source, "alex.txt");
        assert_eq!(screening.details.name.as_deref(), Some("Alex Morgan"));
        assert_eq!(screening.details.contacts.email.as_deref(), Some("alex@example.com"));
        assert_eq!(screening.details.job_titles, vec!["Backend Developer"]);
        assert_eq!(screening.profile.years_experience, Some(4));
        assert_eq!(screening.result.decision, Decision::Accept);
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn shared_components_cross_threads() {
        assert_send_sync::<ScreeningService>();
        assert_send_sync::<SkillExtractor>();
        assert_send_sync::<SkillVocabulary>();
        assert_send_sync::<AliasTable>();
        assert_send_sync::<DegreeTable>();
    }

    #[test]
    fn one_service_screens_from_many_threads() {
        let service = ScreeningService::with_defaults();
        let job = JobRequirement::with_skills(["Python", "SQL", "Docker"], []);
        let resume = InlineText::new("shared.txt", "Python, SQL and Docker for 6 years");

        let scores: Vec<f64> = std::thread::scope(|scope| {
            let workers: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| service.screen(&job, &resume).result.score))
                .collect();
            workers
                .into_iter()
                .map(|worker| worker.join().expect("worker panicked"))
                .collect()
        });

        assert!(scores.iter().all(|score| *score == scores[0]));
    }

    #[test]
    fn screen_all_ranks_by_score() {
        let service = ScreeningService::with_defaults();
        let job = JobRequirement::with_skills(["Python", "SQL", "Excel"], []);
        let weak = InlineText::new("weak.txt", "Excel only");
        let strong = InlineText::new("strong.txt", "Python, SQL and Excel");

        let ranked = service.screen_all(
            &job,
            [&weak as &dyn TextSource, &strong as &dyn TextSource],
        );
        let order: Vec<&str> = ranked.iter().map(|s| s.source.as_str()).collect();
        assert_eq!(order, vec!["strong.txt", "weak.txt"]);
    }
}
