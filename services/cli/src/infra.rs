use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use cv_screen::config::AppConfig;
use cv_screen::error::AppError;
use cv_screen::screening::{
    CandidateScreening, Decision, PlainTextFile, ScreeningService, SkillVocabulary, TextSource,
};
use serde::Serialize;
use tracing::debug;

use crate::cli::ScreeningOverrides;

/// Applies command-line overrides on top of the loaded configuration and builds the
/// service. `--vocabulary` wins over `SCREEN_VOCABULARY_PATH`.
pub(crate) fn build_service(
    config: AppConfig,
    overrides: &ScreeningOverrides,
) -> Result<ScreeningService, AppError> {
    let mut screening = config.screening;
    if let Some(threshold) = overrides.accept_threshold {
        screening.scoring.accept_threshold = threshold;
    }
    if let Some(enabled) = overrides.enforce_mandatory_gate {
        screening.scoring.enforce_mandatory_gate = enabled;
    }

    let vocabulary = match overrides.vocabulary.as_ref().or(config.vocabulary_path.as_ref()) {
        Some(path) => SkillVocabulary::from_path(path)?,
        None => SkillVocabulary::builtin().clone(),
    };
    debug!(entries = vocabulary.len(), "loaded skill vocabulary");

    Ok(ScreeningService::new(&screening, Arc::new(vocabulary))?)
}

pub(crate) fn read_text(path: &Path) -> String {
    PlainTextFile::new(path).text()
}

/// One CSV line of a batch ranking.
#[derive(Debug, Serialize)]
struct RankingRow<'a> {
    rank: usize,
    candidate_file: &'a str,
    name: Option<&'a str>,
    email: Option<&'a str>,
    phone: Option<&'a str>,
    score: f64,
    decision: Decision,
    skills: String,
}

impl<'a> RankingRow<'a> {
    fn new(rank: usize, screening: &'a CandidateScreening) -> Self {
        let contacts = &screening.details.contacts;
        Self {
            rank,
            candidate_file: &screening.source,
            name: screening.details.name.as_deref(),
            email: contacts.email.as_deref(),
            phone: contacts.phone.as_deref(),
            score: screening.result.score,
            decision: screening.result.decision,
            skills: screening.profile.skills.as_slice().join(", "),
        }
    }
}

/// Writes already-ranked screenings as CSV, one row per candidate.
pub(crate) fn write_ranking<W: Write>(
    writer: W,
    screenings: &[CandidateScreening],
) -> Result<(), AppError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for (index, screening) in screenings.iter().enumerate() {
        csv_writer.serialize(RankingRow::new(index + 1, screening))?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cv_screen::config::{AppEnvironment, ScreeningConfig, TelemetryConfig};
    use cv_screen::screening::{CandidateProfile, Explanation, InlineText, JobRequirement};

    fn gated_config() -> AppConfig {
        let mut screening = ScreeningConfig::default();
        screening.scoring.enforce_mandatory_gate = true;
        AppConfig {
            environment: AppEnvironment::Test,
            telemetry: TelemetryConfig {
                log_level: "info".to_string(),
            },
            screening,
            vocabulary_path: None,
        }
    }

    #[test]
    fn ranking_csv_lists_candidates_in_rank_order() {
        let service = ScreeningService::with_defaults();
        let job = JobRequirement::with_skills(["Python", "SQL"], []);
        let strong = InlineText::new("strong.txt", "Dana Kim\ndana@example.com\nPython and SQL");
        let weak = InlineText::new("weak.txt", "Excel only");
        let sources: [&dyn TextSource; 2] = [&weak, &strong];
        let ranked = service.screen_all(&job, sources);

        let mut buffer = Vec::new();
        write_ranking(&mut buffer, &ranked).expect("ranking writes");
        let output = String::from_utf8(buffer).expect("csv is utf-8");
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(
            lines[0],
            "rank,candidate_file,name,email,phone,score,decision,skills"
        );
        assert!(lines[1].starts_with("1,strong.txt,Dana Kim,dana@example.com,,"));
        assert!(lines[1].ends_with(",Accept,\"Python, SQL\""));
        assert!(lines[2].starts_with("2,weak.txt,"));
        assert!(lines[2].contains(",Reject,"));
    }

    #[test]
    fn missing_vocabulary_file_is_reported() {
        let config = gated_config();
        let overrides = ScreeningOverrides {
            vocabulary: Some("/nonexistent/skills.csv".into()),
            ..ScreeningOverrides::default()
        };
        let err = build_service(config, &overrides).expect_err("missing file");
        assert!(matches!(err, AppError::Vocabulary(_)));
    }

    #[test]
    fn gate_override_can_disable_an_enabled_gate() {
        let job = JobRequirement::with_skills(["Excel", "SAP", "Word"], []);
        let candidate = CandidateProfile::default();

        let gated = build_service(gated_config(), &ScreeningOverrides::default())
            .expect("gated service builds");
        assert!(matches!(
            gated.score(&job, &candidate).explanation,
            Explanation::MandatoryGate(_)
        ));

        let overrides = ScreeningOverrides {
            enforce_mandatory_gate: Some(false),
            ..ScreeningOverrides::default()
        };
        let ungated = build_service(gated_config(), &overrides).expect("ungated service builds");
        assert!(matches!(
            ungated.score(&job, &candidate).explanation,
            Explanation::Breakdown(_)
        ));
    }
}
