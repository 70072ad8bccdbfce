use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::screening::chunker::ChunkerKind;
use crate::screening::requirements::RequirementConfig;
use crate::screening::scoring::ScoringConfig;
use crate::screening::skills::ExtractionConfig;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub screening: ScreeningConfig,
    /// CSV file replacing the built-in skill vocabulary.
    pub vocabulary_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );
        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let mut screening = ScreeningConfig::default();
        let extraction = &mut screening.extraction;
        if let Some(value) = env_parse("SCREEN_FUZZY_THRESHOLD")? {
            extraction.fuzzy_threshold = value;
        }
        if let Some(value) = env_parse("SCREEN_NGRAM_MIN")? {
            extraction.ngram_min = value;
        }
        if let Some(value) = env_parse("SCREEN_NGRAM_MAX")? {
            extraction.ngram_max = value;
        }
        if let Some(value) = env_parse("SCREEN_MAX_FUZZY_RESULTS")? {
            extraction.max_fuzzy_results = value;
        }
        if let Some(value) = env_parse("SCREEN_MAX_CANDIDATE_PHRASES")? {
            extraction.max_candidate_phrases = value;
        }

        let requirements = &mut screening.requirements;
        if let Some(value) = env_parse("SCREEN_MAX_REQUIRED_SKILLS")? {
            requirements.max_required_skills = value;
        }
        if let Some(value) = env_parse("SCREEN_MAX_PREFERRED_SKILLS")? {
            requirements.max_preferred_skills = value;
        }

        let scoring = &mut screening.scoring;
        if let Some(value) = env_parse("SCREEN_ACCEPT_THRESHOLD")? {
            scoring.accept_threshold = value;
        }
        if let Some(value) = env_flag("SCREEN_ENFORCE_MANDATORY_GATE")? {
            scoring.enforce_mandatory_gate = value;
        }
        if let Some(value) = env_parse("SCREEN_MANDATORY_MIN_COVERAGE")? {
            scoring.mandatory_min_coverage = value;
        }

        if let Ok(raw) = env::var("SCREEN_PHRASE_CHUNKER") {
            screening.phrase_chunker =
                ChunkerKind::parse(&raw).ok_or(ConfigError::UnknownChunker(raw))?;
        }

        screening.validate()?;

        let vocabulary_path = env::var("SCREEN_VOCABULARY_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            screening,
            vocabulary_path,
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Every tunable of the screening pipeline, grouped by stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreeningConfig {
    pub extraction: ExtractionConfig,
    pub requirements: RequirementConfig,
    pub scoring: ScoringConfig,
    pub phrase_chunker: ChunkerKind,
}

impl ScreeningConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.extraction.validate()?;
        self.requirements.validate()?;
        self.scoring.validate()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidValue {
        key: &'static str,
        value: String,
    },
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    InvalidNgramWindow {
        min: usize,
        max: usize,
    },
    ZeroLimit {
        field: &'static str,
    },
    UnknownChunker(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue { key, value } => {
                write!(f, "{key} has an unparseable value '{value}'")
            }
            ConfigError::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(f, "{field} must be within [{min}, {max}], got {value}"),
            ConfigError::InvalidNgramWindow { min, max } => write!(
                f,
                "n-gram window must satisfy 1 <= min <= max, got min {min} and max {max}"
            ),
            ConfigError::ZeroLimit { field } => write!(f, "{field} must be greater than zero"),
            ConfigError::UnknownChunker(value) => write!(
                f,
                "SCREEN_PHRASE_CHUNKER must be 'none' or 'stopword', got '{value}'"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

pub(crate) fn ensure_within(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), ConfigError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

pub(crate) fn ensure_positive(field: &'static str, value: usize) -> Result<(), ConfigError> {
    if value == 0 {
        Err(ConfigError::ZeroLimit { field })
    } else {
        Ok(())
    }
}

fn env_parse<T: FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
        _ => Ok(None),
    }
}

fn env_flag(key: &'static str) -> Result<Option<bool>, ConfigError> {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "" => Ok(None),
            "1" | "true" | "yes" | "on" => Ok(Some(true)),
            "0" | "false" | "no" | "off" => Ok(Some(false)),
            _ => Err(ConfigError::InvalidValue { key, value: raw }),
        },
        Err(_) => Ok(None),
    }
}
