//! Vocabulary skill extraction: an exact pattern pass, with a fuzzy fallback that only
//! runs when the exact pass finds nothing.

mod fuzzy;
mod patterns;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::chunker::{NoopChunker, PhraseChunker};
use super::domain::ExtractedSkillSet;
use super::vocabulary::SkillVocabulary;
use crate::config::{ensure_positive, ensure_within, ConfigError};

/// Tunables for the fuzzy fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Minimum similarity (0–100) for a fuzzy hit.
    pub fuzzy_threshold: f64,
    pub ngram_min: usize,
    pub ngram_max: usize,
    pub max_fuzzy_results: usize,
    pub max_candidate_phrases: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: 78.0,
            ngram_min: 2,
            ngram_max: 3,
            max_fuzzy_results: 500,
            max_candidate_phrases: 2000,
        }
    }
}

impl ExtractionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_within("fuzzy_threshold", self.fuzzy_threshold, 0.0, 100.0)?;
        if self.ngram_min == 0 || self.ngram_min > self.ngram_max {
            return Err(ConfigError::InvalidNgramWindow {
                min: self.ngram_min,
                max: self.ngram_max,
            });
        }
        ensure_positive("max_fuzzy_results", self.max_fuzzy_results)?;
        ensure_positive("max_candidate_phrases", self.max_candidate_phrases)
    }
}

/// Finds vocabulary skills in free text.
#[derive(Clone)]
pub struct SkillExtractor {
    config: ExtractionConfig,
    chunker: Arc<dyn PhraseChunker>,
}

impl SkillExtractor {
    pub fn new(
        config: ExtractionConfig,
        chunker: Arc<dyn PhraseChunker>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, chunker })
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Every returned skill is an entry of `vocabulary`, spelled as the vocabulary spells it.
    pub fn extract(&self, text: &str, vocabulary: &SkillVocabulary) -> ExtractedSkillSet {
        if text.trim().is_empty() || vocabulary.is_empty() {
            return ExtractedSkillSet::default();
        }

        let compiled = patterns::compiled(vocabulary);
        let exact: ExtractedSkillSet = compiled.matches(text).collect();
        if !exact.is_empty() {
            return exact;
        }

        let lowered = text.to_lowercase();
        let tokens = fuzzy::tokenize(&lowered);
        let chunks = if self.chunker.is_available() {
            self.chunker.chunks(text)
        } else {
            Vec::new()
        };
        let candidates = fuzzy::candidate_phrases(&tokens, chunks, &self.config);
        let hits = fuzzy::fuzzy_matches(&candidates, vocabulary, &self.config);

        debug!(
            candidates = candidates.len(),
            hits = hits.len(),
            threshold = self.config.fuzzy_threshold,
            "no exact skill hits; used fuzzy fallback"
        );

        hits.into_iter().collect()
    }
}

impl Default for SkillExtractor {
    fn default() -> Self {
        Self {
            config: ExtractionConfig::default(),
            chunker: Arc::new(NoopChunker),
        }
    }
}

impl std::fmt::Debug for SkillExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkillExtractor")
            .field("config", &self.config)
            .field("chunker_available", &self.chunker.is_available())
            .finish()
    }
}

/// Extracts skills with the default configuration and no phrase chunker.
pub fn extract_skills(text: &str, vocabulary: &SkillVocabulary) -> ExtractedSkillSet {
    SkillExtractor::default().extract(text, vocabulary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screening::chunker::StopwordChunker;

    fn vocabulary() -> SkillVocabulary {
        SkillVocabulary::new(["Python", "SQL", "AWS", "Node.js", "CI/CD", "Power BI", ""])
    }

    #[test]
    fn exact_hits_are_sorted_vocabulary_spellings() {
        let skills = extract_skills(
            "Experienced Python and SQL developer, 5 years experience, AWS certified",
            &vocabulary(),
        );
        assert_eq!(skills.as_slice(), ["AWS", "Python", "SQL"]);
    }

    #[test]
    fn punctuated_entries_match_exactly() {
        let skills = extract_skills("Pipelines with ci/cd for node.js apps", &vocabulary());
        assert_eq!(skills.as_slice(), ["CI/CD", "Node.js"]);
    }

    #[test]
    fn degenerate_input_yields_empty_set() {
        assert!(extract_skills("", &vocabulary()).is_empty());
        assert!(extract_skills("   \n", &vocabulary()).is_empty());
        let empty = SkillVocabulary::new(Vec::<String>::new());
        assert!(extract_skills("Python and SQL", &empty).is_empty());
    }

    #[test]
    fn fuzzy_fallback_recovers_misspellings() {
        let skills = extract_skills("Dashboards built in power bl daily", &vocabulary());
        assert_eq!(skills.as_slice(), ["Power BI"]);
    }

    #[test]
    fn fuzzy_fallback_matches_truncated_multi_word_entries() {
        let vocabulary = SkillVocabulary::new(["Adobe Premiere Pro"]);
        let skills = extract_skills("Edited promos in adobe premier daily", &vocabulary);
        assert_eq!(skills.as_slice(), ["Adobe Premiere Pro"]);
    }

    #[test]
    fn fuzzy_fallback_is_skipped_after_any_exact_hit() {
        let skills = extract_skills("Python plus power bl dashboards", &vocabulary());
        assert_eq!(skills.as_slice(), ["Python"]);
    }

    #[test]
    fn chunker_spans_feed_the_fuzzy_pass() {
        let vocabulary = SkillVocabulary::new(["Kubernetes"]);
        let extractor = SkillExtractor::new(
            ExtractionConfig {
                ngram_min: 3,
                ngram_max: 3,
                ..ExtractionConfig::default()
            },
            Arc::new(StopwordChunker::default()),
        )
        .expect("valid config");

        let text = "Operated with kubernets, daily";
        assert_eq!(extractor.extract(text, &vocabulary).as_slice(), ["Kubernetes"]);

        let without_chunker = SkillExtractor::new(extractor.config().clone(), Arc::new(NoopChunker))
            .expect("valid config");
        assert!(without_chunker.extract(text, &vocabulary).is_empty());
    }

    #[test]
    fn concurrent_first_use_of_a_vocabulary_agrees() {
        let vocabulary = SkillVocabulary::new(["Haskell", "OCaml", "Elixir", "Erlang", "Clojure"]);
        let text = "Functional services in Haskell and Elixir, some clojure";

        let results: Vec<ExtractedSkillSet> = std::thread::scope(|scope| {
            let workers: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| extract_skills(text, &vocabulary)))
                .collect();
            workers
                .into_iter()
                .map(|worker| worker.join().expect("worker panicked"))
                .collect()
        });

        assert_eq!(results.len(), 8);
        for skills in &results {
            assert_eq!(skills.as_slice(), ["Clojure", "Elixir", "Haskell"]);
        }
    }

    #[test]
    fn rejects_inverted_ngram_window() {
        let config = ExtractionConfig {
            ngram_min: 3,
            ngram_max: 2,
            ..ExtractionConfig::default()
        };
        let err = SkillExtractor::new(config, Arc::new(NoopChunker)).unwrap_err();
        assert_eq!(err, ConfigError::InvalidNgramWindow { min: 3, max: 2 });
    }

    #[test]
    fn rejects_threshold_outside_percentage_range() {
        let config = ExtractionConfig {
            fuzzy_threshold: 120.0,
            ..ExtractionConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange {
                field: "fuzzy_threshold",
                ..
            })
        ));
    }
}
