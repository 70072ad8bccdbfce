use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::OnceLock;

use rapidfuzz::fuzz;
use regex::Regex;

use super::ExtractionConfig;
use crate::screening::builtin_regex;
use crate::screening::vocabulary::SkillVocabulary;

const MIN_CANDIDATE_CHARS: usize = 3;
const MAX_CANDIDATE_CHARS: usize = 50;

fn token_regex() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| builtin_regex(r"[a-z0-9+#./-]+"))
}

/// Alphanumeric clusters, keeping the punctuation common in tech names.
pub(crate) fn tokenize(text_lower: &str) -> Vec<&str> {
    token_regex()
        .find_iter(text_lower)
        .map(|token| token.as_str())
        .collect()
}

/// Deduplicated phrases to compare against the vocabulary: n-gram windows plus chunker
/// spans, filtered by length, falling back to single tokens when nothing survives.
pub(crate) fn candidate_phrases(
    tokens: &[&str],
    chunks: Vec<String>,
    config: &ExtractionConfig,
) -> Vec<String> {
    let limit = config.max_candidate_phrases;
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    let mut admit = |phrase: String, candidates: &mut Vec<String>| {
        let length = phrase.chars().count();
        if (MIN_CANDIDATE_CHARS..=MAX_CANDIDATE_CHARS).contains(&length)
            && seen.insert(phrase.clone())
        {
            candidates.push(phrase);
        }
    };

    'windows: for size in config.ngram_min..=config.ngram_max {
        for window in tokens.windows(size) {
            if candidates.len() >= limit {
                break 'windows;
            }
            admit(window.join(" "), &mut candidates);
        }
    }

    for chunk in chunks {
        if candidates.len() >= limit {
            break;
        }
        admit(chunk.trim().to_lowercase(), &mut candidates);
    }

    if candidates.is_empty() {
        let mut seen_tokens = HashSet::new();
        candidates = tokens
            .iter()
            .filter(|token| seen_tokens.insert(**token))
            .take(limit)
            .map(|token| token.to_string())
            .collect();
    }

    candidates
}

/// Indel similarity on a 0–100 scale: `1 - (insertions + deletions) / (len_a + len_b)`.
///
/// A window that is a truncated prefix of a longer entry still scores well.
pub(crate) fn similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    fuzz::ratio(a.chars(), b.chars()) * 100.0
}

/// Vocabulary entries whose best similarity to any candidate meets the threshold, at most
/// `max_fuzzy_results` of them. Best scores come first; ties keep vocabulary order.
pub(crate) fn fuzzy_matches(
    candidates: &[String],
    vocabulary: &SkillVocabulary,
    config: &ExtractionConfig,
) -> Vec<String> {
    let mut hits: Vec<(&str, f64)> = Vec::new();

    for entry in vocabulary.entries() {
        let target = entry.trim().to_lowercase();
        if target.is_empty() {
            continue;
        }

        let best = candidates
            .iter()
            .map(|candidate| similarity(candidate, &target))
            .fold(0.0_f64, f64::max);

        if best >= config.fuzzy_threshold {
            hits.push((entry.as_str(), best));
        }
    }

    hits.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    hits.truncate(config.max_fuzzy_results);
    hits.into_iter().map(|(entry, _)| entry.to_string()).collect()
}
