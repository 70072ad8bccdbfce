use std::sync::{Arc, OnceLock};

use moka::sync::Cache;
use regex::{Regex, RegexBuilder};

use crate::screening::vocabulary::SkillVocabulary;

const MAX_CACHED_VOCABULARIES: u64 = 64;

/// Exact-match rule compiled for one vocabulary entry.
#[derive(Debug)]
pub(crate) enum SkillPattern {
    /// Blank entries never match.
    Never,
    /// Letters, digits and spaces only: bounded by `\b`.
    Word(Regex),
    /// Punctuated entries (`Node.js`, `C#`): the characters just outside a hit must not be
    /// word characters.
    Delimited(Regex),
}

impl SkillPattern {
    pub(crate) fn compile(skill: &str) -> Self {
        let skill = skill.trim();
        if skill.is_empty() {
            return SkillPattern::Never;
        }

        let body = skill
            .split_whitespace()
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(r"\s*");

        let plain = skill
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c.is_whitespace());
        let source = if plain {
            format!(r"\b{body}\b")
        } else {
            body
        };

        match RegexBuilder::new(&source).case_insensitive(true).build() {
            Ok(regex) if plain => SkillPattern::Word(regex),
            Ok(regex) => SkillPattern::Delimited(regex),
            Err(err) => {
                tracing::warn!(skill, error = %err, "skill pattern rejected; entry never matches");
                SkillPattern::Never
            }
        }
    }

    pub(crate) fn is_match(&self, text: &str) -> bool {
        match self {
            SkillPattern::Never => false,
            SkillPattern::Word(regex) => regex.is_match(text),
            SkillPattern::Delimited(regex) => delimited_match(regex, text),
        }
    }
}

fn delimited_match(regex: &Regex, text: &str) -> bool {
    let mut start = 0;
    while start <= text.len() {
        let Some(hit) = regex.find_at(text, start) else {
            return false;
        };
        let before = text[..hit.start()].chars().next_back();
        let after = text[hit.end()..].chars().next();
        if !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char) {
            return true;
        }
        start = hit.start()
            + text[hit.start()..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
    }
    false
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Patterns for every entry of one vocabulary snapshot, in vocabulary order.
#[derive(Debug)]
pub(crate) struct CompiledVocabulary {
    patterns: Vec<(String, SkillPattern)>,
}

impl CompiledVocabulary {
    fn compile(entries: &[String]) -> Self {
        Self {
            patterns: entries
                .iter()
                .map(|entry| (entry.clone(), SkillPattern::compile(entry)))
                .collect(),
        }
    }

    /// Entries whose pattern occurs somewhere in `text`.
    pub(crate) fn matches<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.patterns
            .iter()
            .filter(move |(_, pattern)| pattern.is_match(text))
            .map(|(entry, _)| entry.as_str())
    }
}

fn cache() -> &'static Cache<Arc<[String]>, Arc<CompiledVocabulary>> {
    static CACHE: OnceLock<Cache<Arc<[String]>, Arc<CompiledVocabulary>>> = OnceLock::new();
    CACHE.get_or_init(|| Cache::new(MAX_CACHED_VOCABULARIES))
}

/// Compiled patterns for `vocabulary`, memoized per vocabulary snapshot.
pub(crate) fn compiled(vocabulary: &SkillVocabulary) -> Arc<CompiledVocabulary> {
    cache().get_with(vocabulary.snapshot(), || {
        tracing::debug!(entries = vocabulary.len(), "compiling skill patterns");
        Arc::new(CompiledVocabulary::compile(vocabulary.entries()))
    })
}
