//! Optional phrase chunking used to widen skill candidates.
//!
//! Callers only ever ask whether a chunker is available; the no-op chunker stands in
//! whenever no real implementation is configured.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Splits text into candidate noun-like phrases.
pub trait PhraseChunker: Send + Sync {
    fn chunks(&self, text: &str) -> Vec<String>;

    fn is_available(&self) -> bool {
        true
    }
}

/// Absent capability: yields nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopChunker;

impl PhraseChunker for NoopChunker {
    fn chunks(&self, _text: &str) -> Vec<String> {
        Vec::new()
    }

    fn is_available(&self) -> bool {
        false
    }
}

const STOPWORDS: &[&str] = &[
    "a", "about", "an", "and", "are", "as", "at", "be", "by", "can", "for", "from", "have", "has",
    "in", "including", "into", "is", "it", "must", "of", "on", "or", "our", "such", "that",
    "the", "their", "this", "to", "using", "we", "will", "with", "within", "you", "your",
];

const MAX_PHRASE_WORDS: usize = 4;
const MIN_PHRASE_CHARS: usize = 2;
const MAX_PHRASE_CHARS: usize = 40;

/// Rule-based approximation of noun chunks: runs of words between stopwords and
/// punctuation, kept when they carry a letter and fit the phrase length window.
#[derive(Debug, Clone)]
pub struct StopwordChunker {
    max_phrases: usize,
}

impl StopwordChunker {
    pub fn new(max_phrases: usize) -> Self {
        Self { max_phrases }
    }
}

impl Default for StopwordChunker {
    fn default() -> Self {
        Self::new(200)
    }
}

impl PhraseChunker for StopwordChunker {
    fn chunks(&self, text: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();

        for clause in text.split(is_clause_break) {
            let mut run: Vec<&str> = Vec::new();
            for word in clause.split_whitespace() {
                let word = word.trim_matches(|c: char| matches!(c, '"' | '\'' | '*'));
                if word.is_empty() || STOPWORDS.contains(&word.to_lowercase().as_str()) {
                    flush_run(&mut run, &mut seen, &mut out);
                } else {
                    run.push(word);
                    if run.len() == MAX_PHRASE_WORDS {
                        flush_run(&mut run, &mut seen, &mut out);
                    }
                }
                if out.len() >= self.max_phrases {
                    out.truncate(self.max_phrases);
                    return out;
                }
            }
            flush_run(&mut run, &mut seen, &mut out);
        }

        out.truncate(self.max_phrases);
        out
    }
}

fn is_clause_break(c: char) -> bool {
    matches!(
        c,
        '.' | ',' | ';' | ':' | '!' | '?' | '(' | ')' | '\n' | '\r' | '\u{2022}' | '|'
    )
}

fn flush_run<'a>(run: &mut Vec<&'a str>, seen: &mut HashSet<String>, out: &mut Vec<String>) {
    if run.is_empty() {
        return;
    }
    let phrase = run.join(" ");
    run.clear();

    let length = phrase.chars().count();
    if (MIN_PHRASE_CHARS..=MAX_PHRASE_CHARS).contains(&length)
        && phrase.chars().any(char::is_alphabetic)
        && seen.insert(phrase.to_lowercase())
    {
        out.push(phrase);
    }
}

/// Which chunker the pipeline is wired with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkerKind {
    #[default]
    None,
    Stopword,
}

impl ChunkerKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "none" | "off" => Some(Self::None),
            "stopword" | "stopwords" => Some(Self::Stopword),
            _ => None,
        }
    }

    pub fn build(self) -> Arc<dyn PhraseChunker> {
        match self {
            ChunkerKind::None => Arc::new(NoopChunker),
            ChunkerKind::Stopword => Arc::new(StopwordChunker::default()),
        }
    }
}
