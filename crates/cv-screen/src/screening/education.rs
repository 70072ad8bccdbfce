use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};

/// Canonical degree codes and the textual variants that name them.
///
/// A variant containing `\b` is already a pattern and is used as written; any other
/// variant is escaped and matched as a whole word.
const BUILTIN_DEGREES: &[(&str, &[&str])] = &[
    (
        "BSc",
        &[
            "b.sc",
            "bsc",
            "bs",
            "b.s",
            "bachelor of science",
            "bachelor\u{2019}s of science",
            "bachelors of science",
        ],
    ),
    (
        "BA",
        &[
            "ba",
            "b.a",
            "bachelor of arts",
            "bachelor\u{2019}s of arts",
            "bachelors of arts",
        ],
    ),
    ("BEng", &["beng", "b.eng", "bachelor of engineering"]),
    ("BE", &["be"]),
    ("BPharm", &["bpharm", "b.pharm", "bachelor of pharmacy"]),
    (
        "MSc",
        &[
            "msc",
            "m.sc",
            "ms",
            "m.s",
            "master of science",
            "master\u{2019}s of science",
            "masters of science",
        ],
    ),
    (
        "MA",
        &[
            "ma",
            "m.a",
            "master of arts",
            "master\u{2019}s of arts",
            "masters of arts",
        ],
    ),
    ("MEng", &["meng", "m.eng", "master of engineering"]),
    ("MBA", &["mba", "master of business administration"]),
    (
        "PhD",
        &["phd", "ph.d", "doctorate", "d.phil", "doctor of philosophy"],
    ),
    ("MD", &["md", "doctor of medicine"]),
    ("PharmD", &["pharmd", "doctor of pharmacy"]),
    ("RN", &["registered nurse", r"\brn\b"]),
];

/// Compiled degree variants, kept in table order.
#[derive(Debug)]
pub struct DegreeTable {
    patterns: Vec<(String, Regex)>,
}

impl DegreeTable {
    /// Builds a table from `(code, variants)` rows. Variants that fail to compile are
    /// logged and skipped.
    pub fn new<'a, I, V>(rows: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, V)>,
        V: IntoIterator<Item = &'a str>,
    {
        let mut patterns = Vec::new();
        for (code, variants) in rows {
            for variant in variants {
                let source = if variant.contains(r"\b") {
                    variant.to_string()
                } else {
                    format!(r"\b{}\b", regex::escape(variant))
                };
                match RegexBuilder::new(&source).case_insensitive(true).build() {
                    Ok(regex) => patterns.push((code.to_string(), regex)),
                    Err(err) => {
                        tracing::warn!(code, variant, error = %err, "degree variant rejected");
                    }
                }
            }
        }
        Self { patterns }
    }

    pub fn builtin() -> &'static DegreeTable {
        static TABLE: OnceLock<DegreeTable> = OnceLock::new();
        TABLE.get_or_init(|| {
            DegreeTable::new(
                BUILTIN_DEGREES
                    .iter()
                    .map(|(code, variants)| (*code, variants.iter().copied())),
            )
        })
    }

    /// Degree codes mentioned in `text`, deduplicated, in table order.
    pub fn extract(&self, text: &str) -> Vec<String> {
        let mut found: Vec<String> = Vec::new();
        if text.trim().is_empty() {
            return found;
        }
        for (code, pattern) in &self.patterns {
            if !found.contains(code) && pattern.is_match(text) {
                found.push(code.clone());
            }
        }
        found
    }
}

/// Degree codes found in `text` using the built-in table.
pub fn extract_education(text: &str) -> Vec<String> {
    DegreeTable::builtin().extract(text)
}
