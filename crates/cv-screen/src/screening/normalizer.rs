//! Canonical spelling for free-text skill names.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;

use super::builtin_regex;

/// Lowercased variant → canonical skill.
const BUILTIN_ALIASES: &[(&str, &str)] = &[
    // Cloud
    ("amazon web services", "AWS"),
    ("aws cloud", "AWS"),
    ("microsoft azure", "Azure"),
    ("google cloud", "GCP"),
    ("google cloud platform", "GCP"),
    // Dev / devops
    ("nodejs", "Node.js"),
    ("node js", "Node.js"),
    ("ci cd", "CI/CD"),
    ("cicd", "CI/CD"),
    ("continuous integration", "CI/CD"),
    ("continuous delivery", "CI/CD"),
    ("git version control", "Git"),
    // Web
    ("js", "JavaScript"),
    ("reactjs", "React"),
    ("react js", "React"),
    // Data / ML
    ("sklearn", "scikit-learn"),
    ("scikit learn", "scikit-learn"),
    ("scikit-learn", "scikit-learn"),
    ("np", "NumPy"),
    ("pandas library", "Pandas"),
    ("tf", "TensorFlow"),
    ("torch", "PyTorch"),
    ("pytorch", "PyTorch"),
    // Analytics / BI / finance
    ("ms excel", "Excel"),
    ("microsoft excel", "Excel"),
    ("powerbi", "Power BI"),
    ("ga", "Google Analytics"),
    ("ga4", "Google Analytics"),
    ("google analytics 4", "Google Analytics"),
    ("qb", "QuickBooks"),
    ("quickbooks online", "QuickBooks"),
    ("sap erp", "SAP"),
    ("sap business", "SAP"),
    ("financial reporting", "Financial Reporting"),
    // CAD / CAE
    ("auto cad", "AutoCAD"),
    ("autocad/cad", "AutoCAD"),
    ("cad/cam", "CAD"),
    ("solid works", "SolidWorks"),
    ("ansys workbench", "ANSYS"),
    ("sap 2000", "SAP2000"),
    // PCB / EDA
    ("pcb", "PCB Design"),
    ("altium", "Altium Designer"),
    ("kicad", "KiCad"),
    // Design / creative
    ("photoshop", "Adobe Photoshop"),
    ("illustrator", "Adobe Illustrator"),
    ("premiere", "Adobe Premiere Pro"),
    ("after effects", "Adobe After Effects"),
    ("sketch up", "SketchUp"),
    // Education / classroom
    ("ppt", "Microsoft PowerPoint"),
    ("google classroom app", "Google Classroom"),
    ("class dojo", "ClassDojo"),
    // Healthcare
    ("intensive care unit", "ICU"),
    ("clinical judgement", "Clinical Judgment"),
];

/// Acronyms returned uppercased whenever they appear on their own.
const PRESERVE_AS_ACRONYM: &[&str] = &["AWS", "GCP", "CI/CD", "SQL", "CAD", "PLC", "RN", "ICU"];

const NODE_FORMS: &[&str] = &["node.js", "nodejs", "node js"];

/// Casing pitfalls left behind by per-token title casing.
const CORRECTIONS: &[(&str, &str)] = &[
    (r"\bJavascript\b", "JavaScript"),
    (r"\bPower Bi\b", "Power BI"),
    (r"\bMs Excel\b", "Excel"),
    (r"\bAutocad\b", "AutoCAD"),
    (r"\bSap2000\b", "SAP2000"),
];

/// Many-to-one map from cleaned, lowercased skill variants to canonical names.
#[derive(Debug, Clone)]
pub struct AliasTable {
    aliases: HashMap<String, String>,
    preserved: HashSet<&'static str>,
}

impl AliasTable {
    pub fn new<I, K, V>(aliases: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let aliases = aliases
            .into_iter()
            .map(|(variant, canonical)| {
                (clean(variant.as_ref()).to_lowercase(), canonical.into())
            })
            .collect();

        Self {
            aliases,
            preserved: PRESERVE_AS_ACRONYM.iter().copied().collect(),
        }
    }

    pub fn builtin() -> &'static AliasTable {
        static BUILTIN: OnceLock<AliasTable> = OnceLock::new();
        BUILTIN.get_or_init(|| AliasTable::new(BUILTIN_ALIASES.iter().copied()))
    }

    /// Canonical form for `variant`, looked up case-insensitively after cleaning.
    pub fn lookup(&self, variant: &str) -> Option<&str> {
        self.aliases
            .get(&clean(variant).to_lowercase())
            .map(String::as_str)
    }

    /// Canonicalizes one skill string. Empty input maps to an empty string.
    pub fn normalize_skill(&self, raw: &str) -> String {
        let cleaned = clean(raw);
        if cleaned.is_empty() {
            return String::new();
        }

        if let Some(canonical) = self.lookup(&cleaned) {
            return canonical.to_string();
        }

        let upper = cleaned.to_uppercase();
        if self.preserved.contains(upper.as_str()) {
            return upper;
        }

        let lowered = cleaned.to_lowercase();
        if NODE_FORMS.contains(&lowered.as_str()) {
            return "Node.js".to_string();
        }

        let cased = cleaned
            .split(' ')
            .map(|token| self.case_token(token))
            .collect::<Vec<_>>()
            .join(" ");

        corrections()
            .iter()
            .fold(cased, |acc, (pattern, replacement)| {
                pattern.replace_all(&acc, *replacement).into_owned()
            })
    }

    /// Canonicalizes a list, skipping empty entries and case-insensitive duplicates.
    pub fn normalize_skills<I, S>(&self, skills: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for skill in skills {
            let canonical = self.normalize_skill(skill.as_ref());
            if canonical.is_empty() {
                continue;
            }
            if seen.insert(canonical.to_lowercase()) {
                out.push(canonical);
            }
        }
        out
    }

    fn case_token(&self, token: &str) -> String {
        let lowered = token.to_lowercase();
        if NODE_FORMS.contains(&lowered.as_str()) || lowered == "ci/cd" {
            if let Some(canonical) = self.aliases.get(&lowered) {
                return canonical.clone();
            }
            return match lowered.as_str() {
                "ci/cd" => "CI/CD".to_string(),
                "node.js" => "Node.js".to_string(),
                _ => token.to_string(),
            };
        }

        if token.chars().any(char::is_uppercase) {
            token.to_string()
        } else if token.chars().all(|c| c.is_ascii_alphabetic()) {
            capitalize(token)
        } else {
            title_case(token)
        }
    }
}

/// Canonicalizes one skill string with the built-in alias table.
pub fn normalize_skill(raw: &str) -> String {
    AliasTable::builtin().normalize_skill(raw)
}

/// Canonicalizes a list with the built-in alias table, de-duplicating case-insensitively.
pub fn normalize_skills<I, S>(skills: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    AliasTable::builtin().normalize_skills(skills)
}

fn corrections() -> &'static [(Regex, &'static str)] {
    static COMPILED: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    COMPILED.get_or_init(|| {
        CORRECTIONS
            .iter()
            .map(|(pattern, replacement)| (builtin_regex(pattern), *replacement))
            .collect()
    })
}

/// Trims, folds en/em dashes to `-`, and collapses whitespace runs to one space.
pub(crate) fn clean(raw: &str) -> String {
    raw.replace(['\u{2013}', '\u{2014}'], "-")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Uppercases the first letter of every alphabetic run.
fn title_case(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    let mut in_word = false;
    for c in token.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}
