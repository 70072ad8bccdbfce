use std::sync::OnceLock;

use regex::Regex;

use crate::screening::builtin_regex;

struct YearRules {
    range: Regex,
    minimum: Regex,
    plus: Regex,
    simple: Regex,
}

fn rules() -> &'static YearRules {
    static RULES: OnceLock<YearRules> = OnceLock::new();
    RULES.get_or_init(|| YearRules {
        range: builtin_regex(
            r"(?i)\b(?P<a>[0-9]{1,2})\s*(?:-|–|—|to)\s*(?P<b>[0-9]{1,2})\s*(?:\+?\s*)?(?:years?|yrs?)\b",
        ),
        minimum: builtin_regex(
            r"(?i)\b(?:min(?:imum)?|at\s+least)\s*(?P<n>[0-9]{1,2})\s*(?:\+?\s*)?(?:years?|yrs?)\b",
        ),
        plus: builtin_regex(r"(?i)\b(?P<n>[0-9]{1,2})\s*\+\s*(?:years?|yrs?)\b"),
        simple: builtin_regex(
            r"(?i)\b(?P<n>[0-9]{1,2})\s*(?:years?|yrs?)\s*(?:of\s+)?(?:experience|exp)?\b",
        ),
    })
}

fn capture(regex: &Regex, text: &str, group: &str) -> Option<u32> {
    regex.captures(text)?.name(group)?.as_str().parse().ok()
}

/// Years of experience stated in `text`.
///
/// Rules are tried in a fixed order and the first one that yields a number wins: a range
/// (`3-5 years`, `3 to 5 yrs`) gives its upper bound, then `minimum`/`at least N years`,
/// then `N+ years`, then a bare `N years [of experience]`.
pub fn extract_years_experience(text: &str) -> Option<u32> {
    if text.trim().is_empty() {
        return None;
    }
    let rules = rules();

    if let Some(captures) = rules.range.captures(text) {
        let bound = |name: &str| captures.name(name)?.as_str().parse::<u32>().ok();
        if let (Some(a), Some(b)) = (bound("a"), bound("b")) {
            return Some(a.max(b));
        }
    }

    capture(&rules.minimum, text, "n")
        .or_else(|| capture(&rules.plus, text, "n"))
        .or_else(|| capture(&rules.simple, text, "n"))
}
