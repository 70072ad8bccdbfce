//! Contact details and headline lines pulled from resume text.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::builtin_regex;

const TITLE_WORDS: &[&str] = &[
    "engineer",
    "developer",
    "scientist",
    "analyst",
    "manager",
    "consultant",
    "architect",
    "specialist",
    "lead",
    "head",
    "designer",
    "teacher",
    "nurse",
    "pharmacist",
    "coordinator",
];

const MAX_HEADLINE_CHARS: usize = 80;

struct ContactPatterns {
    email: Regex,
    phone: Regex,
    link: Regex,
    boilerplate: Regex,
}

fn patterns() -> &'static ContactPatterns {
    static PATTERNS: OnceLock<ContactPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| ContactPatterns {
        email: builtin_regex(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}"),
        phone: builtin_regex(
            r"(?:\+?[0-9]{1,3}[\s-]?)?(?:\(?[0-9]{2,4}\)?[\s-]?)?[0-9](?:[0-9\s-]{6,}[0-9])",
        ),
        link: builtin_regex(r"(?i)https?://[^\s)>\]}]+"),
        boilerplate: builtin_regex(
            r"(?i)^(curriculum vitae|resume|cv|profile|summary|contacts?)$",
        ),
    })
}

/// First email and phone number plus every web link found in a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub links: Vec<String>,
}

pub fn extract_contacts(text: &str) -> ContactDetails {
    let patterns = patterns();
    ContactDetails {
        email: patterns.email.find(text).map(|m| m.as_str().to_string()),
        phone: patterns.phone.find(text).map(|m| m.as_str().to_string()),
        links: patterns
            .link
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect(),
    }
}

/// Best-effort candidate name: the first non-empty line that is not a section header,
/// has at least two words with at least two of them capitalised, and is reasonably short.
pub fn guess_name(text: &str) -> Option<String> {
    let boilerplate = &patterns().boilerplate;
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !boilerplate.is_match(line))
        .find(|line| {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            let capitalised = tokens
                .iter()
                .filter(|token| token.chars().next().is_some_and(char::is_uppercase))
                .count();
            tokens.len() >= 2 && capitalised >= 2 && line.chars().count() < MAX_HEADLINE_CHARS
        })
        .map(str::to_string)
}

/// Lines that mention a job-title word, in document order without repeats.
pub fn extract_job_titles(text: &str) -> Vec<String> {
    let mut titles: Vec<String> = Vec::new();
    for line in text.lines().map(str::trim) {
        let length = line.chars().count();
        if !(3..=MAX_HEADLINE_CHARS).contains(&length) {
            continue;
        }
        let lowered = line.to_lowercase();
        if TITLE_WORDS.iter().any(|word| lowered.contains(word))
            && !titles.iter().any(|seen| seen == line)
        {
            titles.push(line.to_string());
        }
    }
    titles
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Curriculum Vitae\n\
        Jordan Avery Lee\n\
        Senior Data Engineer\n\
        jordan.lee@example.org | +44 20 7946 0958\n\
        https://github.com/jlee | https://www.linkedin.com/in/jlee)\n\
        \n\
        Data Engineer at Northwind (2019-2024)\n\
        Senior Data Engineer\n";

    #[test]
    fn extracts_first_email_phone_and_all_links() {
        let contacts = extract_contacts(RESUME);
        assert_eq!(contacts.email.as_deref(), Some("jordan.lee@example.org"));
        assert_eq!(contacts.phone.as_deref(), Some("+44 20 7946 0958"));
        assert_eq!(
            contacts.links,
            vec!["https://github.com/jlee", "https://www.linkedin.com/in/jlee"]
        );
    }

    #[test]
    fn missing_contacts_are_empty() {
        assert_eq!(extract_contacts("no details here"), ContactDetails::default());
    }

    #[test]
    fn name_guess_skips_headers() {
        assert_eq!(guess_name(RESUME).as_deref(), Some("Jordan Avery Lee"));
        assert_eq!(guess_name("Resume\nprofile\nsummary of skills"), None);
        assert_eq!(guess_name(""), None);
    }

    #[test]
    fn job_titles_are_collected_once_in_order() {
        assert_eq!(
            extract_job_titles(RESUME),
            vec!["Senior Data Engineer", "Data Engineer at Northwind (2019-2024)"]
        );
    }
}
