use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

/// Sorted set of canonical skills found in one document.
///
/// Membership checks ignore case; the stored values keep their canonical spelling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractedSkillSet {
    skills: Vec<String>,
}

impl ExtractedSkillSet {
    pub fn new<I, S>(skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sorted: BTreeSet<String> = skills
            .into_iter()
            .map(Into::into)
            .filter(|skill| !skill.trim().is_empty())
            .collect();

        let mut seen = HashSet::new();
        let skills = sorted
            .into_iter()
            .filter(|skill| seen.insert(skill.to_lowercase()))
            .collect();

        Self { skills }
    }

    pub fn contains(&self, skill: &str) -> bool {
        let key = skill.to_lowercase();
        self.skills.iter().any(|entry| entry.to_lowercase() == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.skills
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.skills
    }
}

impl<S: Into<String>> FromIterator<S> for ExtractedSkillSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Structured requirements parsed once from a job description and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRequirement {
    /// Items listed under the mandatory section, before phrase augmentation.
    pub mandatory_skills: Vec<String>,
    pub required_skills: Vec<String>,
    pub preferred_skills: Vec<String>,
    pub required_education: Vec<String>,
    pub min_years_experience: Option<u32>,
}

impl JobRequirement {
    /// Requirement whose mandatory list mirrors the required skills.
    pub fn with_skills<R, P, S>(required: R, preferred: P) -> Self
    where
        R: IntoIterator<Item = S>,
        P: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let required_skills: Vec<String> = required.into_iter().map(Into::into).collect();
        Self {
            mandatory_skills: required_skills.clone(),
            required_skills,
            preferred_skills: preferred.into_iter().map(Into::into).collect(),
            required_education: Vec::new(),
            min_years_experience: None,
        }
    }

    pub fn declares_skills(&self) -> bool {
        !self.required_skills.is_empty() || !self.preferred_skills.is_empty()
    }
}

/// Signals extracted from one resume; consumed by a single scoring call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub skills: ExtractedSkillSet,
    pub education: Vec<String>,
    pub years_experience: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skill_set_sorts_and_folds_case_duplicates() {
        let set = ExtractedSkillSet::new(["SQL", "AWS", "Python", "sql", " "]);
        assert_eq!(set.as_slice(), ["AWS", "Python", "SQL"]);
        assert!(set.contains("python"));
        assert!(set.contains("Sql"));
        assert!(!set.contains("Java"));
    }

    #[test]
    fn skill_set_serializes_as_plain_list() {
        let set: ExtractedSkillSet = ["Excel", "Power BI"].into_iter().collect();
        let json = serde_json::to_string(&set).expect("serializes");
        assert_eq!(json, r#"["Excel","Power BI"]"#);
    }

    #[test]
    fn with_skills_mirrors_required_into_mandatory() {
        let job = JobRequirement::with_skills(["Excel"], []);
        assert_eq!(job.mandatory_skills, vec!["Excel"]);
        assert_eq!(job.required_skills, vec!["Excel"]);
        assert!(job.preferred_skills.is_empty());
        assert!(job.declares_skills());
        assert!(!JobRequirement::default().declares_skills());
    }
}
