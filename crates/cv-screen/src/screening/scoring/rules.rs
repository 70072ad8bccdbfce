use std::collections::{BTreeSet, HashMap};

use super::super::domain::{CandidateProfile, ExtractedSkillSet, JobRequirement};
use super::policy::Decision;

const EDUCATION_BONUS: f64 = 2.0;
const EXPERIENCE_BONUS: f64 = 2.0;
const EXPERIENCE_PENALTY: f64 = -4.0;
const NUDGE_PER_OVERLAP_PCT: f64 = 0.05;

/// Skill overlap between a job and a candidate, compared case-insensitively.
pub(crate) struct SkillMatches {
    pub matched_required: Vec<String>,
    pub missing_required: Vec<String>,
    pub matched_preferred: Vec<String>,
    pub missing_preferred: Vec<String>,
    pub matched_count: usize,
    pub total_declared: usize,
    pub required_pct: f64,
    pub preferred_pct: f64,
    pub overall_pct: f64,
}

/// Lowercase key → first spelling the job used for it.
fn declared(skills: &[String]) -> HashMap<String, &str> {
    let mut out = HashMap::new();
    for skill in skills {
        out.entry(skill.to_lowercase()).or_insert(skill.as_str());
    }
    out
}

/// Splits the declared skills into matched and missing, each sorted case-insensitively.
fn partition(
    declared: &HashMap<String, &str>,
    candidate: &ExtractedSkillSet,
) -> (Vec<String>, Vec<String>) {
    let mut entries: Vec<(&String, &&str)> = declared.iter().collect();
    entries.sort();

    let mut matched = Vec::new();
    let mut missing = Vec::new();
    for (key, spelling) in entries {
        if candidate.contains(key) {
            matched.push(spelling.to_string());
        } else {
            missing.push(spelling.to_string());
        }
    }
    (matched, missing)
}

pub(crate) fn match_skills(job: &JobRequirement, candidate: &ExtractedSkillSet) -> SkillMatches {
    let required = declared(&job.required_skills);
    let preferred = declared(&job.preferred_skills);

    let (matched_required, missing_required) = partition(&required, candidate);
    let (matched_preferred, missing_preferred) = partition(&preferred, candidate);

    let all_declared: BTreeSet<&String> = required.keys().chain(preferred.keys()).collect();
    let matched_count = all_declared
        .iter()
        .filter(|key| candidate.contains(key))
        .count();

    SkillMatches {
        required_pct: percentage(matched_required.len(), required.len()),
        preferred_pct: percentage(matched_preferred.len(), preferred.len()),
        overall_pct: percentage(matched_count, all_declared.len()),
        total_declared: all_declared.len(),
        matched_count,
        matched_required,
        missing_required,
        matched_preferred,
        missing_preferred,
    }
}

/// Share of the job's mandatory skills the candidate holds; 100 when none are declared.
pub(crate) fn mandatory_coverage(job: &JobRequirement, candidate: &ExtractedSkillSet) -> f64 {
    if job.mandatory_skills.is_empty() {
        return 100.0;
    }
    let held = job
        .mandatory_skills
        .iter()
        .filter(|skill| candidate.contains(skill))
        .count();
    percentage(held, job.mandatory_skills.len())
}

/// Base score and advisory decision for the number of matched skills.
pub(crate) fn band(matches: &SkillMatches) -> (f64, Decision) {
    let required = matches.matched_required.len() as f64;
    let preferred = matches.matched_preferred.len() as f64;

    match matches.matched_count {
        0 => {
            let base = if matches.overall_pct > 0.0 { 10.0 } else { 0.0 };
            (base, Decision::Reject)
        }
        1 => (35.0, Decision::Reject),
        2 => {
            let base = match matches.matched_required.len() {
                2 => 70.0,
                1 => 65.0,
                _ => 60.0,
            };
            (base, Decision::Accept)
        }
        3 => {
            let base = (75.0 + (3.0 * required + 2.0 * preferred).min(10.0)).min(85.0);
            (base, Decision::Accept)
        }
        count => {
            let count = count as f64;
            let ramp = ((count - 4.0) * 2.5).min(10.0);
            let required_ratio = required / count;
            (90.0 + ramp + 2.0 * required_ratio, Decision::Accept)
        }
    }
}

/// Whether the candidate satisfies the education requirement; trivially true when the
/// job names none.
pub(crate) fn education_matches(job: &JobRequirement, candidate: &CandidateProfile) -> bool {
    job.required_education.is_empty()
        || job.required_education.iter().any(|required| {
            candidate
                .education
                .iter()
                .any(|held| held.eq_ignore_ascii_case(required))
        })
}

pub(crate) fn education_bonus(matched: bool) -> f64 {
    if matched {
        EDUCATION_BONUS
    } else {
        0.0
    }
}

pub(crate) fn experience_bonus(minimum: Option<u32>, candidate: Option<u32>) -> f64 {
    match (minimum, candidate) {
        (Some(minimum), Some(years)) if years >= minimum => EXPERIENCE_BONUS,
        (Some(_), Some(_)) => EXPERIENCE_PENALTY,
        _ => 0.0,
    }
}

pub(crate) fn overlap_nudge(overall_pct: f64) -> f64 {
    NUDGE_PER_OVERLAP_PCT * overall_pct
}

pub(crate) fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        round2(100.0 * part as f64 / whole as f64)
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
