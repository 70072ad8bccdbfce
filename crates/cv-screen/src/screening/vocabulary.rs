use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use serde::Deserialize;

/// Canonical skills recognised when no vocabulary file is configured.
pub const BUILTIN_SKILLS: &[&str] = &[
    // Software / web
    "Python",
    "SQL",
    "Java",
    "JavaScript",
    "TypeScript",
    "HTML",
    "CSS",
    "React",
    "Redux",
    "Node.js",
    "Express",
    "FastAPI",
    "Flask",
    "Django",
    "REST",
    "GraphQL",
    "Git",
    "CI/CD",
    "Jest",
    "Playwright",
    // Cloud / devops
    "AWS",
    "GCP",
    "Azure",
    "Docker",
    "Kubernetes",
    "Terraform",
    "Linux",
    // Data / ML
    "Pandas",
    "NumPy",
    "scikit-learn",
    "TensorFlow",
    "PyTorch",
    "Spark",
    "Airflow",
    "Matplotlib",
    "Seaborn",
    "Power BI",
    "Excel",
    // Civil / mechanical / electrical
    "AutoCAD",
    "Revit",
    "ArcGIS",
    "SAP2000",
    "ETABS",
    "SAFE",
    "Primavera P6",
    "SolidWorks",
    "ANSYS",
    "MATLAB",
    "Embedded C",
    "PCB Design",
    "PLC",
    // Business / finance
    "QuickBooks",
    "SAP",
    "Financial Reporting",
    "Google Analytics",
    "Expense Reporting",
    "TaxAct",
    "BambooHR",
    "Concur",
    "Oracle Hyperion",
    "LibreOffice Calc",
    "Accounts Receivable",
    // Education / classroom / creative
    "Microsoft PowerPoint",
    "Google Classroom",
    "ClassDojo",
    "Adobe Photoshop",
    "Adobe Illustrator",
    "Adobe Premiere Pro",
    // Generic
    "Project Management",
    "Site Supervision",
];

/// Ordered set of canonical skill names that extraction is allowed to report.
///
/// The entry list is an immutable snapshot; cloning the vocabulary shares it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillVocabulary {
    entries: Arc<[String]>,
}

impl SkillVocabulary {
    /// Builds a vocabulary, dropping exact duplicates while keeping first-seen order.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let entries: Vec<String> = entries
            .into_iter()
            .map(Into::into)
            .filter(|entry| seen.insert(entry.clone()))
            .collect();

        Self {
            entries: entries.into(),
        }
    }

    pub fn builtin() -> &'static SkillVocabulary {
        static BUILTIN: OnceLock<SkillVocabulary> = OnceLock::new();
        BUILTIN.get_or_init(|| SkillVocabulary::new(BUILTIN_SKILLS.iter().copied()))
    }

    /// Reads a CSV file with a `skill` column. Other columns are ignored.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, VocabularyError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| VocabularyError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_csv_reader(file)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, VocabularyError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut skills = Vec::new();
        for row in csv_reader.deserialize::<VocabularyRow>() {
            let row = row?;
            if !row.skill.is_empty() {
                skills.push(row.skill);
            }
        }

        if skills.is_empty() {
            tracing::warn!("vocabulary file contained no skills; extraction will match nothing");
        }

        Ok(Self::new(skills))
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// The shared entry list, usable as a cache key.
    pub fn snapshot(&self) -> Arc<[String]> {
        Arc::clone(&self.entries)
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.entries.iter().any(|entry| entry == skill)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct VocabularyRow {
    #[serde(alias = "Skill")]
    skill: String,
}

/// Failures while loading a vocabulary file.
#[derive(Debug, thiserror::Error)]
pub enum VocabularyError {
    #[error("unable to read vocabulary file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed vocabulary csv: {0}")]
    Csv(#[from] csv::Error),
}
