// src/extractors/keywords.rs

use crate::utils::error::ExtractError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

// --- Built-in Heading Tables ---
const EDUCATION_KEYWORDS: &[&str] = &["education", "academic", "qualifications"];
const EXPERIENCE_KEYWORDS: &[&str] = &["experience", "work history", "employment", "work experience"];
const SKILL_KEYWORDS: &[&str] = &["skills", "abilities", "technical skills", "competencies"];
const CERTIFICATION_KEYWORDS: &[&str] = &[
    "certifications",
    "licenses",
    "honors",
    "awards",
    "certificate",
    "professional development",
    "courses",
    "training",
    "qualifications",
    "accreditations",
    "achievements",
];
// Headings that only ever terminate another section
const OTHER_HEADING_KEYWORDS: &[&str] = &[
    "summary",
    "objective",
    "projects",
    "publications",
    "volunteer",
    "interests",
    "references",
    "hobbies and interests",
    "declaration",
];

/// Logical resume sections that can be extracted by heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Education,
    Experience,
    Skills,
    Certifications,
}

impl Section {
    pub fn name(&self) -> &'static str {
        match self {
            Section::Education => "Education",
            Section::Experience => "Experience",
            Section::Skills => "Skills",
            Section::Certifications => "Certifications",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An ordered, non-empty list of lowercase heading synonyms for one section.
/// Earlier entries take priority when searching a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct KeywordSet(Vec<String>);

impl KeywordSet {
    /// Builds a keyword set, normalising each entry to trimmed lowercase.
    /// Fails on an empty list or a blank keyword.
    pub fn new<I, S>(keywords: I) -> Result<Self, ExtractError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized = Vec::new();
        for keyword in keywords {
            let keyword = keyword.as_ref().trim().to_lowercase();
            if keyword.is_empty() {
                return Err(ExtractError::InvalidArgument(
                    "heading keywords must not be blank".to_string(),
                ));
            }
            normalized.push(keyword);
        }
        if normalized.is_empty() {
            return Err(ExtractError::InvalidArgument(
                "keyword set must contain at least one keyword".to_string(),
            ));
        }
        Ok(Self(normalized))
    }

    // Only for the compiled-in tables, which are known to be valid.
    fn from_static(keywords: &[&str]) -> Self {
        Self(keywords.iter().map(|k| k.to_string()).collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl TryFrom<Vec<String>> for KeywordSet {
    type Error = ExtractError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        KeywordSet::new(value)
    }
}

impl From<KeywordSet> for Vec<String> {
    fn from(value: KeywordSet) -> Self {
        value.0
    }
}

/// The complete heading configuration: one keyword set per section plus the
/// headings that only mark where a section ends.
///
/// Fields missing from a JSON file fall back to the built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordTable {
    pub education: KeywordSet,
    pub experience: KeywordSet,
    pub skills: KeywordSet,
    pub certifications: KeywordSet,
    pub other_headings: KeywordSet,
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self {
            education: KeywordSet::from_static(EDUCATION_KEYWORDS),
            experience: KeywordSet::from_static(EXPERIENCE_KEYWORDS),
            skills: KeywordSet::from_static(SKILL_KEYWORDS),
            certifications: KeywordSet::from_static(CERTIFICATION_KEYWORDS),
            other_headings: KeywordSet::from_static(OTHER_HEADING_KEYWORDS),
        }
    }
}

impl KeywordTable {
    /// Reads a keyword table from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, crate::utils::AppError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let table: KeywordTable = serde_json::from_str(&raw).map_err(|e| {
            crate::utils::AppError::Config(format!(
                "Invalid keyword table '{}': {}",
                path.display(),
                e
            ))
        })?;
        tracing::info!("Loaded keyword table from {}", path.display());
        Ok(table)
    }

    pub fn keywords(&self, section: Section) -> &KeywordSet {
        match section {
            Section::Education => &self.education,
            Section::Experience => &self.experience,
            Section::Skills => &self.skills,
            Section::Certifications => &self.certifications,
        }
    }

    /// Every known heading keyword, in table order. Duplicates across
    /// sections (e.g. "qualifications") are kept.
    pub fn all_keywords(&self) -> impl Iterator<Item = &str> {
        self.education
            .iter()
            .chain(self.experience.iter())
            .chain(self.skills.iter())
            .chain(self.certifications.iter())
            .chain(self.other_headings.iter())
    }

    /// Each keyword group with a display label, used for heading annotation.
    pub fn groups(&self) -> [(&'static str, &KeywordSet); 5] {
        [
            ("education", &self.education),
            ("experience", &self.experience),
            ("skills", &self.skills),
            ("certifications", &self.certifications),
            ("other", &self.other_headings),
        ]
    }
}
