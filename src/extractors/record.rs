// src/extractors/record.rs

use serde::{Serialize, Serializer};

/// Sentinel reported for any field that could not be extracted.
pub const NOT_FOUND: &str = "Not Found";

/// Outcome of extracting a single field. Absence is a normal value, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldValue {
    Found(String),
    #[default]
    NotFound,
}

impl FieldValue {
    /// Wraps extracted text, treating whitespace-only text as absent.
    pub fn from_text<S: AsRef<str>>(text: S) -> Self {
        let trimmed = text.as_ref().trim();
        if trimmed.is_empty() {
            FieldValue::NotFound
        } else {
            FieldValue::Found(trimmed.to_string())
        }
    }

    /// Joins several matches with ", "; no matches means absent.
    pub fn from_items<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = items
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        FieldValue::from_text(joined)
    }

    pub fn as_str(&self) -> &str {
        match self {
            FieldValue::Found(text) => text,
            FieldValue::NotFound => NOT_FOUND,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, FieldValue::Found(_))
    }

    /// Returns `self` if found, otherwise evaluates the fallback.
    pub fn or_else<F: FnOnce() -> FieldValue>(self, fallback: F) -> FieldValue {
        match self {
            FieldValue::Found(_) => self,
            FieldValue::NotFound => fallback(),
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// The per-document output: every field is always present.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FieldRecord {
    pub name: FieldValue,
    pub phone: FieldValue,
    pub email: FieldValue,
    pub skills: FieldValue,
    pub education: FieldValue,
    pub experience: FieldValue,
    pub certifications: FieldValue,
}

impl FieldRecord {
    /// Column order used by every export format.
    pub const FIELD_NAMES: [&'static str; 7] = [
        "Name",
        "Phone",
        "Email",
        "Skills",
        "Education",
        "Experience",
        "Certifications",
    ];

    /// Field values in `FIELD_NAMES` order.
    pub fn values(&self) -> [&FieldValue; 7] {
        [
            &self.name,
            &self.phone,
            &self.email,
            &self.skills,
            &self.education,
            &self.experience,
            &self.certifications,
        ]
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        Self::FIELD_NAMES.into_iter().zip(self.values())
    }
}
