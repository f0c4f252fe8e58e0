// src/extractors/entities.rs
//! Pluggable named-entity recognition.
//!
//! The resume parser only needs person names and skill-like terms, so the
//! recognizer is a capability injected into it rather than a hard dependency
//! on any NLP stack.

use crate::extractors::keywords::KeywordTable;
use crate::utils::error::ExtractError;
use regex::Regex;

// How many leading non-empty lines are considered when looking for a name
const MAX_NAME_LINES: usize = 5;

const NAME_STOP_LINES: &[&str] = &["resume", "résumé", "curriculum vitae", "cv"];

const TECH_TERMS: &[&str] = &[
    "Rust", "Python", "Java", "JavaScript", "TypeScript", "C++", "C#", "SQL", "PostgreSQL",
    "Docker", "Kubernetes", "AWS", "Azure", "Linux", "Git", "React", "TensorFlow", "PyTorch",
];

const SKILL_TERMS: &[&str] = &[
    "Project Management", "Machine Learning", "Data Analysis", "Agile", "Scrum",
    "Leadership", "Public Speaking", "Technical Writing",
];

const LANGUAGE_TERMS: &[&str] = &[
    "English", "Spanish", "French", "German", "Mandarin", "Hindi", "Arabic", "Portuguese",
    "Japanese", "Italian",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityLabel {
    Person,
    Skill,
    Language,
    Tech,
}

impl EntityLabel {
    /// Labels that count towards the skills fallback.
    pub fn is_skill_like(&self) -> bool {
        matches!(self, EntityLabel::Skill | EntityLabel::Language | EntityLabel::Tech)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
}

impl Entity {
    pub fn new(text: impl Into<String>, label: EntityLabel) -> Self {
        Self { text: text.into(), label }
    }
}

/// Turns document text into typed entities.
pub trait EntityRecognizer: Send + Sync {
    fn recognize(&self, text: &str) -> Vec<Entity>;
}

/// Recognizes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRecognizer;

impl EntityRecognizer for NullRecognizer {
    fn recognize(&self, _text: &str) -> Vec<Entity> {
        Vec::new()
    }
}

struct Term {
    name: &'static str,
    label: EntityLabel,
    re: Regex,
}

/// Rule-based recognizer: a person name from the first lines of the
/// document, plus technologies, general skills and spoken languages from a
/// fixed gazetteer.
pub struct HeuristicRecognizer {
    heading_keywords: Vec<String>,
    terms: Vec<Term>,
}

impl HeuristicRecognizer {
    pub fn new(table: &KeywordTable) -> Result<Self, ExtractError> {
        let mut terms = Vec::with_capacity(TECH_TERMS.len() + SKILL_TERMS.len() + LANGUAGE_TERMS.len());
        let labelled = TECH_TERMS
            .iter()
            .map(|t| (*t, EntityLabel::Tech))
            .chain(SKILL_TERMS.iter().map(|t| (*t, EntityLabel::Skill)))
            .chain(LANGUAGE_TERMS.iter().map(|t| (*t, EntityLabel::Language)));
        for (name, label) in labelled {
            // `\b` does not work around terms ending in symbols like "C++"
            let re = Regex::new(&format!(r"(?i)(?:^|\W)({})(?:\W|$)", regex::escape(name)))?;
            terms.push(Term { name, label, re });
        }

        Ok(Self {
            heading_keywords: table.all_keywords().map(str::to_string).collect(),
            terms,
        })
    }

    fn find_person(&self, text: &str) -> Option<String> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .take(MAX_NAME_LINES)
            .find(|line| self.looks_like_name(line))
            .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
    }

    fn looks_like_name(&self, line: &str) -> bool {
        let lower = line.to_lowercase();
        if NAME_STOP_LINES.contains(&lower.as_str()) {
            return false;
        }
        if self.heading_keywords.iter().any(|k| lower.starts_with(k.as_str())) {
            return false;
        }

        let words: Vec<&str> = line.split_whitespace().collect();
        (2..=4).contains(&words.len())
            && words.iter().all(|word| {
                word.chars().next().is_some_and(char::is_uppercase)
                    && word.chars().all(|c| c.is_alphabetic() || matches!(c, '\'' | '-' | '.'))
            })
    }
}

impl EntityRecognizer for HeuristicRecognizer {
    fn recognize(&self, text: &str) -> Vec<Entity> {
        let mut entities = Vec::new();
        if let Some(name) = self.find_person(text) {
            tracing::trace!("Heuristic person entity: {}", name);
            entities.push(Entity::new(name, EntityLabel::Person));
        }

        let mut hits: Vec<(usize, &Term)> = self
            .terms
            .iter()
            .filter_map(|term| {
                term.re
                    .captures(text)
                    .and_then(|caps| caps.get(1))
                    .map(|m| (m.start(), term))
            })
            .collect();
        hits.sort_by_key(|(position, _)| *position);
        entities.extend(hits.into_iter().map(|(_, term)| Entity::new(term.name, term.label.clone())));

        entities
    }
}
