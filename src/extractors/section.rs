// src/extractors/section.rs

// --- Imports ---
use crate::extractors::keywords::{KeywordSet, KeywordTable, Section};
use crate::extractors::record::FieldValue;
use crate::utils::error::ExtractError;
use regex::Regex;
use std::collections::HashMap;
use std::ops::Range;

/// Builds a case-insensitive, line-anchored pattern matching any line that
/// starts (after optional whitespace) with one of `keywords`. The match runs
/// to the end of that line.
pub(crate) fn heading_regex<'k, I>(keywords: I) -> Result<Regex, regex::Error>
where
    I: IntoIterator<Item = &'k str>,
{
    let alternation = keywords
        .into_iter()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?im)^\s*(?:{}).*$", alternation))
}

// --- Data Structures ---
/// Byte offsets of a located section within the original document text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSpan {
    pub keyword: String,    // The heading keyword that matched
    pub heading: Range<usize>, // The heading match, possibly including leading blank lines
    pub body: Range<usize>, // Untrimmed body, from the end of the heading line to the next heading
}

impl SectionSpan {
    pub fn body_text<'t>(&self, text: &'t str) -> &'t str {
        text[self.body.clone()].trim()
    }
}

/// Patterns for one heading keyword: where it starts a section, and where a
/// section it starts ends.
#[derive(Debug, Clone)]
struct KeywordPatterns {
    heading: Regex,
    boundary: Option<Regex>, // None when every known keyword is this one
}

impl KeywordPatterns {
    fn compile(keyword: &str, table: &KeywordTable) -> Result<Self, ExtractError> {
        // Only the literal keyword is excluded, not its synonym group, so a
        // synonym of the same section (or a keyword shared with another
        // section) still terminates the body.
        let others: Vec<&str> = table.all_keywords().filter(|k| *k != keyword).collect();
        let boundary = if others.is_empty() {
            None
        } else {
            Some(heading_regex(others)?)
        };
        Ok(Self {
            heading: heading_regex([keyword])?,
            boundary,
        })
    }
}

// --- Main Extractor Structure ---
/// Locates named sections in unstructured resume text by heading keyword.
///
/// The extractor owns an immutable keyword table; the table's combined
/// keyword list decides where a section ends. Patterns for every keyword in
/// the table are compiled once, up front.
#[derive(Debug, Clone)]
pub struct SectionExtractor {
    table: KeywordTable,
    patterns: HashMap<String, KeywordPatterns>,
}

impl SectionExtractor {
    pub fn new(table: KeywordTable) -> Result<Self, ExtractError> {
        let mut patterns = HashMap::new();
        for keyword in table.all_keywords() {
            if !patterns.contains_key(keyword) {
                patterns.insert(keyword.to_string(), KeywordPatterns::compile(keyword, &table)?);
            }
        }
        tracing::debug!("Compiled heading patterns for {} keyword(s)", patterns.len());
        Ok(Self { table, patterns })
    }

    pub fn table(&self) -> &KeywordTable {
        &self.table
    }

    /// Extracts one of the configured sections.
    pub fn extract(&self, text: &str, section: Section) -> Result<FieldValue, ExtractError> {
        let value = self.extract_section(text, self.table.keywords(section))?;
        tracing::debug!("{} section {}", section, if value.is_found() { "found" } else { "not found" });
        Ok(value)
    }

    /// Returns the trimmed body of the first section whose heading starts with
    /// one of `keywords`, or `FieldValue::NotFound`.
    ///
    /// Keywords are tried in order and the first keyword that heads any line
    /// wins, regardless of where in the text that line is.
    pub fn extract_section(&self, text: &str, keywords: &KeywordSet) -> Result<FieldValue, ExtractError> {
        Ok(match self.locate_section(text, keywords)? {
            Some(span) => {
                tracing::trace!(
                    "Section headed by '{}' at {:?} spans {:?}",
                    span.keyword,
                    span.heading,
                    span.body
                );
                FieldValue::from_text(span.body_text(text))
            }
            None => FieldValue::NotFound,
        })
    }

    /// Finds the heading and body offsets for the section introduced by one of `keywords`.
    ///
    /// Keywords outside the table have no precompiled patterns and are
    /// compiled for this call only.
    pub fn locate_section(&self, text: &str, keywords: &KeywordSet) -> Result<Option<SectionSpan>, ExtractError> {
        for keyword in keywords.iter() {
            let compiled;
            let patterns = match self.patterns.get(keyword) {
                Some(patterns) => patterns,
                None => {
                    compiled = KeywordPatterns::compile(keyword, &self.table)?;
                    &compiled
                }
            };

            let Some(heading) = patterns.heading.find(text) else {
                tracing::trace!("Keyword '{}' not found as a section header", keyword);
                continue;
            };

            let body_start = heading.end();
            tracing::debug!(
                "Matched heading '{}' for keyword '{}' at {}",
                heading.as_str().trim(),
                keyword,
                heading.start()
            );

            let next_heading = patterns
                .boundary
                .as_ref()
                .and_then(|re| re.find(&text[body_start..]));
            let body_end = match next_heading {
                Some(m) => {
                    tracing::debug!("Found next section at index {}", body_start + m.start());
                    body_start + m.start()
                }
                None => {
                    tracing::debug!("No next section found, taking rest of the text");
                    text.len()
                }
            };

            return Ok(Some(SectionSpan {
                keyword: keyword.to_string(),
                heading: heading.range(),
                body: body_start..body_end,
            }));
        }
        Ok(None)
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> SectionExtractor {
        SectionExtractor::new(KeywordTable::default()).unwrap()
    }

    fn found(text: &str) -> FieldValue {
        FieldValue::Found(text.to_string())
    }

    const SAMPLE: &str = "Jane Doe\nEducation:\n\nBachelor of Science\nExperience:\nAcme Corp, Engineer\n2019 - 2023\n";

    #[test]
    fn test_education_stops_at_experience_heading() {
        let ex = extractor();
        assert_eq!(ex.extract(SAMPLE, Section::Education).unwrap(), found("Bachelor of Science"));
        assert_eq!(
            ex.extract(SAMPLE, Section::Experience).unwrap(),
            found("Acme Corp, Engineer\n2019 - 2023")
        );
    }

    #[test]
    fn test_no_heading_is_not_found() {
        let text = "Just a paragraph of text\nwith nothing that looks like a heading.";
        for section in [Section::Education, Section::Experience, Section::Skills, Section::Certifications] {
            assert_eq!(extractor().extract(text, section).unwrap(), FieldValue::NotFound);
        }
    }

    #[test]
    fn test_heading_match_is_case_insensitive_and_body_keeps_case() {
        for heading in ["EDUCATION", "education", "Education"] {
            let text = format!("{}\nMIT - BSc in Physics, GPA 3.9\nSkills\nRust", heading);
            assert_eq!(
                extractor().extract(&text, Section::Education).unwrap(),
                found("MIT - BSc in Physics, GPA 3.9")
            );
        }
    }

    #[test]
    fn test_mid_line_keyword_is_not_a_heading() {
        let text = "Summary\nI gained valuable experience while at Acme.\nSkills\nRust, SQL";
        assert_eq!(extractor().extract(text, Section::Experience).unwrap(), FieldValue::NotFound);
    }

    #[test]
    fn test_keyword_list_order_wins_over_text_order() {
        let keywords = KeywordSet::new(["experience", "work history"]).unwrap();
        let text = "Work History\nAcme Corp\nEducation\nBSc";
        assert_eq!(extractor().extract_section(text, &keywords).unwrap(), found("Acme Corp"));

        // "employment" appears first in the text, but "experience" is first in the list
        let text = "Employment\nOld Job\nExperience\nNew Job";
        assert_eq!(extractor().extract(text, Section::Experience).unwrap(), found("New Job"));
    }

    #[test]
    fn test_last_section_runs_to_end_of_text() {
        let text = "Education\nBSc\nSkills\nRust, Go\nDocker\n\n   \n";
        assert_eq!(extractor().extract(text, Section::Skills).unwrap(), found("Rust, Go\nDocker"));
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let ex = extractor();
        let first = ex.extract(SAMPLE, Section::Experience).unwrap();
        let second = ex.extract(SAMPLE, Section::Experience).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_heading_line_trailing_content_is_dropped() {
        let text = "  Technical Skills & Tools:\nRust, Kubernetes\nProjects\nCLI tool";
        assert_eq!(extractor().extract(text, Section::Skills).unwrap(), found("Rust, Kubernetes"));
    }

    #[test]
    fn test_only_the_matched_keyword_is_excluded_from_boundaries() {
        // The same keyword repeated does not end the section
        let text = "Education\nBSc\nEducation abroad in Spain\nExperience\nAcme";
        assert_eq!(
            extractor().extract(text, Section::Education).unwrap(),
            found("BSc\nEducation abroad in Spain")
        );

        // A synonym of the same section does end it
        let text = "Education\nBSc\nQualifications\nCFA Level II";
        assert_eq!(extractor().extract(text, Section::Education).unwrap(), found("BSc"));
    }

    #[test]
    fn test_shared_keyword_heading_is_excluded_from_its_own_boundary() {
        // "qualifications" belongs to education and certifications; both copies are excluded
        let text = "Qualifications\nBSc Physics\nCertifications\nAWS Solutions Architect";
        assert_eq!(extractor().extract(text, Section::Education).unwrap(), found("BSc Physics"));
        assert_eq!(
            extractor().extract(text, Section::Certifications).unwrap(),
            found("AWS Solutions Architect")
        );
    }

    #[test]
    fn test_empty_body_is_not_found() {
        let text = "Skills\n\n   \nEducation\nBSc";
        assert_eq!(extractor().extract(text, Section::Skills).unwrap(), FieldValue::NotFound);
    }

    #[test]
    fn test_heading_at_end_of_text_is_not_found() {
        assert_eq!(extractor().extract("Intro\nSkills", Section::Skills).unwrap(), FieldValue::NotFound);
    }

    #[test]
    fn test_non_ascii_text_keeps_offsets() {
        let text = "Zoë Ünal\nEDUCATION\nÉcole Polytechnique — Ingénieur\nSkills\nRust";
        assert_eq!(
            extractor().extract(text, Section::Education).unwrap(),
            found("École Polytechnique — Ingénieur")
        );
    }

    #[test]
    fn test_crlf_line_endings() {
        let text = "Education\r\nBSc\r\nExperience\r\nAcme\r\n";
        assert_eq!(extractor().extract(text, Section::Education).unwrap(), found("BSc"));
        assert_eq!(extractor().extract(text, Section::Experience).unwrap(), found("Acme"));
    }

    #[test]
    fn test_table_with_no_other_keywords_runs_to_end() {
        let notes = KeywordSet::new(["notes"]).unwrap();
        let table = KeywordTable {
            education: notes.clone(),
            experience: notes.clone(),
            skills: notes.clone(),
            certifications: notes.clone(),
            other_headings: notes.clone(),
        };
        let ex = SectionExtractor::new(table).unwrap();
        let text = "Notes\nfirst\nNotes again\nsecond";
        assert_eq!(ex.extract_section(text, &notes).unwrap(), found("first\nNotes again\nsecond"));
    }

    #[test]
    fn test_patterns_are_compiled_once_per_distinct_keyword() {
        let ex = extractor();
        let distinct: std::collections::HashSet<&str> = ex.table().all_keywords().collect();
        assert_eq!(ex.patterns.len(), distinct.len());
        // "qualifications" is listed twice but compiled once
        assert_eq!(distinct.len(), ex.table().all_keywords().count() - 1);
        assert!(ex.patterns.values().all(|p| p.boundary.is_some()));
    }

    #[test]
    fn test_oversized_keyword_table_fails_at_construction() {
        let table = KeywordTable {
            other_headings: KeywordSet::new(["a".repeat(2_000_000)]).unwrap(),
            ..KeywordTable::default()
        };
        assert!(matches!(SectionExtractor::new(table), Err(ExtractError::Regex(_))));
    }

    #[test]
    fn test_keywords_with_regex_metacharacters_are_literal() {
        let keywords = KeywordSet::new(["c++ (expert)"]).unwrap();
        let text = "C++ (Expert)\nTemplates\nEducation\nBSc";
        assert_eq!(extractor().extract_section(text, &keywords).unwrap(), found("Templates"));
    }

    #[test]
    fn test_locate_section_reports_offsets_into_original_text() {
        let span = extractor()
            .locate_section(SAMPLE, extractor().table().keywords(Section::Education))
            .unwrap()
            .expect("education heading should be located");
        assert_eq!(span.keyword, "education");
        assert_eq!(&SAMPLE[span.heading.clone()].trim(), &"Education:");
        assert_eq!(span.body_text(SAMPLE), "Bachelor of Science");
        assert!(SAMPLE[span.body.end..].starts_with("Experience:"));
    }
}
