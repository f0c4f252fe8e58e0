// src/extractors/resume.rs

use crate::documents::Document;
use crate::extractors::contact::extract_contact_info;
use crate::extractors::entities::{EntityLabel, EntityRecognizer};
use crate::extractors::keywords::Section;
use crate::extractors::record::{FieldRecord, FieldValue};
use crate::extractors::section::SectionExtractor;
use crate::utils::error::ExtractError;
use std::sync::Arc;

/// Assembles a `FieldRecord` from one document's text.
///
/// Holds no per-document state, so a single parser can be shared across
/// threads and reused for any number of documents.
#[derive(Clone)]
pub struct ResumeParser {
    sections: SectionExtractor,
    recognizer: Arc<dyn EntityRecognizer>,
}

impl ResumeParser {
    pub fn new(sections: SectionExtractor, recognizer: Arc<dyn EntityRecognizer>) -> Self {
        Self { sections, recognizer }
    }

    pub fn sections(&self) -> &SectionExtractor {
        &self.sections
    }

    pub fn parse(&self, text: &str) -> Result<FieldRecord, ExtractError> {
        let contact = extract_contact_info(text);
        let entities = self.recognizer.recognize(text);

        let name = entities
            .iter()
            .find(|e| e.label == EntityLabel::Person)
            .map(|e| FieldValue::from_text(&e.text))
            .unwrap_or_default();

        // Fall back to recognized skill-like entities when there is no skills heading
        let skills = self.sections.extract(text, Section::Skills)?.or_else(|| {
            tracing::debug!("No skills heading, falling back to recognized entities");
            FieldValue::from_items(
                entities
                    .iter()
                    .filter(|e| e.label.is_skill_like())
                    .map(|e| e.text.as_str()),
            )
        });

        let record = FieldRecord {
            name,
            phone: contact.phone,
            email: contact.email,
            skills,
            education: self.sections.extract(text, Section::Education)?,
            experience: self.sections.extract(text, Section::Experience)?,
            certifications: self.sections.extract(text, Section::Certifications)?,
        };
        tracing::debug!("Extracted Certifications: {}", record.certifications);
        Ok(record)
    }
}

/// Records for a batch of documents, paired with the documents they came from.
#[derive(Debug, Default)]
pub struct ParsedBatch {
    pub documents: Vec<Document>,
    pub records: Vec<FieldRecord>,
    pub failures: usize,
}

/// Parses each document on the blocking pool.
///
/// Documents are parsed concurrently but results are collected in input
/// order; a document that fails to parse is logged, counted and left out.
pub async fn parse_documents(parser: Arc<ResumeParser>, documents: Vec<Document>) -> ParsedBatch {
    let handles: Vec<_> = documents
        .iter()
        .map(|document| {
            let parser = Arc::clone(&parser);
            let text = document.text.clone();
            tokio::task::spawn_blocking(move || parser.parse(&text))
        })
        .collect();

    let mut batch = ParsedBatch {
        documents: Vec::with_capacity(documents.len()),
        records: Vec::with_capacity(documents.len()),
        failures: 0,
    };

    for (document, handle) in documents.into_iter().zip(handles) {
        match handle.await {
            Ok(Ok(record)) => {
                let found = record.fields().filter(|(_, value)| value.is_found()).count();
                tracing::info!("Parsed {}: {}/{} fields found", document.name(), found, FieldRecord::FIELD_NAMES.len());
                batch.documents.push(document);
                batch.records.push(record);
            }
            Ok(Err(e)) => {
                tracing::error!("Failed to parse {}: {}", document.name(), e);
                batch.failures += 1;
            }
            Err(e) => {
                tracing::error!("Parser task for {} failed: {}", document.name(), e);
                batch.failures += 1;
            }
        }
    }

    batch
}
