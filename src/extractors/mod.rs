// src/extractors/mod.rs
pub mod contact;
pub mod entities;
pub mod keywords;
pub mod record;
pub mod resume;
pub mod section;

// Re-export key extraction types for convenience
pub use entities::{EntityRecognizer, HeuristicRecognizer, NullRecognizer};
pub use keywords::KeywordTable;
pub use record::FieldRecord;
pub use resume::{parse_documents, ResumeParser};
pub use section::SectionExtractor;
