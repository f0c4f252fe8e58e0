use crate::documents::Document;
use crate::extractors::FieldRecord;
use crate::utils::error::StorageError;
use std::fs;
use std::path::{Path, PathBuf};

pub const JSON_FILENAME: &str = "resume_data.json";
pub const CSV_FILENAME: &str = "resume_data.csv";
pub const METADATA_FILENAME: &str = "resume_data_meta.json";

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Saves the records as a JSON array, one object per document
    pub fn save_json(&self, records: &[FieldRecord]) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(JSON_FILENAME);

        let json = serde_json::to_string_pretty(records)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        fs::write(&file_path, json).map_err(StorageError::IoError)?;

        tracing::info!("Saved {} record(s) to {}", records.len(), file_path.display());
        Ok(file_path)
    }

    /// Saves the records as CSV with a header row
    pub fn save_csv(&self, records: &[FieldRecord]) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(CSV_FILENAME);

        let mut writer = csv::Writer::from_path(&file_path)?;
        writer.write_record(FieldRecord::FIELD_NAMES)?;
        for record in records {
            writer.write_record(record.values().iter().map(|v| v.as_str()))?;
        }
        writer.flush().map_err(StorageError::IoError)?;

        tracing::info!("Saved {} record(s) to {}", records.len(), file_path.display());
        Ok(file_path)
    }

    /// Saves metadata about the run in JSON format
    pub fn save_metadata(&self, documents: &[Document], records: &[FieldRecord]) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(METADATA_FILENAME);

        let not_found: serde_json::Map<String, serde_json::Value> = FieldRecord::FIELD_NAMES
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let missing = records.iter().filter(|r| !r.values()[i].is_found()).count();
                (name.to_string(), serde_json::json!(missing))
            })
            .collect();

        // Create metadata structure
        let metadata = serde_json::json!({
            "document_count": records.len(),
            "sources": documents.iter().map(Document::name).collect::<Vec<_>>(),
            "not_found_counts": not_found,
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        fs::write(&file_path, metadata_str).map_err(StorageError::IoError)?;

        tracing::info!("Saved metadata to {}", file_path.display());
        Ok(file_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::record::{FieldValue, NOT_FOUND};

    fn records() -> Vec<FieldRecord> {
        vec![
            FieldRecord {
                name: FieldValue::Found("Jane Doe".to_string()),
                skills: FieldValue::Found("Rust, \"Go\"\nSQL".to_string()),
                ..Default::default()
            },
            FieldRecord::default(),
        ]
    }

    #[test]
    fn test_creates_nested_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("out").join("run1");
        let storage = StorageManager::new(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(storage.base_dir(), nested.as_path());
    }

    #[test]
    fn test_json_is_records_oriented() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(dir.path()).unwrap();
        let path = storage.save_json(&records()).unwrap();

        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["Name"], "Jane Doe");
        assert_eq!(rows[0]["Email"], NOT_FOUND);
        assert_eq!(rows[1]["Certifications"], NOT_FOUND);
    }

    #[test]
    fn test_csv_has_header_and_quoted_fields() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(dir.path()).unwrap();
        let path = storage.save_csv(&records()).unwrap();

        let mut reader = csv::Reader::from_path(path).unwrap();
        let headers: Vec<String> = reader.headers().unwrap().iter().map(str::to_string).collect();
        assert_eq!(headers, FieldRecord::FIELD_NAMES);

        let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][3], "Rust, \"Go\"\nSQL");
        assert!(rows[1].iter().all(|field| field == NOT_FOUND));
    }

    #[test]
    fn test_metadata_counts_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(dir.path()).unwrap();
        let docs = vec![
            Document::new("in/jane.txt", "Jane".to_string()),
            Document::new("in/empty.txt", "x".to_string()),
        ];
        let path = storage.save_metadata(&docs, &records()).unwrap();

        let meta: serde_json::Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(meta["document_count"], 2);
        assert_eq!(meta["sources"][0], "jane.txt");
        assert_eq!(meta["not_found_counts"]["Name"], 1);
        assert_eq!(meta["not_found_counts"]["Email"], 2);
        assert!(meta["extraction_timestamp"].is_string());
    }
}
