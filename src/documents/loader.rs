// src/documents/loader.rs
use crate::documents::models::{is_text_document, Document};
use crate::utils::error::LoadError;
use std::path::{Path, PathBuf};
use tokio::fs;

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> LoadError + '_ {
    move |source| LoadError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Loads every readable text document named by `paths`, in input order.
///
/// Directories are expanded one level deep, sorted by file name. Anything that
/// cannot be turned into non-empty text is logged and skipped, so callers only
/// ever see successfully decoded documents.
pub async fn load_documents(paths: &[PathBuf]) -> Vec<Document> {
    let mut documents = Vec::new();

    for path in paths {
        let files = match expand_path(path).await {
            Ok(files) => files,
            Err(e) => {
                tracing::warn!("Skipping input {}: {}", path.display(), e);
                continue;
            }
        };

        for file in files {
            match load_document(&file).await {
                Ok(document) => documents.push(document),
                Err(e) => tracing::warn!("Skipping document: {}", e),
            }
        }
    }

    tracing::info!("Loaded {} document(s) from {} input path(s)", documents.len(), paths.len());
    documents
}

/// Resolves a file or directory argument to the files it names.
async fn expand_path(path: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let metadata = fs::metadata(path).await.map_err(io_error(path))?;
    if !metadata.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut entries = fs::read_dir(path).await.map_err(io_error(path))?;
    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(io_error(path))? {
        let entry_path = entry.path();
        // fs::metadata follows symlinks, so linked resumes are loaded too
        match fs::metadata(&entry_path).await {
            Ok(metadata) if metadata.is_dir() => {
                tracing::debug!("Not descending into {}", entry_path.display());
            }
            Ok(_) => files.push(entry_path),
            Err(e) => tracing::warn!("Skipping input {}: {}", entry_path.display(), e),
        }
    }
    files.sort();
    tracing::debug!("Directory {} contains {} file(s)", path.display(), files.len());
    Ok(files)
}

/// Reads a single text document.
pub async fn load_document(path: &Path) -> Result<Document, LoadError> {
    if !is_text_document(path) {
        return Err(LoadError::UnsupportedFormat(path.display().to_string()));
    }

    let bytes = fs::read(path).await.map_err(io_error(path))?;
    let text = String::from_utf8(bytes).map_err(|_| LoadError::Encoding(path.display().to_string()))?;
    if text.trim().is_empty() {
        return Err(LoadError::Empty(path.display().to_string()));
    }

    tracing::info!("Read {} characters from {}", text.chars().count(), path.display());
    Ok(Document::new(path, text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::block_on;

    fn write(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_files_and_directories_keep_input_order() {
        let dir = tempfile::tempdir().unwrap();
        let batch = dir.path().join("batch");
        std::fs::create_dir(&batch).unwrap();
        write(&batch, "b.txt", b"Bob Stone\nSkills\nGo");
        write(&batch, "a.md", b"Alice Smith\nSkills\nRust");
        let single = write(dir.path(), "z.TXT", b"Zed Zulu\nEducation\nBSc");

        let docs = block_on(load_documents(&[single, batch]));
        let names: Vec<String> = docs.iter().map(Document::name).collect();
        assert_eq!(names, vec!["z.TXT", "a.md", "b.txt"]);
        assert!(docs[1].text.starts_with("Alice Smith"));
    }

    #[test]
    fn test_undecodable_documents_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "resume.pdf", b"%PDF-1.7 binary");
        write(dir.path(), "blank.txt", b"  \n\t\n");
        write(dir.path(), "latin1.txt", &[0x52, 0xe9, 0x73, 0x75, 0x6d, 0xe9]);
        write(dir.path(), "ok.txt", b"Jane Doe\nSkills\nRust");
        let missing = dir.path().join("missing.txt");

        let docs = block_on(load_documents(&[dir.path().to_path_buf(), missing]));
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].name(), "ok.txt");
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_documents_in_directories_are_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().join("real");
        let batch = dir.path().join("batch");
        std::fs::create_dir(&real).unwrap();
        std::fs::create_dir(&batch).unwrap();
        write(&real, "jane.txt", b"Jane Doe\nSkills\nRust");
        std::os::unix::fs::symlink(real.join("jane.txt"), batch.join("jane.txt")).unwrap();
        std::os::unix::fs::symlink(real.join("gone.txt"), batch.join("broken.txt")).unwrap();
        std::os::unix::fs::symlink(&real, batch.join("nested")).unwrap();

        let docs = block_on(load_documents(&[batch]));
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].name(), "jane.txt");
        assert!(docs[0].text.contains("Rust"));
    }

    #[test]
    fn test_load_document_reports_reason() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = write(dir.path(), "cv.docx", b"PK");
        let empty = write(dir.path(), "empty.txt", b"");

        assert!(matches!(block_on(load_document(&pdf)), Err(LoadError::UnsupportedFormat(_))));
        assert!(matches!(block_on(load_document(&empty)), Err(LoadError::Empty(_))));
        assert!(matches!(
            block_on(load_document(&dir.path().join("nope.txt"))),
            Err(LoadError::Io { .. })
        ));
    }
}
