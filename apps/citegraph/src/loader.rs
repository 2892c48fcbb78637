//! # Corpus Loader
//!
//! The one asynchronous step of the application: read the corpus document
//! once and build the read-only record store from it.
//!
//! The document is a JSON object with a `records` array. A document
//! without `records` is an empty corpus.

use citegraph_core::{CiteError, Record, RecordStore};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct CorpusDocument {
    #[serde(default)]
    records: Vec<Record>,
}

/// Canonicalize `path` and make sure it names a regular file.
async fn validate_file_path(path: &Path) -> Result<PathBuf, CiteError> {
    let canonical = tokio::fs::canonicalize(path).await.map_err(|e| {
        CiteError::Io(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    let metadata = tokio::fs::metadata(&canonical)
        .await
        .map_err(|e| CiteError::Io(format!("Cannot read file metadata: {}", e)))?;
    if !metadata.is_file() {
        return Err(CiteError::Io(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Refuse files above `max_size` bytes before reading them.
async fn validate_file_size(path: &Path, max_size: u64) -> Result<u64, CiteError> {
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| CiteError::Io(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(CiteError::Io(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(metadata.len())
}

/// Parse a corpus document and build the store.
pub fn parse_corpus(bytes: &[u8]) -> Result<RecordStore, CiteError> {
    let document: CorpusDocument =
        serde_json::from_slice(bytes).map_err(|e| CiteError::Deserialization(e.to_string()))?;
    RecordStore::new(document.records)
}

/// Load the corpus at `path`.
pub async fn load_corpus(path: &Path, max_size: u64) -> Result<RecordStore, CiteError> {
    let validated = validate_file_path(path).await?;
    let size = validate_file_size(&validated, max_size).await?;

    tracing::debug!(path = %validated.display(), bytes = size, "reading corpus");
    let bytes = tokio::fs::read(&validated)
        .await
        .map_err(|e| CiteError::Io(format!("Read file: {}", e)))?;

    let store = parse_corpus(&bytes)?;
    tracing::info!(
        path = %validated.display(),
        bytes = size,
        records = store.len(),
        "corpus loaded"
    );
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_records_key_is_empty() {
        let store = parse_corpus(b"{}").expect("parse");
        assert!(store.is_empty());
    }

    #[test]
    fn records_keep_document_order() {
        let store = parse_corpus(
            br#"{"records": [
                {"id": "B", "title": "second"},
                {"id": "A", "title": "first", "citation_counts": {"forward": 3}}
            ]}"#,
        )
        .expect("parse");
        let ids: Vec<&str> = store.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["B", "A"]);
        assert_eq!(store.records()[1].forward_count(), 3);
    }

    #[test]
    fn malformed_document_rejected() {
        assert!(matches!(
            parse_corpus(b"[1, 2"),
            Err(CiteError::Deserialization(_))
        ));
    }

    #[test]
    fn duplicate_ids_fail_the_load() {
        let result = parse_corpus(br#"{"records": [{"id": "A"}, {"id": "A"}]}"#);
        assert!(matches!(result, Err(CiteError::DuplicateRecord(_))));
    }
}
