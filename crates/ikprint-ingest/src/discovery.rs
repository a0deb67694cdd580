//! Admission document discovery by patient name.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{IngestError, Result};

/// Prefix Word uses for lock files next to an open document.
const LOCK_FILE_PREFIX: &str = "~$";

/// Where admission documents are looked up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentSource {
    /// Directory holding the documents. Only direct children are searched.
    pub directory: PathBuf,
    /// File extension of documents, compared case-insensitively.
    pub extension: String,
}

impl Default for DocumentSource {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            extension: "docx".to_string(),
        }
    }
}

/// Lists all documents with `extension` in `dir`.
///
/// Returns files sorted by filename.
pub fn list_documents(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let has_extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
        if !has_extension || is_lock_file(&path) {
            continue;
        }

        files.push(path);
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}

/// Finds documents whose file stem contains `term`, ignoring case.
///
/// Matches are returned in descending path order so date-prefixed names
/// list the most recent admission first.
pub fn find_documents(source: &DocumentSource, term: &str) -> Result<Vec<PathBuf>> {
    let needle = term.trim().to_lowercase();
    let mut matches: Vec<PathBuf> = list_documents(&source.directory, &source.extension)?
        .into_iter()
        .filter(|path| stem_matches(path, &needle))
        .collect();

    if matches.is_empty() {
        return Err(IngestError::NoMatches {
            term: term.trim().to_string(),
            dir: source.directory.clone(),
        });
    }

    matches.sort_by(|a, b| b.cmp(a));
    debug!(matches = matches.len(), "documents matched");
    Ok(matches)
}

/// File name shown to the operator when choosing between matches.
pub fn document_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn stem_matches(path: &Path, needle: &str) -> bool {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_lowercase())
        .is_some_and(|stem| stem.contains(needle))
}

fn is_lock_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with(LOCK_FILE_PREFIX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();

        for name in &[
            "2024-01-03 Doe, Jane.docx",
            "2024-02-11 Doe, Jane.DOCX",
            "2024-02-12 Smith, John.docx",
            "~$24-02-11 Doe, Jane.docx",
            "Doe notes.txt",
        ] {
            std::fs::write(dir.path().join(name), b"PK").unwrap();
        }
        std::fs::create_dir(dir.path().join("doe archive.docx")).unwrap();

        dir
    }

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths.iter().map(|p| document_label(p)).collect()
    }

    #[test]
    fn test_list_documents_skips_lock_files_and_dirs() {
        let dir = create_test_dir();
        let files = list_documents(dir.path(), "docx").unwrap();
        assert_eq!(
            names(&files),
            vec![
                "2024-01-03 Doe, Jane.docx",
                "2024-02-11 Doe, Jane.DOCX",
                "2024-02-12 Smith, John.docx",
            ]
        );
    }

    #[test]
    fn test_find_documents_is_case_insensitive_and_newest_first() {
        let dir = create_test_dir();
        let source = DocumentSource {
            directory: dir.path().to_path_buf(),
            ..DocumentSource::default()
        };
        let found = find_documents(&source, "DOE").unwrap();
        assert_eq!(
            names(&found),
            vec!["2024-02-11 Doe, Jane.DOCX", "2024-01-03 Doe, Jane.docx"]
        );
    }

    #[test]
    fn test_find_documents_without_match() {
        let dir = create_test_dir();
        let source = DocumentSource {
            directory: dir.path().to_path_buf(),
            ..DocumentSource::default()
        };
        let err = find_documents(&source, "nobody").unwrap_err();
        assert!(matches!(err, IngestError::NoMatches { ref term, .. } if term == "nobody"));
    }

    #[test]
    fn test_missing_directory() {
        let source = DocumentSource {
            directory: PathBuf::from("/definitely/not/here"),
            ..DocumentSource::default()
        };
        let err = find_documents(&source, "doe").unwrap_err();
        assert!(matches!(err, IngestError::DirectoryNotFound { .. }));
    }
}
