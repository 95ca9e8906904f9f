//! Source document loading

use std::path::Path;
use std::path::PathBuf;

use tracing::info;

use crate::errors::RehabRagError;
use crate::Result;

/// The single markdown document the assistant answers from
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub path: PathBuf,
    pub content: String,
}

impl SourceDocument {
    /// Number of characters in the document
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }
}

/// Read a UTF-8 markdown file into a single text blob
///
/// # Errors
/// - `DocumentNotFound` if the path does not exist
/// - `EmptyDocument` if the file holds no non-whitespace text
/// - `Io` for any other read failure (including invalid UTF-8)
pub fn load_document(path: impl AsRef<Path>) -> Result<SourceDocument> {
    let path = path.as_ref();
    info!("Reading document content from: {}", path.display());

    if !path.exists() {
        return Err(RehabRagError::DocumentNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Err(RehabRagError::EmptyDocument(path.to_path_buf()));
    }

    let document = SourceDocument {
        path: path.to_path_buf(),
        content,
    };
    info!(
        "Document content loaded successfully. Characters: {}",
        document.char_count()
    );

    Ok(document)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_load_document() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "# Notes\n\nRepeat the curl 10 times daily.").unwrap();

        let doc = load_document(file.path()).unwrap();
        assert!(doc.content.contains("10 times daily"));
        assert_eq!(doc.char_count(), doc.content.chars().count());
        assert_eq!(doc.path, file.path());
    }

    #[test]
    fn test_missing_document() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_document(dir.path().join("missing.md"));
        assert!(matches!(result, Err(RehabRagError::DocumentNotFound(_))));
    }

    #[test]
    fn test_whitespace_document_is_empty() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "  \n\n\t ").unwrap();

        let result = load_document(file.path());
        assert!(matches!(result, Err(RehabRagError::EmptyDocument(_))));
    }
}
