//! Unit tests for error handling
//!
//! Tests error types, conversions, and error message formatting.

#[cfg(test)]
mod tests {
    use std::io;
    use std::path::PathBuf;

    use crate::errors::RehabRagError;

    // ====== Error Type Tests ======

    #[test]
    fn test_config_error() {
        let error = RehabRagError::Config("Invalid configuration".to_string());
        assert!(matches!(error, RehabRagError::Config(_)));
        let display = format!("{}", error);
        assert!(display.contains("configuration"));
    }

    #[test]
    fn test_document_errors_mention_path() {
        let missing = RehabRagError::DocumentNotFound(PathBuf::from("data/notes.md"));
        assert!(missing.to_string().contains("data/notes.md"));

        let empty = RehabRagError::EmptyDocument(PathBuf::from("data/empty.md"));
        assert!(empty.to_string().contains("data/empty.md"));
    }

    #[test]
    fn test_unknown_exercise_message() {
        let error = RehabRagError::UnknownExercise("abc".to_string());
        assert_eq!(
            error.to_string(),
            "Exercise with ID abc not found in current plan"
        );
    }

    // ====== Client vs Service Errors ======

    #[test]
    fn test_client_errors() {
        assert!(RehabRagError::Validation("bad".to_string()).is_client_error());
        assert!(RehabRagError::UnknownExercise("x".to_string()).is_client_error());
    }

    #[test]
    fn test_service_errors() {
        assert!(!RehabRagError::NotReady.is_client_error());
        assert!(!RehabRagError::Pipeline("down".to_string()).is_client_error());
        assert!(!RehabRagError::Embedding("down".to_string()).is_client_error());
        assert!(!RehabRagError::Llm("down".to_string()).is_client_error());
    }

    // ====== Error Conversion Tests ======

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let err: RehabRagError = io_err.into();

        assert!(matches!(err, RehabRagError::Io(_)));
    }

    #[test]
    fn test_error_from_serde_json() {
        let parse_result: Result<serde_json::Value, _> = serde_json::from_str("{invalid json}");

        if let Err(json_err) = parse_result {
            let err: RehabRagError = json_err.into();
            assert!(matches!(err, RehabRagError::Serialization(_)));
        }
    }

    #[test]
    fn test_error_from_toml() {
        let parse_result: Result<toml::Value, _> = toml::from_str("= broken");
        let err: RehabRagError = parse_result.unwrap_err().into();
        assert!(matches!(err, RehabRagError::TomlParsing(_)));
    }

    #[test]
    fn test_error_source_chain() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "Root cause");
        let err: RehabRagError = io_err.into();

        match err {
            RehabRagError::Io(e) => {
                assert_eq!(e.kind(), io::ErrorKind::NotFound);
            }
            _ => panic!("Expected Io error"),
        }
    }
}
