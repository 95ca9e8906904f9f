use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RehabRagError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Source document not found: {}", .0.display())]
    DocumentNotFound(PathBuf),

    #[error("Source document is empty: {}", .0.display())]
    EmptyDocument(PathBuf),

    #[error("Cannot chunk an empty corpus")]
    EmptyCorpus,

    #[error("Invalid chunking parameters: {0}")]
    InvalidChunking(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Vector index error: {0}")]
    Index(String),

    #[error("Pipeline error: {0}")]
    Pipeline(String),

    #[error("Assistant is still initializing")]
    NotReady,

    #[error("Exercise with ID {0} not found in current plan")]
    UnknownExercise(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl RehabRagError {
    /// Whether the error was caused by the caller's input rather than by the service
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::UnknownExercise(_))
    }
}

impl From<reqwest::Error> for RehabRagError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RehabRagError>;
