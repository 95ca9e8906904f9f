use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use tracing::warn;

use crate::errors::RehabRagError;

/// Environment variable overriding `llm.llm_key`
pub const LLM_KEY_ENV: &str = "REHABRAG_LLM_KEY";
/// Environment variable overriding `embeddings.api_key`
pub const EMBEDDING_KEY_ENV: &str = "REHABRAG_EMBEDDING_KEY";

/// Hosted model provider used for embeddings or generation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Ollama local models
    #[default]
    Ollama,
    /// `OpenAI`-compatible APIs
    #[serde(rename = "openai")]
    OpenAI,
    /// Google Gemini
    #[serde(alias = "google")]
    Gemini,
}

/// Gemini expects `models/<name>` in both the URL and the body
pub(crate) fn gemini_model_path(model: &str) -> String {
    if model.starts_with("models/") {
        model.to_string()
    } else {
        format!("models/{model}")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_dir")]
    pub dir: PathBuf,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dir: default_log_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentConfig {
    /// Markdown file the assistant answers from
    #[serde(default = "default_document_path")]
    pub path: PathBuf,
    /// Title under which the document is listed as a resource
    #[serde(default = "default_resource_title")]
    pub resource_title: String,
}

fn default_document_path() -> PathBuf {
    PathBuf::from("data/FirstDataandInfo.md")
}

fn default_resource_title() -> String {
    "Initial Research: Restoring Bicep Function".to_string()
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            path: default_document_path(),
            resource_title: default_resource_title(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Target chunk size in characters
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Characters shared by consecutive chunks
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,
}

pub(crate) const fn default_chunk_size() -> usize {
    1000
}

pub(crate) const fn default_chunk_overlap() -> usize {
    150
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// Upper bound on the context block handed to the LLM, in bytes
    #[serde(default = "default_max_context_length")]
    pub max_context_length: usize,
}

pub(crate) const fn default_top_k() -> usize {
    5
}

pub(crate) const fn default_max_context_length() -> usize {
    8000
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            max_context_length: default_max_context_length(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingsConfig {
    #[serde(default)]
    pub provider: Provider,
    #[serde(default = "default_embedding_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_embedding_model")]
    pub model: String,
    /// Number of chunks sent per provider call during the build phase
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_embedding_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_embedding_model() -> String {
    "nomic-embed-text".to_string()
}

pub(crate) const fn default_batch_size() -> usize {
    100
}

const fn default_request_timeout_secs() -> u64 {
    120
}

impl Default for EmbeddingsConfig {
    fn default() -> Self {
        Self {
            provider: Provider::Ollama,
            endpoint: default_embedding_endpoint(),
            api_key: None,
            model: default_embedding_model(),
            batch_size: default_batch_size(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub provider: Provider,
    #[serde(default = "default_llm_endpoint")]
    pub llm_endpoint: String,
    #[serde(default)]
    pub llm_key: String,
    #[serde(default = "default_llm_model")]
    pub llm_model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_llm_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_llm_model() -> String {
    "gemma3:27b".to_string()
}

const fn default_temperature() -> f32 {
    0.7
}

const fn default_max_tokens() -> usize {
    2000
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: Provider::Ollama,
            llm_endpoint: default_llm_endpoint(),
            llm_key: String::new(),
            llm_model: default_llm_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    8000
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://127.0.0.1:3000".to_string(),
    ]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub document: DocumentConfig,
    #[serde(default)]
    pub chunking: ChunkingConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub embeddings: EmbeddingsConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from default config file path
    pub fn load() -> crate::Result<Self> {
        // Try to load from config.toml first, then fall back to config.example.toml
        if Path::new("config.toml").exists() {
            Self::from_file("config.toml")
        } else if Path::new("config.example.toml").exists() {
            warn!("Using config.example.toml. Please create config.toml for production use.");
            Self::from_file("config.example.toml")
        } else {
            warn!("No config file found, using built-in defaults");
            Ok(Self::default())
        }
    }

    /// Replace provider keys with values from the environment when present
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var(LLM_KEY_ENV) {
            if !key.is_empty() {
                self.llm.llm_key = key;
            }
        }
        if let Ok(key) = std::env::var(EMBEDDING_KEY_ENV) {
            if !key.is_empty() {
                self.embeddings.api_key = Some(key);
            }
        }
    }

    /// Check the values the pipeline cannot start without
    pub fn validate(&self) -> crate::Result<()> {
        if self.chunking.chunk_size == 0 {
            return Err(RehabRagError::Config(
                "chunking.chunk_size must be greater than 0".to_string(),
            ));
        }
        if self.chunking.chunk_overlap >= self.chunking.chunk_size {
            return Err(RehabRagError::Config(format!(
                "chunking.chunk_overlap ({}) must be smaller than chunking.chunk_size ({})",
                self.chunking.chunk_overlap, self.chunking.chunk_size
            )));
        }
        if self.retrieval.top_k == 0 {
            return Err(RehabRagError::Config(
                "retrieval.top_k must be greater than 0".to_string(),
            ));
        }
        if self.embeddings.batch_size == 0 {
            return Err(RehabRagError::Config(
                "embeddings.batch_size must be greater than 0".to_string(),
            ));
        }
        for (name, endpoint) in [
            ("embeddings.endpoint", &self.embeddings.endpoint),
            ("llm.llm_endpoint", &self.llm.llm_endpoint),
        ] {
            url::Url::parse(endpoint).map_err(|e| {
                RehabRagError::Config(format!("{name} is not a valid URL ({endpoint}): {e}"))
            })?;
        }
        Ok(())
    }

    /// Get the embedding API key, falling back to the LLM key
    pub fn embedding_api_key(&self) -> Option<&str> {
        self.embeddings
            .api_key
            .as_deref()
            .or_else(|| Some(self.llm.llm_key.as_str()).filter(|k| !k.is_empty()))
    }

    /// Render the configuration as TOML with secrets masked
    pub fn to_masked_toml(&self) -> crate::Result<String> {
        let mut masked = self.clone();
        if !masked.llm.llm_key.is_empty() {
            masked.llm.llm_key = mask_secret(&masked.llm.llm_key);
        }
        masked.embeddings.api_key = masked.embeddings.api_key.as_deref().map(mask_secret);
        toml::to_string_pretty(&masked)
            .map_err(|e| RehabRagError::Config(format!("Failed to render configuration: {e}")))
    }
}

fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    format!("{visible}****")
}
