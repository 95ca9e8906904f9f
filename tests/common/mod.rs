//! Shared fixtures for integration tests
#![allow(dead_code)]

use std::path::PathBuf;

use async_trait::async_trait;
use rehabrag::config::AppConfig;
use rehabrag::embeddings::Embedder;
use rehabrag::llm::GenerationParams;
use rehabrag::llm::Generator;
use rehabrag::RehabRagError;
use rehabrag::Result;
use tempfile::TempDir;

const DIM: usize = 64;

/// Deterministic bag-of-words embedder
pub struct WordEmbedder;

#[async_trait]
impl Embedder for WordEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vector = vec![0.0; DIM];
        for word in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| w.len() > 2)
        {
            let hash = word
                .to_lowercase()
                .bytes()
                .fold(7usize, |h, b| h.wrapping_mul(31).wrapping_add(b as usize));
            vector[hash % DIM] += 1.0;
        }
        Ok(vector)
    }
}

/// Answers with the context block it was given
pub struct ContextEchoGenerator;

#[async_trait]
impl Generator for ContextEchoGenerator {
    async fn generate(&self, prompt: &str, _params: GenerationParams) -> Result<String> {
        let context = prompt
            .split("Context:\n")
            .nth(1)
            .and_then(|rest| rest.split("\n\nQuestion:").next())
            .unwrap_or_default();
        Ok(format!("According to your materials: {context}"))
    }
}

pub struct FailingGenerator;

#[async_trait]
impl Generator for FailingGenerator {
    async fn generate(&self, _prompt: &str, _params: GenerationParams) -> Result<String> {
        Err(RehabRagError::Llm("upstream quota exceeded".to_string()))
    }
}

/// Write `content` as the source document inside a fresh temp dir
pub fn write_document(content: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.md");
    std::fs::write(&path, content).unwrap();
    (dir, path)
}

/// Default configuration pointed at `document`
pub fn config_for(document: PathBuf) -> AppConfig {
    let mut config = AppConfig::default();
    config.document.path = document;
    config
}
