//! Embeddings generation module
//!
//! This module maps chunks and queries to vectors through a hosted model:
//! - OpenAI-compatible `/embeddings` endpoints
//! - Ollama (local models)
//! - Google Gemini (`embedContent` / `batchEmbedContents`)
//!
//! # Examples
//!
//! ```rust,no_run
//! use rehabrag::config::AppConfig;
//! use rehabrag::embeddings::{Embedder, EmbeddingClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let client = EmbeddingClient::from_app_config(&config)?;
//!
//!     let embedding = client.embed("How often should I stretch?").await?;
//!     println!("Generated embedding with {} dimensions", embedding.len());
//!
//!     Ok(())
//! }
//! ```

pub mod client;

use async_trait::async_trait;
pub use client::EmbeddingClient;

use crate::errors::Result;

/// Text → vector capability used by the pipeline
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a single text (a query, at request time)
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed many texts, returning one vector per input in input order
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.embed(text).await?);
        }
        Ok(vectors)
    }
}
