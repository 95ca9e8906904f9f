//! RAG (Retrieval-Augmented Generation) module
//!
//! This module answers questions from the single source document:
//! - Vector index built once over the document chunks
//! - Cosine-distance retrieval of the closest chunks
//! - Bounded context assembly from retrieved chunks
//! - LLM-based answer generation with the rehabilitation assistant prompt
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use rehabrag::config::AppConfig;
//! use rehabrag::embeddings::EmbeddingClient;
//! use rehabrag::llm::LlmService;
//! use rehabrag::rag::RagPipeline;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let embedder = Arc::new(EmbeddingClient::from_app_config(&config)?);
//!     let generator = Arc::new(LlmService::from_app_config(&config)?);
//!     let pipeline = RagPipeline::build(&config, embedder, generator).await?;
//!
//!     let answer = pipeline.answer("How often should I do elbow flexion?").await?;
//!     println!("Answer: {answer}");
//!
//!     Ok(())
//! }
//! ```

pub mod context;
pub mod index;
pub mod pipeline;
pub mod prompts;
pub mod synthesizer;

pub use context::ContextAssembler;
pub use index::VectorIndex;
pub use pipeline::AssistantHandle;
pub use pipeline::AssistantStatus;
pub use pipeline::RagPipeline;
pub use pipeline::RagResponse;
pub use synthesizer::AnswerSynthesizer;

use crate::chunking::Chunk;

/// Retrieved chunk with its distance to the query
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub chunk: Chunk,
    /// Cosine distance, 0.0 = same direction
    pub distance: f32,
    /// `1 - distance`, higher is more relevant
    pub score: f32,
}
