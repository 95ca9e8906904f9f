//! LLM generation module
//!
//! `LlmService` talks to the configured generation provider; the pipeline only
//! sees it through the [`Generator`] trait.

pub mod client;

use async_trait::async_trait;
pub use client::LlmService;

use crate::errors::Result;

/// Sampling parameters for a single generation call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_tokens: usize,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 2000,
        }
    }
}

/// Prompt → text capability used by the answer synthesizer
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, prompt: &str, params: GenerationParams) -> Result<String>;
}
