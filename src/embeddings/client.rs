//! Embedding API clients for various providers

use std::time::Duration;

use async_trait::async_trait;
use futures::stream::StreamExt;
use futures::stream::{
    self,
};
use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use super::Embedder;
use crate::config::gemini_model_path;
use crate::config::AppConfig;
use crate::config::Provider;
use crate::errors::RehabRagError;
use crate::errors::Result;

/// Concurrent requests used to emulate batching on Ollama
const OLLAMA_CONCURRENCY: usize = 8;

/// Client for generating embeddings from various providers
pub struct EmbeddingClient {
    provider: Provider,
    model: String,
    endpoint: String,
    api_key: Option<String>,
    client: Client,
}

impl EmbeddingClient {
    /// Create a new embedding client
    ///
    /// # Errors
    /// - HTTP client build errors (invalid configuration)
    pub fn new(
        provider: Provider,
        model: String,
        endpoint: String,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            provider,
            model,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key,
            client,
        })
    }

    /// Create a client from the `[embeddings]` section
    pub fn from_app_config(config: &AppConfig) -> Result<Self> {
        Self::new(
            config.embeddings.provider,
            config.embeddings.model.clone(),
            config.embeddings.endpoint.clone(),
            config.embedding_api_key().map(str::to_string),
            Duration::from_secs(config.embeddings.request_timeout_secs),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn require_api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            RehabRagError::Config(format!("{:?} API key not provided", self.provider))
        })
    }

    /// Generate embedding using `OpenAI` API (single or batch input)
    async fn generate_openai(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let api_key = self.require_api_key()?;

        #[derive(Serialize)]
        struct OpenAIRequest<'a> {
            input: &'a [String],
            model: &'a str,
        }

        #[derive(Deserialize)]
        struct OpenAIResponse {
            data: Vec<EmbeddingData>,
        }

        #[derive(Deserialize)]
        struct EmbeddingData {
            #[serde(default)]
            index: usize,
            embedding: Vec<f32>,
        }

        let url = format!("{}/embeddings", self.endpoint);
        debug!("Calling OpenAI embeddings API: {} items", texts.len());

        let request = OpenAIRequest {
            input: texts,
            model: &self.model,
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {api_key}"))
            .json(&request)
            .send()
            .await?;

        let mut result: OpenAIResponse = parse_response(response, "OpenAI").await?;
        result.data.sort_by_key(|d| d.index);

        Ok(result.data.into_iter().map(|d| d.embedding).collect())
    }

    /// Generate embedding using Ollama API
    async fn generate_ollama(&self, text: &str) -> Result<Vec<f32>> {
        #[derive(Serialize)]
        struct OllamaRequest<'a> {
            model: &'a str,
            prompt: &'a str,
        }

        #[derive(Deserialize)]
        struct OllamaResponse {
            embedding: Vec<f32>,
        }

        let url = format!("{}/api/embeddings", self.endpoint);
        debug!("Calling Ollama embeddings API: {}", url);

        let request = OllamaRequest {
            model: &self.model,
            prompt: text,
        };

        let response = self.client.post(&url).json(&request).send().await?;
        let result: OllamaResponse = parse_response(response, "Ollama").await?;

        Ok(result.embedding)
    }

    /// Ollama has no batch endpoint, so run single requests with bounded concurrency
    async fn generate_batch_ollama(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let concurrency = texts.len().clamp(1, OLLAMA_CONCURRENCY);
        let results: Vec<Result<Vec<f32>>> = stream::iter(texts.iter().cloned())
            .map(|text| async move { self.generate_ollama(&text).await })
            .buffered(concurrency)
            .collect()
            .await;

        results.into_iter().collect()
    }

    /// Generate a single embedding using Gemini `embedContent`
    async fn generate_gemini_single(&self, text: &str) -> Result<Vec<f32>> {
        let api_key = self.require_api_key()?;

        #[derive(Serialize)]
        struct Part<'a> {
            text: &'a str,
        }

        #[derive(Serialize)]
        struct Content<'a> {
            parts: Vec<Part<'a>>,
        }

        #[derive(Serialize)]
        struct EmbedRequest<'a> {
            model: &'a str,
            content: Content<'a>,
        }

        #[derive(Deserialize)]
        struct EmbedResponse {
            embedding: Values,
        }

        #[derive(Deserialize)]
        struct Values {
            values: Vec<f32>,
        }

        let model = gemini_model_path(&self.model);
        let url = format!("{}/{}:embedContent", self.endpoint, model);
        debug!("Calling Gemini embedContent API: {}", url);

        let request = EmbedRequest {
            model: &model,
            content: Content {
                parts: vec![Part { text }],
            },
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        let result: EmbedResponse = parse_response(response, "Gemini").await?;
        Ok(result.embedding.values)
    }

    /// Generate embeddings using Gemini `batchEmbedContents`
    async fn generate_gemini(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let api_key = self.require_api_key()?;

        #[derive(Serialize)]
        struct Part<'a> {
            text: &'a str,
        }

        #[derive(Serialize)]
        struct Content<'a> {
            parts: Vec<Part<'a>>,
        }

        #[derive(Serialize)]
        struct EmbedRequest<'a> {
            model: &'a str,
            content: Content<'a>,
        }

        #[derive(Serialize)]
        struct BatchRequest<'a> {
            requests: Vec<EmbedRequest<'a>>,
        }

        #[derive(Deserialize)]
        struct BatchResponse {
            embeddings: Vec<Values>,
        }

        #[derive(Deserialize)]
        struct Values {
            values: Vec<f32>,
        }

        let model = gemini_model_path(&self.model);
        let url = format!("{}/{}:batchEmbedContents", self.endpoint, model);
        debug!("Calling Gemini embeddings API: {} items", texts.len());

        let request = BatchRequest {
            requests: texts
                .iter()
                .map(|text| EmbedRequest {
                    model: &model,
                    content: Content {
                        parts: vec![Part { text }],
                    },
                })
                .collect(),
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        let result: BatchResponse = parse_response(response, "Gemini").await?;
        Ok(result.embeddings.into_iter().map(|e| e.values).collect())
    }
}

#[async_trait]
impl Embedder for EmbeddingClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let vectors = match self.provider {
            Provider::Ollama => vec![self.generate_ollama(text).await?],
            Provider::OpenAI => self.generate_openai(&[text.to_string()]).await?,
            Provider::Gemini => vec![self.generate_gemini_single(text).await?],
        };
        let mut vectors = check_vectors(vectors, 1)?;
        vectors
            .pop()
            .ok_or_else(|| RehabRagError::Embedding("No embedding in response".to_string()))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let vectors = match self.provider {
            Provider::Ollama => self.generate_batch_ollama(texts).await?,
            Provider::OpenAI => self.generate_openai(texts).await?,
            Provider::Gemini => self.generate_gemini(texts).await?,
        };
        check_vectors(vectors, texts.len())
    }
}

/// Turn a non-success status into an embedding error, otherwise decode JSON
async fn parse_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
    provider: &str,
) -> Result<T> {
    if !response.status().is_success() {
        let status = response.status();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(RehabRagError::Embedding(format!(
            "{provider} API error ({status}): {error_text}"
        )));
    }

    response
        .json()
        .await
        .map_err(|e| RehabRagError::Embedding(format!("Failed to parse response: {e}")))
}

fn check_vectors(vectors: Vec<Vec<f32>>, expected: usize) -> Result<Vec<Vec<f32>>> {
    if vectors.len() != expected {
        return Err(RehabRagError::Embedding(format!(
            "Expected {expected} embeddings, provider returned {}",
            vectors.len()
        )));
    }
    if vectors.iter().any(Vec::is_empty) {
        return Err(RehabRagError::Embedding(
            "Provider returned an empty embedding".to_string(),
        ));
    }
    Ok(vectors)
}
