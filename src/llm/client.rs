//! Generation API client for the supported providers

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use super::GenerationParams;
use super::Generator;
use crate::config::gemini_model_path;
use crate::config::AppConfig;
use crate::config::Provider;
use crate::errors::RehabRagError;
use crate::errors::Result;

/// Client for the text generation provider
#[derive(Clone)]
pub struct LlmService {
    provider: Provider,
    model: String,
    endpoint: String,
    api_key: String,
    client: Client,
}

impl LlmService {
    /// Create a new LLM client
    pub fn new(
        provider: Provider,
        model: String,
        endpoint: String,
        api_key: String,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            provider,
            model,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key,
            client,
        })
    }

    /// Create a client from the `[llm]` section
    pub fn from_app_config(config: &AppConfig) -> Result<Self> {
        Self::new(
            config.llm.provider,
            config.llm.llm_model.clone(),
            config.llm.llm_endpoint.clone(),
            config.llm.llm_key.clone(),
            Duration::from_secs(config.llm.request_timeout_secs),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn require_api_key(&self) -> Result<&str> {
        if self.api_key.is_empty() {
            return Err(RehabRagError::Config(format!(
                "{:?} API key not provided",
                self.provider
            )));
        }
        Ok(&self.api_key)
    }

    /// Generate text using an `OpenAI`-compatible chat completions endpoint
    async fn generate_openai(&self, prompt: &str, params: GenerationParams) -> Result<String> {
        let api_key = self.require_api_key()?;

        #[derive(Serialize)]
        struct Message<'a> {
            role: &'a str,
            content: &'a str,
        }

        #[derive(Serialize)]
        struct ChatRequest<'a> {
            model: &'a str,
            messages: Vec<Message<'a>>,
            temperature: f32,
            max_tokens: usize,
        }

        #[derive(Deserialize)]
        struct ChatResponse {
            choices: Vec<Choice>,
        }

        #[derive(Deserialize)]
        struct Choice {
            message: ResponseMessage,
        }

        #[derive(Deserialize)]
        struct ResponseMessage {
            content: Option<String>,
        }

        let url = format!("{}/chat/completions", self.endpoint);
        debug!("Calling OpenAI chat API: {}", url);

        let request = ChatRequest {
            model: &self.model,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {api_key}"))
            .json(&request)
            .send()
            .await?;

        let result: ChatResponse = parse_response(response, "OpenAI").await?;
        Ok(result
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default())
    }

    /// Generate text using Ollama `/api/generate` (non-streaming)
    async fn generate_ollama(&self, prompt: &str, params: GenerationParams) -> Result<String> {
        #[derive(Serialize)]
        struct Options {
            temperature: f32,
            num_predict: usize,
        }

        #[derive(Serialize)]
        struct GenerateRequest<'a> {
            model: &'a str,
            prompt: &'a str,
            stream: bool,
            options: Options,
        }

        #[derive(Deserialize)]
        struct GenerateResponse {
            response: String,
        }

        let url = format!("{}/api/generate", self.endpoint);
        debug!("Calling Ollama generate API: {}", url);

        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: Options {
                temperature: params.temperature,
                num_predict: params.max_tokens,
            },
        };

        let response = self.client.post(&url).json(&request).send().await?;
        let result: GenerateResponse = parse_response(response, "Ollama").await?;
        Ok(result.response)
    }

    /// Generate text using Gemini `generateContent`
    async fn generate_gemini(&self, prompt: &str, params: GenerationParams) -> Result<String> {
        let api_key = self.require_api_key()?;

        #[derive(Serialize, Deserialize)]
        struct Part {
            #[serde(default)]
            text: String,
        }

        #[derive(Serialize)]
        struct Content<'a> {
            role: &'a str,
            parts: Vec<Part>,
        }

        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct GenerationConfig {
            temperature: f32,
            max_output_tokens: usize,
        }

        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct GenerateRequest<'a> {
            contents: Vec<Content<'a>>,
            generation_config: GenerationConfig,
        }

        #[derive(Deserialize)]
        struct GenerateResponse {
            #[serde(default)]
            candidates: Vec<Candidate>,
        }

        #[derive(Deserialize)]
        struct Candidate {
            content: CandidateContent,
        }

        #[derive(Deserialize)]
        struct CandidateContent {
            #[serde(default)]
            parts: Vec<Part>,
        }

        let model = gemini_model_path(&self.model);
        let url = format!("{}/{}:generateContent", self.endpoint, model);
        debug!("Calling Gemini generate API: {}", url);

        let request = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: params.temperature,
                max_output_tokens: params.max_tokens,
            },
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        let result: GenerateResponse = parse_response(response, "Gemini").await?;
        Ok(result
            .candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<String>()
            })
            .unwrap_or_default())
    }
}

#[async_trait]
impl Generator for LlmService {
    async fn generate(&self, prompt: &str, params: GenerationParams) -> Result<String> {
        let answer = match self.provider {
            Provider::OpenAI => self.generate_openai(prompt, params).await?,
            Provider::Ollama => self.generate_ollama(prompt, params).await?,
            Provider::Gemini => self.generate_gemini(prompt, params).await?,
        };

        if answer.trim().is_empty() {
            return Err(RehabRagError::Llm("Model returned an empty answer".to_string()));
        }
        Ok(answer)
    }
}

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
        return Err(RehabRagError::Llm(format!(
            "{provider} API error ({status}): {error_text}"
        )));
    }

    response
        .json()
        .await
        .map_err(|e| RehabRagError::Llm(format!("Failed to parse response: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_app_config() {
        let mut config = AppConfig::default();
        config.llm.provider = Provider::Gemini;
        config.llm.llm_model = "gemini-1.5-pro-latest".to_string();

        let service = LlmService::from_app_config(&config).unwrap();
        assert_eq!(service.model(), "gemini-1.5-pro-latest");
        assert_eq!(service.provider, Provider::Gemini);
    }

    #[tokio::test]
    async fn test_gemini_requires_key() {
        let service = LlmService::new(
            Provider::Gemini,
            "gemini-1.5-pro-latest".to_string(),
            "http://localhost:1".to_string(),
            String::new(),
            Duration::from_secs(1),
        )
        .unwrap();

        let result = service
            .generate("hello", GenerationParams::default())
            .await;
        assert!(matches!(result, Err(RehabRagError::Config(_))));
    }
}
