//! Provider clients against mocked HTTP endpoints

mod common;

use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::StatusCode;
use common::config_for;
use common::write_document;
use rehabrag::api::build_app;
use rehabrag::config::Provider;
use rehabrag::embeddings::Embedder;
use rehabrag::embeddings::EmbeddingClient;
use rehabrag::llm::GenerationParams;
use rehabrag::llm::Generator;
use rehabrag::llm::LlmService;
use rehabrag::RehabRag;
use rehabrag::RehabRagError;
use serde_json::json;
use serde_json::Value;
use tower::ServiceExt;
use wiremock::matchers::body_partial_json;
use wiremock::matchers::header;
use wiremock::matchers::method;
use wiremock::matchers::path;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;

const TIMEOUT: Duration = Duration::from_secs(5);

fn texts(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

fn embedder(
    provider: Provider,
    model: &str,
    server: &MockServer,
    key: Option<&str>,
) -> EmbeddingClient {
    EmbeddingClient::new(
        provider,
        model.to_string(),
        server.uri(),
        key.map(str::to_string),
        TIMEOUT,
    )
    .unwrap()
}

fn generator(provider: Provider, model: &str, server: &MockServer, key: &str) -> LlmService {
    LlmService::new(
        provider,
        model.to_string(),
        server.uri(),
        key.to_string(),
        TIMEOUT,
    )
    .unwrap()
}

// ====== Embeddings ======

#[tokio::test]
async fn test_ollama_batch_embeds_one_text_per_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/embeddings"))
        .and(body_partial_json(json!({ "model": "nomic-embed-text" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "embedding": [0.1, 0.2, 0.3] })),
        )
        .expect(3)
        .mount(&server)
        .await;

    let client = embedder(Provider::Ollama, "nomic-embed-text", &server, None);
    let vectors = client.embed_batch(&texts(&["a", "b", "c"])).await.unwrap();

    assert_eq!(vectors.len(), 3);
    assert!(vectors.iter().all(|v| v.len() == 3));
}

#[tokio::test]
async fn test_openai_batch_restores_input_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .and(header("Authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "index": 1, "embedding": [0.0, 1.0] },
                { "index": 0, "embedding": [1.0, 0.0] }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = embedder(
        Provider::OpenAI,
        "text-embedding-3-small",
        &server,
        Some("test-key"),
    );
    let vectors = client.embed_batch(&texts(&["first", "second"])).await.unwrap();

    assert_eq!(vectors, vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
}

#[tokio::test]
async fn test_gemini_single_embedding() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/text-embedding-004:embedContent"))
        .and(header("x-goog-api-key", "gemini-key"))
        .and(body_partial_json(json!({
            "model": "models/text-embedding-004",
            "content": { "parts": [{ "text": "How often?" }] }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "embedding": { "values": [0.5, 0.5, 0.0] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = embedder(
        Provider::Gemini,
        "text-embedding-004",
        &server,
        Some("gemini-key"),
    );
    let vector = client.embed("How often?").await.unwrap();

    assert_eq!(vector, vec![0.5, 0.5, 0.0]);
}

#[tokio::test]
async fn test_gemini_batch_embedding() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/text-embedding-004:batchEmbedContents"))
        .and(header("x-goog-api-key", "gemini-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "embeddings": [{ "values": [1.0, 0.0] }, { "values": [0.0, 1.0] }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = embedder(
        Provider::Gemini,
        "models/text-embedding-004",
        &server,
        Some("gemini-key"),
    );
    let vectors = client.embed_batch(&texts(&["first", "second"])).await.unwrap();

    assert_eq!(vectors, vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
}

#[tokio::test]
async fn test_embedding_count_mismatch_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "index": 0, "embedding": [1.0] }]
        })))
        .mount(&server)
        .await;

    let client = embedder(Provider::OpenAI, "m", &server, Some("k"));
    let result = client.embed_batch(&texts(&["one", "two"])).await;

    assert!(matches!(result, Err(RehabRagError::Embedding(_))));
}

#[tokio::test]
async fn test_embedding_http_error_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/embeddings"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model not loaded"))
        .mount(&server)
        .await;

    let client = embedder(Provider::Ollama, "nomic-embed-text", &server, None);
    let err = client.embed("text").await.unwrap_err();

    assert!(matches!(err, RehabRagError::Embedding(_)));
    assert!(err.to_string().contains("model not loaded"));
}

// ====== Generation ======

#[tokio::test]
async fn test_ollama_generate_sends_params() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(json!({
            "model": "gemma3:27b",
            "stream": false,
            "options": { "num_predict": 64 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "Repeat it 10 times daily."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = generator(Provider::Ollama, "gemma3:27b", &server, "");
    let params = GenerationParams {
        temperature: 0.7,
        max_tokens: 64,
    };
    let answer = client.generate("prompt", params).await.unwrap();

    assert_eq!(answer, "Repeat it 10 times daily.");
}

#[tokio::test]
async fn test_openai_chat_completion() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer sk-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": "Keep going!" } }]
        })))
        .mount(&server)
        .await;

    let client = generator(Provider::OpenAI, "gpt-4o-mini", &server, "sk-test");
    let answer = client
        .generate("prompt", GenerationParams::default())
        .await
        .unwrap();

    assert_eq!(answer, "Keep going!");
}

#[tokio::test]
async fn test_gemini_generate_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.0-flash:generateContent"))
        .and(body_partial_json(json!({
            "generationConfig": { "maxOutputTokens": 2000 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "Rest " }, { "text": "well." }] } }]
        })))
        .mount(&server)
        .await;

    let client = generator(Provider::Gemini, "gemini-2.0-flash", &server, "gemini-key");
    let answer = client
        .generate("prompt", GenerationParams::default())
        .await
        .unwrap();

    assert_eq!(answer, "Rest well.");
}

#[tokio::test]
async fn test_empty_generation_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "  " })))
        .mount(&server)
        .await;

    let client = generator(Provider::Ollama, "gemma3:27b", &server, "");
    let result = client.generate("prompt", GenerationParams::default()).await;

    assert!(matches!(result, Err(RehabRagError::Llm(_))));
}

#[tokio::test]
async fn test_rate_limited_generation_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .expect(1)
        .mount(&server)
        .await;

    let client = generator(Provider::OpenAI, "gpt-4o-mini", &server, "sk-test");
    let err = client
        .generate("prompt", GenerationParams::default())
        .await
        .unwrap_err();

    assert!(matches!(err, RehabRagError::Llm(_)));
    assert!(err.to_string().contains("429"));
}

// ====== End to end ======

#[tokio::test]
async fn test_configured_providers_serve_chat() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/embeddings"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "embedding": [1.0, 0.0, 0.5] })),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "Your notes say to repeat the bicep exercise 10 times daily."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, document) =
        write_document("The bicep exercise should be repeated 10 times daily.");
    let mut config = config_for(document);
    config.embeddings.endpoint = server.uri();
    config.llm.llm_endpoint = server.uri();

    let app = RehabRag::new(config);
    app.initialize().await.unwrap();

    let router = build_app(&app.config().server, app.api_state()).unwrap();
    let request = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "message": "How many times should the bicep exercise be repeated?" })
                .to_string(),
        ))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["data"]["text"].as_str().unwrap().contains("10 times daily"));
}

#[tokio::test]
async fn test_build_fails_when_embedding_provider_is_down() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/embeddings"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let (_dir, document) = write_document("Some notes about recovery.");
    let mut config = config_for(document);
    config.embeddings.endpoint = server.uri();

    let app = RehabRag::new(config);
    let result = app.initialize().await;

    assert!(matches!(result, Err(RehabRagError::Embedding(_))));
    assert!(app.assistant().pipeline().is_err());
}
