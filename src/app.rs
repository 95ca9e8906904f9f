//! Application context: configuration, assistant lifecycle and the rehab store

use std::sync::Arc;

use tracing::info;

use crate::api::AppState;
use crate::config::AppConfig;
use crate::document::load_document;
use crate::embeddings::Embedder;
use crate::embeddings::EmbeddingClient;
use crate::llm::Generator;
use crate::llm::LlmService;
use crate::models::Resource;
use crate::rag::AssistantHandle;
use crate::rag::RagPipeline;
use crate::store::RehabStore;
use crate::Result;

/// Resource type used for the indexed source document
pub const DOCUMENT_RESOURCE_TYPE: &str = "research_summary";

/// Owns everything a running instance shares between the CLI and the API
pub struct RehabRag {
    config: AppConfig,
    assistant: AssistantHandle,
    store: Arc<RehabStore>,
}

impl RehabRag {
    /// Create an instance whose assistant is still initializing
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            assistant: AssistantHandle::initializing(),
            store: Arc::new(RehabStore::default()),
        }
    }

    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    pub const fn assistant(&self) -> &AssistantHandle {
        &self.assistant
    }

    pub const fn store(&self) -> &Arc<RehabStore> {
        &self.store
    }

    /// State shared with the API handlers
    pub fn api_state(&self) -> AppState {
        AppState::new(self.assistant.clone(), self.store.clone())
    }

    /// Build the pipeline with the configured providers
    pub async fn initialize(&self) -> Result<()> {
        let embedder = Arc::new(EmbeddingClient::from_app_config(&self.config)?);
        let generator = Arc::new(LlmService::from_app_config(&self.config)?);
        self.initialize_with(embedder, generator).await
    }

    /// Build the pipeline with explicit providers and mark the assistant ready
    ///
    /// The source document is also registered as a resource.
    pub async fn initialize_with(
        &self,
        embedder: Arc<dyn Embedder>,
        generator: Arc<dyn Generator>,
    ) -> Result<()> {
        info!("Initializing RAG pipeline...");
        let document = load_document(&self.config.document.path)?;

        self.store
            .add_resource(
                Resource::new(&self.config.document.resource_title, &document.content)
                    .with_type(DOCUMENT_RESOURCE_TYPE),
            )
            .await;

        let pipeline =
            RagPipeline::from_document(document, &self.config, embedder, generator).await?;
        info!(
            "RAG pipeline ready ({} chunks indexed)",
            pipeline.chunk_count()
        );
        self.assistant.set_ready(pipeline)
    }
}
