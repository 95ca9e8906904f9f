//! Complete RAG pipeline: Load -> Chunk -> Embed -> Index, then Retrieve -> Generate

use std::sync::Arc;
use std::sync::OnceLock;

use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::error;
use tracing::info;

use crate::chunking::TextChunker;
use crate::config::AppConfig;
use crate::document::load_document;
use crate::document::SourceDocument;
use crate::embeddings::Embedder;
use crate::errors::RehabRagError;
use crate::errors::Result;
use crate::llm::GenerationParams;
use crate::llm::Generator;
use crate::rag::AnswerSynthesizer;
use crate::rag::ContextAssembler;
use crate::rag::SearchResult;
use crate::rag::VectorIndex;

/// A built, read-only RAG pipeline over one source document
pub struct RagPipeline {
    document: SourceDocument,
    embedder: Arc<dyn Embedder>,
    index: VectorIndex,
    synthesizer: AnswerSynthesizer,
    top_k: usize,
}

impl RagPipeline {
    /// Run the build phase against the configured document
    ///
    /// # Errors
    /// - Missing or empty document
    /// - Invalid chunking configuration
    /// - Embedding provider failures (not retried)
    pub async fn build(
        config: &AppConfig,
        embedder: Arc<dyn Embedder>,
        generator: Arc<dyn Generator>,
    ) -> Result<Self> {
        let document = load_document(&config.document.path)?;
        Self::from_document(document, config, embedder, generator).await
    }

    /// Run the build phase against an already loaded document
    pub async fn from_document(
        document: SourceDocument,
        config: &AppConfig,
        embedder: Arc<dyn Embedder>,
        generator: Arc<dyn Generator>,
    ) -> Result<Self> {
        let chunker = TextChunker::from_config(&config.chunking)?;
        let chunks = chunker.split(&document.content)?;
        info!("Document split into {} chunks", chunks.len());

        let batch_size = config.embeddings.batch_size.max(1);
        let mut vectors = Vec::with_capacity(chunks.len());
        for (batch_idx, batch) in chunks.chunks(batch_size).enumerate() {
            let texts: Vec<String> = batch.iter().map(|c| c.text.clone()).collect();
            debug!(
                "Embedding batch {} ({} chunks)",
                batch_idx + 1,
                texts.len()
            );
            let batch_vectors = embedder.embed_batch(&texts).await?;
            if batch_vectors.len() != texts.len() {
                return Err(RehabRagError::Embedding(format!(
                    "Expected {} embeddings, provider returned {}",
                    texts.len(),
                    batch_vectors.len()
                )));
            }
            vectors.extend(batch_vectors);
        }

        let index = VectorIndex::build(chunks, vectors)?;
        info!(
            "Vector index ready: {} chunks, dimension {}",
            index.len(),
            index.dimension()
        );

        let synthesizer = AnswerSynthesizer::new(
            generator,
            ContextAssembler::new(config.retrieval.max_context_length),
            GenerationParams {
                temperature: config.llm.temperature,
                max_tokens: config.llm.max_tokens,
            },
        );

        Ok(Self {
            document,
            embedder,
            index,
            synthesizer,
            top_k: config.retrieval.top_k,
        })
    }

    pub const fn document(&self) -> &SourceDocument {
        &self.document
    }

    pub fn chunk_count(&self) -> usize {
        self.index.len()
    }

    pub const fn top_k(&self) -> usize {
        self.top_k
    }

    /// Embed the question and return the closest chunks
    pub async fn retrieve(&self, question: &str, k: usize) -> Result<Vec<SearchResult>> {
        let query_vector = self.embedder.embed(question).await?;
        self.index.search(&query_vector, k)
    }

    /// Answer with sources and the assembled context
    ///
    /// Provider errors are returned unchanged; see [`RagPipeline::answer`]
    /// for the generic boundary form.
    pub async fn query(&self, question: &str) -> Result<RagResponse> {
        let question = question.trim();
        if question.is_empty() {
            return Err(RehabRagError::Validation(
                "Question must not be empty".to_string(),
            ));
        }
        info!("Processing RAG query: {}", question);

        debug!("Step 1: Retrieving chunks");
        let sources = self.retrieve(question, self.top_k).await?;
        debug!("Retrieved {} chunks", sources.len());

        debug!("Step 2: Assembling context");
        let context = self.synthesizer.context(&sources);

        debug!("Step 3: Generating answer");
        let answer = self
            .synthesizer
            .synthesize_with_context(question, &context)
            .await?;

        info!("RAG query completed successfully");

        Ok(RagResponse {
            question: question.to_string(),
            answer,
            sources,
            context,
        })
    }

    /// Answer a question
    ///
    /// Invalid questions are reported as `Validation`; every internal failure
    /// is reported as a single `Pipeline` error after being logged.
    pub async fn answer(&self, question: &str) -> Result<String> {
        match self.query(question).await {
            Ok(response) => Ok(response.answer),
            Err(e) if e.is_client_error() => Err(e),
            Err(e) => {
                error!("Error processing question: {}", e);
                Err(RehabRagError::Pipeline(e.to_string()))
            }
        }
    }
}

/// RAG response
#[derive(Debug, Clone)]
pub struct RagResponse {
    pub question: String,
    pub answer: String,
    pub sources: Vec<SearchResult>,
    pub context: String,
}

impl RagResponse {
    /// Get a formatted string representation
    #[must_use]
    pub fn format(&self, with_sources: bool) -> String {
        let mut output = String::new();
        output.push_str(&format!("Question: {}\n\n", self.question));
        output.push_str(&format!("Answer:\n{}\n", self.answer));

        if with_sources {
            output.push_str(&format!("\nSources ({} chunks):\n", self.sources.len()));
            for (idx, source) in self.sources.iter().enumerate() {
                let preview: String = source.chunk.text.chars().take(80).collect();
                output.push_str(&format!(
                    "  {}. chunk #{} (score {:.3}): {}\n",
                    idx + 1,
                    source.chunk.index,
                    source.score,
                    preview.replace('\n', " ")
                ));
            }
        }

        output
    }
}

/// Lifecycle of the assistant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssistantStatus {
    Initializing,
    Ready,
}

/// Shared slot holding the pipeline once the build phase completes
///
/// Starts `Initializing`; becomes `Ready` exactly once.
#[derive(Clone, Default)]
pub struct AssistantHandle {
    slot: Arc<OnceLock<Arc<RagPipeline>>>,
}

impl AssistantHandle {
    /// A handle whose pipeline is still being built
    pub fn initializing() -> Self {
        Self::default()
    }

    /// Publish the built pipeline
    ///
    /// # Errors
    /// `Pipeline` if a pipeline was already published
    pub fn set_ready(&self, pipeline: RagPipeline) -> Result<()> {
        self.slot
            .set(Arc::new(pipeline))
            .map_err(|_| RehabRagError::Pipeline("Pipeline already initialized".to_string()))
    }

    pub fn status(&self) -> AssistantStatus {
        if self.slot.get().is_some() {
            AssistantStatus::Ready
        } else {
            AssistantStatus::Initializing
        }
    }

    /// The pipeline, or `NotReady` while initializing
    pub fn pipeline(&self) -> Result<Arc<RagPipeline>> {
        self.slot.get().cloned().ok_or(RehabRagError::NotReady)
    }

    /// Answer through the pipeline, rejecting requests made before it is ready
    pub async fn answer(&self, question: &str) -> Result<String> {
        self.pipeline()?.answer(question).await
    }
}
