//! Answer synthesis: context block + prompt + generation call

use std::sync::Arc;

use tracing::debug;

use crate::errors::Result;
use crate::llm::GenerationParams;
use crate::llm::Generator;
use crate::rag::prompts::build_rehab_prompt;
use crate::rag::ContextAssembler;
use crate::rag::SearchResult;

/// Turns a question and its retrieved chunks into an answer
pub struct AnswerSynthesizer {
    generator: Arc<dyn Generator>,
    context_assembler: ContextAssembler,
    params: GenerationParams,
}

impl AnswerSynthesizer {
    pub fn new(
        generator: Arc<dyn Generator>,
        context_assembler: ContextAssembler,
        params: GenerationParams,
    ) -> Self {
        Self {
            generator,
            context_assembler,
            params,
        }
    }

    /// Assemble the context block for `results`
    pub fn context(&self, results: &[SearchResult]) -> String {
        self.context_assembler.assemble(results)
    }

    /// Generate an answer from an already assembled context block
    ///
    /// Generation failures are returned as-is; there is no fallback answer.
    pub async fn synthesize_with_context(&self, question: &str, context: &str) -> Result<String> {
        let prompt = build_rehab_prompt(question, context);
        debug!(
            "Generating answer (prompt {} bytes, context {} bytes)",
            prompt.len(),
            context.len()
        );
        self.generator.generate(&prompt, self.params).await
    }
}
