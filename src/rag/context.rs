//! Context assembly from retrieved chunks

use crate::config::default_max_context_length;
use crate::rag::SearchResult;

/// Assembler for creating a bounded context block from search results
#[derive(Debug, Clone, Copy)]
pub struct ContextAssembler {
    max_context_length: usize,
}

impl ContextAssembler {
    /// Create a new context assembler
    #[must_use]
    pub const fn new(max_context_length: usize) -> Self {
        Self { max_context_length }
    }

    /// Concatenate retrieved chunks in retrieval order
    ///
    /// Excerpts that would push the block past the limit are dropped. The first
    /// excerpt is always kept, cut to the limit if it alone is too long.
    #[must_use]
    pub fn assemble(&self, results: &[SearchResult]) -> String {
        let mut context = String::new();

        for (idx, result) in results.iter().enumerate() {
            let entry = format!("[Excerpt {}]\n{}\n\n", idx + 1, result.chunk.text.trim());

            if context.len() + entry.len() > self.max_context_length {
                if context.is_empty() {
                    context.push_str(truncate_at_char_boundary(&entry, self.max_context_length));
                }
                break;
            }

            context.push_str(&entry);
        }

        context.trim_end().to_string()
    }
}

impl Default for ContextAssembler {
    fn default() -> Self {
        Self::new(default_max_context_length())
    }
}

fn truncate_at_char_boundary(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        return s;
    }
    let mut end = max_len;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
