//! Splitting the source document into overlapping chunks
//!
//! Chunks are measured in characters. Each chunk ends at the best natural
//! boundary inside its window (paragraph, line, sentence, word) and the next
//! chunk starts exactly `chunk_overlap` characters before that end, so
//! consecutive chunks always share an overlap-sized suffix/prefix and together
//! cover the whole text.

use serde::Serialize;
use tracing::debug;

use crate::config::ChunkingConfig;
use crate::errors::RehabRagError;
use crate::Result;

/// Boundaries tried in priority order
const SEPARATORS: [&str; 4] = ["\n\n", "\n", ". ", " "];

/// A contiguous slice of the source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chunk {
    /// Position of the chunk in the source, starting at 0
    pub index: usize,
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset one past the last character
    pub end: usize,
    pub text: String,
}

impl Chunk {
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Fixed-size splitter with overlap
#[derive(Debug, Clone, Copy)]
pub struct TextChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl TextChunker {
    /// Create a chunker
    ///
    /// # Errors
    /// `InvalidChunking` if `chunk_size` is 0 or `chunk_overlap >= chunk_size`
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(RehabRagError::InvalidChunking(
                "chunk size must be greater than 0".to_string(),
            ));
        }
        if chunk_overlap >= chunk_size {
            return Err(RehabRagError::InvalidChunking(format!(
                "overlap ({chunk_overlap}) must be smaller than chunk size ({chunk_size})"
            )));
        }
        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }

    pub fn from_config(config: &ChunkingConfig) -> Result<Self> {
        Self::new(config.chunk_size, config.chunk_overlap)
    }

    pub const fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub const fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    /// Split `text` into ordered, overlapping chunks
    ///
    /// # Errors
    /// `EmptyCorpus` if the text is empty or whitespace only
    pub fn split(&self, text: &str) -> Result<Vec<Chunk>> {
        if text.trim().is_empty() {
            return Err(RehabRagError::EmptyCorpus);
        }

        // Byte offset of every char, plus the end of the text
        let offsets: Vec<usize> = text
            .char_indices()
            .map(|(byte, _)| byte)
            .chain(std::iter::once(text.len()))
            .collect();
        let total_chars = offsets.len() - 1;

        let mut chunks = Vec::new();
        let mut start = 0;

        loop {
            let hard_end = (start + self.chunk_size).min(total_chars);
            let end = if hard_end == total_chars {
                total_chars
            } else {
                self.find_boundary(text, &offsets, start, hard_end)
                    .unwrap_or(hard_end)
            };

            chunks.push(Chunk {
                index: chunks.len(),
                start: offsets[start],
                end: offsets[end],
                text: text[offsets[start]..offsets[end]].to_string(),
            });

            if end == total_chars {
                break;
            }
            // end > start + overlap, so this always advances
            start = end - self.chunk_overlap;
        }

        debug!(
            "Split {} characters into {} chunks (size {}, overlap {})",
            total_chars,
            chunks.len(),
            self.chunk_size,
            self.chunk_overlap
        );

        Ok(chunks)
    }

    /// Latest separator end inside `[min_end, hard_end]`, as a char index
    fn find_boundary(
        &self,
        text: &str,
        offsets: &[usize],
        start: usize,
        hard_end: usize,
    ) -> Option<usize> {
        let min_end = start + (self.chunk_size / 2).max(self.chunk_overlap + 1);
        if min_end >= hard_end {
            return None;
        }

        let window = &text[offsets[start]..offsets[hard_end]];
        SEPARATORS.iter().find_map(|sep| {
            let byte_end = offsets[start] + window.rfind(sep)? + sep.len();
            let char_end = offsets.binary_search(&byte_end).ok()?;
            (char_end >= min_end).then_some(char_end)
        })
    }
}
