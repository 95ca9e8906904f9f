//! Information display handlers (chunks, config)

use std::path::PathBuf;

use crate::chunking::TextChunker;
use crate::cli::output::*;
use crate::document::load_document;
use crate::AppConfig;
use crate::Result;

/// Load and chunk the document with the configured parameters
pub fn handle_chunks_command(config: &AppConfig, path: Option<PathBuf>) -> Result<()> {
    let path = path.unwrap_or_else(|| config.document.path.clone());
    let document = load_document(&path)?;
    let chunker = TextChunker::from_config(&config.chunking)?;
    let chunks = chunker.split(&document.content)?;

    print_info(&format!(
        "{} ({} chars, chunk size {}, overlap {})",
        path.display(),
        document.char_count(),
        chunker.chunk_size(),
        chunker.chunk_overlap()
    ));
    print_chunk_table(&chunks);
    print_success(&format!("{} chunks ready for embedding", chunks.len()));

    Ok(())
}

pub fn handle_config_command(config: &AppConfig) -> Result<()> {
    print_config(config)
}
