//! CLI output formatting utilities

use crate::chunking::Chunk;
use crate::AppConfig;

/// Safely truncate a string at character boundary (not byte boundary)
///
/// Returns the string with a "..." suffix if it was truncated.
#[must_use]
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{truncated}...")
    } else {
        s.to_string()
    }
}

/// Print a chunk table: index, byte range, length and a one-line preview
pub fn print_chunk_table(chunks: &[Chunk]) {
    println!("Found {} chunks:", chunks.len());
    println!("{:>5}  {:>13}  {:>6}  preview", "#", "bytes", "chars");
    for chunk in chunks {
        let preview = truncate_str(&chunk.text.replace('\n', " "), 60);
        println!(
            "{:>5}  {:>13}  {:>6}  {}",
            chunk.index,
            format!("{}..{}", chunk.start, chunk.end),
            chunk.char_len(),
            preview
        );
    }
}

/// Print the effective configuration, secrets masked
pub fn print_config(config: &AppConfig) -> crate::Result<()> {
    println!("📋 RehabRAG Configuration:");
    println!();
    println!("{}", config.to_masked_toml()?);
    Ok(())
}

pub fn print_info(msg: &str) {
    println!("ℹ️  {msg}");
}

pub fn print_success(msg: &str) {
    println!("✅ {msg}");
}
