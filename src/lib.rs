pub mod api;
pub mod app;
pub mod chunking;
pub mod cli;
pub mod config;
pub mod document;
pub mod embeddings;
pub mod errors;
pub mod llm;
pub mod logging;
pub mod models;
pub mod rag;
pub mod store;

#[cfg(test)]
mod errors_tests;

pub use app::RehabRag;
pub use config::AppConfig;
pub use errors::*;
