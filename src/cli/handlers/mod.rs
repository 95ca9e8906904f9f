//! CLI command handlers
//!
//! - serve: build the pipeline, then run the API server
//! - ask: one-shot question
//! - info: chunk listing and configuration display

pub mod ask;
pub mod info;
pub mod serve;

pub use ask::*;
pub use info::*;
pub use serve::*;
