//! Retrieval engine
//!
//! The single `query(text)` entry point used by the calling layer:
//!
//! - initialization: load corpus, build embedding model, batch-embed documents
//! - per query: embed question, cosine scan, select top-1, extract answer
//!
//! Every failure is converted into an [`AnswerResult`] at this boundary.

pub mod core;
pub mod types;

pub use self::core::RagEngine;
pub use types::{AnswerResult, AnswerSource, EngineConfig};
