//! Sentence-embedding adapter
//!
//! The engine only talks to the [`Embedder`] trait. [`BertEmbedder`] is the
//! production implementation (Candle + HuggingFace Hub), and [`EmbedderLoader`]
//! is the seam the engine uses to build one during initialization.

pub mod batch;
pub mod bert;

pub use batch::embed_in_batches;
pub use bert::{BertEmbedder, HubLoader};

use serde::{Deserialize, Serialize};

use crate::errors::{RagError, Result};

/// Model that maps texts into a shared fixed-length vector space
pub trait Embedder: Send + Sync {
    /// Embed every text, returning one vector per input in the same order
    fn encode(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;

    /// Length of every vector returned by [`Embedder::encode`]
    fn dimension(&self) -> usize;

    /// Embed a single text
    fn encode_one(&self, text: &str) -> Result<Vec<f32>> {
        self.encode(&[text])?
            .pop()
            .ok_or(RagError::EmbeddingCount {
                expected: 1,
                actual: 0,
            })
    }
}

/// Builds the embedding model once, at engine initialization
pub trait EmbedderLoader: Send + Sync {
    fn load(&self, config: &EmbeddingConfig) -> Result<Box<dyn Embedder>>;
}

/// Embedding model settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// HuggingFace model repository
    pub model_id: String,
    /// Repository revision (branch, tag or commit)
    pub revision: String,
    /// Upper bound on documents per encode call
    pub batch_size: usize,
    /// Token limit per text; longer inputs are truncated
    pub max_sequence_length: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model_id: "sentence-transformers/paraphrase-MiniLM-L6-v2".to_string(),
            revision: "main".to_string(),
            batch_size: 5,
            max_sequence_length: 128,
        }
    }
}

impl EmbeddingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.model_id.trim().is_empty() {
            return Err(RagError::Config("embedding.model_id must not be empty".to_string()));
        }

        if self.batch_size == 0 {
            return Err(RagError::Config(
                "embedding.batch_size must be greater than 0".to_string(),
            ));
        }

        if self.max_sequence_length == 0 {
            return Err(RagError::Config(
                "embedding.max_sequence_length must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
