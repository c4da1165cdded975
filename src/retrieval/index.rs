// Brute-force document index: one embedding row per corpus document
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::similarity::{arg_max, cosine_similarity};
use crate::errors::{RagError, Result};

/// Best-matching document for a query vector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Position of the document in the corpus
    pub index: usize,
    /// Raw cosine similarity (non-finite when no row could be scored)
    pub score: f32,
}

/// Embedding matrix aligned with the corpus by row index
#[derive(Debug, Clone, Default)]
pub struct DocumentIndex {
    embeddings: Vec<Vec<f32>>,
}

impl DocumentIndex {
    /// Build an index, checking that every row has the same dimension
    pub fn new(embeddings: Vec<Vec<f32>>) -> Result<Self> {
        if let Some(first) = embeddings.first() {
            let expected = first.len();
            if let Some(row) = embeddings.iter().find(|row| row.len() != expected) {
                return Err(RagError::DimensionMismatch {
                    expected,
                    actual: row.len(),
                });
            }
        }

        Ok(Self { embeddings })
    }

    pub fn len(&self) -> usize {
        self.embeddings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.embeddings.is_empty()
    }

    /// Vector dimension, if the index has any rows
    pub fn dimension(&self) -> Option<usize> {
        self.embeddings.first().map(|row| row.len())
    }

    /// Cosine similarity of `query` against every row, in row order
    pub fn similarities(&self, query: &[f32]) -> Result<Vec<f32>> {
        self.embeddings
            .iter()
            .map(|row| cosine_similarity(row, query))
            .collect()
    }

    /// Top-1 row by cosine similarity; `None` for an empty index
    pub fn search(&self, query: &[f32]) -> Result<Option<SearchHit>> {
        let scores = self.similarities(query)?;
        debug!(?scores, "Similarities computed");

        Ok(arg_max(&scores).map(|index| SearchHit {
            index,
            score: scores[index],
        }))
    }
}
