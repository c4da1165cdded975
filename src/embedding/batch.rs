// Batched document embedding
use tracing::info;

use super::Embedder;
use crate::errors::{RagError, Result};

/// Embed `texts` in chunks of `min(configured_batch, texts.len())`.
///
/// Vectors come back concatenated in input order, one per text.
pub fn embed_in_batches(
    embedder: &dyn Embedder,
    texts: &[&str],
    configured_batch: usize,
) -> Result<Vec<Vec<f32>>> {
    if texts.is_empty() {
        return Ok(Vec::new());
    }

    let batch_size = configured_batch.min(texts.len()).max(1);
    let total = texts.len();
    let mut embeddings = Vec::with_capacity(total);

    for batch in texts.chunks(batch_size) {
        let vectors = embedder.encode(batch)?;
        if vectors.len() != batch.len() {
            return Err(RagError::EmbeddingCount {
                expected: batch.len(),
                actual: vectors.len(),
            });
        }

        embeddings.extend(vectors);
        info!("Processed {} of {} documents", embeddings.len(), total);
    }

    Ok(embeddings)
}
