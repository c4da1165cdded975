// Top-1 cosine similarity search over the document embedding matrix
pub mod index;
pub mod similarity;

pub use index::{DocumentIndex, SearchHit};
pub use similarity::{arg_max, cosine_similarity};
