// Corpus: ordered collection of plain-text knowledge base documents
pub mod loader;

pub use loader::{load_corpus, Corpus, Document};
