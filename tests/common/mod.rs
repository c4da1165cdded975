//! Shared fixtures: deterministic embedders and temporary corpora

#![allow(dead_code)]

use farmacia_rag::embedding::{Embedder, EmbedderLoader, EmbeddingConfig};
use farmacia_rag::{EngineConfig, RagEngine, RagError, Result};
use std::fs;
use tempfile::TempDir;

const VOCABULARY: [&str; 8] = [
    "medicamento",
    "gratuit",
    "document",
    "receita",
    "fralda",
    "farmácia",
    "hipertens",
    "horário",
];

/// Counts vocabulary stems; the last component is a constant bias so no vector is zero
pub struct VocabularyEmbedder;

impl Embedder for VocabularyEmbedder {
    fn encode(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        Ok(texts
            .iter()
            .map(|text| {
                let lower = text.to_lowercase();
                let mut vector: Vec<f32> = VOCABULARY
                    .iter()
                    .map(|stem| lower.matches(stem).count() as f32)
                    .collect();
                vector.push(0.1);
                vector
            })
            .collect())
    }

    fn dimension(&self) -> usize {
        VOCABULARY.len() + 1
    }
}

/// Works like [`VocabularyEmbedder`] but fails on any text mentioning "falha"
pub struct FlakyEmbedder;

impl Embedder for FlakyEmbedder {
    fn encode(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.iter().any(|t| t.contains("falha")) {
            return Err(RagError::Embedding("simulated forward pass failure".to_string()));
        }
        VocabularyEmbedder.encode(texts)
    }

    fn dimension(&self) -> usize {
        VocabularyEmbedder.dimension()
    }
}

/// Works like [`VocabularyEmbedder`] but panics on any text mentioning "boom"
pub struct PanickingEmbedder;

impl Embedder for PanickingEmbedder {
    fn encode(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.iter().any(|t| t.contains("boom")) {
            panic!("tensor shape assertion failed");
        }
        VocabularyEmbedder.encode(texts)
    }

    fn dimension(&self) -> usize {
        VocabularyEmbedder.dimension()
    }
}

/// Loader backed by a plain constructor function
pub struct StubLoader(pub fn() -> Box<dyn Embedder>);

impl EmbedderLoader for StubLoader {
    fn load(&self, _config: &EmbeddingConfig) -> Result<Box<dyn Embedder>> {
        Ok((self.0)())
    }
}

pub fn vocabulary() -> Box<dyn Embedder> {
    Box::new(VocabularyEmbedder)
}

pub fn flaky() -> Box<dyn Embedder> {
    Box::new(FlakyEmbedder)
}

pub fn panicking() -> Box<dyn Embedder> {
    Box::new(PanickingEmbedder)
}

/// Loader whose model never loads
pub struct UnavailableLoader;

impl EmbedderLoader for UnavailableLoader {
    fn load(&self, _config: &EmbeddingConfig) -> Result<Box<dyn Embedder>> {
        Err(RagError::ModelLoad("model repository unreachable".to_string()))
    }
}

/// Temporary knowledge base with one file per document
pub fn corpus_dir(documents: &[&str]) -> TempDir {
    let dir = TempDir::new().expect("create temp dir");
    for (i, text) in documents.iter().enumerate() {
        fs::write(dir.path().join(format!("doc{:02}.txt", i)), text).expect("write document");
    }
    dir
}

/// Initialized engine over `dir`
pub fn ready_engine(dir: &TempDir, embedder: fn() -> Box<dyn Embedder>) -> RagEngine {
    let mut engine = RagEngine::with_loader(EngineConfig::new(dir.path()), StubLoader(embedder));
    engine.initialize();
    engine
}
