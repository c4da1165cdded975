// Retrieval engine: corpus + embedding model + top-1 search + answer extraction
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error, info};

use super::types::{AnswerResult, EngineConfig};
use crate::corpus::{load_corpus, Corpus};
use crate::embedding::{embed_in_batches, Embedder, EmbedderLoader, HubLoader};
use crate::errors::{panic_reason, RagError, Result};
use crate::extraction::AnswerExtractor;
use crate::retrieval::{DocumentIndex, SearchHit};

pub(crate) const NOT_INITIALIZED: &str = "Sistema RAG não inicializado.";
pub(crate) const NO_DOCUMENTS: &str = "Nenhum documento disponível na base.";
pub(crate) const PROCESSING_ERROR_PREFIX: &str = "Erro ao processar: ";

/// Question-answering engine over a fixed document corpus
///
/// State is written once by [`RagEngine::initialize`] and only read by
/// [`RagEngine::query`], so an initialized engine can be shared across threads.
pub struct RagEngine {
    config: EngineConfig,
    loader: Box<dyn EmbedderLoader>,
    extractor: AnswerExtractor,
    corpus: Corpus,
    index: DocumentIndex,
    embedder: Option<Box<dyn Embedder>>,
    initialized: AtomicBool,
}

impl RagEngine {
    /// Engine over `knowledge_base_dir` with default settings
    pub fn new(knowledge_base_dir: impl Into<PathBuf>) -> Self {
        Self::with_config(EngineConfig::new(knowledge_base_dir))
    }

    /// Engine using the HuggingFace Hub model loader
    pub fn with_config(config: EngineConfig) -> Self {
        Self::with_loader(config, HubLoader)
    }

    /// Engine with a custom embedding model loader
    pub fn with_loader(config: EngineConfig, loader: impl EmbedderLoader + 'static) -> Self {
        let extractor = AnswerExtractor::with_config(config.extraction.clone());
        Self {
            config,
            loader: Box::new(loader),
            extractor,
            corpus: Corpus::default(),
            index: DocumentIndex::default(),
            embedder: None,
            initialized: AtomicBool::new(false),
        }
    }

    /// Load the corpus, build the model and embed every document.
    ///
    /// Failures are logged and leave the engine uninitialized; nothing is
    /// returned to the caller, who observes [`RagEngine::is_initialized`].
    pub fn initialize(&mut self) {
        if self.is_initialized() {
            debug!("RAG engine already initialized");
            return;
        }

        match self.try_initialize() {
            Ok(()) => {
                self.initialized.store(true, Ordering::Release);
                info!(documents = self.corpus.len(), "RAG engine initialized");
            }
            Err(e) => {
                error!(error = %e, "Failed to initialize RAG engine");
                self.corpus = Corpus::default();
                self.index = DocumentIndex::default();
                self.embedder = None;
            }
        }
    }

    fn try_initialize(&mut self) -> Result<()> {
        self.config.validate()?;

        let corpus = load_corpus(&self.config.knowledge_base_dir)?;
        let embedder = self.loader.load(&self.config.embedding)?;

        let embeddings = embed_in_batches(
            embedder.as_ref(),
            &corpus.texts(),
            self.config.embedding.batch_size,
        )?;
        if embeddings.len() != corpus.len() {
            return Err(RagError::EmbeddingCount {
                expected: corpus.len(),
                actual: embeddings.len(),
            });
        }

        let index = DocumentIndex::new(embeddings)?;
        if let Some(dimension) = index.dimension() {
            if dimension != embedder.dimension() {
                return Err(RagError::DimensionMismatch {
                    expected: embedder.dimension(),
                    actual: dimension,
                });
            }
        }

        self.corpus = corpus;
        self.index = index;
        self.embedder = Some(embedder);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    pub fn document_count(&self) -> usize {
        self.corpus.len()
    }

    /// Answer `question`. Never fails: problems become `Sistema` answers.
    pub fn query(&self, question: &str) -> AnswerResult {
        if !self.is_initialized() {
            return AnswerResult::system(NOT_INITIALIZED);
        }

        info!(question, documents = self.corpus.len(), "Question received");

        if self.corpus.is_empty() {
            return AnswerResult::system(NO_DOCUMENTS);
        }

        match panic::catch_unwind(AssertUnwindSafe(|| self.answer(question))) {
            Ok(Ok(answer)) => AnswerResult::knowledge_base(answer),
            Ok(Err(e)) => {
                error!(error = %e, question, "Failed to process question");
                AnswerResult::system(format!("{}{}", PROCESSING_ERROR_PREFIX, e))
            }
            Err(cause) => {
                let reason = panic_reason(&*cause);
                error!(%reason, question, "Question processing panicked");
                AnswerResult::system(format!("{}{}", PROCESSING_ERROR_PREFIX, reason))
            }
        }
    }

    /// Most similar document for `question`; `None` when there is nothing to search
    pub fn search(&self, question: &str) -> Result<Option<SearchHit>> {
        let embedder = match (&self.embedder, self.is_initialized()) {
            (Some(embedder), true) => embedder,
            _ => return Ok(None),
        };

        let query_vector = embedder.encode_one(question)?;
        self.index.search(&query_vector)
    }

    fn answer(&self, question: &str) -> Result<String> {
        let hit = self
            .search(question)?
            .ok_or_else(|| RagError::Generic("no document could be selected".to_string()))?;
        let document = self.corpus.get(hit.index).ok_or(RagError::EmbeddingCount {
            expected: self.index.len(),
            actual: self.corpus.len(),
        })?;

        info!(
            index = hit.index,
            score = hit.score,
            origin = %document.origin.display(),
            "Most similar document"
        );

        Ok(self.extractor.extract(&document.text, question))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::EmbeddingConfig;
    use crate::engine::AnswerSource;
    use std::fs;
    use tempfile::TempDir;

    /// Bag-of-letters embedding over a-z
    struct Letters;

    impl Embedder for Letters {
        fn encode(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
            Ok(texts
                .iter()
                .map(|t| {
                    let mut v = vec![0.0; 26];
                    for b in t.to_ascii_lowercase().bytes().filter(u8::is_ascii_lowercase) {
                        v[(b - b'a') as usize] += 1.0;
                    }
                    v
                })
                .collect())
        }

        fn dimension(&self) -> usize {
            26
        }
    }

    struct LettersLoader;

    impl EmbedderLoader for LettersLoader {
        fn load(&self, _config: &EmbeddingConfig) -> Result<Box<dyn Embedder>> {
            Ok(Box::new(Letters))
        }
    }

    struct BrokenLoader;

    impl EmbedderLoader for BrokenLoader {
        fn load(&self, _config: &EmbeddingConfig) -> Result<Box<dyn Embedder>> {
            Err(RagError::ModelLoad("weights unavailable".to_string()))
        }
    }

    fn engine_over(dir: &TempDir, loader: impl EmbedderLoader + 'static) -> RagEngine {
        RagEngine::with_loader(EngineConfig::new(dir.path()), loader)
    }

    #[test]
    fn test_new_engine_is_uninitialized() {
        let engine = RagEngine::new("knowledge_base");
        assert!(!engine.is_initialized());
        assert_eq!(engine.query("oi"), AnswerResult::system(NOT_INITIALIZED));
    }

    #[test]
    fn test_model_failure_leaves_engine_uninitialized() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), "Farmácia Popular").unwrap();

        let mut engine = engine_over(&dir, BrokenLoader);
        engine.initialize();

        assert!(!engine.is_initialized());
        assert_eq!(engine.document_count(), 0);
        assert_eq!(engine.query("oi").source, AnswerSource::System);
    }

    #[test]
    fn test_invalid_config_prevents_initialization() {
        let dir = TempDir::new().unwrap();
        let mut config = EngineConfig::new(dir.path());
        config.embedding.batch_size = 0;

        let mut engine = RagEngine::with_loader(config, LettersLoader);
        engine.initialize();
        assert!(!engine.is_initialized());
    }

    #[test]
    fn test_empty_corpus_initializes_but_has_no_documents() {
        let dir = TempDir::new().unwrap();
        let mut engine = engine_over(&dir, LettersLoader);
        engine.initialize();

        assert!(engine.is_initialized());
        assert_eq!(engine.query("Quais medicamentos?"), AnswerResult::system(NO_DOCUMENTS));
        assert_eq!(engine.search("qualquer coisa").unwrap(), None);
    }

    #[test]
    fn test_initialize_twice_is_noop() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), "abc").unwrap();

        let mut engine = engine_over(&dir, LettersLoader);
        engine.initialize();
        fs::write(dir.path().join("b.txt"), "xyz").unwrap();
        engine.initialize();

        assert_eq!(engine.document_count(), 1);
    }

    #[test]
    fn test_search_returns_closest_document() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), "aaaa").unwrap();
        fs::write(dir.path().join("b.txt"), "zzzz").unwrap();

        let mut engine = engine_over(&dir, LettersLoader);
        engine.initialize();

        let hit = engine.search("zz").unwrap().unwrap();
        let winner = engine.corpus.get(hit.index).unwrap();
        assert_eq!(winner.text, "zzzz");
    }
}
