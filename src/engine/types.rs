// Engine result and configuration types
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::embedding::EmbeddingConfig;
use crate::errors::Result;
use crate::extraction::ExtractionConfig;

/// Provenance label attached to every answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnswerSource {
    /// Derived from a retrieved corpus document
    #[serde(rename = "Base de Conhecimento")]
    KnowledgeBase,
    /// Engine status or error message
    #[serde(rename = "Sistema")]
    System,
    /// Canned keyword-triggered reply
    #[serde(rename = "Ministério da Saúde - Programa Farmácia Popular do Brasil")]
    Fallback,
}

impl AnswerSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::KnowledgeBase => "Base de Conhecimento",
            Self::System => "Sistema",
            Self::Fallback => "Ministério da Saúde - Programa Farmácia Popular do Brasil",
        }
    }
}

impl fmt::Display for AnswerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `{answer, source}` pair returned for every query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerResult {
    pub answer: String,
    pub source: AnswerSource,
}

impl AnswerResult {
    pub fn new(answer: impl Into<String>, source: AnswerSource) -> Self {
        Self {
            answer: answer.into(),
            source,
        }
    }

    pub fn knowledge_base(answer: impl Into<String>) -> Self {
        Self::new(answer, AnswerSource::KnowledgeBase)
    }

    pub fn system(answer: impl Into<String>) -> Self {
        Self::new(answer, AnswerSource::System)
    }

    pub fn fallback(answer: impl Into<String>) -> Self {
        Self::new(answer, AnswerSource::Fallback)
    }
}

/// Everything the engine needs to initialize
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Directory holding the `.txt` corpus
    pub knowledge_base_dir: PathBuf,
    pub embedding: EmbeddingConfig,
    pub extraction: ExtractionConfig,
}

impl EngineConfig {
    pub fn new(knowledge_base_dir: impl Into<PathBuf>) -> Self {
        Self {
            knowledge_base_dir: knowledge_base_dir.into(),
            embedding: EmbeddingConfig::default(),
            extraction: ExtractionConfig::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.embedding.validate()?;
        self.extraction.validate()
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new("knowledge_base")
    }
}
