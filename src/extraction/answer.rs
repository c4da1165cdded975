//! Answer extraction
//!
//! Turns the retrieved document into a short, dialog-style reply. Nothing is
//! generated: paragraphs are selected by keyword, joined, and prefixed with a
//! lead-in chosen by whether the user asked a question.

use serde::{Deserialize, Serialize};
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, error};

use crate::errors::{panic_reason, RagError, Result};

/// Paragraphs used when no paragraph qualifies by keyword
const FALLBACK_PARAGRAPHS: usize = 2;

/// Extraction vocabulary and fixed replies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Domain keywords that mark a paragraph as relevant
    pub keywords: Vec<String>,
    /// Prefix used when the question contains `?`
    pub interrogative_lead_in: String,
    /// Prefix used otherwise
    pub declarative_lead_in: String,
    /// Reply when the document has no usable paragraphs
    pub no_content_reply: String,
    /// Reply when composing the answer failed unexpectedly
    pub failure_reply: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            keywords: [
                "documento",
                "fraldas",
                "acamados",
                "representante",
                "medicamento",
                "gratuito",
                "desconto",
                "farmácia",
                "popular",
            ]
            .iter()
            .map(|k| k.to_string())
            .collect(),
            interrogative_lead_in: "Com base nas informações do Programa Farmácia Popular, ".to_string(),
            declarative_lead_in: "Sobre o que você perguntou, ".to_string(),
            no_content_reply: "Desculpe, não encontrei informações específicas sobre sua pergunta no \
                Programa Farmácia Popular. Posso ajudar com informações sobre medicamentos disponíveis, \
                documentos necessários, ou como funciona o programa?"
                .to_string(),
            failure_reply: "Desculpe, ocorreu um erro ao processar sua pergunta. Por favor, tente \
                perguntar de outra forma ou sobre outro aspecto do Programa Farmácia Popular."
                .to_string(),
        }
    }
}

impl ExtractionConfig {
    pub fn validate(&self) -> Result<()> {
        if self.keywords.iter().all(|k| k.trim().is_empty()) {
            return Err(RagError::Config(
                "extraction.keywords must contain at least one keyword".to_string(),
            ));
        }
        Ok(())
    }
}

/// Keyword-driven paragraph selector
#[derive(Debug, Clone)]
pub struct AnswerExtractor {
    keywords: Vec<String>,
    config: ExtractionConfig,
}

impl Default for AnswerExtractor {
    fn default() -> Self {
        Self::with_config(ExtractionConfig::default())
    }
}

impl AnswerExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ExtractionConfig) -> Self {
        let keywords = config
            .keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();

        Self { keywords, config }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Build the reply for `question` from `document`. Never fails.
    pub fn extract(&self, document: &str, question: &str) -> String {
        match panic::catch_unwind(AssertUnwindSafe(|| self.compose(document, question))) {
            Ok(answer) => answer,
            Err(cause) => {
                let reason = panic_reason(&*cause);
                error!(%reason, "Answer extraction failed");
                self.config.failure_reply.clone()
            }
        }
    }

    fn compose(&self, document: &str, question: &str) -> String {
        let cleaned = document.replace('#', "");
        let paragraphs: Vec<&str> = cleaned
            .split('\n')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();

        if paragraphs.is_empty() {
            return self.config.no_content_reply.clone();
        }

        let question_lower = question.to_lowercase();
        let mut selected: Vec<&str> = paragraphs
            .iter()
            .copied()
            .filter(|p| self.is_relevant(&question_lower, p))
            .collect();

        if selected.is_empty() {
            selected = paragraphs.iter().copied().take(FALLBACK_PARAGRAPHS).collect();
        }
        debug!(
            selected = selected.len(),
            total = paragraphs.len(),
            "Paragraphs selected for answer"
        );

        let content = selected.join(" ").split_whitespace().collect::<Vec<_>>().join(" ");
        format!("{}{}", self.lead_in(question), content)
    }

    /// A keyword in the question OR in the paragraph qualifies the paragraph
    fn is_relevant(&self, question_lower: &str, paragraph: &str) -> bool {
        let paragraph_lower = paragraph.to_lowercase();
        self.keywords
            .iter()
            .any(|k| question_lower.contains(k.as_str()) || paragraph_lower.contains(k.as_str()))
    }

    fn lead_in(&self, question: &str) -> &str {
        if question.contains('?') {
            &self.config.interrogative_lead_in
        } else {
            &self.config.declarative_lead_in
        }
    }
}
