//! Calling layer
//!
//! Owns the optional engine handle and the static fallback table, and decides
//! which one answers each message.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::{AnswerResult, RagEngine};
use crate::fallback::FallbackResponder;

const EMPTY_MESSAGE: &str = "Por favor, envie uma pergunta válida.";

/// Readiness of the retrieval engine as seen by front-ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineStatus {
    Ready,
    Loading,
}

/// Routes messages to the engine when it is ready, otherwise to the fallback table
pub struct Assistant {
    engine: Option<RagEngine>,
    fallback: FallbackResponder,
}

impl Assistant {
    /// Assistant without an engine; every answer comes from the fallback table
    pub fn new(fallback: FallbackResponder) -> Self {
        Self {
            engine: None,
            fallback,
        }
    }

    pub fn with_engine(engine: RagEngine, fallback: FallbackResponder) -> Self {
        Self {
            engine: Some(engine),
            fallback,
        }
    }

    /// Install the engine once background initialization has finished
    pub fn attach_engine(&mut self, engine: RagEngine) {
        self.engine = Some(engine);
    }

    pub fn status(&self) -> EngineStatus {
        match &self.engine {
            Some(engine) if engine.is_initialized() => EngineStatus::Ready,
            _ => EngineStatus::Loading,
        }
    }

    pub fn respond(&self, message: &str) -> AnswerResult {
        let message = message.trim();
        if message.is_empty() {
            return AnswerResult::system(EMPTY_MESSAGE);
        }

        match &self.engine {
            Some(engine) if engine.is_initialized() => engine.query(message),
            _ => {
                debug!("Engine not ready, using fallback replies");
                self.fallback.respond(message)
            }
        }
    }
}
