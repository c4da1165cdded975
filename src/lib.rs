//! farmacia-rag - Retrieval assistant for the Programa Farmácia Popular do Brasil
//!
//! Answers questions by retrieving the single most similar document from a
//! small `.txt` corpus and trimming it into a short reply, with canned
//! keyword-triggered answers while retrieval is unavailable.
//!
//! # Architecture
//!
//! - **corpus**: ordered document loading
//! - **embedding**: sentence-embedding model adapter (Candle BERT)
//! - **retrieval**: cosine similarity top-1 search
//! - **extraction**: rule-based answer extraction
//! - **engine**: initialization and the `query` entry point
//! - **assistant**: calling layer routing between engine and fallback replies

pub mod errors;

pub use errors::{RagError, Result};

pub mod corpus;
pub mod embedding;
pub mod retrieval;
pub mod extraction;
pub mod engine;

pub use engine::{AnswerResult, AnswerSource, EngineConfig, RagEngine};

pub mod fallback;
pub mod assistant;

// Configuration and terminal front-end
pub mod config;
pub mod logging;
pub mod cli;
pub mod display;
pub mod chat;
