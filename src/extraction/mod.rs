// Rule-based answer extraction from the winning document
pub mod answer;

pub use answer::{AnswerExtractor, ExtractionConfig};
