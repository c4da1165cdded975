//! Terminal rendering helpers shared by `ask`, `status` and `chat`

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::assistant::EngineStatus;
use crate::engine::{AnswerResult, AnswerSource};

pub const LOADING_MESSAGE: &str = "Carregando base de conhecimento...";

/// Spinner shown while the knowledge base is being embedded
pub fn loading_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Spinner that draws nothing, for quiet mode
pub fn hidden_spinner() -> ProgressBar {
    ProgressBar::hidden()
}

pub fn format_source(source: AnswerSource) -> ColoredString {
    let label = format!("Fonte: {}", source);
    match source {
        AnswerSource::KnowledgeBase => label.green(),
        AnswerSource::System => label.red(),
        AnswerSource::Fallback => label.yellow(),
    }
}

pub fn print_answer(result: &AnswerResult) {
    println!("{}", result.answer);
    println!("{}", format_source(result.source).dimmed());
}

pub fn format_status(status: EngineStatus) -> ColoredString {
    match status {
        EngineStatus::Ready => "ready".green().bold(),
        EngineStatus::Loading => "loading".yellow().bold(),
    }
}

/// One-line notice printed when background initialization hands over the engine
pub fn format_engine_notice(ready: bool, documents: usize) -> ColoredString {
    if ready {
        format!("Base de conhecimento pronta ({} documentos).", documents).green()
    } else {
        "Base de conhecimento indisponível; usando respostas padrão.".yellow()
    }
}

pub fn print_loading_notice() {
    println!("{}", LOADING_MESSAGE.dimmed());
}

pub fn print_banner() {
    let width = 60;
    println!("{}", "=".repeat(width).cyan());
    println!("{}", "Assistente do Programa Farmácia Popular do Brasil".bold().cyan());
    println!(
        "Digite sua pergunta. Comandos: {} {} {}",
        "/status".green(),
        "/ajuda".green(),
        "/sair".green()
    );
    println!("{}", "=".repeat(width).cyan());
}
