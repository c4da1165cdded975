//! Interactive chat loop using rustyline
//!
//! Questions are answered by the fallback table until the background
//! initialization delivers the engine, then by the engine itself.

use anyhow::Result;
use colored::*;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use crate::assistant::Assistant;
use crate::display;
use crate::engine::RagEngine;

const PROMPT: &str = "farmacia> ";

/// What a line of input asks the session to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatInput {
    Question(String),
    Status,
    Help,
    Quit,
    Empty,
}

impl ChatInput {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        match trimmed {
            "" => ChatInput::Empty,
            "/status" => ChatInput::Status,
            "/ajuda" | "/help" => ChatInput::Help,
            "/sair" | "/quit" | "/exit" => ChatInput::Quit,
            _ => ChatInput::Question(trimmed.to_string()),
        }
    }
}

pub struct ChatSession {
    editor: DefaultEditor,
    history_path: Option<PathBuf>,
    assistant: Assistant,
    pending: Option<oneshot::Receiver<RagEngine>>,
    notices: bool,
}

impl ChatSession {
    /// `pending` delivers the engine once initialization finishes
    pub fn new(assistant: Assistant, pending: Option<oneshot::Receiver<RagEngine>>) -> Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
            history_path: None,
            assistant,
            pending,
            notices: true,
        })
    }

    /// Suppress the loading and ready notices
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.notices = !quiet;
        self
    }

    /// Same as [`ChatSession::new`] with history persisted to `history_file`
    pub fn with_history(
        assistant: Assistant,
        pending: Option<oneshot::Receiver<RagEngine>>,
        history_file: PathBuf,
    ) -> Result<Self> {
        let mut session = Self::new(assistant, pending)?;
        if history_file.exists() {
            if let Err(e) = session.editor.load_history(&history_file) {
                warn!(error = %e, path = %history_file.display(), "Failed to load chat history");
            }
        }
        session.history_path = Some(history_file);
        Ok(session)
    }

    /// Default history location: `~/.farmacia_history`
    pub fn default_history_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".farmacia_history"))
    }

    /// Blocking read-answer loop; returns on `/sair`, Ctrl-C or Ctrl-D
    pub fn run(&mut self) -> Result<()> {
        display::print_banner();
        if self.notices && self.pending.is_some() {
            display::print_loading_notice();
        }

        loop {
            let line = match self.editor.readline(PROMPT) {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(err) => return Err(anyhow::anyhow!("Readline error: {}", err)),
            };

            let input = ChatInput::parse(&line);
            if let ChatInput::Question(question) = &input {
                if let Err(e) = self.editor.add_history_entry(question.as_str()) {
                    debug!(error = %e, "Failed to record history entry");
                }
            }

            self.poll_engine();

            match input {
                ChatInput::Empty => continue,
                ChatInput::Quit => break,
                ChatInput::Help => Self::print_help(),
                ChatInput::Status => {
                    println!("Status: {}", display::format_status(self.assistant.status()));
                }
                ChatInput::Question(question) => {
                    let result = self.assistant.respond(&question);
                    display::print_answer(&result);
                }
            }
        }

        self.save_history();
        println!("{}", "Até logo!".cyan());
        Ok(())
    }

    /// Attach the engine if initialization has completed
    fn poll_engine(&mut self) {
        let Some(receiver) = self.pending.as_mut() else {
            return;
        };

        match receiver.try_recv() {
            Ok(engine) => {
                let ready = engine.is_initialized();
                info!(ready, "Engine handed to chat session");
                if self.notices {
                    println!("{}", display::format_engine_notice(ready, engine.document_count()));
                }
                self.assistant.attach_engine(engine);
                self.pending = None;
            }
            Err(oneshot::error::TryRecvError::Empty) => {}
            Err(oneshot::error::TryRecvError::Closed) => {
                warn!("Engine initialization task ended without a result");
                self.pending = None;
            }
        }
    }

    fn save_history(&mut self) {
        if let Some(path) = &self.history_path {
            if let Err(e) = self.editor.save_history(path) {
                warn!(error = %e, "Failed to save chat history");
            }
        }
    }

    fn print_help() {
        println!("{}", "Exemplos de perguntas:".bold());
        println!("  {} Quais medicamentos são gratuitos?", "•".cyan());
        println!("  {} Quais documentos preciso levar?", "•".cyan());
        println!("  {} Quem pode usar o programa?", "•".cyan());
        println!("{} /status  /ajuda  /sair", "Comandos:".bold());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(ChatInput::parse("  "), ChatInput::Empty);
        assert_eq!(ChatInput::parse("/status"), ChatInput::Status);
        assert_eq!(ChatInput::parse("/help"), ChatInput::Help);
        assert_eq!(ChatInput::parse("/sair"), ChatInput::Quit);
        assert_eq!(ChatInput::parse("/exit"), ChatInput::Quit);
    }

    #[test]
    fn test_parse_question_is_trimmed() {
        assert_eq!(
            ChatInput::parse("  Quais documentos?  \n"),
            ChatInput::Question("Quais documentos?".to_string())
        );
    }

    #[test]
    fn test_poll_engine_attaches_delivered_engine() {
        use crate::fallback::FallbackResponder;

        let (tx, rx) = oneshot::channel();
        let mut session = ChatSession::new(Assistant::new(FallbackResponder::new()), Some(rx))
            .unwrap()
            .quiet(true);

        session.poll_engine();
        assert!(session.pending.is_some());

        tx.send(RagEngine::new("/nonexistent/knowledge_base")).ok();
        session.poll_engine();
        assert!(session.pending.is_none());
    }

    #[test]
    fn test_poll_engine_stops_waiting_when_sender_dropped() {
        use crate::fallback::FallbackResponder;

        let (tx, rx) = oneshot::channel::<RagEngine>();
        let mut session = ChatSession::new(Assistant::new(FallbackResponder::new()), Some(rx))
            .unwrap()
            .quiet(true);
        drop(tx);

        session.poll_engine();
        assert!(session.pending.is_none());
    }
}
