//! farmacia - CLI entry point

use anyhow::Result;
use clap::Parser;
use tokio::sync::oneshot;
use tracing::debug;

use farmacia_rag::{
    assistant::Assistant,
    chat::ChatSession,
    cli::{Args, Commands, OutputFormat, Verbosity},
    config::Config,
    display,
    engine::{EngineConfig, RagEngine},
    fallback::FallbackResponder,
    logging::init_logging,
};

/// Build and initialize the engine on a blocking thread
async fn initialize_engine(engine_config: EngineConfig, verbosity: Verbosity) -> Result<RagEngine> {
    let pb = if verbosity.show_progress() {
        display::loading_spinner(display::LOADING_MESSAGE)
    } else {
        display::hidden_spinner()
    };

    let engine = tokio::task::spawn_blocking(move || {
        let mut engine = RagEngine::with_config(engine_config);
        engine.initialize();
        engine
    })
    .await?;

    pb.finish_and_clear();
    Ok(engine)
}

async fn run_chat(config: &Config, verbosity: Verbosity) -> Result<()> {
    let (tx, rx) = oneshot::channel();
    let engine_config = config.engine_config();

    // The chat answers from the fallback table until this completes
    tokio::task::spawn_blocking(move || {
        let mut engine = RagEngine::with_config(engine_config);
        engine.initialize();
        if tx.send(engine).is_err() {
            debug!("Chat session closed before the engine was ready");
        }
    });

    let assistant = Assistant::new(FallbackResponder::with_config(config.fallback.clone()));
    let history = ChatSession::default_history_path();

    tokio::task::spawn_blocking(move || {
        let mut session = match history {
            Some(path) => ChatSession::with_history(assistant, Some(rx), path)?,
            None => ChatSession::new(assistant, Some(rx))?,
        }
        .quiet(!verbosity.show_progress());
        session.run()
    })
    .await??;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.clone())?;
    args.apply_overrides(&mut config);
    config.validate()?;

    let default_verbosity = Verbosity::parse(&config.logging.default_verbosity).unwrap_or(Verbosity::Normal);
    let verbosity = args.verbosity(default_verbosity);
    init_logging(verbosity, args.json_logs || config.logging.json);

    match args.command() {
        Commands::Config { write } => {
            print!("{}", config.to_toml()?);
            if write {
                let path = args
                    .config
                    .clone()
                    .or_else(Config::default_path)
                    .ok_or_else(|| anyhow::anyhow!("No home directory for the default config path"))?;
                config.save(&path)?;
                println!("Configuração salva em {}", path.display());
            }
        }
        Commands::Status => {
            let engine = initialize_engine(config.engine_config(), verbosity).await?;
            let documents = engine.document_count();
            let assistant = Assistant::with_engine(engine, FallbackResponder::with_config(config.fallback.clone()));

            println!("Status: {}", display::format_status(assistant.status()));
            println!("Base de conhecimento: {}", config.knowledge_base_dir().display());
            println!("Documentos: {}", documents);
        }
        Commands::Ask { question, format } => {
            let engine = initialize_engine(config.engine_config(), verbosity).await?;
            let assistant = Assistant::with_engine(engine, FallbackResponder::with_config(config.fallback.clone()));
            let result = assistant.respond(&question);

            match format {
                OutputFormat::Text => display::print_answer(&result),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
            }
        }
        Commands::Chat => run_chat(&config, verbosity).await?,
    }

    Ok(())
}
