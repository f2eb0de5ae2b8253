//! Nivesh CLI
//!
//! Main entry point for the nivesh command-line tool.
//! Answers Indian personal-investment questions from local knowledge first,
//! with an optional remote language-model fallback.

mod commands;

use clap::{Parser, Subcommand};
use commands::{AskCommand, ChatCommand, KnowledgeCommand, SummaryCommand};
use nivesh_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// Nivesh - investment Q&A for Indian retail investors
#[derive(Parser, Debug)]
#[command(name = "nivesh")]
#[command(about = "Investment Q&A with local knowledge and a remote fallback", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, global = true, env = "NIVESH_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "NIVESH_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    /// Fallback provider (huggingface, ollama)
    #[arg(short, long, global = true, env = "NIVESH_PROVIDER")]
    provider: Option<String>,

    /// Fallback model identifier
    #[arg(short, long, global = true, env = "NIVESH_MODEL")]
    model: Option<String>,

    /// Name of the savings goal
    #[arg(long, global = true)]
    goal_name: Option<String>,

    /// Target amount of the savings goal in rupees
    #[arg(long, global = true)]
    goal_amount: Option<f64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ask a single question
    Ask(AskCommand),

    /// Interactive question session
    Chat(ChatCommand),

    /// Inspect the glossary, rules and dataset
    Knowledge(KnowledgeCommand),

    /// Monthly summary of a transactions file
    Summary(SummaryCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    let config = AppConfig::load()?
        .with_overrides(
            cli.workspace,
            cli.config,
            cli.provider,
            cli.model,
            cli.log_level,
            cli.verbose,
            cli.no_color,
        )
        .with_goal(cli.goal_name, cli.goal_amount);

    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("Nivesh CLI starting");
    tracing::debug!("Workspace: {:?}", config.workspace);
    tracing::debug!("Provider: {}", config.provider);
    tracing::debug!("Model: {}", config.model);

    config.validate()?;
    config.ensure_nivesh_dir()?;

    let command_name = match &cli.command {
        Commands::Ask(_) => "ask",
        Commands::Chat(_) => "chat",
        Commands::Knowledge(_) => "knowledge",
        Commands::Summary(_) => "summary",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    let result = match cli.command {
        Commands::Ask(cmd) => cmd.execute(&config).await,
        Commands::Chat(cmd) => cmd.execute(&config).await,
        Commands::Knowledge(cmd) => cmd.execute(&config).await,
        Commands::Summary(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
