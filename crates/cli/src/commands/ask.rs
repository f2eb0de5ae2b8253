//! Ask command handler.
//!
//! Answers a single question and exits.

use crate::commands::session::build_responder;
use clap::Args;
use nivesh_core::{config::AppConfig, AppError, AppResult};
use std::path::PathBuf;

/// Ask a single investment question
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub question: Option<String>,

    /// Read the question from a file
    #[arg(short, long, conflicts_with = "question")]
    pub file: Option<PathBuf>,

    /// Never call the remote fallback
    #[arg(long)]
    pub offline: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");
        tracing::debug!("Ask command options: {:?}", self);

        let question = self
            .get_question()?
            .ok_or_else(|| AppError::Config("No question provided".to_string()))?;

        let mut responder = build_responder(config, self.offline).await?;
        let remote = responder.remote_enabled();
        let answer = responder.respond_screened(&question).await;

        tracing::debug!("Answered from {}", answer.source);

        if self.json {
            let output = serde_json::json!({
                "question": question,
                "answer": answer.text,
                "source": answer.source,
                "notice": answer.notice,
                "remoteEnabled": remote,
                "provider": config.provider,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            if let Some(notice) = &answer.notice {
                eprintln!("warning: {}", notice);
            }
            println!("{}", answer.text);
        }

        Ok(())
    }

    /// Get the question text from the argument or a file.
    fn get_question(&self) -> AppResult<Option<String>> {
        if let Some(question) = &self.question {
            return Ok(Some(question.clone()));
        }

        match &self.file {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|e| {
                    AppError::Config(format!("Failed to read question file {:?}: {}", path, e))
                })?;
                Ok(Some(text.trim().to_string()))
            }
            None => Ok(None),
        }
    }
}
