//! Chat command handler.
//!
//! Reads questions from stdin, one per line, until EOF or `/quit`.

use crate::commands::session::build_responder;
use clap::Args;
use nivesh_advisor::{Conversation, Role, SUGGESTED_QUESTIONS};
use nivesh_core::{config::AppConfig, AppResult};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "Commands: /suggest lists suggested questions, /1../5 asks one, /probe rechecks the connection, /history prints the conversation, /quit exits.";

/// Interactive investment Q&A session
#[derive(Args, Debug)]
pub struct ChatCommand {
    /// Never call the remote fallback
    #[arg(long)]
    pub offline: bool,

    /// Check the remote service before the first question
    #[arg(long)]
    pub probe: bool,
}

impl ChatCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Starting chat session");

        let mut responder = build_responder(config, self.offline).await?;
        if self.probe {
            let state = responder.probe_connectivity().await;
            tracing::info!("Initial connectivity: {:?}", state);
        }

        let mut conversation = Conversation::new(responder);
        for message in conversation.messages() {
            println!("{}\n", message.text);
        }
        println!("{}\n", HELP);

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            print!("> ");
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            let line = line.trim();

            match line {
                "" => continue,
                "/quit" | "/exit" => break,
                "/help" => println!("{}\n", HELP),
                "/suggest" => {
                    for (i, q) in SUGGESTED_QUESTIONS.iter().enumerate() {
                        println!("  /{} {}", i + 1, q);
                    }
                    println!();
                }
                "/probe" => {
                    let state = conversation.responder_mut().probe_connectivity().await;
                    println!("Connectivity: {:?}\n", state);
                }
                "/history" => print_history(&conversation),
                _ => {
                    let answer = match suggestion_index(line) {
                        Some(index) => conversation.send_suggested(index).await,
                        None => conversation.send(line).await,
                    };
                    match answer {
                        Some(answer) => {
                            if let Some(notice) = &answer.notice {
                                eprintln!("warning: {}", notice);
                            }
                            println!("\n{}\n", answer.text);
                        }
                        None => println!("{}\n", HELP),
                    }
                }
            }
        }

        tracing::info!(
            "Chat ended after {} messages",
            conversation.messages().len()
        );
        Ok(())
    }
}

/// `/N` selects suggestion N (1-based).
fn suggestion_index(line: &str) -> Option<usize> {
    let n: usize = line.strip_prefix('/')?.parse().ok()?;
    n.checked_sub(1)
}

fn print_history(conversation: &Conversation) {
    for message in conversation.messages() {
        let who = match message.role {
            Role::User => "you",
            Role::Assistant if message.from_dataset => "nivesh (dataset)",
            Role::Assistant => "nivesh",
        };
        println!("[{}] {}\n", who, message.text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggestion_index() {
        assert_eq!(suggestion_index("/1"), Some(0));
        assert_eq!(suggestion_index("/5"), Some(4));
        assert_eq!(suggestion_index("/0"), None);
        assert_eq!(suggestion_index("/quit"), None);
        assert_eq!(suggestion_index("1"), None);
    }
}
