//! Chat session around a responder.

use crate::answer::Answer;
use crate::responder::Responder;
use serde::Serialize;

pub const GREETING: &str = "Namaste! I am Nivesh, your investment assistant. Ask me about SIPs, mutual funds, PPF, tax saving or financial rules of thumb.";

/// Shortcuts offered before the first question.
pub const SUGGESTED_QUESTIONS: [&str; 5] = [
    "What is an SIP and how does it work in India?",
    "What is the 50-30-20 Rule?",
    "How does LTCG tax work on equity investments in India?",
    "I want to invest for 2 years",
    "How much emergency fund should I keep?",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One turn of the conversation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
    /// Whether the answer came from the Q&A dataset
    pub from_dataset: bool,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            from_dataset: false,
        }
    }

    pub fn assistant(text: impl Into<String>, from_dataset: bool) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            from_dataset,
        }
    }
}

/// Append-only message history seeded with a greeting. Never persisted.
#[derive(Debug)]
pub struct Conversation {
    responder: Responder,
    messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new(responder: Responder) -> Self {
        Self {
            responder,
            messages: vec![ChatMessage::assistant(GREETING, false)],
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn responder_mut(&mut self) -> &mut Responder {
        &mut self.responder
    }

    /// Record the question, answer it and record the answer.
    ///
    /// Blank input is ignored and returns `None`.
    pub async fn send(&mut self, text: &str) -> Option<Answer> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        self.messages.push(ChatMessage::user(text));
        let answer = self.responder.respond_screened(text).await;
        self.messages
            .push(ChatMessage::assistant(answer.text.clone(), answer.is_from_dataset()));
        Some(answer)
    }

    /// Send one of [`SUGGESTED_QUESTIONS`] by index.
    pub async fn send_suggested(&mut self, index: usize) -> Option<Answer> {
        let question = SUGGESTED_QUESTIONS.get(index)?;
        self.send(question).await
    }
}
