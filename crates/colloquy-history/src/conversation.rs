//! Transcript types: role-tagged messages grouped into titled conversations.
//!
//! A [`Conversation`] is what the application persists and lists; its
//! [`Conversation::turns`] view is what the streaming client sends upstream.
//! Message order is conversation order and is preserved exactly.

use chrono::{DateTime, Utc};
use colloquy_core::generic::{GenericMessage, GenericRole};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Longest derived conversation title, in characters.
const TITLE_MAX_CHARS: usize = 40;
/// Number of leading words a derived title keeps.
const TITLE_MAX_WORDS: usize = 4;
/// Title used when no message text is available to derive one from.
pub const DEFAULT_TITLE: &str = "New chat";

/// Originator of a single message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Assistant,
}

impl From<Sender> for GenericRole {
    fn from(value: Sender) -> Self {
        match value {
            Sender::User => GenericRole::User,
            Sender::Assistant => GenericRole::Assistant,
        }
    }
}

/// One stored message of a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    /// Logical model name the reply was produced with, if any.
    pub model: Option<String>,
}

impl ChatMessage {
    pub fn new(text: impl Into<String>, sender: Sender, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            sender,
            timestamp,
            model: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

/// A titled, timestamped transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: Uuid,
    pub title: String,
    pub messages: Vec<ChatMessage>,
    pub created_at: DateTime<Utc>,
}

impl Conversation {
    /// Start an empty conversation with the default title.
    pub fn new(created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: DEFAULT_TITLE.to_owned(),
            messages: Vec::new(),
            created_at,
        }
    }

    /// Append a message.  The first user message also titles the
    /// conversation.
    pub fn push(&mut self, message: ChatMessage) {
        if self.messages.is_empty() && message.sender == Sender::User {
            self.title = derive_title(&message.text);
        }
        self.messages.push(message);
    }

    /// The transcript as ordered request-payload messages.
    pub fn turns(&self) -> Vec<GenericMessage> {
        self.messages
            .iter()
            .map(|message| GenericMessage::new(message.text.clone(), message.sender.into()))
            .collect()
    }
}

/// Derive a conversation title from its first message: the leading words,
/// truncated on a character boundary with an ellipsis when the source text
/// runs long.
pub fn derive_title(text: &str) -> String {
    let words: Vec<&str> = text.split_whitespace().take(TITLE_MAX_WORDS).collect();
    let mut title = words.join(" ");

    if text.chars().count() > TITLE_MAX_CHARS {
        title = title.chars().take(TITLE_MAX_CHARS).collect::<String>() + "...";
    }

    if title.is_empty() {
        DEFAULT_TITLE.to_owned()
    } else {
        title
    }
}
