//! Core protocol types for text generation
//!
//! A conversation is an ordered list of role-tagged messages. Providers turn a
//! conversation into a single [`GenerationResult`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a message in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Instructions that shape the model's behavior
    System,
    /// End-user input
    User,
    /// Earlier model output
    Assistant,
}

impl MessageRole {
    /// Wire name used by chat-completions style APIs
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single message of a conversation.
///
/// Messages are immutable once built; use the role constructors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    role: MessageRole,
    content: String,
}

impl ConversationMessage {
    /// Create a message with an explicit role
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    pub fn role(&self) -> MessageRole {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Builder for an ordered conversation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<ConversationMessage>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a system message
    pub fn with_system(mut self, content: impl Into<String>) -> Self {
        self.messages.push(ConversationMessage::system(content));
        self
    }

    /// Append a user message
    pub fn with_user(mut self, content: impl Into<String>) -> Self {
        self.messages.push(ConversationMessage::user(content));
        self
    }

    /// Append earlier turns, oldest first
    pub fn with_history<'a>(
        mut self,
        history: impl IntoIterator<Item = &'a ConversationMessage>,
    ) -> Self {
        self.messages.extend(history.into_iter().cloned());
        self
    }

    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Text produced by one provider for one conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    content: String,
    provider: String,
    model: String,
    generated_at: DateTime<Utc>,
}

impl GenerationResult {
    /// Create a result stamped with the current time
    pub fn new(
        content: impl Into<String>,
        provider: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self::at(content, provider, model, Utc::now())
    }

    /// Create a result with an explicit timestamp
    pub fn at(
        content: impl Into<String>,
        provider: impl Into<String>,
        model: impl Into<String>,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            content: content.into(),
            provider: provider.into(),
            model: model.into(),
            generated_at,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Name of the provider that served the request
    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    /// Consume the result and return the generated text
    pub fn into_content(self) -> String {
        self.content
    }
}
