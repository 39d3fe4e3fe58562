//! Shared chat data model and error taxonomy for the Genius crates.
//!
//! This crate provides the foundational types used across all other Genius crates:
//! - `ChatMessage` / `Role` — a single conversation turn
//! - `ConversationHistory` — the append-only, chronological message buffer
//! - `CompletionRequest` — the wire body sent to the completion endpoint
//! - `DispatchError`, `PromptError`, `SubmitError` — the error taxonomy

use std::borrow::Cow;

use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ChatMessage
// ---------------------------------------------------------------------------

/// A single turn exchanged with the completion service.
///
/// Fields are private so a message cannot change after it is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    role: Role,
    #[serde(default, deserialize_with = "null_as_empty")]
    content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            name: None,
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::new(Role::System, text)
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

// Replies sometimes carry `"content": null`; those render as nothing.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// ConversationHistory
// ---------------------------------------------------------------------------

/// Chronological (oldest first) list of messages exchanged in one session.
///
/// The buffer only grows: the sole mutation is [`push_exchange`], which
/// appends a user message and its reply together.
///
/// [`push_exchange`]: ConversationHistory::push_exchange
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationHistory {
    messages: Vec<ChatMessage>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Messages in transmission order.
    pub fn iter(&self) -> std::slice::Iter<'_, ChatMessage> {
        self.messages.iter()
    }

    /// Messages in display order: the most recent first.
    pub fn newest_first(&self) -> impl Iterator<Item = &ChatMessage> + '_ {
        self.messages.iter().rev()
    }

    /// The payload for the next request: everything so far plus `next`.
    /// Does not modify the history.
    pub fn outgoing_with(&self, next: &ChatMessage) -> Vec<ChatMessage> {
        let mut outgoing = Vec::with_capacity(self.messages.len() + 1);
        outgoing.extend(self.messages.iter().cloned());
        outgoing.push(next.clone());
        outgoing
    }

    pub fn push_exchange(&mut self, user: ChatMessage, reply: ChatMessage) {
        self.messages.reserve(2);
        self.messages.push(user);
        self.messages.push(reply);
    }
}

// ---------------------------------------------------------------------------
// Wire body
// ---------------------------------------------------------------------------

/// JSON body of `POST /api/code`: `{ "messages": [...] }`.
///
/// Clients serialize a borrowed slice; servers deserialize an owned
/// `CompletionRequest<'static>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRequest<'a> {
    pub messages: Cow<'a, [ChatMessage]>,
}

impl<'a> CompletionRequest<'a> {
    pub fn new(messages: impl Into<Cow<'a, [ChatMessage]>>) -> Self {
        Self {
            messages: messages.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a round trip to the completion service failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("Could not reach the completion service: {0}")]
    Network(String),

    #[error("Completion service returned HTTP {status}: {message}")]
    Server { status: u16, message: String },

    #[error("Completion service sent an unreadable reply: {0}")]
    MalformedResponse(String),

    #[error("Completion request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Could not encode the completion request: {0}")]
    InvalidRequest(String),
}

impl DispatchError {
    /// Returns `true` if the same request may succeed when sent again.
    pub fn is_retryable(&self) -> bool {
        match self {
            DispatchError::Network(_) | DispatchError::Timeout { .. } => true,
            DispatchError::Server { status, .. } => *status == 429 || *status >= 500,
            DispatchError::MalformedResponse(_) | DispatchError::InvalidRequest(_) => false,
        }
    }

    /// Maps the error to the status a relaying server should answer with.
    pub fn http_status(&self) -> u16 {
        match self {
            DispatchError::Server { status, .. } => *status,
            DispatchError::Timeout { .. } => 504,
            DispatchError::InvalidRequest(_) => 400,
            DispatchError::Network(_) | DispatchError::MalformedResponse(_) => 502,
        }
    }
}

/// Maximum prompt length accepted by the form.
pub const MAX_PROMPT_CHARS: usize = 8_000;

/// Form validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PromptError {
    #[error("Prompt is required.")]
    Required,

    #[error("Prompt is too long ({actual} characters, at most {max}).")]
    TooLong { max: usize, actual: usize },
}

/// Reasons a submission was refused before anything was sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] PromptError),

    #[error("A request is already in flight")]
    Busy,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
