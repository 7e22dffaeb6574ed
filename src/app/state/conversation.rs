//! Chat history

use crate::client::{AnswerSource, HeaderLayer};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use uuid::Uuid;

/// Author of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Typed by the user
    User,
    /// Returned by MAIRE (or the mock)
    Assistant,
}

/// A single chat message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Unique identifier
    pub id: Uuid,
    /// Author
    pub role: Role,
    /// Message text (the final response for assistant messages)
    pub content: String,
    /// When the message was added
    pub timestamp: DateTime<Utc>,
    /// Per-model responses behind an assistant answer
    pub header_stack: Option<Vec<HeaderLayer>>,
    /// How an assistant answer was produced
    pub source: Option<AnswerSource>,
}

impl Message {
    /// Whether this message has a non-empty trace to show
    #[must_use]
    pub fn has_trace(&self) -> bool {
        self.header_stack.as_ref().is_some_and(|s| !s.is_empty())
    }
}

/// Chronological list of messages plus per-message trace visibility
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<Message>,
    collapsed: HashSet<Uuid>,
}

impl Conversation {
    /// Create an empty conversation
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a user message and return its id
    pub fn push_user(&mut self, content: impl Into<String>) -> Uuid {
        self.push(Message {
            id: Uuid::new_v4(),
            role: Role::User,
            content: content.into(),
            timestamp: Utc::now(),
            header_stack: None,
            source: None,
        })
    }

    /// Append an assistant message and return its id
    pub fn push_assistant(
        &mut self,
        content: impl Into<String>,
        header_stack: Option<Vec<HeaderLayer>>,
        source: AnswerSource,
    ) -> Uuid {
        self.push(Message {
            id: Uuid::new_v4(),
            role: Role::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
            header_stack,
            source: Some(source),
        })
    }

    fn push(&mut self, message: Message) -> Uuid {
        let id = message.id;
        self.messages.push(message);
        id
    }

    /// All messages, oldest first
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Message at a position
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Message> {
        self.messages.get(index)
    }

    /// Most recent message
    #[must_use]
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Number of messages
    #[must_use]
    pub const fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether there are no messages
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Collapse or expand the trace of a message.
    ///
    /// Returns the new expanded state, or `None` if the message has no trace.
    pub fn toggle_trace(&mut self, id: Uuid) -> Option<bool> {
        let message = self.messages.iter().find(|m| m.id == id)?;
        if !message.has_trace() {
            return None;
        }
        if self.collapsed.remove(&id) {
            Some(true)
        } else {
            self.collapsed.insert(id);
            Some(false)
        }
    }

    /// Whether a message's trace is currently shown
    #[must_use]
    pub fn is_trace_expanded(&self, id: Uuid) -> bool {
        !self.collapsed.contains(&id)
    }
}
