//! Chat data model for Rolechat.
//!
//! The persisted state is a single JSON document: an ordered list of
//! [`UserChatRecord`] objects, each holding one transcript per character.
//! Messages carry no id; identity for edit/delete purposes is the exact
//! `(role, content)` pair.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Role of a message within a transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" => Ok(MessageRole::System),
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A single conversation turn.
///
/// Equality is exact on both fields (no whitespace or case normalization);
/// the editor operations in `rolechat-core` rely on derived `PartialEq`
/// for match identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    /// Convenience constructor.
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}

/// Ordered message sequence for one character within one user's record.
///
/// By convention the first message is the single `system` message holding
/// the rendered persona. Messages are chronological; no operation ever
/// reorders them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterTranscript {
    pub messages: Vec<ChatMessage>,
}

impl CharacterTranscript {
    /// A transcript seeded with a single system message.
    pub fn with_system_message(content: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::system(content)],
        }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The system message, located by role (not by position).
    pub fn system_message(&self) -> Option<&ChatMessage> {
        self.messages
            .iter()
            .find(|m| m.role == MessageRole::System)
    }

    /// Mutable access to the system message, located by role.
    pub fn system_message_mut(&mut self) -> Option<&mut ChatMessage> {
        self.messages
            .iter_mut()
            .find(|m| m.role == MessageRole::System)
    }
}

/// All of one user's transcripts, keyed by character name.
///
/// The character map is flattened into the record object on disk, matching
/// the persisted layout:
/// `{"username": "ann", "Nova": [{"role": "system", ...}, ...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserChatRecord {
    pub username: String,
    #[serde(flatten)]
    pub characters: BTreeMap<String, CharacterTranscript>,
}

impl UserChatRecord {
    /// A fresh record with no transcripts.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            characters: BTreeMap::new(),
        }
    }

    pub fn transcript(&self, character_name: &str) -> Option<&CharacterTranscript> {
        self.characters.get(character_name)
    }

    pub fn transcript_mut(&mut self, character_name: &str) -> Option<&mut CharacterTranscript> {
        self.characters.get_mut(character_name)
    }
}

/// The whole persisted collection: an ordered list of user records.
///
/// `username` is the only uniqueness constraint. The collection is loaded,
/// mutated, and rewritten wholesale on every request, under the per-user
/// lock held by the chat service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatCollection {
    pub records: Vec<UserChatRecord>,
}

impl ChatCollection {
    /// Exact-match lookup by username.
    pub fn find_user(&self, username: &str) -> Option<&UserChatRecord> {
        self.records.iter().find(|r| r.username == username)
    }

    /// Mutable exact-match lookup by username.
    pub fn find_user_mut(&mut self, username: &str) -> Option<&mut UserChatRecord> {
        self.records.iter_mut().find(|r| r.username == username)
    }

    /// Return the existing record for `username`, or append and return a
    /// fresh one.
    pub fn upsert_user(&mut self, username: &str) -> &mut UserChatRecord {
        if let Some(idx) = self.records.iter().position(|r| r.username == username) {
            return &mut self.records[idx];
        }
        self.records.push(UserChatRecord::new(username));
        self.records
            .last_mut()
            .expect("record was just pushed")
    }

    /// Usernames in collection order.
    pub fn usernames(&self) -> Vec<String> {
        self.records.iter().map(|r| r.username.clone()).collect()
    }
}
