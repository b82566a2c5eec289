//! Message entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{CharacterId, MessageId};
use crate::value_objects::EmotionalTone;

/// Maximum user message length, in characters. Enforced by the pipeline
/// before anything else touches the text.
pub const MAX_MESSAGE_CHARS: usize = 500;

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageSender {
    /// The detective (the player).
    User,
    /// The suspect being questioned.
    Character,
    /// Neutral narration, e.g. "James Blackwood refuses to continue."
    System,
}

/// A single entry in a conversation. Immutable once created.
///
/// Timestamps come from the engine's clock port, not from `Utc::now()` here,
/// so that cooldown and ordering tests can run against a fixed clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    /// The conversation this message belongs to.
    pub character_id: CharacterId,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub sender: MessageSender,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotional_tone: Option<EmotionalTone>,
}

impl Message {
    pub fn user(character_id: CharacterId, content: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self::new(character_id, content, at, MessageSender::User)
    }

    pub fn character(
        character_id: CharacterId,
        content: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self::new(character_id, content, at, MessageSender::Character)
    }

    pub fn system(character_id: CharacterId, content: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self::new(character_id, content, at, MessageSender::System)
    }

    fn new(
        character_id: CharacterId,
        content: impl Into<String>,
        at: DateTime<Utc>,
        sender: MessageSender,
    ) -> Self {
        Self {
            id: MessageId::new(),
            character_id,
            content: content.into(),
            timestamp: at,
            sender,
            emotional_tone: None,
        }
    }

    pub fn with_tone(mut self, tone: EmotionalTone) -> Self {
        self.emotional_tone = Some(tone);
        self
    }
}
