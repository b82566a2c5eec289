//! Conversation entity - one per suspect the detective has questioned.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::message::Message;
use crate::ids::CharacterId;
use crate::value_objects::TrustLevel;

/// Rolling conversational context kept alongside the transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationContext {
    /// Most recent topic of questioning, if one has been established.
    pub current_topic: Option<String>,
    /// Number of completed exchanges.
    pub depth: u32,
    pub trust_level: TrustLevel,
    pub last_interaction: Option<DateTime<Utc>>,
}

impl Default for ConversationContext {
    fn default() -> Self {
        Self {
            current_topic: None,
            depth: 0,
            trust_level: TrustLevel::INITIAL,
            last_interaction: None,
        }
    }
}

/// An append-only transcript with a suspect plus its rolling context.
///
/// Created lazily the first time a suspect is selected; never deleted except
/// by a full game reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub character_id: CharacterId,
    /// Chronological, append-only.
    pub messages: Vec<Message>,
    pub context: ConversationContext,
    /// Per-conversation investigation/relationship score.
    pub relationship_score: i32,
    pub started_at: DateTime<Utc>,
    pub last_message_at: Option<DateTime<Utc>>,
}

impl Conversation {
    pub fn new(character_id: CharacterId, at: DateTime<Utc>) -> Self {
        Self {
            character_id,
            messages: Vec::new(),
            context: ConversationContext::default(),
            relationship_score: 0,
            started_at: at,
            last_message_at: None,
        }
    }

    /// Append a message and bump the last-message timestamp.
    pub fn push_message(&mut self, message: Message) {
        self.last_message_at = Some(message.timestamp);
        self.messages.push(message);
    }

    /// The most recent `limit` messages, oldest first.
    pub fn recent_messages(&self, limit: usize) -> &[Message] {
        let start = self.messages.len().saturating_sub(limit);
        &self.messages[start..]
    }
}
