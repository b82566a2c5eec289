extern crate self as blackwood_domain;

pub mod content;
pub mod entities;
pub mod error;
pub mod ids;
pub mod timeline;
pub mod value_objects;

// Re-export all entities (explicit list in entities/mod.rs)
pub use entities::{
    Conversation, ConversationContext, GameState, Message, MessageSender, Suspect,
    MAX_MESSAGE_CHARS,
};

pub use content::CaseFile;

pub use error::DomainError;

// Re-export value objects
pub use value_objects::{
    EmotionalState, EmotionalTone, InvestigationProgress, TimeOfDay, TrustLevel,
};

// Re-export timeline/knowledge types
pub use timeline::{
    AvailabilityPolicy, BehavioralConstraints, CharacterConstraints, CharacterKnowledge,
    InformationSharing, InvestigationPhase, PhaseSchedule, TimelineEvent,
};

// Re-export ID types
pub use ids::{CharacterId, MessageId};
