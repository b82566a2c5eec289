//! Suspect emotional state tracking value objects
//!
//! - EmotionalState: the suspect's current interrogation stance; shifts as
//!   trust is gained or lost and colors how the prompt frames the character.
//! - EmotionalTone: an optional per-message tag describing how a single
//!   reply was delivered.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// A suspect's emotional stance during questioning.
///
/// This is a mutable overlay on top of the static persona: interrogation
/// pressure, accusations, and growing trust all move it. It is distinct from
/// the per-message [`EmotionalTone`], which only describes one reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmotionalState {
    /// Composed, giving nothing away
    #[default]
    Neutral,
    /// Guarded, deflecting questions
    Defensive,
    /// Openly hostile to the line of questioning
    Aggressive,
    /// Shaken, close to letting something slip
    Vulnerable,
    /// Steering the conversation for their own ends
    Manipulative,
}

impl EmotionalState {
    /// Get all emotional states for UI dropdowns
    pub fn all() -> &'static [EmotionalState] {
        &[
            EmotionalState::Neutral,
            EmotionalState::Defensive,
            EmotionalState::Aggressive,
            EmotionalState::Vulnerable,
            EmotionalState::Manipulative,
        ]
    }

    /// Get a display name for the state
    pub fn display_name(&self) -> &'static str {
        match self {
            EmotionalState::Neutral => "Neutral",
            EmotionalState::Defensive => "Defensive",
            EmotionalState::Aggressive => "Aggressive",
            EmotionalState::Vulnerable => "Vulnerable",
            EmotionalState::Manipulative => "Manipulative",
        }
    }

    /// How the prompt should describe this stance to the LLM.
    pub fn describe_for_llm(&self) -> &'static str {
        match self {
            EmotionalState::Neutral => "composed and measured, revealing little",
            EmotionalState::Defensive => "guarded, deflecting pointed questions",
            EmotionalState::Aggressive => "short-tempered and hostile to probing",
            EmotionalState::Vulnerable => "shaken, liable to let details slip",
            EmotionalState::Manipulative => "charming but steering the conversation",
        }
    }
}

impl fmt::Display for EmotionalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for EmotionalState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "neutral" => Ok(EmotionalState::Neutral),
            "defensive" => Ok(EmotionalState::Defensive),
            "aggressive" => Ok(EmotionalState::Aggressive),
            "vulnerable" => Ok(EmotionalState::Vulnerable),
            "manipulative" => Ok(EmotionalState::Manipulative),
            _ => Err(DomainError::parse(format!("Unknown emotional state: {s}"))),
        }
    }
}

/// Tone tag attached to a single message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmotionalTone {
    Calm,
    Irritated,
    Evasive,
    Distressed,
    Cold,
}

impl EmotionalTone {
    pub fn display_name(&self) -> &'static str {
        match self {
            EmotionalTone::Calm => "Calm",
            EmotionalTone::Irritated => "Irritated",
            EmotionalTone::Evasive => "Evasive",
            EmotionalTone::Distressed => "Distressed",
            EmotionalTone::Cold => "Cold",
        }
    }
}
