//! Suspect entity - one of the case's interrogation subjects.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::ids::CharacterId;
use crate::value_objects::{EmotionalState, TrustLevel};

/// An interrogation subject: static persona plus a mutable overlay.
///
/// The persona fields (name, traits, backstory, secrets, relationships,
/// response patterns) are authored once in the content tables and never
/// change at runtime. The overlay - emotional state, trust, revealed
/// secrets - moves after each successful exchange and is cleared only by a
/// full game reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suspect {
    pub id: CharacterId,
    /// Full display name, e.g. "James Blackwood".
    pub name: String,
    /// Role in the household, e.g. "The Victim's Brother".
    pub role: String,
    /// Short personality descriptors fed into the persona prompt.
    pub personality: Vec<String>,
    pub backstory: String,
    /// Facts this suspect holds independent of the timeline events.
    pub knowledge_base: Vec<String>,
    /// Things the suspect is hiding. Keys into `revealed_secrets`.
    pub secrets: Vec<String>,
    /// How this suspect regards the others, keyed by suspect ID.
    pub relationships: HashMap<CharacterId, String>,
    /// Example lines showing the suspect's register and cadence.
    pub response_patterns: Vec<String>,

    // Mutable overlay
    #[serde(default)]
    pub emotional_state: EmotionalState,
    #[serde(default)]
    pub trust_level: TrustLevel,
    #[serde(default)]
    pub revealed_secrets: BTreeSet<String>,
}

impl Suspect {
    /// Mark a secret as revealed. Returns false if it was already out.
    pub fn reveal_secret(&mut self, secret: impl Into<String>) -> bool {
        self.revealed_secrets.insert(secret.into())
    }

    /// Clear the mutable overlay back to its initial values.
    pub fn reset_overlay(&mut self) {
        self.emotional_state = EmotionalState::default();
        self.trust_level = TrustLevel::INITIAL;
        self.revealed_secrets.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Suspect {
        Suspect {
            id: CharacterId::new("thomas-reed"),
            name: "Thomas Reed".into(),
            role: "The Butler".into(),
            personality: vec!["discreet".into()],
            backstory: "Thirty years of service.".into(),
            knowledge_base: vec![],
            secrets: vec!["saw-figure-on-stair".into()],
            relationships: HashMap::new(),
            response_patterns: vec![],
            emotional_state: EmotionalState::default(),
            trust_level: TrustLevel::INITIAL,
            revealed_secrets: BTreeSet::new(),
        }
    }

    #[test]
    fn test_reveal_secret_once() {
        let mut suspect = sample();
        assert!(suspect.reveal_secret("saw-figure-on-stair"));
        assert!(!suspect.reveal_secret("saw-figure-on-stair"));
    }

    #[test]
    fn test_reset_overlay() {
        let mut suspect = sample();
        suspect.trust_level = TrustLevel::new(80);
        suspect.emotional_state = EmotionalState::Vulnerable;
        suspect.reveal_secret("saw-figure-on-stair");

        suspect.reset_overlay();

        assert_eq!(suspect.trust_level, TrustLevel::INITIAL);
        assert_eq!(suspect.emotional_state, EmotionalState::Neutral);
        assert!(suspect.revealed_secrets.is_empty());
    }
}
