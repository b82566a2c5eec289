//! Per-suspect knowledge and behavior constraints.
//!
//! Forbidden topics and forbidden knowledge are matched case-insensitively
//! as substrings against generated replies, so entries are phrased the way
//! they would actually surface in dialogue.

use crate::ids::CharacterId;
use crate::timeline::{BehavioralConstraints, CharacterConstraints, InformationSharing};
use crate::value_objects::{EmotionalState, TrustLevel};

fn entry(
    id: &str,
    forbidden_topics: &[&str],
    max_trust: u8,
    available_information: &[&str],
    emotional_state: EmotionalState,
    response_style: &str,
    information_sharing: InformationSharing,
    current_knowledge: &[&str],
    forbidden_knowledge: &[&str],
) -> CharacterConstraints {
    CharacterConstraints {
        character_id: CharacterId::new(id),
        forbidden_topics: forbidden_topics.iter().map(|s| s.to_string()).collect(),
        max_trust: TrustLevel::new(max_trust),
        available_information: available_information
            .iter()
            .map(|s| s.to_string())
            .collect(),
        behavioral: BehavioralConstraints {
            emotional_state,
            response_style: response_style.into(),
            information_sharing,
        },
        current_knowledge: current_knowledge.iter().map(|s| s.to_string()).collect(),
        forbidden_knowledge: forbidden_knowledge.iter().map(|s| s.to_string()).collect(),
    }
}

/// The authored constraint tables, one per suspect.
pub fn constraints() -> Vec<CharacterConstraints> {
    vec![
        entry(
            "james-blackwood",
            &["second ledger", "embezzlement", "argentine", "three thousand pounds"],
            85,
            &[
                "the shipping business in general terms",
                "his movements before eight o'clock",
                "family history and the brothers' partnership",
                "dinner and the household's mood",
            ],
            EmotionalState::Defensive,
            "curt, proud, quick to take offence",
            InformationSharing::Evasive,
            &["the quarrel in the study", "the firm's accounts"],
            &["shortfall in the accounts", "borrowed from the firm"],
        ),
        entry(
            "victoria-blackwood",
            &["paris", "unsigned letters", "leaving her husband"],
            80,
            &[
                "the household and its routines",
                "finding the body",
                "Edmund's habits and acquaintances",
                "the study and who had the keys",
            ],
            EmotionalState::Neutral,
            "polished, deliberate, cool",
            InformationSharing::Guarded,
            &["the discovery of the body", "the forced drawer"],
            &["letters in her writing desk", "a life abroad"],
        ),
        entry(
            "thomas-reed",
            &["figure on the stair", "moved the glass", "straightened the tray"],
            90,
            &[
                "the evening's comings and goings",
                "the brandy tray and the study routine",
                "thirty years of household history",
                "the servants and their duties",
            ],
            EmotionalState::Neutral,
            "formal, measured, deferential",
            InformationSharing::Guarded,
            &["the brandy tray", "the quarrel overheard", "the discovery"],
            &["tidied the study", "someone on the servants' stair"],
        ),
        entry(
            "margaret-holloway",
            &["digitalis", "terminal", "months to live", "dispensary shortfall"],
            75,
            &[
                "the pronouncement of death in general terms",
                "the household's health, discreetly",
                "her arrival and movements that evening",
                "what any physician might observe of the scene",
            ],
            EmotionalState::Neutral,
            "dry, clinical, exact",
            InformationSharing::Evasive,
            &["the examination of the body", "Edmund's consultations"],
            &["his heart was failing", "a missing measure"],
        ),
        entry(
            "sophia-crane",
            &["gambling", "cards", "hundred and forty pounds", "debts in london"],
            95,
            &[
                "the household's moods and small dramas",
                "her evening before nine o'clock",
                "what she thinks of each of the others",
                "London, vaguely",
            ],
            EmotionalState::Vulnerable,
            "quick, nervous, darting",
            InformationSharing::Guarded,
            &["her visit to the study", "what she heard through the door"],
            &["asked him for money", "what she owes"],
        ),
    ]
}
