//! Timeline and knowledge model types.
//!
//! The murder night is described as a static set of [`TimelineEvent`]s, each
//! carrying a per-suspect knowledge map that says whether the suspect knows
//! of the event, witnessed it, may speak about it, and how much trust that
//! costs. Layered on top:
//!
//! - [`InvestigationPhase`] / [`PhaseSchedule`]: narrative framing driven by
//!   the global progress percentage.
//! - [`CharacterConstraints`]: per-suspect limits on what may ever be said,
//!   regardless of trust.
//!
//! All of these are read-only at runtime; the engine's context builder and
//! response validator are pure functions over them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::CharacterId;
use crate::value_objects::{EmotionalState, InvestigationProgress, TimeOfDay, TrustLevel};

/// What one suspect knows about one timeline event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CharacterKnowledge {
    /// The suspect is aware the event happened.
    pub knows_about: bool,
    /// The suspect saw it first-hand.
    pub witnessed: bool,
    /// The suspect may be coaxed into talking about it at all.
    pub can_reveal: bool,
    /// Minimum trust before the suspect will bring it up.
    pub trust_required: TrustLevel,
}

impl CharacterKnowledge {
    /// Knowledge entry for a suspect who will talk once trust is earned.
    pub fn revealable(witnessed: bool, trust_required: u8) -> Self {
        Self {
            knows_about: true,
            witnessed,
            can_reveal: true,
            trust_required: TrustLevel::new(trust_required),
        }
    }

    /// Knowledge entry for a suspect who knows but will never volunteer it.
    pub fn sealed(witnessed: bool) -> Self {
        Self {
            knows_about: true,
            witnessed,
            can_reveal: false,
            trust_required: TrustLevel::MAX,
        }
    }
}

/// A static fact about the murder night.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub id: String,
    /// Clock label shown in prompts, e.g. "8:30 PM".
    pub time_label: String,
    pub location: String,
    pub participants: Vec<CharacterId>,
    pub description: String,
    /// Tags naming the physical evidence this event can surface.
    pub evidence_tags: Vec<String>,
    /// Tags naming the secrets this event brushes against.
    pub secret_tags: Vec<String>,
    /// Per-suspect visibility and trust gate.
    pub knowledge: HashMap<CharacterId, CharacterKnowledge>,
}

impl TimelineEvent {
    pub fn knowledge_for(&self, id: &CharacterId) -> Option<&CharacterKnowledge> {
        self.knowledge.get(id)
    }

    /// Whether this suspect may speak about the event at the given trust.
    pub fn revealable_by(&self, id: &CharacterId, trust: TrustLevel) -> bool {
        self.knowledge_for(id)
            .map(|k| k.can_reveal && trust.meets(k.trust_required))
            .unwrap_or(false)
    }
}

/// One stage of the investigation's narrative arc.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestigationPhase {
    pub id: String,
    pub name: String,
    /// In-fiction clock span, e.g. "9:30 PM - 11:00 PM".
    pub time_window: String,
    /// Progress percentage at which this phase begins.
    pub required_progress: InvestigationProgress,
    /// Suspects reachable during this phase under the phase-gated policy.
    pub available_characters: Vec<CharacterId>,
    pub available_locations: Vec<String>,
    /// Primary framing location for prompts.
    pub location: String,
    pub time_of_day: TimeOfDay,
}

/// The ordered list of phases, selected by progress percentage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseSchedule {
    phases: Vec<InvestigationPhase>,
}

impl PhaseSchedule {
    /// Build a schedule. Phases must start at 0% and carry strictly
    /// increasing thresholds.
    pub fn new(phases: Vec<InvestigationPhase>) -> Result<Self, DomainError> {
        let first = phases
            .first()
            .ok_or_else(|| DomainError::validation("phase schedule cannot be empty"))?;
        if first.required_progress.percent() != 0 {
            return Err(DomainError::validation(
                "first phase must begin at 0% progress",
            ));
        }
        for pair in phases.windows(2) {
            if pair[1].required_progress <= pair[0].required_progress {
                return Err(DomainError::validation(format!(
                    "phase thresholds must increase: {} then {}",
                    pair[0].required_progress, pair[1].required_progress
                )));
            }
        }
        Ok(Self { phases })
    }

    /// The phase whose threshold is the greatest value at or below the
    /// current progress.
    pub fn phase_for(&self, progress: InvestigationProgress) -> &InvestigationPhase {
        self.phases
            .iter()
            .rev()
            .find(|phase| progress >= phase.required_progress)
            .unwrap_or(&self.phases[0])
    }

    pub fn phases(&self) -> &[InvestigationPhase] {
        &self.phases
    }
}

/// Which suspects may be selected at a given point in the investigation.
///
/// The observed product behavior is that every suspect is always reachable,
/// while the phase model's availability lists sit unused beside it. Both
/// behaviors are kept, switchable in engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityPolicy {
    /// Every suspect is always selectable.
    #[default]
    AllAvailable,
    /// Only suspects listed by the current phase are selectable.
    PhaseGated,
}

impl AvailabilityPolicy {
    pub fn is_available(
        &self,
        schedule: &PhaseSchedule,
        progress: InvestigationProgress,
        id: &CharacterId,
    ) -> bool {
        match self {
            AvailabilityPolicy::AllAvailable => true,
            AvailabilityPolicy::PhaseGated => schedule
                .phase_for(progress)
                .available_characters
                .contains(id),
        }
    }
}

impl std::str::FromStr for AvailabilityPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" | "all_available" => Ok(AvailabilityPolicy::AllAvailable),
            "phase" | "phase_gated" => Ok(AvailabilityPolicy::PhaseGated),
            _ => Err(DomainError::parse(format!(
                "Unknown availability policy: {s}"
            ))),
        }
    }
}

/// How freely a suspect parts with information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InformationSharing {
    Open,
    Guarded,
    Evasive,
    Obstructive,
}

impl InformationSharing {
    pub fn describe_for_llm(&self) -> &'static str {
        match self {
            InformationSharing::Open => "answers willingly once trust is established",
            InformationSharing::Guarded => "shares only what is asked, nothing more",
            InformationSharing::Evasive => "deflects and answers around the question",
            InformationSharing::Obstructive => "resists questioning and concedes nothing freely",
        }
    }
}

/// Behavioral framing for a suspect's replies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehavioralConstraints {
    pub emotional_state: EmotionalState,
    /// Voice direction for the prompt, e.g. "clipped, formal, precise".
    pub response_style: String,
    pub information_sharing: InformationSharing,
}

/// Hard limits on what a suspect may ever say.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterConstraints {
    pub character_id: CharacterId,
    /// Topics this suspect must never reveal, regardless of trust.
    pub forbidden_topics: Vec<String>,
    /// Trust ceiling for this suspect.
    pub max_trust: TrustLevel,
    /// Information the suspect is permitted to volunteer.
    pub available_information: Vec<String>,
    pub behavioral: BehavioralConstraints,
    /// Knowledge keys the suspect currently holds.
    pub current_knowledge: Vec<String>,
    /// Knowledge keys that must never surface in a reply.
    pub forbidden_knowledge: Vec<String>,
}
