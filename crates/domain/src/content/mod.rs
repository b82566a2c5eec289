//! Static case content: the Blackwood Manor murder.
//!
//! Everything here is authored data, read-only at runtime. The engine loads
//! one [`CaseFile`] at startup and treats it the way it treats any other
//! configuration: consumed, never mutated.

pub mod constraints;
pub mod events;
pub mod phases;
pub mod roster;

use std::collections::HashMap;

use crate::entities::Suspect;
use crate::ids::CharacterId;
use crate::timeline::{CharacterConstraints, PhaseSchedule, TimelineEvent};

/// The full authored case, bundled for the engine.
#[derive(Debug, Clone)]
pub struct CaseFile {
    suspects: HashMap<CharacterId, Suspect>,
    events: Vec<TimelineEvent>,
    constraints: HashMap<CharacterId, CharacterConstraints>,
    schedule: PhaseSchedule,
}

impl CaseFile {
    /// Load the authored content tables.
    pub fn load() -> Self {
        let suspects = roster::roster()
            .into_iter()
            .map(|s| (s.id.clone(), s))
            .collect();
        let constraints = constraints::constraints()
            .into_iter()
            .map(|c| (c.character_id.clone(), c))
            .collect();
        Self {
            suspects,
            events: events::murder_night(),
            constraints,
            schedule: phases::schedule(),
        }
    }

    pub fn suspect(&self, id: &CharacterId) -> Option<&Suspect> {
        self.suspects.get(id)
    }

    pub fn suspects(&self) -> impl Iterator<Item = &Suspect> {
        self.suspects.values()
    }

    /// Roster IDs in stable (sorted) order, so that injected randomness
    /// draws deterministically in tests.
    pub fn character_ids(&self) -> Vec<CharacterId> {
        let mut ids: Vec<_> = self.suspects.keys().cloned().collect();
        ids.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        ids
    }

    pub fn events(&self) -> &[TimelineEvent] {
        &self.events
    }

    pub fn constraints_for(&self, id: &CharacterId) -> Option<&CharacterConstraints> {
        self.constraints.get(id)
    }

    pub fn schedule(&self) -> &PhaseSchedule {
        &self.schedule
    }
}

impl Default for CaseFile {
    fn default() -> Self {
        Self::load()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_file_is_internally_consistent() {
        let case = CaseFile::load();

        // Every suspect has a constraint table.
        for suspect in case.suspects() {
            assert!(
                case.constraints_for(&suspect.id).is_some(),
                "missing constraints for {}",
                suspect.id
            );
        }

        // Every knowledge entry and participant refers to a real suspect.
        for event in case.events() {
            for id in event.knowledge.keys() {
                assert!(case.suspect(id).is_some(), "unknown suspect {id} in {}", event.id);
            }
            for id in &event.participants {
                assert!(
                    case.suspect(id).is_some(),
                    "unknown participant {id} in {}",
                    event.id
                );
            }
        }

        // Phase availability lists stay inside the roster.
        for phase in case.schedule().phases() {
            for id in &phase.available_characters {
                assert!(case.suspect(id).is_some(), "unknown suspect {id} in {}", phase.id);
            }
        }

        assert_eq!(case.character_ids().len(), 5);
    }
}
