//! Global game state aggregate.

use serde::{Deserialize, Serialize};

use crate::ids::CharacterId;
use crate::value_objects::{InvestigationProgress, TimeOfDay};

/// The single global investigation record.
///
/// Everything the detective has gathered lives here: evidence, notes,
/// interviewed suspects, discovered secrets, and the overall progress
/// percentage that drives narrative phasing. There is exactly one instance;
/// it is cleared entirely by a full reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub progress: InvestigationProgress,
    pub evidence: Vec<String>,
    pub suspects_interviewed: Vec<CharacterId>,
    pub discovered_secrets: Vec<String>,
    pub notes: Vec<String>,
    pub game_started: bool,
    pub case_solved: bool,
    /// Drawn at random from the roster when the game starts; `None` until
    /// then and after a reset.
    pub true_killer: Option<CharacterId>,
    pub current_location: String,
    pub time_of_day: TimeOfDay,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            progress: InvestigationProgress::default(),
            evidence: Vec::new(),
            suspects_interviewed: Vec::new(),
            discovered_secrets: Vec::new(),
            notes: Vec::new(),
            game_started: false,
            case_solved: false,
            true_killer: None,
            current_location: "The Study".to_string(),
            time_of_day: TimeOfDay::Evening,
        }
    }
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the game as started with the given culprit, if not already
    /// running. Returns whether this call actually started the game.
    pub fn start(&mut self, killer: CharacterId) -> bool {
        if self.game_started {
            return false;
        }
        self.game_started = true;
        self.true_killer = Some(killer);
        true
    }

    /// Record a piece of evidence. Duplicates are ignored.
    pub fn record_evidence(&mut self, evidence: impl Into<String>) {
        let evidence = evidence.into();
        if !self.evidence.contains(&evidence) {
            self.evidence.push(evidence);
        }
    }

    /// Record that a suspect has been interviewed. Returns true on first
    /// interview.
    pub fn record_suspect(&mut self, id: CharacterId) -> bool {
        if self.suspects_interviewed.contains(&id) {
            return false;
        }
        self.suspects_interviewed.push(id);
        true
    }

    pub fn discover_secret(&mut self, secret: impl Into<String>) {
        let secret = secret.into();
        if !self.discovered_secrets.contains(&secret) {
            self.discovered_secrets.push(secret);
        }
    }

    pub fn add_note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    /// Advance progress by a percentage. Monotonic; clamps at 100.
    pub fn advance_progress(&mut self, percent: u8) {
        self.progress = self.progress.advance(percent);
    }

    /// Accuse a suspect. Returns whether the accusation was correct; a
    /// correct accusation solves the case. `None` before the game starts.
    pub fn accuse(&mut self, accused: &CharacterId) -> Option<bool> {
        let killer = self.true_killer.as_ref()?;
        let correct = killer == accused;
        if correct {
            self.case_solved = true;
        }
        Some(correct)
    }

    /// Update the narrative framing for the current phase.
    pub fn set_scene(&mut self, location: impl Into<String>, time_of_day: TimeOfDay) {
        self.current_location = location.into();
        self.time_of_day = time_of_day;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_only_once() {
        let mut state = GameState::new();
        assert!(state.start(CharacterId::new("james-blackwood")));
        assert!(!state.start(CharacterId::new("thomas-reed")));
        assert_eq!(state.true_killer, Some(CharacterId::new("james-blackwood")));
    }

    #[test]
    fn test_progress_is_monotonic_and_clamped() {
        let mut state = GameState::new();
        state.advance_progress(60);
        state.advance_progress(60);
        assert_eq!(state.progress.percent(), 100);
    }

    #[test]
    fn test_record_suspect_deduplicates() {
        let mut state = GameState::new();
        let id = CharacterId::new("margaret-holloway");
        assert!(state.record_suspect(id.clone()));
        assert!(!state.record_suspect(id));
        assert_eq!(state.suspects_interviewed.len(), 1);
    }

    #[test]
    fn test_accusation_solves_only_on_the_true_killer() {
        let mut state = GameState::new();
        assert_eq!(state.accuse(&CharacterId::new("thomas-reed")), None);

        state.start(CharacterId::new("sophia-crane"));
        assert_eq!(state.accuse(&CharacterId::new("thomas-reed")), Some(false));
        assert!(!state.case_solved);

        assert_eq!(state.accuse(&CharacterId::new("sophia-crane")), Some(true));
        assert!(state.case_solved);
    }

    #[test]
    fn test_record_evidence_deduplicates() {
        let mut state = GameState::new();
        state.record_evidence("A smell of bitter almonds about the glass");
        state.record_evidence("A smell of bitter almonds about the glass");
        assert_eq!(state.evidence.len(), 1);
    }
}
