//! Process-wide conversation and game-state store.
//!
//! Owns every piece of mutable investigation state: the per-suspect
//! transcripts, the global [`GameState`], the current selection, and the
//! per-suspect generation ("typing") flags. All writes funnel through the
//! use cases, which keeps the single-writer discipline without any locking
//! beyond the collections' own.
//!
//! Mutations persist through the snapshot port as they land. A failed save
//! is logged and play continues; durability is best-effort, correctness of
//! the in-memory state is not.

use std::sync::{Arc, RwLock};

use dashmap::DashMap;

use blackwood_domain::{
    CharacterId, Conversation, GameState, Message, TrustLevel,
};

use crate::infrastructure::ports::{ClockPort, SnapshotPort, StateSnapshot};

pub struct ConversationStore {
    clock: Arc<dyn ClockPort>,
    snapshot: Arc<dyn SnapshotPort>,
    conversations: DashMap<CharacterId, Conversation>,
    game_state: RwLock<GameState>,
    current_character: RwLock<Option<CharacterId>>,
    generating: DashMap<CharacterId, bool>,
}

impl ConversationStore {
    /// Create the store, rehydrating any previous session from the snapshot.
    pub fn new(clock: Arc<dyn ClockPort>, snapshot: Arc<dyn SnapshotPort>) -> Self {
        let store = Self {
            clock,
            snapshot,
            conversations: DashMap::new(),
            game_state: RwLock::new(GameState::default()),
            current_character: RwLock::new(None),
            generating: DashMap::new(),
        };

        match store.snapshot.load() {
            Ok(Some(saved)) => {
                tracing::info!(
                    conversations = saved.conversations.len(),
                    progress = %saved.game_state.progress,
                    "restored previous session"
                );
                for conversation in saved.conversations {
                    store
                        .conversations
                        .insert(conversation.character_id.clone(), conversation);
                }
                *store.game_state.write().unwrap_or_else(|e| e.into_inner()) = saved.game_state;
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "could not restore previous session"),
        }

        store
    }

    // =========================================================================
    // Selection and conversations
    // =========================================================================

    /// Select a suspect, lazily creating their conversation.
    ///
    /// Returns the conversation and whether this was the first interview.
    pub fn select_character(&self, id: &CharacterId, name: &str) -> (Conversation, bool) {
        let now = self.clock.now();
        let conversation = self
            .conversations
            .entry(id.clone())
            .or_insert_with(|| Conversation::new(id.clone(), now))
            .clone();

        *self
            .current_character
            .write()
            .unwrap_or_else(|e| e.into_inner()) = Some(id.clone());

        let first_interview = {
            let mut state = self.game_state.write().unwrap_or_else(|e| e.into_inner());
            let first = state.record_suspect(id.clone());
            if first {
                state.add_note(format!("Began questioning {name}."));
            } else {
                state.add_note(format!("Returned to question {name} further."));
            }
            first
        };

        self.persist();
        (conversation, first_interview)
    }

    pub fn current_character(&self) -> Option<CharacterId> {
        self.current_character
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn conversation(&self, id: &CharacterId) -> Option<Conversation> {
        self.conversations.get(id).map(|c| c.clone())
    }

    /// Append a message to its conversation. The conversation must exist;
    /// selection creates it.
    pub fn append_message(&self, message: Message) {
        let id = message.character_id.clone();
        let now = self.clock.now();
        let mut conversation = self
            .conversations
            .entry(id.clone())
            .or_insert_with(|| Conversation::new(id, now));
        conversation.push_message(message);
        drop(conversation);
        self.persist();
    }

    /// Merge trust/depth/last-interaction into a conversation's context.
    pub fn update_memory(&self, id: &CharacterId, trust: TrustLevel, depth_increment: u32) {
        if let Some(mut conversation) = self.conversations.get_mut(id) {
            conversation.context.trust_level = trust;
            conversation.context.depth += depth_increment;
            conversation.context.last_interaction = Some(self.clock.now());
        }
        self.persist();
    }

    pub fn set_topic(&self, id: &CharacterId, topic: impl Into<String>) {
        if let Some(mut conversation) = self.conversations.get_mut(id) {
            conversation.context.current_topic = Some(topic.into());
        }
    }

    pub fn trust_level(&self, id: &CharacterId) -> TrustLevel {
        self.conversations
            .get(id)
            .map(|c| c.context.trust_level)
            .unwrap_or(TrustLevel::INITIAL)
    }

    pub fn set_relationship_score(&self, id: &CharacterId, score: i32) {
        if let Some(mut conversation) = self.conversations.get_mut(id) {
            conversation.relationship_score = score;
        }
        self.persist();
    }

    // =========================================================================
    // Game state
    // =========================================================================

    pub fn game_state(&self) -> GameState {
        self.game_state
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Start the game if it has not started, drawing the culprit with the
    /// given picker. Returns true when this call started the game.
    pub fn start_game_if_needed<F>(&self, roster: &[CharacterId], pick: F) -> bool
    where
        F: FnOnce(&[CharacterId]) -> CharacterId,
    {
        let mut state = self.game_state.write().unwrap_or_else(|e| e.into_inner());
        if state.game_started || roster.is_empty() {
            return false;
        }
        let killer = pick(roster);
        let started = state.start(killer);
        drop(state);
        if started {
            self.persist();
        }
        started
    }

    pub fn record_evidence(&self, evidence: impl Into<String>) {
        self.game_state
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .record_evidence(evidence);
        self.persist();
    }

    pub fn add_note(&self, note: impl Into<String>) {
        self.game_state
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .add_note(note);
        self.persist();
    }

    pub fn discover_secret(&self, secret: impl Into<String>) {
        self.game_state
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .discover_secret(secret);
        self.persist();
    }

    /// Accuse a suspect of the murder. `None` before the game starts.
    pub fn accuse(&self, accused: &CharacterId) -> Option<bool> {
        let result = self
            .game_state
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .accuse(accused);
        if result.is_some() {
            self.persist();
        }
        result
    }

    /// Advance progress and refresh the scene framing from the schedule.
    pub fn advance_progress(&self, percent: u8, schedule: &blackwood_domain::PhaseSchedule) {
        let mut state = self.game_state.write().unwrap_or_else(|e| e.into_inner());
        state.advance_progress(percent);
        let phase = schedule.phase_for(state.progress);
        state.set_scene(phase.location.clone(), phase.time_of_day);
        drop(state);
        self.persist();
    }

    // =========================================================================
    // Generation guard
    // =========================================================================

    /// Mark a generation as in flight for this suspect. Returns false if one
    /// already is - the caller must reject the send rather than interleave.
    pub fn begin_generation(&self, id: &CharacterId) -> bool {
        let mut entry = self.generating.entry(id.clone()).or_insert(false);
        if *entry {
            return false;
        }
        *entry = true;
        true
    }

    pub fn end_generation(&self, id: &CharacterId) {
        if let Some(mut entry) = self.generating.get_mut(id) {
            *entry = false;
        }
    }

    pub fn is_generating(&self, id: &CharacterId) -> bool {
        self.generating.get(id).map(|v| *v).unwrap_or(false)
    }

    // =========================================================================
    // Reset and persistence
    // =========================================================================

    /// Clear everything back to initial values. The next game start draws a
    /// fresh culprit.
    pub fn reset_all(&self) {
        self.conversations.clear();
        self.generating.clear();
        *self.game_state.write().unwrap_or_else(|e| e.into_inner()) = GameState::default();
        *self
            .current_character
            .write()
            .unwrap_or_else(|e| e.into_inner()) = None;
        if let Err(e) = self.snapshot.clear() {
            tracing::warn!(error = %e, "failed to clear snapshot");
        }
    }

    fn persist(&self) {
        let snapshot = StateSnapshot {
            conversations: self.conversations.iter().map(|c| c.clone()).collect(),
            game_state: self.game_state(),
            saved_at: self.clock.now(),
        };
        if let Err(e) = self.snapshot.save(&snapshot) {
            tracing::warn!(error = %e, "failed to persist state");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::SnapshotError;
    use chrono::{TimeZone, Utc};

    /// In-memory snapshot fake.
    struct MemorySnapshots(std::sync::Mutex<Option<StateSnapshot>>);

    impl MemorySnapshots {
        fn empty() -> Arc<Self> {
            Arc::new(Self(std::sync::Mutex::new(None)))
        }
    }

    impl SnapshotPort for MemorySnapshots {
        fn load(&self) -> Result<Option<StateSnapshot>, SnapshotError> {
            Ok(self.0.lock().unwrap_or_else(|e| e.into_inner()).clone())
        }

        fn save(&self, snapshot: &StateSnapshot) -> Result<(), SnapshotError> {
            *self.0.lock().unwrap_or_else(|e| e.into_inner()) = Some(snapshot.clone());
            Ok(())
        }

        fn clear(&self) -> Result<(), SnapshotError> {
            *self.0.lock().unwrap_or_else(|e| e.into_inner()) = None;
            Ok(())
        }
    }

    fn clock() -> Arc<FixedClock> {
        Arc::new(FixedClock::at(
            Utc.with_ymd_and_hms(1891, 10, 14, 22, 0, 0)
                .single()
                .expect("valid time"),
        ))
    }

    fn sophia() -> CharacterId {
        CharacterId::new("sophia-crane")
    }

    #[test]
    fn test_select_creates_conversation_lazily() {
        let store = ConversationStore::new(clock(), MemorySnapshots::empty());
        let id = sophia();
        assert!(store.conversation(&id).is_none());

        let (conversation, first) = store.select_character(&id, "Sophia Crane");
        assert!(first);
        assert_eq!(conversation.context.trust_level, TrustLevel::INITIAL);
        assert_eq!(conversation.context.depth, 0);
        assert_eq!(store.current_character(), Some(id.clone()));

        // Second selection reuses the conversation and is not a first
        // interview.
        let (_, first_again) = store.select_character(&id, "Sophia Crane");
        assert!(!first_again);
        assert_eq!(store.game_state().suspects_interviewed.len(), 1);
    }

    #[test]
    fn test_messages_append_in_order() {
        let store = ConversationStore::new(clock(), MemorySnapshots::empty());
        let id = sophia();
        store.select_character(&id, "Sophia Crane");

        let now = store.clock.now();
        store.append_message(Message::user(id.clone(), "first", now));
        store.append_message(Message::character(id.clone(), "second", now));
        store.append_message(Message::system(id.clone(), "third", now));

        let transcript = store.conversation(&id).expect("conversation");
        let contents: Vec<_> = transcript.messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_generation_guard_rejects_second_entry() {
        let store = ConversationStore::new(clock(), MemorySnapshots::empty());
        let id = sophia();
        assert!(store.begin_generation(&id));
        assert!(!store.begin_generation(&id));
        store.end_generation(&id);
        assert!(store.begin_generation(&id));
    }

    #[test]
    fn test_start_game_draws_killer_once() {
        let store = ConversationStore::new(clock(), MemorySnapshots::empty());
        let roster = vec![sophia(), CharacterId::new("thomas-reed")];

        assert!(store.start_game_if_needed(&roster, |ids| ids[1].clone()));
        assert!(!store.start_game_if_needed(&roster, |ids| ids[0].clone()));

        let state = store.game_state();
        assert!(state.game_started);
        assert_eq!(state.true_killer, Some(CharacterId::new("thomas-reed")));
    }

    #[test]
    fn test_reset_returns_to_initial_and_allows_new_killer() {
        let snapshots = MemorySnapshots::empty();
        let store = ConversationStore::new(clock(), snapshots.clone());
        let id = sophia();
        store.select_character(&id, "Sophia Crane");
        store.record_evidence("betting slips");
        store.start_game_if_needed(&[id.clone()], |ids| ids[0].clone());

        store.reset_all();

        let state = store.game_state();
        assert!(!state.game_started);
        assert!(state.true_killer.is_none());
        assert!(state.evidence.is_empty());
        assert!(state.suspects_interviewed.is_empty());
        assert!(store.conversation(&id).is_none());
        assert!(snapshots.load().expect("load").is_none());

        // A fresh start may pick a different culprit.
        let other = CharacterId::new("margaret-holloway");
        store.start_game_if_needed(&[other.clone()], |ids| ids[0].clone());
        assert_eq!(store.game_state().true_killer, Some(other));
    }

    #[test]
    fn test_store_rehydrates_from_snapshot() {
        let snapshots = MemorySnapshots::empty();
        let id = sophia();
        {
            let store = ConversationStore::new(clock(), snapshots.clone());
            store.select_character(&id, "Sophia Crane");
            let now = store.clock.now();
            store.append_message(Message::user(id.clone(), "Where were you?", now));
            store.record_evidence("betting slips");
        }

        let restored = ConversationStore::new(clock(), snapshots);
        let conversation = restored.conversation(&id).expect("restored conversation");
        assert_eq!(conversation.messages.len(), 1);
        assert_eq!(restored.game_state().evidence, vec!["betting slips"]);
    }
}
