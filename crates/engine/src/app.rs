//! Application state and composition.

use std::sync::Arc;

use blackwood_domain::{AvailabilityPolicy, CaseFile};

use crate::infrastructure::{
    clock::{SystemClock, SystemRandom},
    ports::{ClockPort, LlmPort, RandomPort, SnapshotPort},
};
use crate::stores::{ConversationStore, PresenceStore};
use crate::use_cases::{CheckMessage, ResetGame, SelectCharacter, SendMessage};

/// Main application state.
///
/// Holds the case content, the stores, and the use cases. Passed to HTTP
/// handlers via Axum state. All mutable state lives behind the stores; the
/// rest is read-only composition.
pub struct App {
    pub case: Arc<CaseFile>,
    pub store: Arc<ConversationStore>,
    pub presence: Arc<PresenceStore>,
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub send_message: SendMessage,
    pub select_character: SelectCharacter,
    pub check_message: CheckMessage,
    pub reset_game: ResetGame,
}

impl App {
    /// Compose the application with production clock and randomness.
    pub fn new(
        llm: Arc<dyn LlmPort>,
        snapshot: Arc<dyn SnapshotPort>,
        availability: AvailabilityPolicy,
    ) -> Self {
        let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());
        let random: Arc<dyn RandomPort> = Arc::new(SystemRandom::new());
        Self::with_ports(llm, snapshot, clock, random, availability)
    }

    /// Compose with explicit clock/random ports (used by tests).
    pub fn with_ports(
        llm: Arc<dyn LlmPort>,
        snapshot: Arc<dyn SnapshotPort>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
        availability: AvailabilityPolicy,
    ) -> Self {
        let case = Arc::new(CaseFile::load());
        let store = Arc::new(ConversationStore::new(clock.clone(), snapshot));
        let presence = Arc::new(PresenceStore::new(clock.clone()));

        let use_cases = UseCases {
            send_message: SendMessage::new(
                case.clone(),
                store.clone(),
                presence.clone(),
                llm,
                clock,
                random.clone(),
            ),
            select_character: SelectCharacter::new(
                case.clone(),
                store.clone(),
                presence.clone(),
                random.clone(),
                availability,
            ),
            check_message: CheckMessage::new(random),
            reset_game: ResetGame::new(store.clone(), presence.clone()),
        };

        Self {
            case,
            store,
            presence,
            use_cases,
        }
    }
}
