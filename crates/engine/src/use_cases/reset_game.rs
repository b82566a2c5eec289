//! Reset-game use case.

use std::sync::Arc;

use crate::stores::{ConversationStore, PresenceStore};

/// Full reset: conversations, game state, presence, durable snapshot. The
/// next selection starts a fresh game with a freshly drawn culprit.
pub struct ResetGame {
    store: Arc<ConversationStore>,
    presence: Arc<PresenceStore>,
}

impl ResetGame {
    pub fn new(store: Arc<ConversationStore>, presence: Arc<PresenceStore>) -> Self {
        Self { store, presence }
    }

    pub fn execute(&self) {
        tracing::info!("resetting the investigation");
        self.store.reset_all();
        self.presence.reset_all();
    }
}
