//! Per-suspect online/offline cooldown state machine.
//!
//! A suspect knocked offline by moderation stays offline until a deadline,
//! then comes back on their own. The transition back is lazy: there is no
//! timer anywhere, every read checks the deadline against the injected
//! clock and flips the stored state if it has passed. A suspect that was
//! never initialized reads as online (fail-open).

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::Serialize;

use blackwood_domain::CharacterId;

use crate::infrastructure::ports::ClockPort;

/// Cap on retained offline events; oldest evicted first.
pub const OFFLINE_EVENT_CAP: usize = 50;

/// Presence record for one suspect. Serializes in the API's wire casing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterStatus {
    pub character_id: CharacterId,
    pub is_online: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offline_until: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offline_reason: Option<String>,
    /// Canned line shown while the suspect refuses to talk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_offline_message: Option<String>,
}

impl CharacterStatus {
    fn online(character_id: CharacterId) -> Self {
        Self {
            character_id,
            is_online: true,
            offline_until: None,
            offline_reason: None,
            last_offline_message: None,
        }
    }
}

/// One recorded offline transition, kept for display and debugging.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfflineEvent {
    pub character_id: CharacterId,
    pub timestamp: DateTime<Utc>,
    pub reason: String,
    pub duration_secs: i64,
    /// The message that caused the transition.
    pub offending_message: String,
}

/// Session-only presence store. Not persisted: a restart forgives an active
/// cooldown.
pub struct PresenceStore {
    clock: Arc<dyn ClockPort>,
    statuses: DashMap<CharacterId, CharacterStatus>,
    events: Mutex<VecDeque<OfflineEvent>>,
}

impl PresenceStore {
    pub fn new(clock: Arc<dyn ClockPort>) -> Self {
        Self {
            clock,
            statuses: DashMap::new(),
            events: Mutex::new(VecDeque::new()),
        }
    }

    /// Initialize a suspect as online if not yet tracked.
    pub fn ensure(&self, id: &CharacterId) {
        self.statuses
            .entry(id.clone())
            .or_insert_with(|| CharacterStatus::online(id.clone()));
    }

    /// Take a suspect offline for `duration_secs`, recording the event.
    pub fn set_offline(
        &self,
        id: &CharacterId,
        duration_secs: i64,
        reason: impl Into<String>,
        canned_message: impl Into<String>,
        offending_message: impl Into<String>,
    ) {
        let now = self.clock.now();
        let reason = reason.into();
        let until = now + Duration::seconds(duration_secs);

        let mut status = self
            .statuses
            .entry(id.clone())
            .or_insert_with(|| CharacterStatus::online(id.clone()));
        status.is_online = false;
        status.offline_until = Some(until);
        status.offline_reason = Some(reason.clone());
        status.last_offline_message = Some(canned_message.into());
        drop(status);

        tracing::info!(
            character = %id,
            duration_secs,
            reason = %reason,
            "suspect taken offline"
        );

        let mut events = self.events.lock().unwrap_or_else(|e| e.into_inner());
        if events.len() >= OFFLINE_EVENT_CAP {
            events.pop_front();
        }
        events.push_back(OfflineEvent {
            character_id: id.clone(),
            timestamp: now,
            reason,
            duration_secs,
            offending_message: offending_message.into(),
        });
    }

    /// Manually restore a suspect (used by resets).
    pub fn set_online(&self, id: &CharacterId) {
        self.statuses
            .insert(id.clone(), CharacterStatus::online(id.clone()));
    }

    /// Whether the suspect is currently answering questions. Performs the
    /// lazy expiry check.
    pub fn is_online(&self, id: &CharacterId) -> bool {
        self.status(id).is_online
    }

    /// Seconds until the suspect comes back; 0 if already online.
    pub fn time_until_online(&self, id: &CharacterId) -> i64 {
        let status = self.status(id);
        match status.offline_until {
            Some(until) if !status.is_online => (until - self.clock.now()).num_seconds().max(0),
            _ => 0,
        }
    }

    pub fn offline_reason(&self, id: &CharacterId) -> Option<String> {
        self.status(id).offline_reason
    }

    /// Current status after the lazy expiry check. Unknown suspects report
    /// online without being inserted.
    pub fn status(&self, id: &CharacterId) -> CharacterStatus {
        if let Some(mut entry) = self.statuses.get_mut(id) {
            if !entry.is_online {
                let expired = entry
                    .offline_until
                    .map_or(true, |until| self.clock.now() >= until);
                if expired {
                    // Cooldown elapsed: flip back online before reporting.
                    *entry = CharacterStatus::online(id.clone());
                }
            }
            entry.clone()
        } else {
            CharacterStatus::online(id.clone())
        }
    }

    /// Most recent offline events, oldest first.
    pub fn recent_events(&self) -> Vec<OfflineEvent> {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .cloned()
            .collect()
    }

    /// Clear all presence state.
    pub fn reset_all(&self) {
        self.statuses.clear();
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use chrono::TimeZone;

    fn setup() -> (Arc<FixedClock>, PresenceStore) {
        let start = Utc
            .with_ymd_and_hms(1891, 10, 14, 22, 0, 0)
            .single()
            .expect("valid time");
        let clock = Arc::new(FixedClock::at(start));
        let store = PresenceStore::new(clock.clone());
        (clock, store)
    }

    fn reed() -> CharacterId {
        CharacterId::new("thomas-reed")
    }

    #[test]
    fn test_unknown_suspect_is_online_by_default() {
        let (_clock, store) = setup();
        assert!(store.is_online(&reed()));
        assert_eq!(store.time_until_online(&reed()), 0);
    }

    #[test]
    fn test_offline_until_deadline_then_back() {
        let (clock, store) = setup();
        let id = reed();
        store.set_offline(&id, 45, "Abusive language", "Reed will not speak to you.", "shut up");

        assert!(!store.is_online(&id));
        assert_eq!(store.time_until_online(&id), 45);

        // One second before the deadline: still offline.
        clock.advance(Duration::seconds(44));
        assert!(!store.is_online(&id));
        assert_eq!(store.time_until_online(&id), 1);

        // At the deadline: first query flips the state back.
        clock.advance(Duration::seconds(1));
        assert!(store.is_online(&id));
        assert_eq!(store.time_until_online(&id), 0);
        assert!(store.offline_reason(&id).is_none());
    }

    #[test]
    fn test_is_online_is_idempotent_without_time_passing() {
        let (_clock, store) = setup();
        let id = reed();
        store.set_offline(&id, 40, "Off-topic", "Reed is unavailable.", "favorite color?");

        assert_eq!(store.is_online(&id), store.is_online(&id));
        assert_eq!(store.time_until_online(&id), store.time_until_online(&id));
    }

    #[test]
    fn test_manual_set_online_clears_cooldown() {
        let (_clock, store) = setup();
        let id = reed();
        store.set_offline(&id, 60, "Abusive language", "Reed will not speak.", "threat");
        store.set_online(&id);
        assert!(store.is_online(&id));
        assert!(store.offline_reason(&id).is_none());
    }

    #[test]
    fn test_event_ring_buffer_evicts_oldest() {
        let (_clock, store) = setup();
        let id = reed();
        for i in 0..(OFFLINE_EVENT_CAP + 10) {
            store.set_offline(&id, 40, format!("event {i}"), "canned", "msg");
        }
        let events = store.recent_events();
        assert_eq!(events.len(), OFFLINE_EVENT_CAP);
        assert_eq!(events[0].reason, "event 10");
        assert_eq!(
            events.last().expect("non-empty").reason,
            format!("event {}", OFFLINE_EVENT_CAP + 9)
        );
    }

    #[test]
    fn test_reset_all_clears_statuses_and_events() {
        let (_clock, store) = setup();
        let id = reed();
        store.set_offline(&id, 60, "Abusive language", "canned", "msg");
        store.reset_all();
        assert!(store.is_online(&id));
        assert!(store.recent_events().is_empty());
    }
}
