//! Send-message use case: the gating pipeline.
//!
//! One user message runs, in order, through input validation, the presence
//! check, moderation, prompt building, the LLM call, response validation,
//! and bookkeeping. Moderation never depends on the generator: a flagged
//! message short-circuits before the LLM is ever contacted.

use std::sync::Arc;

use blackwood_domain::{
    CaseFile, CharacterId, EmotionalTone, InvestigationProgress, Message, Suspect, TrustLevel,
    MAX_MESSAGE_CHARS,
};

use crate::infrastructure::ports::{ChatMessage, ClockPort, LlmError, LlmPort, LlmRequest, RandomPort};
use crate::moderation::{self, MessageClassification};
use crate::prompt_templates;
use crate::stores::{ConversationStore, PresenceStore};
use crate::timeline;

/// Trust gained per successful exchange.
pub const TRUST_STEP: u8 = 1;
/// Progress gained per successful exchange.
pub const PROGRESS_STEP: u8 = 1;

/// Words in a reply that suggest the detective just learned something.
const EVIDENCE_KEYWORDS: &[&str] = &[
    "evidence", "clue", "witnessed", "saw", "poison", "digitalis", "brandy", "ledger", "letter",
    "argument", "quarrel", "will",
];

/// Result of a processed message.
#[derive(Debug)]
pub enum SendOutcome {
    /// The suspect answered; the reply has been appended.
    Delivered {
        reply: Message,
        trust: TrustLevel,
        progress: InvestigationProgress,
        /// Whether the reply had forbidden content spliced out.
        redacted: bool,
    },
    /// Moderation fired: the suspect refused and went offline.
    Refused {
        classification: MessageClassification,
        refusal: Message,
        cooldown_secs: i64,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum SendMessageError {
    #[error("Message must not be empty")]
    EmptyMessage,
    #[error("Message exceeds {MAX_MESSAGE_CHARS} characters")]
    MessageTooLong,
    #[error("Unknown suspect: {0}")]
    UnknownCharacter(CharacterId),
    #[error("{name} is not cooperating with the investigation; try again in {seconds_remaining}s")]
    CharacterOffline {
        name: String,
        seconds_remaining: i64,
    },
    #[error("A reply from {0} is already on its way")]
    ResponsePending(CharacterId),
    #[error(transparent)]
    Generator(#[from] LlmError),
}

/// Send-message use case.
///
/// Orchestrates: moderation, presence, prompt building, generation,
/// validation, storage.
pub struct SendMessage {
    case: Arc<CaseFile>,
    store: Arc<ConversationStore>,
    presence: Arc<PresenceStore>,
    llm: Arc<dyn LlmPort>,
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
}

impl SendMessage {
    pub fn new(
        case: Arc<CaseFile>,
        store: Arc<ConversationStore>,
        presence: Arc<PresenceStore>,
        llm: Arc<dyn LlmPort>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        Self {
            case,
            store,
            presence,
            llm,
            clock,
            random,
        }
    }

    /// Run one user message through the pipeline.
    pub async fn execute(
        &self,
        character_id: CharacterId,
        text: String,
    ) -> Result<SendOutcome, SendMessageError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(SendMessageError::EmptyMessage);
        }
        if trimmed.chars().count() > MAX_MESSAGE_CHARS {
            return Err(SendMessageError::MessageTooLong);
        }

        let suspect = self
            .case
            .suspect(&character_id)
            .ok_or_else(|| SendMessageError::UnknownCharacter(character_id.clone()))?;

        self.presence.ensure(&character_id);
        if !self.presence.is_online(&character_id) {
            return Err(SendMessageError::CharacterOffline {
                name: suspect.name.clone(),
                seconds_remaining: self.presence.time_until_online(&character_id),
            });
        }

        // One generation per suspect at a time; the flag doubles as the
        // UI-facing typing indicator and is cleared on every exit path.
        if !self.store.begin_generation(&character_id) {
            return Err(SendMessageError::ResponsePending(character_id));
        }
        let _typing = TypingGuard {
            store: &self.store,
            id: character_id.clone(),
        };

        let classification = moderation::classify(trimmed);
        if classification.is_flagged() {
            return Ok(self.refuse(suspect, classification, trimmed));
        }

        self.answer(suspect, trimmed).await
    }

    /// Moderation short-circuit: the suspect goes offline and the generator
    /// is never invoked.
    fn refuse(
        &self,
        suspect: &Suspect,
        classification: MessageClassification,
        offending: &str,
    ) -> SendOutcome {
        let id = suspect.id.clone();
        let cooldown_secs = classification.severity.cooldown_secs();

        tracing::info!(
            character = %id,
            severity = %classification.severity,
            reason = %classification.reason,
            "message gated by moderation"
        );

        self.presence.set_offline(
            &id,
            cooldown_secs,
            classification.reason.clone(),
            format!("{} is refusing to speak with you.", suspect.name),
            offending,
        );

        let (line, tone) = if classification.is_abusive {
            let tone = match classification.severity {
                moderation::Severity::High => EmotionalTone::Cold,
                _ => EmotionalTone::Irritated,
            };
            (
                moderation::refusal_line(classification.severity, self.random.as_ref()),
                tone,
            )
        } else {
            (
                moderation::deflection_line(self.random.as_ref()),
                EmotionalTone::Evasive,
            )
        };

        let now = self.clock.now();
        let refusal = Message::character(id.clone(), line, now).with_tone(tone);
        self.store.append_message(refusal.clone());
        self.store.append_message(Message::system(
            id,
            format!(
                "{} has withdrawn from the conversation for a time.",
                suspect.name
            ),
            now,
        ));

        SendOutcome::Refused {
            classification,
            refusal,
            cooldown_secs,
        }
    }

    /// The happy path: build the prompt, call the generator, validate and
    /// store the reply.
    async fn answer(
        &self,
        suspect: &Suspect,
        text: &str,
    ) -> Result<SendOutcome, SendMessageError> {
        let id = suspect.id.clone();
        let trust = self.store.trust_level(&id);
        let progress = self.store.game_state().progress;

        // History reflects the transcript before this message; the new text
        // rides separately at the end of the request.
        let history = self
            .store
            .conversation(&id)
            .map(|c| prompt_templates::build_history(&c))
            .unwrap_or_default();

        self.store
            .append_message(Message::user(id.clone(), text, self.clock.now()));
        self.store
            .set_topic(&id, text.chars().take(80).collect::<String>());

        let context = timeline::build_context(&self.case, suspect, trust, progress);
        let system_prompt = prompt_templates::build_system_prompt(&self.case, suspect, &context);

        let mut messages = history;
        messages.push(ChatMessage::user(text));
        let request = LlmRequest::new(messages)
            .with_system_prompt(system_prompt)
            .with_temperature(0.8);

        let response = match self.llm.generate(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(character = %id, error = %e, "generator failed");
                self.store.append_message(Message::system(
                    id,
                    format!(
                        "{} seems unable to find the words. Perhaps ask again in a moment.",
                        suspect.name
                    ),
                    self.clock.now(),
                ));
                return Err(e.into());
            }
        };

        let raw = response.content;
        let (content, redacted) = match self.case.constraints_for(&id) {
            Some(constraints) => {
                let report = timeline::validate(constraints, &raw, trust);
                if report.is_valid {
                    (raw.clone(), false)
                } else {
                    tracing::debug!(
                        character = %id,
                        violations = report.violations.len(),
                        "reply redacted"
                    );
                    // A near-slip tells the detective a secret exists even
                    // with the words withheld.
                    if let Some(term) = report.matched_terms().first() {
                        self.store.discover_secret(format!(
                            "{} is hiding something about \"{term}\".",
                            suspect.name
                        ));
                    }
                    (timeline::redact(&raw, &report), true)
                }
            }
            None => (raw.clone(), false),
        };

        let reply = Message::character(id.clone(), content, self.clock.now());
        self.store.append_message(reply.clone());

        let new_trust = trust.gain(TRUST_STEP);
        self.store.update_memory(&id, new_trust, 1);
        let relationship_score = self
            .store
            .conversation(&id)
            .map(|c| c.relationship_score)
            .unwrap_or(0);
        self.store
            .set_relationship_score(&id, relationship_score + 1);

        // Evidence scan runs against the raw reply: a redacted slip is still
        // a slip the detective heard the shape of.
        let raw_lower = raw.to_lowercase();
        if EVIDENCE_KEYWORDS.iter().any(|k| raw_lower.contains(k)) {
            self.store.record_evidence(format!(
                "Something {} said during questioning seems worth keeping.",
                suspect.name
            ));
        }

        self.store
            .advance_progress(PROGRESS_STEP, self.case.schedule());

        Ok(SendOutcome::Delivered {
            reply,
            trust: new_trust,
            progress: self.store.game_state().progress,
            redacted,
        })
    }
}

/// Clears the generation flag on every exit path.
struct TypingGuard<'a> {
    store: &'a ConversationStore,
    id: CharacterId,
}

impl Drop for TypingGuard<'_> {
    fn drop(&mut self) {
        self.store.end_generation(&self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    use async_trait::async_trait;
    use chrono::{Duration, TimeZone, Utc};

    use crate::infrastructure::clock::{FixedClock, FixedRandom};
    use crate::infrastructure::ports::{
        FinishReason, LlmResponse, SnapshotError, SnapshotPort, StateSnapshot,
    };
    use blackwood_domain::MessageSender;

    /// Scripted LLM that records how often it was called.
    struct ScriptedLlm {
        reply: String,
        calls: AtomicU32,
        fail: bool,
    }

    impl ScriptedLlm {
        fn answering(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.into(),
                calls: AtomicU32::new(0),
                fail: false,
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: String::new(),
                calls: AtomicU32::new(0),
                fail: true,
            })
        }

        fn call_count(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl LlmPort for ScriptedLlm {
        async fn generate(&self, _request: LlmRequest) -> Result<LlmResponse, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(LlmError::Timeout(12));
            }
            Ok(LlmResponse {
                content: self.reply.clone(),
                finish_reason: FinishReason::Stop,
            })
        }
    }

    struct NullSnapshots;

    impl SnapshotPort for NullSnapshots {
        fn load(&self) -> Result<Option<StateSnapshot>, SnapshotError> {
            Ok(None)
        }
        fn save(&self, _snapshot: &StateSnapshot) -> Result<(), SnapshotError> {
            Ok(())
        }
        fn clear(&self) -> Result<(), SnapshotError> {
            Ok(())
        }
    }

    struct Fixture {
        clock: Arc<FixedClock>,
        store: Arc<ConversationStore>,
        presence: Arc<PresenceStore>,
        llm: Arc<ScriptedLlm>,
        use_case: SendMessage,
    }

    fn fixture(llm: Arc<ScriptedLlm>) -> Fixture {
        let clock = Arc::new(FixedClock::at(
            Utc.with_ymd_and_hms(1891, 10, 14, 22, 0, 0)
                .single()
                .expect("valid time"),
        ));
        let case = Arc::new(CaseFile::load());
        let store = Arc::new(ConversationStore::new(clock.clone(), Arc::new(NullSnapshots)));
        let presence = Arc::new(PresenceStore::new(clock.clone()));
        let use_case = SendMessage::new(
            case,
            store.clone(),
            presence.clone(),
            llm.clone(),
            clock.clone(),
            Arc::new(FixedRandom(0)),
        );
        Fixture {
            clock,
            store,
            presence,
            llm,
            use_case,
        }
    }

    fn james() -> CharacterId {
        CharacterId::new("james-blackwood")
    }

    #[tokio::test]
    async fn test_abusive_message_takes_suspect_offline_without_generator() {
        let f = fixture(ScriptedLlm::answering("unused"));

        let outcome = f
            .use_case
            .execute(james(), "you are an idiot".into())
            .await
            .expect("refusal is an outcome, not an error");

        match outcome {
            SendOutcome::Refused {
                classification,
                cooldown_secs,
                ..
            } => {
                assert!(classification.is_abusive);
                assert_eq!(cooldown_secs, 45);
            }
            other => panic!("expected refusal, got {other:?}"),
        }

        assert!(!f.presence.is_online(&james()));
        assert_eq!(f.presence.time_until_online(&james()), 45);
        assert_eq!(f.llm.call_count(), 0);

        // Exactly one character refusal plus one system note; the offending
        // message itself is not recorded.
        let transcript = f.store.conversation(&james()).expect("conversation");
        assert_eq!(transcript.messages.len(), 2);
        assert_eq!(transcript.messages[0].sender, MessageSender::Character);
        assert_eq!(transcript.messages[1].sender, MessageSender::System);
    }

    #[tokio::test]
    async fn test_off_topic_message_gets_deflection_without_generator() {
        let f = fixture(ScriptedLlm::answering("unused"));

        let outcome = f
            .use_case
            .execute(james(), "What's your favorite color?".into())
            .await
            .expect("deflection is an outcome");

        match outcome {
            SendOutcome::Refused { classification, refusal, .. } => {
                assert!(classification.is_irrelevant);
                assert!(crate::moderation::lexicon::DEFLECTION_POOL
                    .contains(&refusal.content.as_str()));
            }
            other => panic!("expected refusal, got {other:?}"),
        }
        assert_eq!(f.llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_clean_question_reaches_generator_and_bumps_counters() {
        let f = fixture(ScriptedLlm::answering(
            "I was in the billiard room from eight o'clock.",
        ));

        let outcome = f
            .use_case
            .execute(james(), "Where were you at 9pm?".into())
            .await
            .expect("delivered");

        match outcome {
            SendOutcome::Delivered {
                reply,
                trust,
                progress,
                redacted,
            } => {
                assert_eq!(reply.content, "I was in the billiard room from eight o'clock.");
                assert_eq!(trust, TrustLevel::INITIAL.gain(TRUST_STEP));
                assert_eq!(progress.percent(), PROGRESS_STEP);
                assert!(!redacted);
            }
            other => panic!("expected delivery, got {other:?}"),
        }

        assert_eq!(f.llm.call_count(), 1);
        let transcript = f.store.conversation(&james()).expect("conversation");
        // User question plus suspect reply.
        assert_eq!(transcript.messages.len(), 2);
        assert_eq!(transcript.messages[0].sender, MessageSender::User);
        assert_eq!(transcript.messages[1].sender, MessageSender::Character);
        assert_eq!(transcript.context.depth, 1);
    }

    #[tokio::test]
    async fn test_offline_suspect_rejects_without_mutation() {
        let f = fixture(ScriptedLlm::answering("unused"));
        f.presence.set_offline(
            &james(),
            40,
            "Abusive language",
            "James Blackwood is refusing to speak with you.",
            "earlier outburst",
        );
        f.clock.advance(Duration::seconds(28));

        let err = f
            .use_case
            .execute(james(), "Calm down, where were you?".into())
            .await
            .expect_err("offline suspects reject sends");

        match err {
            SendMessageError::CharacterOffline {
                seconds_remaining, ..
            } => assert_eq!(seconds_remaining, 12),
            other => panic!("expected offline rejection, got {other}"),
        }

        assert_eq!(f.llm.call_count(), 0);
        assert!(f.store.conversation(&james()).is_none());
        assert_eq!(f.store.game_state().progress.percent(), 0);
    }

    #[tokio::test]
    async fn test_generator_failure_leaves_counters_untouched() {
        let f = fixture(ScriptedLlm::failing());

        let err = f
            .use_case
            .execute(james(), "Where were you at 9pm?".into())
            .await
            .expect_err("generator failure surfaces");
        assert!(matches!(err, SendMessageError::Generator(LlmError::Timeout(_))));

        let transcript = f.store.conversation(&james()).expect("conversation");
        // User message plus the in-character apology note.
        assert_eq!(transcript.messages.len(), 2);
        assert_eq!(transcript.messages[1].sender, MessageSender::System);
        assert_eq!(transcript.context.trust_level, TrustLevel::INITIAL);
        assert_eq!(transcript.context.depth, 0);
        assert_eq!(f.store.game_state().progress.percent(), 0);

        // The typing flag is released for the next attempt.
        assert!(!f.store.is_generating(&james()));
    }

    #[tokio::test]
    async fn test_forbidden_content_is_redacted_not_dropped() {
        let f = fixture(ScriptedLlm::answering(
            "If you must know, the second ledger shows everything.",
        ));

        let outcome = f
            .use_case
            .execute(james(), "Tell me about the accounts.".into())
            .await
            .expect("delivered");

        match outcome {
            SendOutcome::Delivered { reply, redacted, .. } => {
                assert!(redacted);
                assert!(!reply.content.contains("second ledger"));
                assert!(reply.content.contains(crate::timeline::REDACTION_MARK));
            }
            other => panic!("expected delivery, got {other:?}"),
        }

        // The near-slip itself becomes a discovered secret.
        let secrets = f.store.game_state().discovered_secrets;
        assert_eq!(secrets.len(), 1);
        assert!(secrets[0].contains("second ledger"));
    }

    #[tokio::test]
    async fn test_empty_and_oversized_messages_are_rejected() {
        let f = fixture(ScriptedLlm::answering("unused"));

        assert!(matches!(
            f.use_case.execute(james(), "   ".into()).await,
            Err(SendMessageError::EmptyMessage)
        ));
        assert!(matches!(
            f.use_case.execute(james(), "x".repeat(501)).await,
            Err(SendMessageError::MessageTooLong)
        ));
        assert_eq!(f.llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_suspect_is_rejected() {
        let f = fixture(ScriptedLlm::answering("unused"));
        let err = f
            .use_case
            .execute(CharacterId::new("inspector-lestrade"), "hello".into())
            .await
            .expect_err("unknown suspect");
        assert!(matches!(err, SendMessageError::UnknownCharacter(_)));
    }

    #[tokio::test]
    async fn test_second_send_while_generating_is_rejected() {
        let f = fixture(ScriptedLlm::answering("unused"));
        assert!(f.store.begin_generation(&james()));

        let err = f
            .use_case
            .execute(james(), "Where were you?".into())
            .await
            .expect_err("in-flight guard");
        assert!(matches!(err, SendMessageError::ResponsePending(_)));
        assert_eq!(f.llm.call_count(), 0);
    }
}
