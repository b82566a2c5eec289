//! Check-message use case.
//!
//! Standalone moderation: the same classifier the pipeline runs, exposed on
//! its own so the abuse-check endpoint (and anything else) can ask "would
//! this message be gated?" without touching any state.

use std::sync::Arc;

use serde::Serialize;

use crate::infrastructure::ports::RandomPort;
use crate::moderation::{self, MessageClassification};

/// Classification plus the presentation extras the endpoint contract wants.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageCheck {
    #[serde(flatten)]
    pub classification: MessageClassification,
    /// Coarse intent label: "abuse", "off_topic" or "investigation".
    pub detected_intent: &'static str,
    /// An in-character line the UI may show instead of the reply.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_response: Option<String>,
}

/// Check-message use case. Stateless; no side effects.
pub struct CheckMessage {
    random: Arc<dyn RandomPort>,
}

impl CheckMessage {
    pub fn new(random: Arc<dyn RandomPort>) -> Self {
        Self { random }
    }

    pub fn execute(&self, message: &str) -> MessageCheck {
        let classification = moderation::classify(message);

        let (detected_intent, suggested_response) = if classification.is_abusive {
            (
                "abuse",
                Some(
                    moderation::refusal_line(classification.severity, self.random.as_ref())
                        .to_string(),
                ),
            )
        } else if classification.is_irrelevant {
            (
                "off_topic",
                Some(moderation::deflection_line(self.random.as_ref()).to_string()),
            )
        } else {
            ("investigation", None)
        };

        MessageCheck {
            classification,
            detected_intent,
            suggested_response,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedRandom;

    fn use_case() -> CheckMessage {
        CheckMessage::new(Arc::new(FixedRandom(0)))
    }

    #[test]
    fn test_abusive_message_gets_refusal_suggestion() {
        let check = use_case().execute("shut up and answer me");
        assert!(check.classification.is_abusive);
        assert_eq!(check.detected_intent, "abuse");
        assert!(check.suggested_response.is_some());
    }

    #[test]
    fn test_clean_message_has_no_suggestion() {
        let check = use_case().execute("Who poured the brandy that night?");
        assert!(!check.classification.is_abusive);
        assert_eq!(check.detected_intent, "investigation");
        assert!(check.suggested_response.is_none());
    }

    #[test]
    fn test_wire_shape_matches_the_endpoint_contract() {
        let check = use_case().execute("tell me a joke");
        let json = serde_json::to_value(&check).expect("serializes");

        assert_eq!(json["isAbusive"], false);
        assert_eq!(json["isIrrelevant"], true);
        assert_eq!(json["confidence"], 85);
        assert_eq!(json["detectedIntent"], "off_topic");
        assert!(json["suggestedResponse"].is_string());
        assert!(json["reason"].is_string());
    }
}
