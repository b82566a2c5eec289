//! Deterministic message moderation.
//!
//! A pure classifier over curated phrase tables. No model, no network, no
//! hidden nondeterminism: the same message always classifies the same way,
//! which is what makes the gating pipeline testable. An LLM-backed
//! classifier could stand behind the same interface later; this one is the
//! deterministic primary.

pub mod lexicon;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::infrastructure::ports::RandomPort;

/// Severity bucket for a flagged message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
}

impl Severity {
    /// Cooldown applied when a message at this severity knocks a suspect
    /// offline, in seconds.
    pub fn cooldown_secs(&self) -> i64 {
        match self {
            Severity::High => 60,
            Severity::Medium => 45,
            Severity::Low => 40,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Confidence constants. Fixed per code path, not computed from features.
pub const ABUSIVE_CONFIDENCE: u8 = 90;
pub const IRRELEVANT_CONFIDENCE: u8 = 85;
pub const CLEAN_CONFIDENCE: u8 = 95;

/// Minimum confidence for a hit to trigger gating.
pub const FLAG_THRESHOLD: u8 = 80;

/// Verdict on a single user message. Serializes in the abuse-check
/// endpoint's wire casing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageClassification {
    pub is_abusive: bool,
    pub is_irrelevant: bool,
    pub severity: Severity,
    /// Fixed constant per path; see the module constants.
    pub confidence: u8,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_phrase: Option<String>,
}

impl MessageClassification {
    fn clean() -> Self {
        Self {
            is_abusive: false,
            is_irrelevant: false,
            severity: Severity::Low,
            confidence: CLEAN_CONFIDENCE,
            reason: "No flagged content detected".to_string(),
            matched_phrase: None,
        }
    }

    /// Whether this verdict is strong enough to gate the message.
    pub fn is_flagged(&self) -> bool {
        (self.is_abusive || self.is_irrelevant) && self.confidence >= FLAG_THRESHOLD
    }
}

/// Classify a user message against the phrase tables.
///
/// Matching rule: phrases shorter than ten characters require word-boundary
/// adjacency, so "hell" does not fire inside "hello"; longer phrases are
/// distinctive enough to match as plain substrings.
pub fn classify(message: &str) -> MessageClassification {
    let normalized = message.trim().to_lowercase();
    if normalized.is_empty() {
        return MessageClassification::clean();
    }

    for entry in lexicon::ABUSIVE {
        if phrase_matches(&normalized, entry.phrase) {
            return MessageClassification {
                is_abusive: true,
                is_irrelevant: false,
                severity: entry.severity,
                confidence: ABUSIVE_CONFIDENCE,
                reason: format!("Abusive language detected: \"{}\"", entry.phrase),
                matched_phrase: Some(entry.phrase.to_string()),
            };
        }
    }

    for phrase in lexicon::IRRELEVANT {
        if phrase_matches(&normalized, phrase) {
            return MessageClassification {
                is_abusive: false,
                is_irrelevant: true,
                severity: Severity::Low,
                confidence: IRRELEVANT_CONFIDENCE,
                reason: format!("Off-topic subject detected: \"{phrase}\""),
                matched_phrase: Some(phrase.to_string()),
            };
        }
    }

    MessageClassification::clean()
}

/// Pick an in-character refusal line for an abusive message.
pub fn refusal_line(severity: Severity, random: &dyn RandomPort) -> &'static str {
    let pool = lexicon::refusal_pool(severity);
    pool[random.pick_index(pool.len()).min(pool.len() - 1)]
}

/// Pick an in-character deflection line for an off-topic message.
pub fn deflection_line(random: &dyn RandomPort) -> &'static str {
    let pool = lexicon::DEFLECTION_POOL;
    pool[random.pick_index(pool.len()).min(pool.len() - 1)]
}

/// Substring match with the short-phrase boundary rule.
fn phrase_matches(haystack: &str, phrase: &str) -> bool {
    if phrase.len() >= 10 {
        return haystack.contains(phrase);
    }

    // Short phrases must sit on word boundaries.
    let mut search_from = 0;
    while let Some(offset) = haystack[search_from..].find(phrase) {
        let start = search_from + offset;
        let end = start + phrase.len();

        let boundary_before = start == 0
            || !haystack[..start]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_alphanumeric());
        let boundary_after = end == haystack.len()
            || !haystack[end..]
                .chars()
                .next()
                .is_some_and(|c| c.is_alphanumeric());

        if boundary_before && boundary_after {
            return true;
        }
        search_from = start + 1;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_abusive_phrase_flags_with_high_confidence() {
        let verdict = classify("you are an idiot");
        assert!(verdict.is_abusive);
        assert!(verdict.confidence >= FLAG_THRESHOLD);
        assert_eq!(verdict.severity, Severity::Medium);
        assert!(verdict.is_flagged());
        assert_eq!(verdict.matched_phrase.as_deref(), Some("idiot"));
    }

    #[test]
    fn test_short_phrase_needs_word_boundaries() {
        // "hell" inside "hello" must not fire.
        assert!(!classify("hello there, Mr. Reed").is_flagged());
        // On its own it does.
        assert!(classify("what the hell happened here").is_flagged());
        // Punctuation counts as a boundary.
        assert!(classify("hell!").is_flagged());
    }

    #[test]
    fn test_long_phrase_matches_as_substring() {
        let verdict = classify("so anyway, what's your favorite color today?");
        assert!(verdict.is_irrelevant);
        assert_eq!(verdict.confidence, IRRELEVANT_CONFIDENCE);
        assert!(verdict.is_flagged());
    }

    #[test]
    fn test_clean_message_is_confidently_clean() {
        let verdict = classify("Where were you at 9pm on the night of the murder?");
        assert!(!verdict.is_abusive);
        assert!(!verdict.is_irrelevant);
        assert!(!verdict.is_flagged());
        assert_eq!(verdict.confidence, CLEAN_CONFIDENCE);
    }

    #[test]
    fn test_threats_bucket_as_high_severity() {
        let verdict = classify("I will kill you if you lie to me");
        assert!(verdict.is_abusive);
        assert_eq!(verdict.severity, Severity::High);
        assert_eq!(verdict.severity.cooldown_secs(), 60);
    }

    #[test]
    fn test_case_and_whitespace_are_normalized() {
        let verdict = classify("  SHUT UP  ");
        assert!(verdict.is_abusive);
        assert_eq!(verdict.severity, Severity::Medium);
    }

    #[test]
    fn test_severity_cooldowns() {
        assert_eq!(Severity::High.cooldown_secs(), 60);
        assert_eq!(Severity::Medium.cooldown_secs(), 45);
        assert_eq!(Severity::Low.cooldown_secs(), 40);
    }

    #[test]
    fn test_refusal_lines_come_from_the_severity_pool() {
        use crate::infrastructure::clock::FixedRandom;
        let line = refusal_line(Severity::High, &FixedRandom(0));
        assert!(lexicon::refusal_pool(Severity::High).contains(&line));
    }
}
