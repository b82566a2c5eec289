//! Timeline context building and response validation.
//!
//! Two pure functions over the static case tables plus the dynamic trust
//! and progress inputs:
//!
//! - [`build_context`] assembles the knowledge fragment handed to the LLM
//!   as system context: phase framing, behavioral constraints, and exactly
//!   the timeline events this suspect may speak about at the current trust.
//! - [`validate`] scans a generated reply for forbidden content. It is
//!   advisory: the pipeline redacts offending terms with [`redact`] rather
//!   than discarding the reply, because there is no regeneration loop and a
//!   hard reject would break the conversation's flow.

use blackwood_domain::{
    CaseFile, CharacterConstraints, InvestigationProgress, Suspect, TrustLevel,
};

/// Keywords that read as information-leaks when trust is still low.
pub const SENSITIVE_KEYWORDS: &[&str] = &["secret", "confidential", "private", "hidden"];

/// Placeholder spliced over redacted terms.
pub const REDACTION_MARK: &str = "[withheld]";

/// Build the knowledge/constraint fragment for a suspect's system prompt.
pub fn build_context(
    case: &CaseFile,
    suspect: &Suspect,
    trust: TrustLevel,
    progress: InvestigationProgress,
) -> String {
    let phase = case.schedule().phase_for(progress);
    let mut out = String::new();

    out.push_str(&format!(
        "CURRENT PHASE: {} ({})\nLOCATION: {}\nTIME: {}\n",
        phase.name, phase.time_window, phase.location, phase.time_of_day
    ));

    if let Some(constraints) = case.constraints_for(&suspect.id) {
        let behavior = &constraints.behavioral;
        out.push_str("\nBEHAVIOR:\n");
        out.push_str(&format!(
            "- You are currently {}.\n",
            behavior.emotional_state.describe_for_llm()
        ));
        out.push_str(&format!("- Speak in a voice that is {}.\n", behavior.response_style));
        out.push_str(&format!(
            "- You are someone who {}.\n",
            behavior.information_sharing.describe_for_llm()
        ));

        out.push_str("\nYOU MAY SPEAK FREELY OF:\n");
        for item in &constraints.available_information {
            out.push_str(&format!("- {item}\n"));
        }

        out.push_str("\nYOU MUST NEVER REVEAL:\n");
        for topic in &constraints.forbidden_topics {
            out.push_str(&format!("- anything touching {topic}\n"));
        }
    }

    let revealable: Vec<_> = case
        .events()
        .iter()
        .filter(|event| event.revealable_by(&suspect.id, trust))
        .collect();

    if !revealable.is_empty() {
        out.push_str("\nWHAT YOU KNOW OF THAT NIGHT (you may let this out, gradually):\n");
        for event in revealable {
            let firsthand = event
                .knowledge_for(&suspect.id)
                .map(|k| k.witnessed)
                .unwrap_or(false);
            let qualifier = if firsthand {
                "you saw this yourself"
            } else {
                "you know of this second-hand"
            };
            out.push_str(&format!(
                "- [{}, {}] {} ({})\n",
                event.time_label, event.location, event.description, qualifier
            ));
        }
    }

    out
}

/// Outcome of scanning a generated reply.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub is_valid: bool,
    /// Human-readable descriptions of each violation.
    pub violations: Vec<String>,
    /// Matching guidance, one per violation.
    pub suggestions: Vec<String>,
    /// The literal terms that matched, for redaction.
    matched_terms: Vec<String>,
}

impl ValidationReport {
    fn valid() -> Self {
        Self {
            is_valid: true,
            violations: Vec::new(),
            suggestions: Vec::new(),
            matched_terms: Vec::new(),
        }
    }

    fn record(&mut self, term: &str, violation: String, suggestion: String) {
        self.is_valid = false;
        self.violations.push(violation);
        self.suggestions.push(suggestion);
        self.matched_terms.push(term.to_string());
    }

    pub fn matched_terms(&self) -> &[String] {
        &self.matched_terms
    }
}

/// Scan a generated reply against a suspect's constraints.
///
/// Case-insensitive substring matching, mirroring how the constraint tables
/// are phrased. Never fails; an empty report means the reply is clean.
pub fn validate(
    constraints: &CharacterConstraints,
    response: &str,
    trust: TrustLevel,
) -> ValidationReport {
    let lowered = response.to_lowercase();
    let mut report = ValidationReport::valid();

    for topic in &constraints.forbidden_topics {
        if lowered.contains(&topic.to_lowercase()) {
            report.record(
                topic,
                format!("Reply touches the forbidden topic \"{topic}\""),
                format!("Avoid discussing {topic} at this stage of the investigation"),
            );
        }
    }

    for key in &constraints.forbidden_knowledge {
        if lowered.contains(&key.to_lowercase()) {
            report.record(
                key,
                format!("Reply gives away guarded knowledge: \"{key}\""),
                format!("Keep \"{key}\" back until the detective has earned it"),
            );
        }
    }

    if trust < constraints.max_trust {
        for keyword in SENSITIVE_KEYWORDS {
            if lowered.contains(keyword) {
                report.record(
                    keyword,
                    format!("Reply leans on sensitive language (\"{keyword}\") before trust is earned"),
                    format!("Avoid \"{keyword}\" talk until the suspect trusts the detective more"),
                );
            }
        }
    }

    report
}

/// Best-effort redaction: splice [`REDACTION_MARK`] over each matched term,
/// case-insensitively, leaving the rest of the reply intact.
pub fn redact(response: &str, report: &ValidationReport) -> String {
    let mut redacted = response.to_string();
    for term in &report.matched_terms {
        redacted = replace_case_insensitive(&redacted, term, REDACTION_MARK);
    }
    redacted
}

fn replace_case_insensitive(haystack: &str, needle: &str, replacement: &str) -> String {
    if needle.is_empty() {
        return haystack.to_string();
    }
    let lower_haystack = haystack.to_lowercase();
    let lower_needle = needle.to_lowercase();

    let mut result = String::with_capacity(haystack.len());
    let mut cursor = 0;
    while let Some(offset) = lower_haystack[cursor..].find(&lower_needle) {
        let start = cursor + offset;
        // Lowercasing preserves ASCII lengths; for the constraint tables
        // (plain English phrases) byte offsets line up between the original
        // and lowered strings.
        result.push_str(&haystack[cursor..start]);
        result.push_str(replacement);
        cursor = start + lower_needle.len();
    }
    result.push_str(&haystack[cursor..]);
    result
}
