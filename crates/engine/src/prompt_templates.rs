//! Prompt assembly for suspect dialogue.
//!
//! The system prompt concatenates three layers: the suspect's authored
//! persona, the timeline context fragment built for the current trust and
//! progress, and the fixed behavioral instructions below. History is capped
//! before it leaves this module.

use blackwood_domain::{CaseFile, Conversation, MessageSender, Suspect};

use crate::infrastructure::ports::ChatMessage;

/// Most recent conversation entries forwarded to the LLM.
pub const HISTORY_LIMIT: usize = 10;

/// Fixed closing instructions appended to every suspect prompt.
pub const BEHAVIORAL_INSTRUCTIONS: &str = "\
RULES:
- Stay in character at all times. You are a suspect in a murder investigation \
in the year 1891; you know nothing of the modern world.
- Keep replies short: one to three sentences, as spoken dialogue.
- Reveal what you know gradually. The more the detective has earned your \
trust, the more you may let slip.
- Never volunteer your secrets outright. If pressed on something you must \
not reveal, deflect in character.
- Do not narrate actions or describe the scene; speak only your character's \
words.";

/// Build the full system prompt for one suspect.
pub fn build_system_prompt(case: &CaseFile, suspect: &Suspect, timeline_context: &str) -> String {
    let mut prompt = String::new();

    prompt.push_str(&format!(
        "You are {}, {} at Blackwood Manor, on the night Lord Edmund \
         Blackwood was found dead in his study.\n\n",
        suspect.name,
        article_for_role(&suspect.role)
    ));

    prompt.push_str(&format!(
        "PERSONALITY: {}\n\nBACKGROUND: {}\n",
        suspect.personality.join(", "),
        suspect.backstory
    ));

    if !suspect.knowledge_base.is_empty() {
        prompt.push_str("\nYOU KNOW WELL:\n");
        for item in &suspect.knowledge_base {
            prompt.push_str(&format!("- {item}\n"));
        }
    }

    if !suspect.secrets.is_empty() {
        prompt.push_str("\nYOUR SECRETS (guard these):\n");
        for secret in &suspect.secrets {
            prompt.push_str(&format!("- {secret}\n"));
        }
    }

    if !suspect.relationships.is_empty() {
        prompt.push_str("\nTHE OTHERS IN THE HOUSE:\n");
        let mut entries: Vec<_> = suspect.relationships.iter().collect();
        entries.sort_by(|a, b| a.0.as_str().cmp(b.0.as_str()));
        for (other_id, how) in entries {
            let other_name = case
                .suspect(other_id)
                .map(|s| s.name.as_str())
                .unwrap_or_else(|| other_id.as_str());
            prompt.push_str(&format!("- {other_name}: {how}\n"));
        }
    }

    if !suspect.response_patterns.is_empty() {
        prompt.push_str("\nHOW YOU SPEAK (examples):\n");
        for line in &suspect.response_patterns {
            prompt.push_str(&format!("- \"{line}\"\n"));
        }
    }

    prompt.push_str(&format!("\n{timeline_context}\n{BEHAVIORAL_INSTRUCTIONS}"));
    prompt
}

/// Map the recent transcript into LLM history, newest last.
///
/// System narration (refusals, notes) is dropped: the generator only sees
/// the spoken exchange. Capped at [`HISTORY_LIMIT`] entries.
pub fn build_history(conversation: &Conversation) -> Vec<ChatMessage> {
    conversation
        .recent_messages(HISTORY_LIMIT)
        .iter()
        .filter_map(|message| match message.sender {
            MessageSender::User => Some(ChatMessage::user(message.content.clone())),
            MessageSender::Character => Some(ChatMessage::assistant(message.content.clone())),
            MessageSender::System => None,
        })
        .collect()
}

fn article_for_role(role: &str) -> String {
    // Roles are authored as "The Butler", "The Widow" - lowercase the
    // leading article when splicing into a sentence.
    if let Some(rest) = role.strip_prefix("The ") {
        format!("the {rest}")
    } else {
        role.to_string()
    }
}
