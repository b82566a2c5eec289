//! The murder-night timeline.
//!
//! Each event carries a per-suspect knowledge gate. `revealable(witnessed,
//! trust)` entries surface in prompts once the detective has earned the
//! trust; `sealed` entries exist so the validator can catch a generated
//! reply that gives away what a suspect would never volunteer.

use std::collections::HashMap;

use crate::ids::CharacterId;
use crate::timeline::{CharacterKnowledge, TimelineEvent};

const JAMES: &str = "james-blackwood";
const VICTORIA: &str = "victoria-blackwood";
const REED: &str = "thomas-reed";
const HOLLOWAY: &str = "margaret-holloway";
const SOPHIA: &str = "sophia-crane";

fn cid(slug: &str) -> CharacterId {
    CharacterId::new(slug)
}

fn event(
    id: &str,
    time_label: &str,
    location: &str,
    participants: &[&str],
    description: &str,
    evidence_tags: &[&str],
    secret_tags: &[&str],
    knowledge: &[(&str, CharacterKnowledge)],
) -> TimelineEvent {
    TimelineEvent {
        id: id.into(),
        time_label: time_label.into(),
        location: location.into(),
        participants: participants.iter().map(|s| cid(s)).collect(),
        description: description.into(),
        evidence_tags: evidence_tags.iter().map(|s| s.to_string()).collect(),
        secret_tags: secret_tags.iter().map(|s| s.to_string()).collect(),
        knowledge: knowledge
            .iter()
            .map(|(who, k)| (cid(who), *k))
            .collect(),
    }
}

/// The authored timeline of October 14th, 1891.
pub fn murder_night() -> Vec<TimelineEvent> {
    use crate::timeline::CharacterKnowledge as K;

    vec![
        event(
            "dinner-served",
            "7:00 PM",
            "The Dining Room",
            &[JAMES, VICTORIA, REED, HOLLOWAY, SOPHIA],
            "Dinner for the household and Dr. Holloway. Edmund in poor humor, \
             eating little and drinking less. Conversation kept to the weather \
             and the Hendersons' scandal.",
            &[],
            &[],
            &[
                (JAMES, K::revealable(true, 25)),
                (VICTORIA, K::revealable(true, 25)),
                (REED, K::revealable(true, 25)),
                (HOLLOWAY, K::revealable(true, 25)),
                (SOPHIA, K::revealable(true, 25)),
            ],
        ),
        event(
            "private-consultation",
            "7:45 PM",
            "The Library",
            &[HOLLOWAY],
            "Dr. Holloway withdrew with Edmund for a private word about his \
             condition. He asked her, not for the first time, how long he had.",
            &[],
            &["edmund-illness"],
            &[
                (HOLLOWAY, K::revealable(true, 55)),
                // Reed saw them withdraw but not what was said.
                (REED, K::revealable(false, 40)),
            ],
        ),
        event(
            "sophia-request",
            "8:10 PM",
            "The Study",
            &[SOPHIA],
            "Sophia went to the study to ask her guardian for money. Edmund \
             refused her flatly and she left in tears.",
            &["betting-slips"],
            &["sophia-debts"],
            &[
                (SOPHIA, K::revealable(true, 50)),
                // Raised voices carry in that corridor.
                (REED, K::revealable(false, 45)),
            ],
        ),
        event(
            "heated-argument",
            "8:30 PM",
            "The Study",
            &[JAMES],
            "Edmund confronted James over a discrepancy in the firm's second \
             ledger. Shouting was heard through the study door; James left \
             white-faced.",
            &["second-ledger"],
            &["james-embezzlement"],
            &[
                (JAMES, K::revealable(true, 60)),
                (REED, K::revealable(true, 45)),
                // Sophia lingered by the door after her own refusal.
                (SOPHIA, K::revealable(false, 55)),
                (VICTORIA, K::revealable(false, 50)),
            ],
        ),
        event(
            "brandy-tray",
            "8:45 PM",
            "The Study",
            &[REED],
            "Reed carried the evening brandy tray to the study, as every night. \
             He set it at Edmund's elbow and was dismissed without a word.",
            &["brandy-glass"],
            &[],
            &[
                (REED, K::revealable(true, 35)),
                (VICTORIA, K::revealable(false, 30)),
            ],
        ),
        event(
            "figure-on-stair",
            "8:50 PM",
            "The Servants' Stair",
            &[REED],
            "Returning below, Reed glimpsed a figure on the servants' stair \
             by the study landing. He could not, or will not, say who.",
            &[],
            &["reed-silence"],
            &[(REED, K::revealable(true, 70))],
        ),
        event(
            "body-found",
            "9:15 PM",
            "The Study",
            &[VICTORIA, REED],
            "Lady Blackwood, going to say goodnight, found Edmund slumped over \
             his desk. Her call brought Reed at a run. Dr. Holloway pronounced \
             him dead within the quarter hour.",
            &["brandy-glass"],
            &[],
            &[
                (VICTORIA, K::revealable(true, 30)),
                (REED, K::revealable(true, 30)),
                (HOLLOWAY, K::revealable(true, 30)),
                (JAMES, K::revealable(false, 35)),
                (SOPHIA, K::revealable(false, 35)),
            ],
        ),
        event(
            "glass-straightened",
            "9:20 PM",
            "The Study",
            &[REED],
            "Before the constable arrived, Reed set the fallen glass upright \
             and squared the tray. Habit of thirty years. He has told no one.",
            &["brandy-glass"],
            &["reed-silence"],
            &[(REED, K::sealed(true))],
        ),
        event(
            "missing-tincture",
            "Earlier that week",
            "Dr. Holloway's Dispensary",
            &[HOLLOWAY],
            "A measure of digitalis tincture is unaccounted for in Dr. \
             Holloway's dispensary book. She noticed the shortfall on Tuesday \
             and told herself she had miscounted.",
            &["digitalis-bottle"],
            &["edmund-illness"],
            &[(HOLLOWAY, K::revealable(true, 75))],
        ),
        event(
            "forced-drawer",
            "9:40 PM",
            "The Study",
            &[],
            "The constable found the lower desk drawer forced and empty. The \
             household understood it to have held Edmund's private papers, \
             among them, it is said, a new will.",
            &["forced-drawer"],
            &[],
            &[
                (VICTORIA, K::revealable(false, 45)),
                (JAMES, K::revealable(false, 55)),
                (REED, K::revealable(false, 50)),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::TrustLevel;

    #[test]
    fn test_sealed_knowledge_never_reveals() {
        let events = murder_night();
        let straightened = events
            .iter()
            .find(|e| e.id == "glass-straightened")
            .expect("event exists");
        assert!(!straightened.revealable_by(&cid(REED), TrustLevel::MAX));
    }

    #[test]
    fn test_argument_unlocks_for_butler_before_brother() {
        let events = murder_night();
        let argument = events
            .iter()
            .find(|e| e.id == "heated-argument")
            .expect("event exists");
        let trust = TrustLevel::new(45);
        assert!(argument.revealable_by(&cid(REED), trust));
        assert!(!argument.revealable_by(&cid(JAMES), trust));
    }

    #[test]
    fn test_every_event_has_knowledge_entries() {
        for event in murder_night() {
            assert!(
                !event.knowledge.is_empty(),
                "event {} has no knowledge map",
                event.id
            );
        }
    }
}
