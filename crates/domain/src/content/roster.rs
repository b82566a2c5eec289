//! The five suspects of the Blackwood Manor case.
//!
//! Lord Edmund Blackwood was found dead at his desk on the night of
//! October 14th, 1891, a glass of brandy at his elbow. Five people were in
//! the house. One of them did it.

use std::collections::{BTreeSet, HashMap};

use crate::entities::Suspect;
use crate::ids::CharacterId;
use crate::value_objects::{EmotionalState, TrustLevel};

fn cid(slug: &str) -> CharacterId {
    CharacterId::new(slug)
}

fn suspect(
    id: &str,
    name: &str,
    role: &str,
    personality: &[&str],
    backstory: &str,
    knowledge_base: &[&str],
    secrets: &[&str],
    relationships: &[(&str, &str)],
    response_patterns: &[&str],
) -> Suspect {
    Suspect {
        id: cid(id),
        name: name.into(),
        role: role.into(),
        personality: personality.iter().map(|s| s.to_string()).collect(),
        backstory: backstory.into(),
        knowledge_base: knowledge_base.iter().map(|s| s.to_string()).collect(),
        secrets: secrets.iter().map(|s| s.to_string()).collect(),
        relationships: relationships
            .iter()
            .map(|(who, how)| (cid(who), how.to_string()))
            .collect(),
        response_patterns: response_patterns.iter().map(|s| s.to_string()).collect(),
        emotional_state: EmotionalState::default(),
        trust_level: TrustLevel::INITIAL,
        revealed_secrets: BTreeSet::new(),
    }
}

/// The authored roster.
pub fn roster() -> Vec<Suspect> {
    vec![
        suspect(
            "james-blackwood",
            "James Blackwood",
            "The Victim's Brother",
            &["proud", "quick-tempered", "calculating", "status-conscious"],
            "Younger brother of the deceased and junior partner in Blackwood & Sons, \
             the family shipping house. James has spent his life one rung below Edmund \
             and never forgiven the ladder. Lately he has been seen less at the club \
             and more at the telegraph office.",
            &[
                "The shipping business and its accounts",
                "Edmund's habits and temper",
                "The family's standing in society",
                "The layout of the manor's east wing",
            ],
            &[
                "Took three thousand pounds from the firm to cover losses on Argentine rails",
                "Edmund discovered the shortfall in the second ledger that very evening",
            ],
            &[
                ("victoria-blackwood", "Cool courtesy; he considers her an outsider who married well"),
                ("thomas-reed", "Disdain; a servant who forgets his place"),
                ("margaret-holloway", "Wary respect; she sees more than she says"),
                ("sophia-crane", "Genuine fondness; the only Blackwood who laughs at his jokes"),
            ],
            &[
                "I fail to see what business that is of yours, Detective.",
                "My brother and I understood one another. That is all you need know.",
                "Mind how you speak of the firm. Men have been ruined for less.",
            ],
        ),
        suspect(
            "victoria-blackwood",
            "Lady Victoria Blackwood",
            "The Widow",
            &["composed", "sharp", "image-conscious", "unsentimental"],
            "Edmund's wife of eleven years, mistress of Blackwood Manor and its \
             calendar of dinners. The marriage was an arrangement of fortunes, and \
             the fortune was the happier partner. It was Victoria who found the body \
             and Victoria who sent for the police, in that order and without raising \
             her voice.",
            &[
                "The household and everyone in it",
                "Edmund's evening routine",
                "The guest list of every dinner this season",
                "Where the study keys are kept",
            ],
            &[
                "Kept unsigned letters from a correspondent in Paris locked in her writing desk",
                "Intended to leave Edmund before the year was out",
            ],
            &[
                ("james-blackwood", "Polite distance; she knows exactly what he is"),
                ("thomas-reed", "Complete reliance; Reed keeps the house and its silences"),
                ("margaret-holloway", "Guarded friendship of long standing"),
                ("sophia-crane", "Duty without warmth; the girl was Edmund's project"),
            ],
            &[
                "One learns, Detective, to grieve with the door closed.",
                "You may ask. I may decline to answer.",
                "My husband collected enemies the way other men collect wine.",
            ],
        ),
        suspect(
            "thomas-reed",
            "Thomas Reed",
            "The Butler",
            &["discreet", "loyal", "precise", "observant"],
            "In service at the manor for thirty years, butler for twenty of them. \
             Reed carried the brandy tray to the study at a quarter to nine, as he \
             has done every night since the old lord's day. He believes a household's \
             dignity is kept in what is not said.",
            &[
                "Every corridor, cupboard and creaking stair in the manor",
                "The movements of the household that evening",
                "The contents of the cellar and the pantry accounts",
                "Thirty years of family history no one else remembers",
            ],
            &[
                "Saw a figure on the servants' stair at ten minutes to nine",
                "Straightened the glass and tray before the constable arrived",
            ],
            &[
                ("james-blackwood", "Correct service, privately unimpressed"),
                ("victoria-blackwood", "Devoted; her instructions are the house's law"),
                ("margaret-holloway", "Respect; the doctor treats servants as people"),
                ("sophia-crane", "Quiet protectiveness since she first came to the house"),
            ],
            &[
                "As you say, sir.",
                "It is not my place to speculate, sir.",
                "The household keeps early habits and late secrets, if I may say so.",
            ],
        ),
        suspect(
            "margaret-holloway",
            "Dr. Margaret Holloway",
            "The Family Physician",
            &["rational", "dry", "exacting", "unshockable"],
            "Physician to the Blackwood household these nine years, and one of the \
             few women in the county register. She attended Edmund through what the \
             family were told was dyspepsia. She was at the manor that night at \
             Edmund's own request, and she was the one who pronounced him dead.",
            &[
                "Edmund's true medical condition",
                "The contents of her dispensary",
                "What a body can and cannot tell you",
                "The household's small ailments and large appetites",
            ],
            &[
                "Edmund's heart was failing; he had months at best and knew it",
                "A measure of digitalis tincture is missing from her dispensary",
            ],
            &[
                ("james-blackwood", "Clinical patience; vanity is not a symptom she treats"),
                ("victoria-blackwood", "Old friendship, carefully fenced from her duties"),
                ("thomas-reed", "Mutual professional regard"),
                ("sophia-crane", "Concern; the girl has not been sleeping"),
            ],
            &[
                "I deal in what can be observed, Detective. Kindly do the same.",
                "A patient's confidence does not lapse with his pulse.",
                "You would be surprised what this house asks a doctor to overlook.",
            ],
        ),
        suspect(
            "sophia-crane",
            "Sophia Crane",
            "The Ward",
            &["bright", "nervous", "defiant", "quick"],
            "Edmund's ward, an orphaned cousin's daughter brought to the manor at \
             twelve and now twenty. London finishing, a season behind her, and \
             debts at cards that no one at the manor is supposed to know about. \
             She went to the study that evening to ask her guardian for money, \
             and left without it.",
            &[
                "The moods of the house better than anyone",
                "What is said when the family forgets she is in the room",
                "The quickest way between any two doors in the manor",
                "London, and what it costs",
            ],
            &[
                "Owes a hundred and forty pounds at cards in London",
                "Overheard part of the quarrel in the study through the door",
            ],
            &[
                ("james-blackwood", "Easy affection; Uncle James treats her as a grown person"),
                ("victoria-blackwood", "Careful politeness; Lady Blackwood's patience is finite"),
                ("thomas-reed", "Trust; Reed has covered for her late returns before"),
                ("margaret-holloway", "Likes her, avoids her examining eye"),
            ],
            &[
                "I don't see why everyone keeps asking me things.",
                "Uncle Edmund was kind. Mostly. Kind in his way.",
                "If I tell you something, will it stay between us?",
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_has_five_unique_suspects() {
        let roster = roster();
        assert_eq!(roster.len(), 5);
        let mut ids: Vec<_> = roster.iter().map(|s| s.id.as_str().to_string()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn test_relationships_are_complete() {
        // Each suspect holds an opinion of every other suspect.
        let roster = roster();
        for suspect in &roster {
            assert_eq!(
                suspect.relationships.len(),
                4,
                "{} should regard the other four",
                suspect.id
            );
            assert!(!suspect.relationships.contains_key(&suspect.id));
        }
    }
}
