//! Curated phrase tables for the moderation classifier.
//!
//! This is a denylist, not a security boundary: it exists to keep the
//! seance-parlor tone of the game intact, not to catch every possible
//! phrasing. Entries are matched lowercase; phrases shorter than ten
//! characters only fire on word boundaries (see `moderation::classify`).

use super::Severity;

/// An abusive phrase with its severity bucket.
pub struct LexiconEntry {
    pub phrase: &'static str,
    pub severity: Severity,
}

const fn entry(phrase: &'static str, severity: Severity) -> LexiconEntry {
    LexiconEntry { phrase, severity }
}

/// Abusive phrases. High = threats and the strongest profanity, Medium =
/// direct insults and commands, Low = mild period-appropriate cursing.
pub const ABUSIVE: &[LexiconEntry] = &[
    // High - threats, the unforgivable
    entry("kill yourself", Severity::High),
    entry("i will kill you", Severity::High),
    entry("i'll kill you", Severity::High),
    entry("you deserve to die", Severity::High),
    entry("fuck you", Severity::High),
    entry("piece of shit", Severity::High),
    // Medium - direct insults and shut-up-class commands
    entry("shut up", Severity::Medium),
    entry("shut your mouth", Severity::Medium),
    entry("idiot", Severity::Medium),
    entry("stupid", Severity::Medium),
    entry("moron", Severity::Medium),
    entry("imbecile", Severity::Medium),
    entry("pathetic", Severity::Medium),
    entry("dumbass", Severity::Medium),
    entry("i hate you", Severity::Medium),
    entry("you are useless", Severity::Medium),
    entry("worthless", Severity::Medium),
    // Low - mild cursing
    entry("damn", Severity::Low),
    entry("hell", Severity::Low),
    entry("bastard", Severity::Low),
    entry("bloody fool", Severity::Low),
    entry("curse you", Severity::Low),
];

/// Off-topic phrases: modern anachronisms and parlor small talk that has no
/// place in a murder inquiry.
pub const IRRELEVANT: &[&str] = &[
    "favorite color",
    "favourite colour",
    "favorite food",
    "what's the weather",
    "tell me a joke",
    "sing a song",
    "play a game",
    "do you like music",
    "ice cream",
    "pizza",
    "football",
    "video game",
    "television",
    "computer",
    "internet",
    "smartphone",
    "bitcoin",
];

/// In-character refusal lines for abusive messages, keyed by severity.
pub fn refusal_pool(severity: Severity) -> &'static [&'static str] {
    match severity {
        Severity::High => &[
            "How dare you address me so. This conversation is at an end.",
            "You forget yourself entirely, Detective. Leave me.",
            "There is a body in this house and you choose to make threats. We are done.",
        ],
        Severity::Medium => &[
            "I shall not dignify that with a reply. Compose yourself, Detective.",
            "If you cannot keep a civil tongue, we are finished here.",
            "I am not accustomed to being addressed in that fashion.",
        ],
        Severity::Low => &[
            "Mind your language, if you please. This is a house of mourning.",
            "Such talk does you no credit, Detective.",
        ],
    }
}

/// In-character deflection lines for off-topic messages.
pub const DEFLECTION_POOL: &[&str] = &[
    "I hardly see what that has to do with the matter at hand, Detective.",
    "There is a murderer under this roof and you wish to discuss that?",
    "Perhaps we might keep to the business of the evening.",
    "An odd question to put to a grieving household. Ask me something sensible.",
];
