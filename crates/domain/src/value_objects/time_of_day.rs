//! Narrative time-of-day labels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse time label used for narrative framing.
///
/// The case plays out over a single night at the manor, so phases walk from
/// evening through to dawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    #[default]
    Evening,
    Night,
    LateNight,
    Dawn,
}

impl TimeOfDay {
    pub fn display_name(&self) -> &'static str {
        match self {
            TimeOfDay::Evening => "Evening",
            TimeOfDay::Night => "Night",
            TimeOfDay::LateNight => "Late Night",
            TimeOfDay::Dawn => "Dawn",
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
