//! Trust level value object.
//!
//! Trust gates which timeline events and secrets a suspect will speak about.
//! It only moves in small fixed steps per exchange, so the numeric range is a
//! plain 0-100 integer rather than a float score.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How far a suspect trusts the detective, clamped to 0-100.
///
/// New conversations start at [`TrustLevel::INITIAL`]. Each successful
/// exchange earns a single point; there is no decay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrustLevel(u8);

impl TrustLevel {
    pub const MIN: TrustLevel = TrustLevel(0);
    pub const MAX: TrustLevel = TrustLevel(100);

    /// Starting trust for a fresh conversation.
    pub const INITIAL: TrustLevel = TrustLevel(20);

    /// Build from a raw value, clamping into range.
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Gain trust, saturating at 100.
    #[must_use]
    pub fn gain(self, points: u8) -> Self {
        Self((self.0.saturating_add(points)).min(100))
    }

    /// Lose trust, saturating at 0.
    #[must_use]
    pub fn lose(self, points: u8) -> Self {
        Self(self.0.saturating_sub(points))
    }

    /// Whether this trust level satisfies a required threshold.
    pub fn meets(&self, required: TrustLevel) -> bool {
        *self >= required
    }
}

impl Default for TrustLevel {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl fmt::Display for TrustLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u8> for TrustLevel {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gain_caps_at_100() {
        let trust = TrustLevel::new(99);
        assert_eq!(trust.gain(1), TrustLevel::MAX);
        assert_eq!(trust.gain(50), TrustLevel::MAX);
    }

    #[test]
    fn test_lose_floors_at_zero() {
        let trust = TrustLevel::new(3);
        assert_eq!(trust.lose(10), TrustLevel::MIN);
    }

    #[test]
    fn test_new_clamps_overrange() {
        assert_eq!(TrustLevel::new(250), TrustLevel::MAX);
    }

    #[test]
    fn test_meets_threshold() {
        let trust = TrustLevel::new(40);
        assert!(trust.meets(TrustLevel::new(40)));
        assert!(trust.meets(TrustLevel::new(20)));
        assert!(!trust.meets(TrustLevel::new(41)));
    }
}
