//! Investigation progress value object.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Global investigation progress as a 0-100 percentage.
///
/// Progress only moves forward during play; the sole way back to zero is a
/// full game reset. The percentage selects the current narrative phase via
/// [`crate::timeline::PhaseSchedule`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct InvestigationProgress(u8);

impl InvestigationProgress {
    pub const COMPLETE: InvestigationProgress = InvestigationProgress(100);

    /// Build from a raw percentage, clamping into [0, 100].
    pub fn new(percent: u8) -> Self {
        Self(percent.min(100))
    }

    pub fn percent(&self) -> u8 {
        self.0
    }

    /// Advance progress, saturating at 100. Never goes backward.
    #[must_use]
    pub fn advance(self, percent: u8) -> Self {
        Self((self.0.saturating_add(percent)).min(100))
    }

    pub fn is_complete(&self) -> bool {
        self.0 >= 100
    }
}

impl fmt::Display for InvestigationProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl From<u8> for InvestigationProgress {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_caps_at_100() {
        let progress = InvestigationProgress::new(99);
        assert_eq!(progress.advance(1), InvestigationProgress::COMPLETE);
        assert_eq!(progress.advance(25), InvestigationProgress::COMPLETE);
        assert!(progress.advance(1).is_complete());
        assert!(!progress.is_complete());
    }

    #[test]
    fn test_new_clamps() {
        assert_eq!(InvestigationProgress::new(200).percent(), 100);
    }

    #[test]
    fn test_starts_at_zero() {
        assert_eq!(InvestigationProgress::default().percent(), 0);
    }
}
