//! Presentation timing profiles
//!
//! The engine never waits. These values tell a presentation layer how long to
//! hold between `begin_flip` and `commit_flip` and when to pop overlays.

use serde::{Deserialize, Serialize};

/// Timing profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingProfile {
    /// Normal gameplay timing
    #[default]
    Normal,
    /// Fast mode (half the delays)
    Turbo,
    /// No delays (simulation, tests)
    Instant,
}

impl TimingProfile {
    pub fn timing(&self) -> RevealTiming {
        RevealTiming::from_profile(*self)
    }
}

/// Staged reveal delays, all in milliseconds from the start of the flip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealTiming {
    /// When a pending multiplier pops up
    pub multiplier_reveal_ms: u64,
    /// When the outcome is committed and shown
    pub result_reveal_ms: u64,
    /// Delay after the result before a milestone overlay
    pub milestone_delay_ms: u64,
    /// How long an achievement toast stays up
    pub toast_ms: u64,
}

impl RevealTiming {
    pub fn normal() -> Self {
        Self {
            multiplier_reveal_ms: 300,
            result_reveal_ms: 1200,
            milestone_delay_ms: 600,
            toast_ms: 4000,
        }
    }

    pub fn turbo() -> Self {
        let normal = Self::normal();
        Self {
            multiplier_reveal_ms: normal.multiplier_reveal_ms / 2,
            result_reveal_ms: normal.result_reveal_ms / 2,
            milestone_delay_ms: normal.milestone_delay_ms / 2,
            toast_ms: normal.toast_ms / 2,
        }
    }

    pub fn instant() -> Self {
        Self {
            multiplier_reveal_ms: 0,
            result_reveal_ms: 0,
            milestone_delay_ms: 0,
            toast_ms: 0,
        }
    }

    pub fn from_profile(profile: TimingProfile) -> Self {
        match profile {
            TimingProfile::Normal => Self::normal(),
            TimingProfile::Turbo => Self::turbo(),
            TimingProfile::Instant => Self::instant(),
        }
    }

    /// Time between the multiplier pop and the result
    pub fn result_after_multiplier_ms(&self) -> u64 {
        self.result_reveal_ms.saturating_sub(self.multiplier_reveal_ms)
    }
}

impl Default for RevealTiming {
    fn default() -> Self {
        Self::normal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiplier_shows_before_result() {
        for profile in [TimingProfile::Normal, TimingProfile::Turbo] {
            let t = profile.timing();
            assert!(t.multiplier_reveal_ms < t.result_reveal_ms);
        }
    }

    #[test]
    fn test_turbo_is_faster() {
        assert!(RevealTiming::turbo().result_reveal_ms < RevealTiming::normal().result_reveal_ms);
        assert_eq!(RevealTiming::instant().result_after_multiplier_ms(), 0);
    }
}
