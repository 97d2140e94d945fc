//! Streak state machine
//!
//! ```text
//!                match (or fresh start)
//!   ┌───────────────────────────────────────┐
//!   │   count = (count + 1) * multiplier     │
//!   ▼                                        │
//! [count, side] ──── mismatch ────► [0, none]   (broke, multiplier wasted)
//!        │
//!        └──────── EDGE ──────────► [0, none]   (edge_hit, not a break)
//! ```
//!
//! `high_score` only ever grows.

use serde::{Deserialize, Serialize};

use crate::outcome::FlipOutcome;

/// Streaks of this length or shorter never trigger a record celebration
const TRIVIAL_STREAK: u64 = 2;

/// Current streak and best streak
///
/// Invariant: `side` is `None` exactly when `count == 0`, and `side` is
/// never `Edge`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StreakState {
    count: u64,
    side: Option<FlipOutcome>,
    high_score: u64,
}

impl StreakState {
    /// Empty streak
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty streak with a known best
    pub fn with_high_score(high_score: u64) -> Self {
        Self {
            high_score,
            ..Self::default()
        }
    }

    /// A running streak. Normalises to an empty streak if `count` is 0 or
    /// `side` is `Edge`.
    pub fn running(count: u64, side: FlipOutcome, high_score: u64) -> Self {
        if count == 0 || side.is_edge() {
            return Self::with_high_score(high_score);
        }
        Self {
            count,
            side: Some(side),
            high_score: high_score.max(count),
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn side(&self) -> Option<FlipOutcome> {
        self.side
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn is_active(&self) -> bool {
        self.count > 0
    }

    /// Does `outcome` continue this streak? A fresh start always does.
    pub fn continues_with(&self, outcome: FlipOutcome) -> bool {
        !outcome.is_edge() && (self.count == 0 || self.side == Some(outcome))
    }
}

/// Result of applying one flip to the streak
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakTransition {
    pub next: StreakState,
    /// A running streak ended on a mismatch
    pub broke: bool,
    /// The flip was an EDGE (streak reset, not counted as a break)
    pub edge_hit: bool,
    /// The flip matched and the streak was already running
    pub extended: bool,
}

impl StreakTransition {
    /// The flip matched (fresh start or extension)
    pub fn matched(&self) -> bool {
        !self.broke && !self.edge_hit
    }
}

/// Apply one committed flip to the streak
pub fn resolve_flip(current: &StreakState, outcome: FlipOutcome, multiplier: u32) -> StreakTransition {
    if outcome.is_edge() {
        return StreakTransition {
            next: StreakState::with_high_score(current.high_score),
            broke: false,
            edge_hit: true,
            extended: false,
        };
    }

    if current.continues_with(outcome) {
        let count = current
            .count
            .saturating_add(1)
            .saturating_mul(u64::from(multiplier.max(1)));
        return StreakTransition {
            next: StreakState {
                count,
                side: Some(outcome),
                high_score: current.high_score.max(count),
            },
            broke: false,
            edge_hit: false,
            extended: current.count > 0,
        };
    }

    StreakTransition {
        next: StreakState::with_high_score(current.high_score),
        broke: true,
        edge_hit: false,
        extended: false,
    }
}

/// One-shot latch for the "new high score" celebration
///
/// Fires at most once per continuous climb above the previous record and
/// re-arms when the streak breaks or an EDGE resets it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScoreLatch {
    shown: bool,
}

impl HighScoreLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe a transition. Returns `true` if the celebration should fire.
    pub fn observe(&mut self, previous: &StreakState, transition: &StreakTransition) -> bool {
        if transition.broke || transition.edge_hit {
            self.shown = false;
            return false;
        }

        let count = transition.next.count;
        if !self.shown && count > previous.high_score && count > TRIVIAL_STREAK {
            self.shown = true;
            return true;
        }
        false
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }
}
