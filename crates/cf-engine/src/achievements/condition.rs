//! Achievement unlock conditions
//!
//! Conditions are plain data so definitions can be loaded from JSON:
//!
//! ```json
//! { "type": "all", "value": [
//!     { "type": "streak_at_least", "value": 10 },
//!     { "type": "multiplier_at_least", "value": 4 }
//! ] }
//! ```

use serde::{Deserialize, Serialize};

use crate::outcome::FlipOutcome;

/// Everything a condition may look at for one committed flip
#[derive(Debug, Clone, Copy)]
pub struct FlipContext<'a> {
    /// Streak after the flip
    pub streak: u64,
    pub outcome: FlipOutcome,
    /// Recent outcomes, most recent first, including this flip
    pub history: &'a [FlipOutcome],
    /// Multiplier applied to this flip
    pub multiplier: u32,
    /// Lifetime flip count, including this flip
    pub total_flips: u64,
    /// Multiplier of the previous committed flip (1 before any flip)
    pub previous_multiplier: u32,
}

/// Predicate over a [`FlipContext`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Condition {
    StreakAtLeast(u64),
    /// Streak of at least `count` on one particular side
    SideStreakAtLeast { side: FlipOutcome, count: u64 },
    OutcomeIs(FlipOutcome),
    MultiplierEquals(u32),
    MultiplierAtLeast(u32),
    TotalFlipsAtLeast(u64),
    /// This flip and the previous one both carried a multiplier
    ChainedMultipliers,
    /// The last `n` outcomes alternate HEADS/TAILS with no EDGE
    AlternatingHistory(usize),
    All(Vec<Condition>),
    Any(Vec<Condition>),
}

impl Condition {
    pub fn evaluate(&self, ctx: &FlipContext<'_>) -> bool {
        match self {
            Self::StreakAtLeast(n) => ctx.streak >= *n,
            Self::SideStreakAtLeast { side, count } => ctx.outcome == *side && ctx.streak >= *count,
            Self::OutcomeIs(side) => ctx.outcome == *side,
            Self::MultiplierEquals(m) => ctx.multiplier == *m,
            Self::MultiplierAtLeast(m) => ctx.multiplier >= *m,
            Self::TotalFlipsAtLeast(n) => ctx.total_flips >= *n,
            Self::ChainedMultipliers => ctx.multiplier > 1 && ctx.previous_multiplier > 1,
            Self::AlternatingHistory(len) => alternates(ctx.history, *len),
            Self::All(conditions) => conditions.iter().all(|c| c.evaluate(ctx)),
            Self::Any(conditions) => conditions.iter().any(|c| c.evaluate(ctx)),
        }
    }

    /// Number of recent outcomes this condition looks at
    pub fn history_needed(&self) -> usize {
        match self {
            Self::AlternatingHistory(len) => *len,
            Self::All(conditions) | Self::Any(conditions) => {
                conditions.iter().map(Condition::history_needed).max().unwrap_or(0)
            }
            _ => 0,
        }
    }
}

fn alternates(history: &[FlipOutcome], len: usize) -> bool {
    if len == 0 || history.len() < len {
        return false;
    }
    let recent = &history[..len];
    recent.iter().all(|o| !o.is_edge()) && recent.windows(2).all(|pair| pair[0] != pair[1])
}
