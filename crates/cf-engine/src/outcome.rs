//! Flip outcome and outcome resolution

use serde::{Deserialize, Serialize};

use crate::config::OutcomeConfig;
use crate::rng::RandomSource;

/// Result of a single toss
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlipOutcome {
    Heads,
    Tails,
    /// Coin landed on its edge (1 in 100,000)
    Edge,
}

impl FlipOutcome {
    pub fn is_edge(&self) -> bool {
        matches!(self, Self::Edge)
    }

    /// Display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Heads => "HEADS",
            Self::Tails => "TAILS",
            Self::Edge => "EDGE",
        }
    }

    /// One-letter form for history strips
    pub fn short(&self) -> char {
        match self {
            Self::Heads => 'H',
            Self::Tails => 'T',
            Self::Edge => 'E',
        }
    }
}

impl std::fmt::Display for FlipOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Forcing overrides for a single flip (debug/test controls)
///
/// Only one outcome override should be set at a time. If several are set the
/// priority is EDGE > HEADS > TAILS.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlipOverrides {
    pub force_edge: bool,
    pub force_heads: bool,
    pub force_tails: bool,
    /// Pending multiplier to use instead of rolling one
    pub multiplier: Option<u32>,
}

impl FlipOverrides {
    /// No overrides
    pub fn none() -> Self {
        Self::default()
    }

    pub fn heads() -> Self {
        Self {
            force_heads: true,
            ..Self::default()
        }
    }

    pub fn tails() -> Self {
        Self {
            force_tails: true,
            ..Self::default()
        }
    }

    pub fn edge() -> Self {
        Self {
            force_edge: true,
            ..Self::default()
        }
    }

    /// Force an outcome (any side)
    pub fn forcing(outcome: FlipOutcome) -> Self {
        match outcome {
            FlipOutcome::Heads => Self::heads(),
            FlipOutcome::Tails => Self::tails(),
            FlipOutcome::Edge => Self::edge(),
        }
    }

    /// Builder: force the pending multiplier
    pub fn with_multiplier(mut self, multiplier: u32) -> Self {
        self.multiplier = Some(multiplier);
        self
    }

    /// The forced outcome, if any
    pub fn forced_outcome(&self) -> Option<FlipOutcome> {
        let active = [self.force_edge, self.force_heads, self.force_tails]
            .iter()
            .filter(|f| **f)
            .count();
        if active > 1 {
            log::warn!("Multiple outcome overrides set, using EDGE > HEADS > TAILS priority");
        }

        if self.force_edge {
            Some(FlipOutcome::Edge)
        } else if self.force_heads {
            Some(FlipOutcome::Heads)
        } else if self.force_tails {
            Some(FlipOutcome::Tails)
        } else {
            None
        }
    }
}

/// Decide the flip result
///
/// Draws nothing when an outcome is forced. Otherwise the first draw decides
/// EDGE and, failing that, a second draw splits HEADS/TAILS 50/50.
pub fn resolve_outcome(
    overrides: &FlipOverrides,
    config: &OutcomeConfig,
    rng: &mut dyn RandomSource,
) -> FlipOutcome {
    if let Some(forced) = overrides.forced_outcome() {
        return forced;
    }

    if rng.next_f64() < config.edge_chance {
        return FlipOutcome::Edge;
    }

    if rng.next_f64() > 0.5 {
        FlipOutcome::Heads
    } else {
        FlipOutcome::Tails
    }
}
