//! Session statistics (in-memory only)

use serde::{Deserialize, Serialize};

use crate::economy::EconomyEvent;
use crate::outcome::FlipOutcome;
use crate::wager::BetSettlement;

/// Session statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub flips: u64,
    pub heads: u64,
    pub tails: u64,
    pub edges: u64,
    pub breaks: u64,
    pub multipliers_triggered: u64,
    pub cash_earned: u64,
    pub cash_spent: u64,
    pub bets_won: u64,
    pub bets_lost: u64,
    pub achievements_unlocked: u64,
    pub best_streak: u64,
}

impl SessionStats {
    /// Share of HEADS among non-EDGE flips, in percent
    pub fn heads_ratio(&self) -> f64 {
        let sided = self.heads + self.tails;
        if sided > 0 {
            (self.heads as f64 / sided as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Net currency change over the session
    pub fn net_cash(&self) -> i64 {
        let signed = |v: u64| i64::try_from(v).unwrap_or(i64::MAX);
        signed(self.cash_earned).saturating_sub(signed(self.cash_spent))
    }

    pub(crate) fn record_flip(&mut self, outcome: FlipOutcome, multiplier: u32, broke: bool, streak: u64) {
        self.flips += 1;
        match outcome {
            FlipOutcome::Heads => self.heads += 1,
            FlipOutcome::Tails => self.tails += 1,
            FlipOutcome::Edge => self.edges += 1,
        }
        if broke {
            self.breaks += 1;
        }
        if multiplier > 1 {
            self.multipliers_triggered += 1;
        }
        self.best_streak = self.best_streak.max(streak);
    }

    pub(crate) fn record_event(&mut self, event: &EconomyEvent) {
        let delta = event.delta();
        if delta >= 0 {
            self.cash_earned = self.cash_earned.saturating_add(delta.unsigned_abs());
        } else {
            self.cash_spent = self.cash_spent.saturating_add(delta.unsigned_abs());
        }
    }

    pub(crate) fn record_settlement(&mut self, settlement: &BetSettlement) {
        if settlement.is_win() {
            self.bets_won += 1;
        } else {
            self.bets_lost += 1;
        }
    }

    pub(crate) fn record_unlocks(&mut self, count: usize) {
        self.achievements_unlocked += count as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_heads_ratio_ignores_edges() {
        let mut stats = SessionStats::default();
        assert_relative_eq!(stats.heads_ratio(), 0.0);

        stats.record_flip(FlipOutcome::Heads, 1, false, 1);
        stats.record_flip(FlipOutcome::Tails, 1, true, 1);
        stats.record_flip(FlipOutcome::Edge, 1, false, 0);
        assert_relative_eq!(stats.heads_ratio(), 50.0);
        assert_eq!(stats.flips, 3);
        assert_eq!(stats.breaks, 1);
    }

    #[test]
    fn test_cash_flow() {
        let mut stats = SessionStats::default();
        stats.record_event(&EconomyEvent::EdgeReward { amount: 10_000 });
        stats.record_event(&EconomyEvent::BetStake { amount: 400 });
        assert_eq!(stats.cash_earned, 10_000);
        assert_eq!(stats.cash_spent, 400);
        assert_eq!(stats.net_cash(), 9_600);
    }
}
