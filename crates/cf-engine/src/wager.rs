//! Streak wagers
//!
//! The player stakes currency on the streak reaching a target. The stake
//! leaves the balance at placement; settlement happens once per committed
//! flip while the bet is active.

use serde::{Deserialize, Serialize};

use crate::config::WagerConfig;
use crate::economy::Wallet;
use crate::error::BetError;
use crate::outcome::FlipOutcome;

/// The single open wager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveBet {
    pub amount: u64,
    pub target_streak: u64,
    pub start_streak: u64,
    pub potential_payout: u64,
}

/// `floor(amount * base^steps)` with `steps = max(1, target - streak)`
pub fn potential_payout(amount: u64, streak: u64, target_streak: u64, config: &WagerConfig) -> u64 {
    let steps = target_streak.saturating_sub(streak).max(1);
    let steps = i32::try_from(steps).unwrap_or(i32::MAX);
    // `as` saturates on overflow
    (amount as f64 * config.payout_base.powi(steps)).floor() as u64
}

/// Build a wager, or explain why it is rejected
pub fn place_bet(
    balance: u64,
    streak: u64,
    amount: u64,
    target_streak: u64,
    config: &WagerConfig,
) -> Result<ActiveBet, BetError> {
    if amount == 0 {
        return Err(BetError::NonPositiveAmount);
    }
    if amount > balance {
        return Err(BetError::InsufficientFunds { amount, balance });
    }
    if target_streak <= streak {
        return Err(BetError::TargetNotAhead {
            target: target_streak,
            streak,
        });
    }

    Ok(ActiveBet {
        amount,
        target_streak,
        start_streak: streak,
        potential_payout: potential_payout(amount, streak, target_streak, config),
    })
}

/// How an active bet ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BetSettlement {
    /// Target reached
    Won { bet: ActiveBet, payout: u64 },
    /// EDGE while the bet was running
    Jackpot { bet: ActiveBet, payout: u64 },
    /// Streak broke before the target
    Lost { bet: ActiveBet },
}

impl BetSettlement {
    /// Currency paid out (0 for a loss)
    pub fn payout(&self) -> u64 {
        match self {
            Self::Won { payout, .. } | Self::Jackpot { payout, .. } => *payout,
            Self::Lost { .. } => 0,
        }
    }

    pub fn bet(&self) -> &ActiveBet {
        match self {
            Self::Won { bet, .. } | Self::Jackpot { bet, .. } | Self::Lost { bet } => bet,
        }
    }

    pub fn is_win(&self) -> bool {
        !matches!(self, Self::Lost { .. })
    }
}

/// Evaluate an active bet against a committed flip
///
/// Returns `None` while the streak is still climbing toward the target.
pub fn settle(
    bet: &ActiveBet,
    outcome: FlipOutcome,
    previous_streak: u64,
    new_streak: u64,
    config: &WagerConfig,
) -> Option<BetSettlement> {
    if outcome.is_edge() {
        return Some(BetSettlement::Jackpot {
            bet: *bet,
            payout: bet
                .potential_payout
                .saturating_mul(config.edge_jackpot_multiplier),
        });
    }
    if new_streak >= bet.target_streak {
        return Some(BetSettlement::Won {
            bet: *bet,
            payout: bet.potential_payout,
        });
    }
    if new_streak == 0 && previous_streak > 0 {
        return Some(BetSettlement::Lost { bet: *bet });
    }
    None
}

/// Holds at most one active bet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WagerBook {
    active: Option<ActiveBet>,
}

impl WagerBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a persisted bet
    pub fn with_active(active: Option<ActiveBet>) -> Self {
        Self { active }
    }

    pub fn active(&self) -> Option<&ActiveBet> {
        self.active.as_ref()
    }

    pub fn has_active(&self) -> bool {
        self.active.is_some()
    }

    /// Validate, debit the stake and open the bet
    pub fn place(
        &mut self,
        wallet: &mut Wallet,
        streak: u64,
        amount: u64,
        target_streak: u64,
        config: &WagerConfig,
    ) -> Result<ActiveBet, BetError> {
        if self.active.is_some() {
            return Err(BetError::BetAlreadyActive);
        }

        let bet = place_bet(wallet.balance(), streak, amount, target_streak, config)?;
        wallet.debit(bet.amount);
        self.active = Some(bet);

        log::info!(
            "Bet placed: {} on streak {} -> {} (pays {})",
            bet.amount,
            bet.start_streak,
            bet.target_streak,
            bet.potential_payout
        );
        Ok(bet)
    }

    /// Settle against a committed flip, clearing the bet when it resolves
    pub fn settle(
        &mut self,
        outcome: FlipOutcome,
        previous_streak: u64,
        new_streak: u64,
        config: &WagerConfig,
    ) -> Option<BetSettlement> {
        let bet = self.active.as_ref()?;
        let settlement = settle(bet, outcome, previous_streak, new_streak, config)?;
        self.active = None;

        log::info!("Bet settled: {:?}", settlement);
        Some(settlement)
    }
}
