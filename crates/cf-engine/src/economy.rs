//! Currency balance and reward events
//!
//! Every credit and debit goes through [`apply_delta`]: a debit larger than
//! the balance zeroes it instead of failing.

use serde::{Deserialize, Serialize};

use crate::config::EconomyConfig;

/// `max(0, balance + amount)`
pub fn apply_delta(balance: u64, amount: i64) -> u64 {
    if amount >= 0 {
        balance.saturating_add(amount.unsigned_abs())
    } else {
        balance.saturating_sub(amount.unsigned_abs())
    }
}

/// Lucky find reward for a given pending multiplier
pub fn lucky_find_reward(config: &EconomyConfig, multiplier: u32) -> u64 {
    config.lucky_find_unit.saturating_mul(u64::from(multiplier))
}

/// Currency balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Wallet {
    balance: u64,
}

impl Wallet {
    pub fn new(balance: u64) -> Self {
        Self { balance }
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn is_broke(&self) -> bool {
        self.balance == 0
    }

    pub fn can_afford(&self, amount: u64) -> bool {
        self.balance >= amount
    }

    /// Apply a signed delta, clamping at zero. Returns the new balance.
    pub fn apply(&mut self, amount: i64) -> u64 {
        self.balance = apply_delta(self.balance, amount);
        self.balance
    }

    /// Add currency. Returns the new balance.
    pub fn credit(&mut self, amount: u64) -> u64 {
        self.balance = self.balance.saturating_add(amount);
        self.balance
    }

    /// Remove currency, clamping at zero. Returns the amount actually removed.
    pub fn debit(&mut self, amount: u64) -> u64 {
        let taken = amount.min(self.balance);
        self.balance -= taken;
        taken
    }
}

/// A balance change caused by the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EconomyEvent {
    /// Flat EDGE reward
    EdgeReward { amount: u64 },
    /// Random bonus while extending a streak
    LuckyFind { amount: u64, multiplier: u32 },
    /// First-time achievement unlock
    AchievementReward { id: String, amount: u64 },
    /// Broke with no bet running: bonus instead of a flip
    BankruptcyBonus { amount: u64 },
    /// Cosmetic bought
    Purchase { item: String, price: u64 },
    /// Wager stake taken at placement
    BetStake { amount: u64 },
    /// Wager reached its target
    BetPayout { amount: u64 },
    /// EDGE while a wager was running
    BetJackpot { amount: u64 },
}

impl EconomyEvent {
    /// Signed effect on the balance
    pub fn delta(&self) -> i64 {
        let signed = |v: u64| i64::try_from(v).unwrap_or(i64::MAX);
        match self {
            Self::EdgeReward { amount }
            | Self::LuckyFind { amount, .. }
            | Self::AchievementReward { amount, .. }
            | Self::BankruptcyBonus { amount }
            | Self::BetPayout { amount }
            | Self::BetJackpot { amount } => signed(*amount),
            Self::Purchase { price, .. } => -signed(*price),
            Self::BetStake { amount } => -signed(*amount),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_delta_clamps() {
        assert_eq!(apply_delta(50, -100), 0);
        assert_eq!(apply_delta(50, -50), 0);
        assert_eq!(apply_delta(50, 25), 75);
        assert_eq!(apply_delta(0, i64::MIN), 0);
        assert_eq!(apply_delta(u64::MAX, 1), u64::MAX);
    }

    #[test]
    fn test_debit_never_negative() {
        let mut wallet = Wallet::new(30);
        assert_eq!(wallet.debit(100), 30);
        assert_eq!(wallet.balance(), 0);
        assert!(wallet.is_broke());
        assert_eq!(wallet.debit(5), 0);
    }

    #[test]
    fn test_lucky_find_scales_with_multiplier() {
        let config = EconomyConfig::default();
        assert_eq!(lucky_find_reward(&config, 1), 10);
        assert_eq!(lucky_find_reward(&config, 4), 40);
    }

    #[test]
    fn test_event_delta_sign() {
        assert_eq!(EconomyEvent::EdgeReward { amount: 10_000 }.delta(), 10_000);
        assert_eq!(EconomyEvent::BetStake { amount: 25 }.delta(), -25);
        assert_eq!(
            EconomyEvent::Purchase {
                item: "t_wood".into(),
                price: 1000
            }
            .delta(),
            -1000
        );
    }
}
