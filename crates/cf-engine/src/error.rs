//! Error types for CoinForge
//!
//! Every rejected player action is reported as one of these values. None of
//! them is fatal; the caller decides what feedback to show.

use thiserror::Error;

/// Flip lifecycle rejection
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlipError {
    #[error("A flip is already in progress")]
    FlipInProgress,

    #[error("No flip is pending")]
    NoFlipPending,

    #[error("Forced multiplier x{0} is not one of x1, x2, x4, x10")]
    InvalidMultiplier(u32),
}

/// Wager rejection
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BetError {
    #[error("Bet amount must be positive")]
    NonPositiveAmount,

    #[error("Bet of {amount} exceeds balance {balance}")]
    InsufficientFunds { amount: u64, balance: u64 },

    #[error("Target streak {target} must be above current streak {streak}")]
    TargetNotAhead { target: u64, streak: u64 },

    #[error("A bet is already active")]
    BetAlreadyActive,

    #[error("Cannot place a bet while a flip is in progress")]
    FlipInProgress,
}

/// Shop rejection
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShopError {
    #[error("Unknown item: {0}")]
    UnknownItem(String),

    #[error("Item already owned: {0}")]
    AlreadyOwned(String),

    #[error("Price {price} exceeds balance {balance}")]
    InsufficientFunds { price: u64, balance: u64 },
}

/// Achievement registry error
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Duplicate achievement id: {0}")]
    DuplicateId(String),

    #[error("Invalid achievement definitions: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Configuration error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
