//! Game configuration
//!
//! Every section is `#[serde(default)]`, so a config file only needs the
//! values it changes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::achievements::AchievementRegistry;
use crate::error::ConfigError;
use crate::timing::TimingProfile;

/// Outcome probabilities
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutcomeConfig {
    /// Chance of landing on the edge (per flip)
    pub edge_chance: f64,
}

impl Default for OutcomeConfig {
    fn default() -> Self {
        Self {
            edge_chance: 0.00001,
        }
    }
}

/// Pending multiplier odds
///
/// Trigger chance decays with the streak:
/// `base_chance / (1 + streak * decay_per_streak)`, replaced by
/// `capped_chance` once the streak is above `cap_streak`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MultiplierConfig {
    pub base_chance: f64,
    pub decay_per_streak: f64,
    pub cap_streak: u64,
    pub capped_chance: f64,
    /// Tier roll above this gives x10
    pub x10_above: f64,
    /// Tier roll above this (and not x10) gives x4, otherwise x2
    pub x4_above: f64,
}

impl Default for MultiplierConfig {
    fn default() -> Self {
        Self {
            base_chance: 0.3,
            decay_per_streak: 0.1,
            cap_streak: 200,
            capped_chance: 0.001,
            x10_above: 0.90,
            x4_above: 0.70,
        }
    }
}

/// Currency rewards and costs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    /// Balance of a brand new save
    pub starting_cash: u64,
    /// Flat reward for an EDGE
    pub edge_reward: u64,
    /// Chance of a lucky find on each extending flip
    pub lucky_find_chance: f64,
    /// Lucky find pays `unit * pending multiplier`
    pub lucky_find_unit: u64,
    /// Granted instead of a flip when broke with no bet running
    pub bankruptcy_bonus: u64,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            starting_cash: 100,
            edge_reward: 10_000,
            lucky_find_chance: 0.05,
            lucky_find_unit: 10,
            bankruptcy_bonus: 100,
        }
    }
}

/// Wager odds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WagerConfig {
    /// Payout grows by this factor per streak step (below the fair 2.0)
    pub payout_base: f64,
    /// EDGE during a bet pays the potential payout times this
    pub edge_jackpot_multiplier: u64,
}

impl Default for WagerConfig {
    fn default() -> Self {
        Self {
            payout_base: 1.9,
            edge_jackpot_multiplier: 10,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub outcome: OutcomeConfig,
    pub multiplier: MultiplierConfig,
    pub economy: EconomyConfig,
    pub wager: WagerConfig,
    /// Number of recent outcomes kept for achievement checks
    pub history_len: usize,
    /// Streak values that trigger a milestone celebration
    pub milestones: Vec<u64>,
    pub timing: TimingProfile,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            outcome: OutcomeConfig::default(),
            multiplier: MultiplierConfig::default(),
            economy: EconomyConfig::default(),
            wager: WagerConfig::default(),
            history_len: 6,
            milestones: vec![10, 25, 50, 100, 200, 500, 1000],
            timing: TimingProfile::Normal,
        }
    }
}

impl GameConfig {
    /// Config for simulations (no presentation delays)
    pub fn simulation() -> Self {
        Self {
            timing: TimingProfile::Instant,
            ..Self::default()
        }
    }

    /// Load from a `.json`, `.yaml` or `.yml` file and validate
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&content)?,
            _ => Self::from_json(&content)?,
        };
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_yml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Export as pretty JSON
    pub fn export_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Check every value against the built-in achievement set
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_for(&AchievementRegistry::with_builtins())
    }

    /// Check every probability and factor is in range, and that the history
    /// is long enough for every condition in `registry`
    pub fn validate_for(&self, registry: &AchievementRegistry) -> Result<(), ConfigError> {
        let probabilities = [
            ("outcome.edge_chance", self.outcome.edge_chance),
            ("multiplier.base_chance", self.multiplier.base_chance),
            ("multiplier.capped_chance", self.multiplier.capped_chance),
            ("multiplier.x10_above", self.multiplier.x10_above),
            ("multiplier.x4_above", self.multiplier.x4_above),
            ("economy.lucky_find_chance", self.economy.lucky_find_chance),
        ];
        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        if self.multiplier.x4_above > self.multiplier.x10_above {
            return Err(ConfigError::Invalid(
                "multiplier.x4_above must not exceed multiplier.x10_above".into(),
            ));
        }
        if self.multiplier.decay_per_streak < 0.0 {
            return Err(ConfigError::Invalid(
                "multiplier.decay_per_streak must not be negative".into(),
            ));
        }
        if self.wager.payout_base <= 0.0 {
            return Err(ConfigError::Invalid(
                "wager.payout_base must be positive".into(),
            ));
        }
        if self.history_len == 0 {
            return Err(ConfigError::Invalid("history_len must be at least 1".into()));
        }
        let needed = registry.history_needed();
        if self.history_len < needed {
            return Err(ConfigError::Invalid(format!(
                "history_len must be at least {} for the achievement set, got {}",
                needed, self.history_len
            )));
        }
        Ok(())
    }
}
