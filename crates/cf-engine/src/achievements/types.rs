//! Achievement definitions and the built-in set

use serde::{Deserialize, Serialize};

use super::condition::Condition;
use crate::outcome::FlipOutcome;

/// Achievement rarity, in ascending order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
    Mythic,
}

impl Rarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Common => "COMMON",
            Self::Rare => "RARE",
            Self::Epic => "EPIC",
            Self::Legendary => "LEGENDARY",
            Self::Mythic => "MYTHIC",
        }
    }
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable achievement definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementDef {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub rarity: Rarity,
    /// Currency paid once on first unlock
    #[serde(default)]
    pub reward: u64,
    /// Hidden from listings until unlocked
    #[serde(default)]
    pub secret: bool,
    pub condition: Condition,
}

impl AchievementDef {
    pub fn new(
        id: &str,
        title: &str,
        description: &str,
        icon: &str,
        rarity: Rarity,
        reward: u64,
        condition: Condition,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            rarity,
            reward,
            secret: false,
            condition,
        }
    }

    /// Mark as secret
    pub fn secret(mut self) -> Self {
        self.secret = true;
        self
    }
}

/// The built-in achievement set, in registry order
pub fn builtin_achievements() -> Vec<AchievementDef> {
    use Condition::*;
    use Rarity::*;

    vec![
        AchievementDef::new("first_step", "First Step", "Start a streak", "👣", Common, 10, StreakAtLeast(1)),
        AchievementDef::new("first_spark", "First Spark", "Reach a streak of 3", "✨", Common, 25, StreakAtLeast(3)),
        AchievementDef::new("coin_master", "Coin Master", "Reach a streak of 10", "🪙", Rare, 250, StreakAtLeast(10)),
        AchievementDef::new("lucky_break", "Lucky Break", "Reach a streak of 25", "🍀", Epic, 1_000, StreakAtLeast(25)),
        AchievementDef::new("eternal_flame", "Eternal Flame", "Reach a streak of 50", "🔥", Legendary, 5_000, StreakAtLeast(50)),
        AchievementDef::new("centurion", "Centurion", "Reach a streak of 100", "💯", Mythic, 25_000, StreakAtLeast(100)),
        AchievementDef::new(
            "golden_age",
            "Golden Age",
            "Reach a HEADS streak of 10",
            "👑",
            Rare,
            500,
            SideStreakAtLeast {
                side: FlipOutcome::Heads,
                count: 10,
            },
        ),
        AchievementDef::new(
            "tails_never_fails",
            "Tails Never Fails",
            "Reach a TAILS streak of 10",
            "🦊",
            Rare,
            500,
            SideStreakAtLeast {
                side: FlipOutcome::Tails,
                count: 10,
            },
        ),
        AchievementDef::new("double_trouble", "Double Trouble", "Land a x2 multiplier", "✌️", Common, 20, MultiplierEquals(2)),
        AchievementDef::new("quad_power", "Quad Power", "Land a x4 multiplier", "🍀", Rare, 100, MultiplierEquals(4)),
        AchievementDef::new("multiplier_hunter", "Multiplier Hunter", "Land a x10 multiplier", "🎯", Epic, 1_000, MultiplierAtLeast(10)),
        AchievementDef::new(
            "chain_reaction",
            "Chain Reaction",
            "Land multipliers on two flips in a row",
            "⛓️",
            Epic,
            750,
            ChainedMultipliers,
        ),
        AchievementDef::new("zebra", "Zebra", "Alternate HEADS and TAILS six times", "🦓", Rare, 300, AlternatingHistory(6)),
        AchievementDef::new("veteran", "Veteran", "Flip 100 coins", "🎖️", Common, 100, TotalFlipsAtLeast(100)),
        AchievementDef::new("marathon", "Marathon", "Flip 1,000 coins", "🏃", Rare, 1_000, TotalFlipsAtLeast(1_000)),
        AchievementDef::new(
            "edge_lord",
            "Edge Lord",
            "Land the coin on its edge",
            "🌀",
            Mythic,
            50_000,
            OutcomeIs(FlipOutcome::Edge),
        )
        .secret(),
    ]
}
