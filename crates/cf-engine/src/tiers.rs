//! Streak tiers and milestone headlines

use serde::Serialize;

/// Named rung on the streak ladder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StreakTier {
    pub threshold: u64,
    pub title: &'static str,
    pub icon: &'static str,
}

const fn tier(threshold: u64, title: &'static str, icon: &'static str) -> StreakTier {
    StreakTier {
        threshold,
        title,
        icon,
    }
}

/// Tier shown when there is no streak
pub const DORMANT: StreakTier = tier(0, "Dormant", "💤");

/// Ladder, ascending by threshold
pub const STREAK_TIERS: [StreakTier; 18] = [
    tier(1, "Spark", "🔥"),
    tier(2, "Kindling", "🕯️"),
    tier(3, "Ember", "🪵"),
    tier(4, "Flicker", "🎇"),
    tier(5, "Flame", "🔥"),
    tier(6, "Torch", "🔦"),
    tier(7, "Bonfire", "🏕️"),
    tier(8, "Blaze", "🧨"),
    tier(9, "Ignition", "🚀"),
    tier(10, "Inferno", "🚒"),
    tier(12, "Scorcher", "☀️"),
    tier(15, "Voltage", "⚡"),
    tier(20, "Thunder", "🥁"),
    tier(25, "Hurricane", "🌬️"),
    tier(30, "Void", "🕳️"),
    tier(40, "Cosmos", "🔭"),
    tier(50, "Godlike", "👑"),
    tier(100, "Eternal", "♾️"),
];

/// Highest tier whose threshold is at or below `streak`
pub fn tier_for(streak: u64) -> StreakTier {
    STREAK_TIERS
        .iter()
        .rev()
        .find(|t| streak >= t.threshold)
        .copied()
        .unwrap_or(DORMANT)
}

/// `Some(streak)` if the streak lands exactly on a milestone
pub fn milestone_for(streak: u64, milestones: &[u64]) -> Option<u64> {
    (streak > 0 && milestones.contains(&streak)).then_some(streak)
}

/// Overlay headline for a milestone or an EDGE
pub fn milestone_headline(streak: u64, is_edge: bool) -> &'static str {
    if is_edge {
        "IMPOSSIBLE OUTCOME"
    } else if streak >= 100 {
        "DIVINE INTERVENTION!"
    } else if streak >= 50 {
        "UNSTOPPABLE FORCE!"
    } else if streak >= 25 {
        "LEGENDARY RECORD!"
    } else {
        "NEW HIGH SCORE!"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_lookup() {
        assert_eq!(tier_for(0).title, "Dormant");
        assert_eq!(tier_for(1).title, "Spark");
        assert_eq!(tier_for(11).title, "Inferno");
        assert_eq!(tier_for(12).title, "Scorcher");
        assert_eq!(tier_for(99).title, "Godlike");
        assert_eq!(tier_for(5_000).title, "Eternal");
    }

    #[test]
    fn test_milestones() {
        let milestones = [10, 25, 50];
        assert_eq!(milestone_for(25, &milestones), Some(25));
        assert_eq!(milestone_for(26, &milestones), None);
        assert_eq!(milestone_for(0, &[0]), None);
    }

    #[test]
    fn test_headlines() {
        assert_eq!(milestone_headline(10, false), "NEW HIGH SCORE!");
        assert_eq!(milestone_headline(25, false), "LEGENDARY RECORD!");
        assert_eq!(milestone_headline(100, false), "DIVINE INTERVENTION!");
        assert_eq!(milestone_headline(0, true), "IMPOSSIBLE OUTCOME");
    }
}
