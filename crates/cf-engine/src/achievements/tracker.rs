//! Unlocked achievement set

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::condition::FlipContext;
use super::registry::AchievementRegistry;
use super::types::{AchievementDef, Rarity};

/// A first-time unlock, ready for display and payment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unlock {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub rarity: Rarity,
    pub reward: u64,
}

impl From<&AchievementDef> for Unlock {
    fn from(def: &AchievementDef) -> Self {
        Self {
            id: def.id.clone(),
            title: def.title.clone(),
            icon: def.icon.clone(),
            rarity: def.rarity,
            reward: def.reward,
        }
    }
}

/// Unlocked ids in unlock order. Only ever grows.
#[derive(Debug, Clone, Default)]
pub struct AchievementTracker {
    order: Vec<String>,
    unlocked: HashSet<String>,
}

impl AchievementTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore persisted ids, dropping duplicates
    pub fn restore(ids: Vec<String>) -> Self {
        let mut tracker = Self::new();
        for id in ids {
            tracker.insert(id);
        }
        tracker
    }

    fn insert(&mut self, id: String) -> bool {
        if !self.unlocked.insert(id.clone()) {
            return false;
        }
        self.order.push(id);
        true
    }

    pub fn is_unlocked(&self, id: &str) -> bool {
        self.unlocked.contains(id)
    }

    /// Unlocked ids, in unlock order
    pub fn ids(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Unlock one definition. `None` if it was already unlocked.
    pub fn unlock(&mut self, def: &AchievementDef) -> Option<Unlock> {
        if !self.insert(def.id.clone()) {
            return None;
        }
        log::info!("Achievement unlocked: {} ({})", def.title, def.rarity);
        Some(Unlock::from(def))
    }

    /// Evaluate every locked achievement against a committed flip
    ///
    /// Returns the new unlocks in registry order. Already unlocked ids are
    /// skipped without evaluating their condition.
    pub fn check_all(&mut self, registry: &AchievementRegistry, ctx: &FlipContext<'_>) -> Vec<Unlock> {
        let mut unlocks = Vec::new();
        for def in registry.iter() {
            if self.is_unlocked(&def.id) || !def.condition.evaluate(ctx) {
                continue;
            }
            if let Some(unlock) = self.unlock(def) {
                unlocks.push(unlock);
            }
        }
        unlocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::FlipOutcome;

    fn ctx(streak: u64, multiplier: u32, history: &[FlipOutcome]) -> FlipContext<'_> {
        FlipContext {
            streak,
            outcome: history[0],
            history,
            multiplier,
            total_flips: 1,
            previous_multiplier: 1,
        }
    }

    #[test]
    fn test_unlock_is_idempotent() {
        let registry = AchievementRegistry::with_builtins();
        let mut tracker = AchievementTracker::new();
        let history = [FlipOutcome::Heads];

        let first = tracker.check_all(&registry, &ctx(1, 1, &history));
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].id, "first_step");
        assert_eq!(first[0].reward, 10);

        assert!(tracker.check_all(&registry, &ctx(1, 1, &history)).is_empty());
        assert!(tracker.unlock(registry.get("first_step").unwrap()).is_none());
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_multiple_unlocks_in_registry_order() {
        let registry = AchievementRegistry::with_builtins();
        let mut tracker = AchievementTracker::new();
        let history = [FlipOutcome::Heads];

        // A fresh x4 start: streak 4
        let unlocks = tracker.check_all(&registry, &ctx(4, 4, &history));
        let ids: Vec<_> = unlocks.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["first_step", "first_spark", "quad_power"]);
        assert_eq!(tracker.ids(), &["first_step", "first_spark", "quad_power"]);
    }

    #[test]
    fn test_restore_dedups() {
        let tracker = AchievementTracker::restore(vec!["zebra".into(), "zebra".into(), "veteran".into()]);
        assert_eq!(tracker.len(), 2);
        assert!(tracker.is_unlocked("veteran"));
    }
}
