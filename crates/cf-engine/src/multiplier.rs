//! Pending multiplier resolution
//!
//! A multiplier is rolled before the outcome is revealed. It is worth more on
//! short streaks and becomes very rare on long ones.

use crate::config::MultiplierConfig;
use crate::rng::RandomSource;

/// No multiplier
pub const NO_MULTIPLIER: u32 = 1;

/// Every multiplier value the resolver can produce
pub const MULTIPLIER_VALUES: [u32; 4] = [1, 2, 4, 10];

/// Chance that a multiplier triggers at the given streak
pub fn trigger_chance(streak: u64, config: &MultiplierConfig) -> f64 {
    if streak > config.cap_streak {
        return config.capped_chance;
    }
    config.base_chance / (1.0 + streak as f64 * config.decay_per_streak)
}

/// Map a tier roll to a triggered multiplier (x2 70%, x4 20%, x10 10%)
pub fn tier_for_roll(roll: f64, config: &MultiplierConfig) -> u32 {
    if roll > config.x10_above {
        10
    } else if roll > config.x4_above {
        4
    } else {
        2
    }
}

/// Decide the pending multiplier for the next flip
///
/// An override is returned verbatim without drawing. Otherwise one draw
/// decides whether a multiplier triggers and a second picks the tier.
pub fn resolve_multiplier(
    streak: u64,
    override_multiplier: Option<u32>,
    config: &MultiplierConfig,
    rng: &mut dyn RandomSource,
) -> u32 {
    if let Some(forced) = override_multiplier {
        return forced;
    }

    if rng.next_f64() < trigger_chance(streak, config) {
        let multiplier = tier_for_roll(rng.next_f64(), config);
        log::debug!("Multiplier x{} triggered at streak {}", multiplier, streak);
        multiplier
    } else {
        NO_MULTIPLIER
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{ChaChaSource, ScriptedSource};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_chance_pinned_values() {
        let config = MultiplierConfig::default();
        assert_abs_diff_eq!(trigger_chance(0, &config), 0.3, epsilon = 1e-12);
        assert_abs_diff_eq!(trigger_chance(50, &config), 0.05, epsilon = 1e-12);
        assert_abs_diff_eq!(trigger_chance(200, &config), 0.3 / 21.0, epsilon = 1e-12);
        assert_abs_diff_eq!(trigger_chance(201, &config), 0.001, epsilon = 1e-12);
        assert_abs_diff_eq!(trigger_chance(10_000, &config), 0.001, epsilon = 1e-12);
    }

    #[test]
    fn test_chance_decreases_with_streak() {
        let config = MultiplierConfig::default();
        let mut last = f64::MAX;
        for streak in 0..=250 {
            let chance = trigger_chance(streak, &config);
            assert!(chance <= last);
            last = chance;
        }
    }

    #[test]
    fn test_tier_split() {
        let config = MultiplierConfig::default();
        assert_eq!(tier_for_roll(0.95, &config), 10);
        assert_eq!(tier_for_roll(0.90, &config), 4);
        assert_eq!(tier_for_roll(0.75, &config), 4);
        assert_eq!(tier_for_roll(0.70, &config), 2);
        assert_eq!(tier_for_roll(0.0, &config), 2);
    }

    #[test]
    fn test_override_verbatim() {
        let config = MultiplierConfig::default();
        let mut rng = ScriptedSource::new(vec![0.0, 0.99]);
        assert_eq!(resolve_multiplier(500, Some(4), &config, &mut rng), 4);
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_trigger_and_miss() {
        let config = MultiplierConfig::default();

        let mut rng = ScriptedSource::new(vec![0.1, 0.95]);
        assert_eq!(resolve_multiplier(0, None, &config, &mut rng), 10);

        let mut rng = ScriptedSource::new(vec![0.31]);
        assert_eq!(resolve_multiplier(0, None, &config, &mut rng), NO_MULTIPLIER);
        assert_eq!(rng.draws(), 1);
    }

    #[test]
    fn test_only_known_values() {
        let config = MultiplierConfig::default();
        let mut rng = ChaChaSource::from_seed(99);
        for streak in 0..500 {
            let m = resolve_multiplier(streak % 50, None, &config, &mut rng);
            assert!(MULTIPLIER_VALUES.contains(&m));
        }
    }
}
