//! Achievements
//!
//! Definitions are data: each carries a [`Condition`] tree evaluated against a
//! [`FlipContext`] after every committed flip. The [`AchievementTracker`]
//! owns the unlocked set and guarantees each reward is reported once.

mod condition;
mod registry;
mod tracker;
mod types;

pub use condition::*;
pub use registry::*;
pub use tracker::*;
pub use types::*;
