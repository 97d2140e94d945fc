//! # cf-engine: Streak and reward engine for CoinForge
//!
//! A deterministic state machine for a chance-based coin-flip game: outcome
//! and multiplier rolls, streak accumulation, currency, wagers, achievements
//! and cosmetic purchases. Presentation (coin animation, sound, overlays)
//! stays outside and consumes [`Cue`]s and [`FlipReport`]s.
//!
//! ## Features
//!
//! - **Two-phase flips**: `begin_flip` rolls, `commit_flip` applies, so a
//!   presentation delay can sit in between
//! - **Multipliers**: x2/x4/x10, rarer the longer the streak
//! - **Economy**: EDGE reward, lucky finds, bankruptcy bonus, clamped debits
//! - **Wagers**: one active bet on reaching a target streak
//! - **Achievements**: data-driven conditions, rewards paid once
//! - **Auto-spin**: continuous flipping with a clean stop
//!
//! ## Architecture
//!
//! ```text
//! FlipEngine
//!     │
//!     ├── RandomSource  (ChaCha or scripted)
//!     ├── KeyValueStore (cf-state save slots)
//!     ├── FeedbackSink  (cues, mute)
//!     └── AchievementRegistry
//!           │
//!           v
//!     PendingFlip → FlipReport
//! ```

pub mod achievements;
pub mod config;
pub mod economy;
pub mod engine;
pub mod error;
pub mod feedback;
pub mod history;
pub mod multiplier;
pub mod outcome;
pub mod rng;
pub mod shared;
pub mod shop;
pub mod stats;
pub mod streak;
pub mod tiers;
pub mod timing;
pub mod wager;

pub use achievements::*;
pub use config::*;
pub use economy::*;
pub use engine::*;
pub use error::*;
pub use feedback::*;
pub use history::*;
pub use multiplier::*;
pub use outcome::*;
pub use rng::*;
pub use shared::*;
pub use shop::*;
pub use stats::*;
pub use streak::*;
pub use tiers::*;
pub use timing::*;
pub use wager::*;
