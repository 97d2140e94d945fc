//! Flip Engine: Two-phase flip lifecycle over the streak and reward engines
//!
//! ```text
//! begin_flip ──► PendingFlip (outcome, multiplier, lucky roll)
//!                    │   presentation delay (caller owned)
//! commit_flip ◄──────┘
//!    streak ─► high-score latch ─► counters ─► economy ─► wager ─► achievements ─► persist
//! ```
//!
//! All randomness for a flip is drawn in `begin_flip`, so `commit_flip` is a
//! pure function of the pending flip and the current state.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use cf_state::{
    BoxedStore, KeyValueStore, MemoryStore, PlayerProfile, ProfileError, SaveSlot, SlotBatch,
    StoreResult, load_slot, load_slot_or,
};

use crate::achievements::{AchievementRegistry, AchievementTracker, FlipContext, Unlock};
use crate::config::GameConfig;
use crate::economy::{EconomyEvent, Wallet, lucky_find_reward};
use crate::error::{BetError, FlipError, ShopError};
use crate::feedback::{BoxedFeedbackSink, Cue, FeedbackSink, NullFeedback, RevealRarity};
use crate::history::FlipHistory;
use crate::multiplier::{MULTIPLIER_VALUES, NO_MULTIPLIER, resolve_multiplier};
use crate::outcome::{FlipOutcome, FlipOverrides, resolve_outcome};
use crate::rng::{BoxedRandomSource, ChaChaSource, RandomSource};
use crate::shop::{Inventory, ShopItem};
use crate::stats::SessionStats;
use crate::streak::{HighScoreLatch, StreakState, resolve_flip};
use crate::tiers::{StreakTier, milestone_for, tier_for};
use crate::timing::{RevealTiming, TimingProfile};
use crate::wager::{ActiveBet, BetSettlement, WagerBook};

/// A tossed coin waiting to be committed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendingFlip {
    pub outcome: FlipOutcome,
    pub multiplier: u32,
    /// Pre-drawn roll for the lucky find bonus
    pub lucky_roll: f64,
}

/// What `begin_flip` did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlipStart {
    /// A coin is in the air
    Tossed(PendingFlip),
    /// Broke with no bet running: bonus granted, nothing tossed
    Bailout { granted: u64, balance: u64 },
}

/// Everything that changed on one committed flip
#[derive(Debug, Clone, Serialize)]
pub struct FlipReport {
    pub outcome: FlipOutcome,
    pub multiplier: u32,
    pub previous: StreakState,
    pub streak: StreakState,
    pub broke: bool,
    pub edge_hit: bool,
    pub new_high_score: bool,
    pub milestone: Option<u64>,
    pub tier: StreakTier,
    pub rarity: RevealRarity,
    pub economy_events: Vec<EconomyEvent>,
    pub unlocked: Vec<Unlock>,
    pub bet_settlement: Option<BetSettlement>,
    pub total_flips: u64,
    pub balance: u64,
}

/// Result of a one-shot [`FlipEngine::flip`]
#[derive(Debug, Clone)]
pub enum FlipResult {
    Flipped(Box<FlipReport>),
    Bailout { granted: u64, balance: u64 },
}

impl FlipResult {
    pub fn report(&self) -> Option<&FlipReport> {
        match self {
            Self::Flipped(report) => Some(report),
            Self::Bailout { .. } => None,
        }
    }

    pub fn into_report(self) -> Option<FlipReport> {
        match self {
            Self::Flipped(report) => Some(*report),
            Self::Bailout { .. } => None,
        }
    }
}

/// Auto-spin state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AutoSpin {
    #[default]
    Off,
    Running,
    /// Stop requested; ends once the in-flight toss is committed
    Stopping,
}

/// What a flip button press did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PressResult {
    Started(FlipStart),
    StopRequested,
}

/// Single-player streak and reward engine
pub struct FlipEngine {
    /// Configuration
    config: GameConfig,
    /// Random number source
    rng: BoxedRandomSource,
    /// Persistence gateway
    store: BoxedStore,
    /// Presentation cues
    feedback: BoxedFeedbackSink,
    /// Achievement definitions
    registry: AchievementRegistry,
    /// Unlocked achievements
    tracker: AchievementTracker,
    streak: StreakState,
    latch: HighScoreLatch,
    history: FlipHistory,
    total_flips: u64,
    wallet: Wallet,
    inventory: Inventory,
    wager: WagerBook,
    profile: Option<PlayerProfile>,
    /// Tossed but not yet committed
    pending: Option<PendingFlip>,
    auto_spin: AutoSpin,
    /// Multiplier of the last committed flip
    previous_multiplier: u32,
    /// Unlocks waiting to be displayed, in unlock order
    notifications: VecDeque<Unlock>,
    stats: SessionStats,
}

impl FlipEngine {
    /// Create a fresh engine with an in-memory store
    pub fn new(config: GameConfig) -> Self {
        let wallet = Wallet::new(config.economy.starting_cash);
        let registry = AchievementRegistry::with_builtins();
        let history = FlipHistory::new(config.history_len.max(registry.history_needed()));

        Self {
            rng: Box::new(ChaChaSource::from_entropy()),
            store: Box::new(MemoryStore::new()),
            feedback: Box::new(NullFeedback::new()),
            registry,
            tracker: AchievementTracker::new(),
            streak: StreakState::new(),
            latch: HighScoreLatch::new(),
            history,
            total_flips: 0,
            wallet,
            inventory: Inventory::new(),
            wager: WagerBook::new(),
            profile: None,
            pending: None,
            auto_spin: AutoSpin::Off,
            previous_multiplier: NO_MULTIPLIER,
            notifications: VecDeque::new(),
            stats: SessionStats::default(),
            config,
        }
    }

    /// Use a specific random source
    pub fn with_rng(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// Attach a store and restore saved state from it
    pub fn with_store(mut self, store: impl KeyValueStore + 'static) -> Self {
        self.store = Box::new(store);
        self.restore();
        self
    }

    /// Route presentation cues to a sink
    pub fn with_feedback(mut self, sink: impl FeedbackSink + 'static) -> Self {
        self.feedback = Box::new(sink);
        self
    }

    /// Replace the achievement set
    ///
    /// The outcome history grows if the new set looks further back.
    pub fn with_registry(mut self, registry: AchievementRegistry) -> Self {
        let needed = registry.history_needed();
        if needed > self.history.capacity() {
            log::warn!(
                "history_len {} is shorter than the achievement set needs, using {}",
                self.history.capacity(),
                needed
            );
            self.history = FlipHistory::new(needed);
        }
        self.registry = registry;
        self
    }

    /// Seed RNG for reproducible results
    pub fn seed(&mut self, seed: u64) {
        self.rng = Box::new(ChaChaSource::from_seed(seed));
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // ACCESSORS
    // ═══════════════════════════════════════════════════════════════════════════

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn streak(&self) -> &StreakState {
        &self.streak
    }

    pub fn tier(&self) -> StreakTier {
        tier_for(self.streak.count())
    }

    pub fn balance(&self) -> u64 {
        self.wallet.balance()
    }

    pub fn total_flips(&self) -> u64 {
        self.total_flips
    }

    pub fn history(&self) -> &FlipHistory {
        &self.history
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn achievements(&self) -> &AchievementTracker {
        &self.tracker
    }

    pub fn registry(&self) -> &AchievementRegistry {
        &self.registry
    }

    pub fn active_bet(&self) -> Option<&ActiveBet> {
        self.wager.active()
    }

    pub fn profile(&self) -> Option<&PlayerProfile> {
        self.profile.as_ref()
    }

    /// Get session stats
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Reset session stats
    pub fn reset_stats(&mut self) {
        self.stats = SessionStats::default();
    }

    pub fn pending(&self) -> Option<&PendingFlip> {
        self.pending.as_ref()
    }

    pub fn is_flipping(&self) -> bool {
        self.pending.is_some()
    }

    /// Multiplier of the coin in the air (1 when idle)
    pub fn pending_multiplier(&self) -> u32 {
        self.pending.map_or(NO_MULTIPLIER, |p| p.multiplier)
    }

    pub fn previous_multiplier(&self) -> u32 {
        self.previous_multiplier
    }

    /// Reveal delays for the configured timing profile
    pub fn timing(&self) -> RevealTiming {
        self.config.timing.timing()
    }

    pub fn set_timing(&mut self, profile: TimingProfile) {
        self.config.timing = profile;
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.feedback.set_muted(muted);
    }

    pub fn is_muted(&self) -> bool {
        self.feedback.is_muted()
    }

    /// Take every queued unlock notification, oldest first
    pub fn drain_notifications(&mut self) -> Vec<Unlock> {
        self.notifications.drain(..).collect()
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // FLIP LIFECYCLE
    // ═══════════════════════════════════════════════════════════════════════════

    /// Toss a coin without applying it
    ///
    /// Draw order: multiplier, outcome, lucky roll.
    pub fn begin_flip(&mut self, overrides: FlipOverrides) -> Result<FlipStart, FlipError> {
        if self.pending.is_some() {
            return Err(FlipError::FlipInProgress);
        }
        if let Some(forced) = overrides.multiplier {
            if !MULTIPLIER_VALUES.contains(&forced) {
                return Err(FlipError::InvalidMultiplier(forced));
            }
        }

        if self.wallet.is_broke() && !self.wager.has_active() {
            let granted = self.config.economy.bankruptcy_bonus;
            self.apply_event(EconomyEvent::BankruptcyBonus { amount: granted });
            log::info!("Bankrupt: granted bonus of {}", granted);
            self.persist();
            return Ok(FlipStart::Bailout {
                granted,
                balance: self.wallet.balance(),
            });
        }

        let multiplier = resolve_multiplier(
            self.streak.count(),
            overrides.multiplier,
            &self.config.multiplier,
            self.rng.as_mut(),
        );
        let outcome = resolve_outcome(&overrides, &self.config.outcome, self.rng.as_mut());
        let lucky_roll = self.rng.next_f64();

        let pending = PendingFlip {
            outcome,
            multiplier,
            lucky_roll,
        };
        self.pending = Some(pending);

        self.feedback.cue(&Cue::FlipStarted);
        if multiplier > NO_MULTIPLIER {
            self.feedback.cue(&Cue::MultiplierShown(multiplier));
        }
        Ok(FlipStart::Tossed(pending))
    }

    /// Apply the pending flip exactly once
    pub fn commit_flip(&mut self) -> Result<FlipReport, FlipError> {
        let pending = self.pending.take().ok_or(FlipError::NoFlipPending)?;
        let PendingFlip {
            outcome,
            multiplier,
            lucky_roll,
        } = pending;

        // Streak
        let previous = self.streak;
        let transition = resolve_flip(&previous, outcome, multiplier);
        let new_high_score = self.latch.observe(&previous, &transition);
        self.streak = transition.next;
        self.total_flips += 1;
        self.history.push(outcome);

        let count = self.streak.count();
        let milestone = if transition.matched() {
            milestone_for(count, &self.config.milestones)
        } else {
            None
        };
        let rarity = RevealRarity::classify(transition.edge_hit, transition.matched(), multiplier, count);

        log::debug!(
            "Flip #{}: {} x{} -> streak {} (was {})",
            self.total_flips,
            outcome,
            multiplier,
            count,
            previous.count()
        );

        self.feedback.cue(&Cue::Reveal(rarity));
        if transition.edge_hit {
            self.feedback.cue(&Cue::EdgeHit);
        } else if transition.broke {
            self.feedback.cue(&Cue::StreakBreak);
        } else {
            self.feedback.cue(&Cue::StreakStep(count));
        }
        if new_high_score {
            self.feedback.cue(&Cue::NewHighScore(count));
        }
        if let Some(m) = milestone {
            self.feedback.cue(&Cue::Milestone(m));
        }
        self.stats.record_flip(outcome, multiplier, transition.broke, count);

        // Economy
        let mut economy_events = Vec::new();
        if transition.edge_hit {
            economy_events.push(EconomyEvent::EdgeReward {
                amount: self.config.economy.edge_reward,
            });
        }
        if transition.extended && lucky_roll < self.config.economy.lucky_find_chance {
            economy_events.push(EconomyEvent::LuckyFind {
                amount: lucky_find_reward(&self.config.economy, multiplier),
                multiplier,
            });
        }

        // Wager
        let bet_settlement = self
            .wager
            .settle(outcome, previous.count(), count, &self.config.wager);
        if let Some(settlement) = &bet_settlement {
            self.stats.record_settlement(settlement);
            match settlement {
                BetSettlement::Won { payout, .. } => {
                    economy_events.push(EconomyEvent::BetPayout { amount: *payout })
                }
                BetSettlement::Jackpot { payout, .. } => {
                    economy_events.push(EconomyEvent::BetJackpot { amount: *payout })
                }
                BetSettlement::Lost { .. } => {}
            }
        }

        // Achievements
        let ctx = FlipContext {
            streak: count,
            outcome,
            history: self.history.as_slice(),
            multiplier,
            total_flips: self.total_flips,
            previous_multiplier: self.previous_multiplier,
        };
        let unlocked = self.tracker.check_all(&self.registry, &ctx);
        self.stats.record_unlocks(unlocked.len());
        for unlock in &unlocked {
            self.feedback.cue(&Cue::AchievementUnlocked {
                id: unlock.id.clone(),
                title: unlock.title.clone(),
                icon: unlock.icon.clone(),
            });
            self.notifications.push_back(unlock.clone());
            if unlock.reward > 0 {
                economy_events.push(EconomyEvent::AchievementReward {
                    id: unlock.id.clone(),
                    amount: unlock.reward,
                });
            }
        }

        for event in &economy_events {
            self.apply_event(event.clone());
        }
        self.previous_multiplier = multiplier;

        self.persist();
        if self.auto_spin == AutoSpin::Stopping {
            self.auto_spin = AutoSpin::Off;
            log::debug!("Auto-spin stopped");
        }

        Ok(FlipReport {
            outcome,
            multiplier,
            previous,
            streak: self.streak,
            broke: transition.broke,
            edge_hit: transition.edge_hit,
            new_high_score,
            milestone,
            tier: tier_for(count),
            rarity,
            economy_events,
            unlocked,
            bet_settlement,
            total_flips: self.total_flips,
            balance: self.wallet.balance(),
        })
    }

    /// Begin and immediately commit a flip
    pub fn flip(&mut self, overrides: FlipOverrides) -> Result<FlipResult, FlipError> {
        match self.begin_flip(overrides)? {
            FlipStart::Tossed(_) => Ok(FlipResult::Flipped(Box::new(self.commit_flip()?))),
            FlipStart::Bailout { granted, balance } => Ok(FlipResult::Bailout { granted, balance }),
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // AUTO-SPIN
    // ═══════════════════════════════════════════════════════════════════════════

    /// Flip button semantics
    ///
    /// Idle: start a flip. In flight with auto-spin running: request a stop.
    /// In flight otherwise: rejected.
    pub fn press_flip(&mut self, overrides: FlipOverrides) -> Result<PressResult, FlipError> {
        if self.pending.is_none() {
            return Ok(PressResult::Started(self.begin_flip(overrides)?));
        }
        match self.auto_spin {
            AutoSpin::Running | AutoSpin::Stopping => {
                self.auto_spin = AutoSpin::Stopping;
                Ok(PressResult::StopRequested)
            }
            AutoSpin::Off => Err(FlipError::FlipInProgress),
        }
    }

    pub fn start_auto_spin(&mut self) {
        if self.auto_spin == AutoSpin::Off {
            self.auto_spin = AutoSpin::Running;
            log::debug!("Auto-spin started");
        }
    }

    /// Request a stop. An in-flight toss is still committed.
    pub fn stop_auto_spin(&mut self) {
        self.auto_spin = if self.pending.is_some() {
            AutoSpin::Stopping
        } else {
            AutoSpin::Off
        };
    }

    pub fn auto_spin_state(&self) -> AutoSpin {
        self.auto_spin
    }

    /// Should the host toss again after the last commit?
    pub fn continue_auto(&self) -> bool {
        self.auto_spin == AutoSpin::Running && self.pending.is_none()
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // PLAYER ACTIONS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Stake `amount` on the streak reaching `target_streak`
    pub fn place_bet(&mut self, amount: u64, target_streak: u64) -> Result<ActiveBet, BetError> {
        if self.pending.is_some() {
            return Err(BetError::FlipInProgress);
        }

        let bet = self.wager.place(
            &mut self.wallet,
            self.streak.count(),
            amount,
            target_streak,
            &self.config.wager,
        )?;
        self.record_event(&EconomyEvent::BetStake { amount: bet.amount });
        self.persist();
        Ok(bet)
    }

    /// Buy a shop item
    pub fn purchase(&mut self, id: &str) -> Result<&'static ShopItem, ShopError> {
        let item = self.inventory.purchase(&mut self.wallet, id)?;
        self.record_event(&EconomyEvent::Purchase {
            item: item.id.to_string(),
            price: item.price,
        });
        self.persist();
        Ok(item)
    }

    /// Create and store the local player profile
    pub fn create_profile(&mut self, name: &str, age: u32) -> Result<PlayerProfile, ProfileError> {
        let tag_number = PlayerProfile::tag_number_from_roll(self.rng.next_f64());
        let profile = PlayerProfile::create(name, age, tag_number)?;
        log::info!("Profile created: {}", profile.gamer_tag);
        self.profile = Some(profile.clone());
        self.persist();
        Ok(profile)
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // ECONOMY
    // ═══════════════════════════════════════════════════════════════════════════

    /// Apply an event to the wallet, then record it
    fn apply_event(&mut self, event: EconomyEvent) {
        self.wallet.apply(event.delta());
        self.record_event(&event);
    }

    /// Record an event whose balance change has already happened
    fn record_event(&mut self, event: &EconomyEvent) {
        self.stats.record_event(event);
        self.feedback.cue(&Cue::CashChanged {
            delta: event.delta(),
            balance: self.wallet.balance(),
        });
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // PERSISTENCE
    // ═══════════════════════════════════════════════════════════════════════════

    /// Load every slot from the store. Absent or malformed slots use defaults.
    pub fn restore(&mut self) {
        let store = self.store.as_ref();

        let high_score: u64 = load_slot_or(store, SaveSlot::HighScore, 0);
        self.streak = match load_slot::<StreakState>(store, SaveSlot::Streak) {
            Some(saved) => match saved.side() {
                Some(side) => StreakState::running(saved.count(), side, high_score),
                None => StreakState::with_high_score(high_score),
            },
            None => StreakState::with_high_score(high_score),
        };
        self.total_flips = load_slot_or(store, SaveSlot::TotalFlips, 0);
        self.wallet = Wallet::new(load_slot_or(
            store,
            SaveSlot::Cash,
            self.config.economy.starting_cash,
        ));
        self.inventory = Inventory::from_ids(load_slot_or(store, SaveSlot::Inventory, Vec::new()));
        self.tracker =
            AchievementTracker::restore(load_slot_or(store, SaveSlot::Achievements, Vec::new()));
        self.wager = WagerBook::with_active(load_slot::<Option<ActiveBet>>(store, SaveSlot::ActiveBet).flatten());
        self.profile = load_slot(store, SaveSlot::Profile);

        self.pending = None;
        self.latch = HighScoreLatch::new();
        self.history.clear();
        self.previous_multiplier = NO_MULTIPLIER;

        log::debug!(
            "Restored: streak {}, high score {}, cash {}, {} flips",
            self.streak.count(),
            self.streak.high_score(),
            self.wallet.balance(),
            self.total_flips
        );
    }

    /// Write every slot in one batch. Failures are logged, never raised.
    ///
    /// A failed save leaves the previous snapshot in the store.
    pub fn persist(&mut self) {
        if let Err(e) = self.write_slots() {
            log::warn!("Failed to save game state: {}", e);
        }
    }

    fn write_slots(&mut self) -> StoreResult<()> {
        let mut batch = SlotBatch::new();
        batch.put(SaveSlot::HighScore, &self.streak.high_score())?;
        batch.put(SaveSlot::TotalFlips, &self.total_flips)?;
        batch.put(SaveSlot::Cash, &self.wallet.balance())?;
        batch.put(SaveSlot::Inventory, self.inventory.ids())?;
        batch.put(SaveSlot::Achievements, self.tracker.ids())?;
        batch.put(SaveSlot::Streak, &self.streak)?;
        batch.put(SaveSlot::ActiveBet, &self.wager.active())?;
        if let Some(profile) = &self.profile {
            batch.put(SaveSlot::Profile, profile)?;
        }
        batch.commit(self.store.as_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::CueRecorder;
    use crate::rng::ScriptedSource;

    fn engine() -> FlipEngine {
        // Lucky roll of 0.99 never finds anything
        FlipEngine::new(GameConfig::simulation()).with_rng(ScriptedSource::new(vec![0.99]))
    }

    #[test]
    fn test_begin_then_commit() {
        let mut engine = engine();
        let start = engine.begin_flip(FlipOverrides::heads()).unwrap();
        assert!(matches!(start, FlipStart::Tossed(p) if p.outcome == FlipOutcome::Heads));
        assert!(engine.is_flipping());
        // Nothing applied yet
        assert_eq!(engine.total_flips(), 0);

        let report = engine.commit_flip().unwrap();
        assert_eq!(report.streak.count(), 1);
        assert_eq!(report.total_flips, 1);
        assert!(!engine.is_flipping());
    }

    #[test]
    fn test_second_begin_rejected() {
        let mut engine = engine();
        engine.begin_flip(FlipOverrides::heads()).unwrap();
        assert_eq!(
            engine.begin_flip(FlipOverrides::tails()),
            Err(FlipError::FlipInProgress)
        );
        assert_eq!(engine.commit_flip().unwrap().outcome, FlipOutcome::Heads);
        assert_eq!(engine.commit_flip().unwrap_err(), FlipError::NoFlipPending);
    }

    #[test]
    fn test_forced_multiplier_shown_before_reveal() {
        let recorder = CueRecorder::new();
        let mut engine = engine().with_feedback(recorder.clone());

        engine.begin_flip(FlipOverrides::heads().with_multiplier(4)).unwrap();
        assert_eq!(engine.pending_multiplier(), 4);
        assert_eq!(recorder.take(), vec![Cue::FlipStarted, Cue::MultiplierShown(4)]);

        let report = engine.commit_flip().unwrap();
        assert_eq!(report.streak.count(), 4);
        assert_eq!(report.rarity, RevealRarity::Legendary);
        assert_eq!(engine.pending_multiplier(), 1);
    }

    #[test]
    fn test_previous_multiplier_feeds_chain_reaction() {
        let mut engine = engine();
        engine.flip(FlipOverrides::heads().with_multiplier(2)).unwrap();
        assert_eq!(engine.previous_multiplier(), 2);

        let report = engine
            .flip(FlipOverrides::heads().with_multiplier(2))
            .unwrap()
            .into_report()
            .unwrap();
        assert!(report.unlocked.iter().any(|u| u.id == "chain_reaction"));
    }

    #[test]
    fn test_lucky_find_only_when_extending() {
        let mut engine = FlipEngine::new(GameConfig::simulation()).with_rng(ScriptedSource::new(vec![0.01]));

        let first = engine.flip(FlipOverrides::heads().with_multiplier(1)).unwrap().into_report().unwrap();
        assert!(!first.economy_events.iter().any(|e| matches!(e, EconomyEvent::LuckyFind { .. })));

        let second = engine.flip(FlipOverrides::heads().with_multiplier(2)).unwrap().into_report().unwrap();
        assert!(second
            .economy_events
            .contains(&EconomyEvent::LuckyFind { amount: 20, multiplier: 2 }));
    }

    #[test]
    fn test_milestone_reported() {
        let mut engine = engine();
        let report = engine
            .flip(FlipOverrides::tails().with_multiplier(10))
            .unwrap()
            .into_report()
            .unwrap();
        assert_eq!(report.milestone, Some(10));
        assert_eq!(report.tier.title, "Inferno");
        assert!(report.new_high_score);
    }

    #[test]
    fn test_forced_multiplier_must_be_known() {
        let mut engine = engine();
        assert_eq!(
            engine.begin_flip(FlipOverrides::heads().with_multiplier(3)),
            Err(FlipError::InvalidMultiplier(3))
        );
        assert_eq!(
            engine.begin_flip(FlipOverrides::heads().with_multiplier(0)),
            Err(FlipError::InvalidMultiplier(0))
        );
        assert!(!engine.is_flipping());
        assert_eq!(engine.previous_multiplier(), NO_MULTIPLIER);

        let report = engine
            .flip(FlipOverrides::heads().with_multiplier(10))
            .unwrap()
            .into_report()
            .unwrap();
        assert_eq!(report.multiplier, 10);
    }

    #[test]
    fn test_custom_registry_widens_history() {
        use crate::achievements::{AchievementDef, Condition, Rarity};

        let mut registry = AchievementRegistry::new();
        registry
            .register(AchievementDef::new(
                "long_zebra",
                "Long Zebra",
                "",
                "",
                Rarity::Epic,
                0,
                Condition::AlternatingHistory(8),
            ))
            .unwrap();
        let mut engine = engine().with_registry(registry);
        assert_eq!(engine.history().capacity(), 8);

        let mut unlocked = Vec::new();
        for i in 0..8 {
            let side = if i % 2 == 0 { FlipOutcome::Heads } else { FlipOutcome::Tails };
            let report = engine
                .flip(FlipOverrides::forcing(side).with_multiplier(1))
                .unwrap()
                .into_report()
                .unwrap();
            unlocked.extend(report.unlocked.into_iter().map(|u| u.id));
        }
        assert_eq!(unlocked, vec!["long_zebra".to_string()]);
    }

    #[test]
    fn test_bet_rejected_while_flipping() {
        let mut engine = engine();
        engine.begin_flip(FlipOverrides::heads()).unwrap();
        assert_eq!(engine.place_bet(10, 3), Err(BetError::FlipInProgress));
    }

    #[test]
    fn test_mute_passes_to_sink() {
        let recorder = CueRecorder::new();
        let mut engine = engine().with_feedback(recorder.clone());
        engine.set_muted(true);
        assert!(engine.is_muted());
        engine.flip(FlipOverrides::heads()).unwrap();
        assert!(recorder.is_empty());
    }
}
