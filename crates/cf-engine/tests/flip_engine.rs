//! End-to-end tests for the flip engine
//!
//! Drives the public API through complete flips:
//! - Wager settlement (win at target, still climbing, loss on break, EDGE jackpot)
//! - EDGE reward and flip counting
//! - Bankruptcy bonus
//! - Achievement idempotence and notification order
//! - Auto-spin stop semantics
//! - Reproducible seeded sessions

use cf_engine::{
    AutoSpin, BetError, BetSettlement, Cue, CueRecorder, EconomyEvent, FlipEngine, FlipError,
    FlipOutcome, FlipOverrides, FlipReport, FlipStart, GameConfig, PressResult, ScriptedSource,
    ShopError, potential_payout,
};

/// Engine whose random draws never trigger a multiplier or a lucky find
fn quiet_engine(config: GameConfig) -> FlipEngine {
    FlipEngine::new(config).with_rng(ScriptedSource::new(vec![0.99]))
}

fn flip(engine: &mut FlipEngine, outcome: FlipOutcome) -> FlipReport {
    engine
        .flip(FlipOverrides::forcing(outcome).with_multiplier(1))
        .unwrap()
        .into_report()
        .unwrap()
}

// ═══════════════════════════════════════════════════════════════════════════════
// WAGERS
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_bet_pays_out_at_target() {
    let mut engine = quiet_engine(GameConfig::simulation());
    let bet = engine.place_bet(50, 10).unwrap();
    assert_eq!(engine.balance(), 50);
    assert_eq!(bet.potential_payout, potential_payout(50, 0, 10, &GameConfig::default().wager));

    for _ in 0..9 {
        let report = flip(&mut engine, FlipOutcome::Heads);
        assert!(report.bet_settlement.is_none());
    }
    assert_eq!(engine.streak().count(), 9);
    assert!(engine.active_bet().is_some());

    let report = flip(&mut engine, FlipOutcome::Heads);
    assert_eq!(report.streak.count(), 10);
    assert_eq!(
        report.bet_settlement,
        Some(BetSettlement::Won {
            bet,
            payout: bet.potential_payout
        })
    );
    assert!(
        report
            .economy_events
            .contains(&EconomyEvent::BetPayout { amount: bet.potential_payout })
    );
    assert!(engine.active_bet().is_none());
}

#[test]
fn test_bet_lost_when_streak_breaks() {
    let mut engine = quiet_engine(GameConfig::simulation());
    let bet = engine.place_bet(40, 10).unwrap();

    for _ in 0..3 {
        flip(&mut engine, FlipOutcome::Heads);
    }
    let balance_before = engine.balance();

    let report = flip(&mut engine, FlipOutcome::Tails);
    assert!(report.broke);
    assert_eq!(report.bet_settlement, Some(BetSettlement::Lost { bet }));
    assert!(
        !report
            .economy_events
            .iter()
            .any(|e| matches!(e, EconomyEvent::BetPayout { .. }))
    );
    assert!(engine.active_bet().is_none());
    // Nothing paid back for the lost stake
    assert_eq!(engine.balance(), balance_before);
    assert_eq!(engine.stats().bets_lost, 1);
}

#[test]
fn test_edge_pays_bet_jackpot() {
    let mut engine = quiet_engine(GameConfig::simulation());
    let bet = engine.place_bet(10, 5).unwrap();
    flip(&mut engine, FlipOutcome::Heads);

    let report = flip(&mut engine, FlipOutcome::Edge);
    assert_eq!(
        report.bet_settlement,
        Some(BetSettlement::Jackpot {
            bet,
            payout: bet.potential_payout * 10
        })
    );
    assert!(engine.active_bet().is_none());
}

#[test]
fn test_bet_rejections() {
    let mut engine = quiet_engine(GameConfig::simulation());
    assert_eq!(
        engine.place_bet(500, 3),
        Err(BetError::InsufficientFunds {
            amount: 500,
            balance: 100
        })
    );
    assert_eq!(engine.place_bet(0, 3), Err(BetError::NonPositiveAmount));

    engine.place_bet(10, 3).unwrap();
    assert_eq!(engine.place_bet(10, 4), Err(BetError::BetAlreadyActive));
    assert_eq!(engine.balance(), 90);
}

// ═══════════════════════════════════════════════════════════════════════════════
// ECONOMY
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_edge_reward_once_per_edge() {
    let mut engine = quiet_engine(GameConfig::simulation());
    flip(&mut engine, FlipOutcome::Tails);
    let flips_before = engine.total_flips();

    let report = flip(&mut engine, FlipOutcome::Edge);
    let edge_rewards = report
        .economy_events
        .iter()
        .filter(|e| matches!(e, EconomyEvent::EdgeReward { .. }))
        .count();
    assert_eq!(edge_rewards, 1);
    assert_eq!(engine.total_flips(), flips_before + 1);
    assert!(report.edge_hit);
    assert!(!report.broke);
    assert_eq!(report.streak.count(), 0);
    assert_eq!(report.streak.side(), None);
    assert!(report.unlocked.iter().any(|u| u.id == "edge_lord"));
}

#[test]
fn test_bankruptcy_bonus_skips_the_toss() {
    let mut config = GameConfig::simulation();
    config.economy.starting_cash = 0;
    let mut engine = quiet_engine(config);

    let start = engine.begin_flip(FlipOverrides::heads()).unwrap();
    assert_eq!(
        start,
        FlipStart::Bailout {
            granted: 100,
            balance: 100
        }
    );
    assert_eq!(engine.total_flips(), 0);
    assert!(!engine.is_flipping());
    assert_eq!(engine.commit_flip().unwrap_err(), FlipError::NoFlipPending);
}

#[test]
fn test_broke_with_active_bet_still_flips() {
    let mut engine = quiet_engine(GameConfig::simulation());
    engine.place_bet(100, 2).unwrap();
    assert_eq!(engine.balance(), 0);

    let start = engine.begin_flip(FlipOverrides::heads()).unwrap();
    assert!(matches!(start, FlipStart::Tossed(_)));
}

#[test]
fn test_purchase_through_engine() {
    let mut config = GameConfig::simulation();
    config.economy.starting_cash = 3_000;
    let mut engine = quiet_engine(config);

    let item = engine.purchase("t_wood").unwrap();
    assert_eq!(item.name, "Beginner Cup");
    assert_eq!(engine.balance(), 2_000);
    assert_eq!(
        engine.purchase("t_wood"),
        Err(ShopError::AlreadyOwned("t_wood".into()))
    );
    assert_eq!(engine.stats().cash_spent, 1_000);
}

// ═══════════════════════════════════════════════════════════════════════════════
// ACHIEVEMENTS
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_achievement_reward_paid_once() {
    let mut engine = quiet_engine(GameConfig::simulation());

    let first = flip(&mut engine, FlipOutcome::Heads);
    assert_eq!(first.unlocked.len(), 1);
    assert_eq!(first.unlocked[0].id, "first_step");
    assert_eq!(first.balance, 110);

    flip(&mut engine, FlipOutcome::Tails);
    let again = flip(&mut engine, FlipOutcome::Heads);
    assert!(again.unlocked.is_empty());
    assert_eq!(engine.balance(), 110);
}

#[test]
fn test_notifications_queue_in_registry_order() {
    let recorder = CueRecorder::new();
    let mut engine = quiet_engine(GameConfig::simulation()).with_feedback(recorder.clone());

    engine
        .flip(FlipOverrides::heads().with_multiplier(10))
        .unwrap();
    let ids: Vec<_> = engine
        .drain_notifications()
        .into_iter()
        .map(|u| u.id)
        .collect();
    assert_eq!(
        ids,
        vec![
            "first_step",
            "first_spark",
            "coin_master",
            "golden_age",
            "multiplier_hunter"
        ]
    );
    assert!(engine.drain_notifications().is_empty());

    let unlock_cues = recorder
        .take()
        .into_iter()
        .filter(|c| matches!(c, Cue::AchievementUnlocked { .. }))
        .count();
    assert_eq!(unlock_cues, 5);
}

// ═══════════════════════════════════════════════════════════════════════════════
// AUTO-SPIN
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_auto_spin_stop_commits_in_flight_toss() {
    let mut engine = quiet_engine(GameConfig::simulation());
    engine.start_auto_spin();

    let pressed = engine.press_flip(FlipOverrides::heads()).unwrap();
    assert!(matches!(pressed, PressResult::Started(FlipStart::Tossed(_))));

    assert_eq!(
        engine.press_flip(FlipOverrides::heads()).unwrap(),
        PressResult::StopRequested
    );
    assert_eq!(engine.auto_spin_state(), AutoSpin::Stopping);

    let report = engine.commit_flip().unwrap();
    assert_eq!(report.total_flips, 1);
    assert_eq!(engine.auto_spin_state(), AutoSpin::Off);
    assert!(!engine.continue_auto());
}

#[test]
fn test_auto_spin_keeps_running() {
    let mut engine = quiet_engine(GameConfig::simulation());
    engine.start_auto_spin();

    for _ in 0..5 {
        engine.press_flip(FlipOverrides::tails()).unwrap();
        engine.commit_flip().unwrap();
        assert!(engine.continue_auto());
    }
    assert_eq!(engine.streak().count(), 5);
}

#[test]
fn test_press_while_flipping_without_auto_is_rejected() {
    let mut engine = quiet_engine(GameConfig::simulation());
    engine.press_flip(FlipOverrides::heads()).unwrap();
    assert_eq!(
        engine.press_flip(FlipOverrides::heads()),
        Err(FlipError::FlipInProgress)
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// DETERMINISM
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_seeded_sessions_repeat() {
    let run = |seed: u64| {
        let mut engine = FlipEngine::new(GameConfig::simulation());
        engine.seed(seed);
        (0..200)
            .filter_map(|_| engine.flip(FlipOverrides::none()).unwrap().into_report())
            .map(|r| (r.outcome, r.multiplier, r.streak.count()))
            .collect::<Vec<_>>()
    };
    assert_eq!(run(7), run(7));
}

#[test]
fn test_simultaneous_overrides_prefer_edge() {
    let mut engine = quiet_engine(GameConfig::simulation());
    let overrides = FlipOverrides {
        force_edge: true,
        force_heads: true,
        force_tails: true,
        multiplier: Some(1),
    };
    let report = engine.flip(overrides).unwrap().into_report().unwrap();
    assert_eq!(report.outcome, FlipOutcome::Edge);
}
