//! CoinForge terminal front end
//!
//! Usage:
//!   coinforge flip [--count N] [--heads|--tails|--edge] [--multiplier M]
//!   coinforge auto --max N
//!   coinforge bet <amount> <target>
//!   coinforge shop | buy <item-id>
//!   coinforge stats | achievements | config
//!   coinforge profile create <name> <age> | profile show
//!   coinforge simulate --flips N

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};

use cf_engine::{
    CATALOG, Cue, CueRecorder, EconomyEvent, FlipEngine, FlipOverrides, FlipReport, FlipStart,
    GameConfig, PressResult, TimingProfile, milestone_headline,
};
use cf_state::JsonFileStore;

#[derive(Parser)]
#[command(name = "coinforge", about = "Coin-flip streak game", version)]
struct Cli {
    /// Game config file (.json, .yaml or .yml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Save file (defaults to the platform config directory)
    #[arg(short, long, global = true)]
    save: Option<PathBuf>,

    /// Seed for reproducible flips
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Reveal pacing (overrides the config file)
    #[arg(long, global = true, value_enum)]
    timing: Option<Pacing>,

    /// Hide flip cues
    #[arg(long, global = true)]
    mute: bool,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Pacing {
    Normal,
    Turbo,
    Instant,
}

impl From<Pacing> for TimingProfile {
    fn from(pacing: Pacing) -> Self {
        match pacing {
            Pacing::Normal => TimingProfile::Normal,
            Pacing::Turbo => TimingProfile::Turbo,
            Pacing::Instant => TimingProfile::Instant,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Flip the coin
    Flip {
        /// Number of flips
        #[arg(short = 'n', long, default_value_t = 1)]
        count: u32,
        /// Force HEADS
        #[arg(long, conflicts_with_all = ["tails", "edge"])]
        heads: bool,
        /// Force TAILS
        #[arg(long, conflicts_with = "edge")]
        tails: bool,
        /// Force EDGE
        #[arg(long)]
        edge: bool,
        /// Force the pending multiplier
        #[arg(short, long, value_parser = ["1", "2", "4", "10"])]
        multiplier: Option<String>,
        /// Print each report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Flip continuously until the streak breaks or the limit is hit
    Auto {
        /// Maximum number of flips
        #[arg(long, default_value_t = 50)]
        max: u32,
    },
    /// Bet on the streak reaching a target
    Bet {
        amount: u64,
        target: u64,
    },
    /// List the trophy shop
    Shop,
    /// Buy a trophy
    Buy {
        item: String,
    },
    /// Show saved progress
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// List achievements
    Achievements,
    /// Player profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Run an in-memory seeded session and print its statistics
    Simulate {
        /// Number of flips
        #[arg(long, default_value_t = 10_000)]
        flips: u64,
    },
    /// Print the effective config
    Config,
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Create the local profile
    Create { name: String, age: u32 },
    /// Show the local profile
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = load_config(&cli)?;

    match cli.command {
        Commands::Flip {
            count,
            heads,
            tails,
            edge,
            ref multiplier,
            json,
        } => {
            let overrides = FlipOverrides {
                force_edge: edge,
                force_heads: heads,
                force_tails: tails,
                multiplier: multiplier
                    .as_deref()
                    .map(str::parse)
                    .transpose()
                    .context("Invalid multiplier")?,
            };
            let (mut engine, cues) = open_engine(&cli, config);
            for _ in 0..count {
                play_one(&mut engine, &cues, overrides, json)?;
            }
            Ok(())
        }
        Commands::Auto { max } => {
            let (mut engine, cues) = open_engine(&cli, config);
            run_auto(&mut engine, &cues, max)
        }
        Commands::Bet { amount, target } => {
            let (mut engine, _) = open_engine(&cli, config);
            let bet = engine.place_bet(amount, target)?;
            println!(
                "🎲 Bet {} on streak {} → {} (pays {})",
                bet.amount, bet.start_streak, bet.target_streak, bet.potential_payout
            );
            println!("   Balance: {}", engine.balance());
            Ok(())
        }
        Commands::Shop => {
            let (engine, _) = open_engine(&cli, config);
            println!("🛒 Trophy shop (balance {})\n", engine.balance());
            for item in CATALOG.iter() {
                let mark = if engine.inventory().contains(item.id) {
                    "owned"
                } else if engine.balance() >= item.price {
                    "buy"
                } else {
                    ""
                };
                println!(
                    "  {} {:<16} {:<18} {:>13}  {}",
                    item.icon, item.id, item.name, item.price, mark
                );
            }
            Ok(())
        }
        Commands::Buy { ref item } => {
            let (mut engine, _) = open_engine(&cli, config);
            let bought = engine.purchase(item)?;
            println!("{} Bought {} for {}", bought.icon, bought.name, bought.price);
            println!("   Balance: {}", engine.balance());
            Ok(())
        }
        Commands::Stats { json } => {
            let (engine, _) = open_engine(&cli, config);
            print_progress(&engine, json)
        }
        Commands::Achievements => {
            let (engine, _) = open_engine(&cli, config);
            print_achievements(&engine);
            Ok(())
        }
        Commands::Profile { ref action } => {
            let (mut engine, _) = open_engine(&cli, config);
            match action {
                ProfileAction::Create { name, age } => {
                    let profile = engine.create_profile(name, *age)?;
                    println!("👤 Welcome, {}", profile.gamer_tag);
                    println!("   Avatar: {}", profile.avatar);
                }
                ProfileAction::Show => match engine.profile() {
                    Some(profile) => {
                        println!("👤 {} ({})", profile.gamer_tag, profile.name);
                        if let Some(age) = profile.age {
                            println!("   Age: {}", age);
                        }
                        println!("   Avatar: {}", profile.avatar);
                        println!("   Since: {}", profile.created_at.format("%Y-%m-%d"));
                    }
                    None => println!("No profile yet. Create one with `coinforge profile create`."),
                },
            }
            Ok(())
        }
        Commands::Simulate { flips } => simulate(config, cli.seed, flips),
        Commands::Config => {
            println!("{}", config.export_json());
            Ok(())
        }
    }
}

fn load_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(pacing) = cli.timing {
        config.timing = pacing.into();
    }
    Ok(config)
}

fn open_engine(cli: &Cli, config: GameConfig) -> (FlipEngine, CueRecorder) {
    let store = match &cli.save {
        Some(path) => JsonFileStore::open(path),
        None => JsonFileStore::open_default(),
    };
    log::info!("Save file: {}", store.path().display());

    let cues = CueRecorder::new();
    let mut engine = FlipEngine::new(config)
        .with_store(store)
        .with_feedback(cues.clone());
    if let Some(seed) = cli.seed {
        engine.seed(seed);
    }
    engine.set_muted(cli.mute);
    (engine, cues)
}

// ═══════════════════════════════════════════════════════════════════════════════
// FLIPPING
// ═══════════════════════════════════════════════════════════════════════════════

fn play_one(engine: &mut FlipEngine, cues: &CueRecorder, overrides: FlipOverrides, json: bool) -> Result<()> {
    match engine.begin_flip(overrides)? {
        FlipStart::Bailout { granted, balance } => {
            println!("💸 Broke! Granted {} (balance {})", granted, balance);
            Ok(())
        }
        FlipStart::Tossed(_) => {
            reveal(engine, cues);
            let report = engine.commit_flip()?;
            if json {
                println!("{}", serde_json::to_string(&report)?);
            } else {
                print_report(engine, &report);
            }
            Ok(())
        }
    }
}

fn run_auto(engine: &mut FlipEngine, cues: &CueRecorder, max: u32) -> Result<()> {
    if max == 0 {
        bail!("--max must be at least 1");
    }
    engine.start_auto_spin();

    let mut flips = 0;
    loop {
        match engine.press_flip(FlipOverrides::none())? {
            PressResult::Started(FlipStart::Bailout { granted, balance }) => {
                println!("💸 Broke! Granted {} (balance {})", granted, balance);
                engine.stop_auto_spin();
                break;
            }
            PressResult::Started(FlipStart::Tossed(_)) => {
                flips += 1;
                if flips >= max {
                    // Last one: the toss in the air still lands
                    engine.press_flip(FlipOverrides::none())?;
                }
                reveal(engine, cues);
                let report = engine.commit_flip()?;
                print_report(engine, &report);
                if report.broke {
                    engine.stop_auto_spin();
                }
            }
            PressResult::StopRequested => {}
        }
        if !engine.continue_auto() {
            break;
        }
    }
    println!("⏹  Auto-spin stopped after {} flips", flips);
    Ok(())
}

/// Hold for the staged reveal, showing the multiplier pop first
fn reveal(engine: &FlipEngine, cues: &CueRecorder) {
    let timing = engine.timing();
    sleep_ms(timing.multiplier_reveal_ms);
    for cue in cues.take() {
        if let Cue::MultiplierShown(m) = cue {
            println!("   ✨ x{} multiplier!", m);
        }
    }
    sleep_ms(timing.result_after_multiplier_ms());
}

fn sleep_ms(ms: u64) {
    if ms > 0 {
        thread::sleep(Duration::from_millis(ms));
    }
}

fn print_report(engine: &mut FlipEngine, report: &FlipReport) {
    let multiplier = if report.multiplier > 1 {
        format!(" x{}", report.multiplier)
    } else {
        String::new()
    };
    println!(
        "#{:<5} {:<5}{}  streak {} {} {}  cash {}  [{}]",
        report.total_flips,
        report.outcome,
        multiplier,
        report.streak.count(),
        report.tier.icon,
        report.tier.title,
        report.balance,
        engine.history().to_strip()
    );

    if report.edge_hit {
        println!("   🌀 {}", milestone_headline(0, true));
    } else if report.broke {
        println!("   💥 Streak broken at {}", report.previous.count());
    }
    if let Some(m) = report.milestone {
        println!("   🏁 {} ({})", milestone_headline(m, false), m);
    } else if report.new_high_score {
        println!("   ★ {} ({})", milestone_headline(report.streak.count(), false), report.streak.count());
    }

    for event in &report.economy_events {
        match event {
            EconomyEvent::EdgeReward { amount } => println!("   +{} edge reward", amount),
            EconomyEvent::LuckyFind { amount, .. } => println!("   +{} lucky find", amount),
            EconomyEvent::BetPayout { amount } => println!("   +{} bet won", amount),
            EconomyEvent::BetJackpot { amount } => println!("   +{} bet jackpot", amount),
            _ => {}
        }
    }
    if let Some(settlement) = &report.bet_settlement {
        if !settlement.is_win() {
            println!("   Bet of {} lost", settlement.bet().amount);
        }
    }

    for unlock in engine.drain_notifications() {
        println!(
            "   {} Achievement: {} [{}] +{}",
            unlock.icon, unlock.title, unlock.rarity, unlock.reward
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// REPORTS
// ═══════════════════════════════════════════════════════════════════════════════

fn print_progress(engine: &FlipEngine, json: bool) -> Result<()> {
    if json {
        let progress = serde_json::json!({
            "balance": engine.balance(),
            "streak": engine.streak(),
            "total_flips": engine.total_flips(),
            "active_bet": engine.active_bet(),
            "inventory": engine.inventory().ids(),
            "achievements": engine.achievements().ids(),
        });
        println!("{}", serde_json::to_string_pretty(&progress)?);
        return Ok(());
    }

    let streak = engine.streak();
    let tier = engine.tier();
    println!("💰 Balance:     {}", engine.balance());
    match streak.side() {
        Some(side) => println!("🔥 Streak:      {} {} ({} {})", streak.count(), side, tier.icon, tier.title),
        None => println!("🔥 Streak:      0 ({} {})", tier.icon, tier.title),
    }
    println!("🏆 High score:  {}", streak.high_score());
    println!("🪙 Total flips: {}", engine.total_flips());
    if let Some(bet) = engine.active_bet() {
        println!(
            "🎲 Active bet:  {} on {} (pays {})",
            bet.amount, bet.target_streak, bet.potential_payout
        );
    }
    println!("🛒 Trophies:    {}/{}", engine.inventory().len(), CATALOG.len());
    println!(
        "🎖  Achievements: {}/{}",
        engine.achievements().len(),
        engine.registry().len()
    );
    Ok(())
}

fn print_achievements(engine: &FlipEngine) {
    for def in engine.registry().iter() {
        let unlocked = engine.achievements().is_unlocked(&def.id);
        if def.secret && !unlocked {
            println!("  🔒 ???  [{}]", def.rarity);
            continue;
        }
        let mark = if unlocked { "✅" } else { "  " };
        println!(
            "{} {} {:<20} [{:<9}] +{:<6} {}",
            mark, def.icon, def.title, def.rarity.as_str(), def.reward, def.description
        );
    }
}

fn simulate(mut config: GameConfig, seed: Option<u64>, flips: u64) -> Result<()> {
    const DEFAULT_SEED: u64 = 1;

    config.timing = TimingProfile::Instant;
    let seed = seed.unwrap_or(DEFAULT_SEED);
    let mut engine = FlipEngine::new(config);
    engine.seed(seed);

    for _ in 0..flips {
        engine.flip(FlipOverrides::none())?;
    }
    engine.drain_notifications();

    let stats = engine.stats();
    println!("Simulation: {} flips, seed {}\n", flips, seed);
    println!("  Heads / Tails / Edge: {} / {} / {}", stats.heads, stats.tails, stats.edges);
    println!("  Heads ratio:          {:.2}%", stats.heads_ratio());
    println!("  Streak breaks:        {}", stats.breaks);
    println!("  Multipliers:          {}", stats.multipliers_triggered);
    println!("  Best streak:          {}", stats.best_streak);
    println!("  Achievements:         {}", stats.achievements_unlocked);
    println!("  Cash earned / spent:  {} / {}", stats.cash_earned, stats.cash_spent);
    println!("  Final balance:        {}", engine.balance());
    Ok(())
}
