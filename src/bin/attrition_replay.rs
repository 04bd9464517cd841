//! Headless Attrition Replay
//!
//! Runs a seeded two-sided battle with attrition and reinforcement waves
//! against the attrition engine and prints every refresh it performs.

use attrition_watch::attrition::{
    AttritionEngine, BattleHost, MoraleOverrides, PollReport, ScriptedBattle, TeamRelation,
    TeamReport, Transition,
};
use attrition_watch::core::config::{load_config, load_named_config, AttritionConfig, ThresholdMode};
use attrition_watch::core::error::Result;
use attrition_watch::core::types::{Side, TeamRole};
use clap::Parser;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::path::PathBuf;

/// Headless Attrition Replay - drive the engine through a simulated battle
#[derive(Parser, Debug)]
#[command(name = "attrition_replay")]
#[command(about = "Replay a seeded battle through the attrition engine")]
struct Args {
    /// Config preset name (loaded from data/attrition/)
    #[arg(long, default_value = "default")]
    preset: String,

    /// Explicit config file, overrides --preset
    #[arg(long)]
    config: Option<PathBuf>,

    /// Force percentage mode regardless of the loaded config
    #[arg(long)]
    percentage: bool,

    /// Initial player troops on the field
    #[arg(long, default_value_t = 300)]
    player: u32,

    /// Initial enemy troops on the field
    #[arg(long, default_value_t = 400)]
    enemy: u32,

    /// Reinforcements queued per side
    #[arg(long, default_value_t = 100)]
    reinforcements: u32,

    /// Seconds between reinforcement waves
    #[arg(long, default_value_t = 30.0)]
    wave_interval: f32,

    /// Simulation step in seconds; several steps share one engine refresh
    #[arg(long, default_value_t = 0.25)]
    step: f32,

    /// Stop after this many simulated seconds
    #[arg(long, default_value_t = 600.0)]
    max_time: f32,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,
}

/// One JSON line per engine refresh
#[derive(Serialize)]
struct RefreshLine<'a> {
    #[serde(flatten)]
    report: &'a PollReport,
    enemy_confirmed: bool,
    player_confirmed: bool,
    enemy_retreat_weight: f32,
}

#[derive(Serialize)]
struct ReplaySummary {
    seed: u64,
    duration: f32,
    refreshes: u32,
    enemy_confirmed_at: Option<f32>,
    player_confirmed_at: Option<f32>,
    enemy_revocations: u32,
    player_revocations: u32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("attrition_watch=info")
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => load_named_config(&args.preset).unwrap_or_else(|e| {
            tracing::warn!("Failed to load preset '{}': {}, using defaults", args.preset, e);
            AttritionConfig::default()
        }),
    };
    if args.percentage {
        config.mode = ThresholdMode::Percentage;
    }

    let mut battle = ScriptedBattle::field_battle(args.player, args.enemy);
    for role in [TeamRole::Player, TeamRole::Enemy] {
        battle.set_reinforcements(role, args.reinforcements);
    }
    // Per-formation ledger on the enemy, raw counter on the player
    if let Some(enemy) = battle.team(TeamRole::Enemy) {
        battle.set_team(
            TeamRole::Enemy,
            TeamReport {
                formation_casualties: Some(vec![0; 3]),
                ..enemy
            },
        );
    }

    let mut engine = AttritionEngine::new();
    let mut summary = ReplaySummary {
        seed,
        duration: 0.0,
        refreshes: 0,
        enemy_confirmed_at: None,
        player_confirmed_at: None,
        enemy_revocations: 0,
        player_revocations: 0,
    };
    let mut next_wave = args.wave_interval;

    while battle.time < args.max_time {
        battle.advance(args.step);

        // Attrition this step; the enemy bleeds faster
        let player_losses = rng.gen_range(0..=2);
        let enemy_losses = rng.gen_range(0..=4);
        battle.kill(TeamRole::Player, player_losses);
        kill_in_formation(&mut battle, enemy_losses, &mut rng);

        if battle.time >= next_wave {
            next_wave += args.wave_interval;
            for role in [TeamRole::Player, TeamRole::Enemy] {
                let wave = rng.gen_range(10..=40);
                battle.reinforce(role, wave);
            }
        }

        let Some(report) = engine.poll(&battle, &config) else {
            continue;
        };
        summary.refreshes += 1;

        record_transition(&mut summary, Side::Enemy, report.transitions.enemy, report.time);
        record_transition(&mut summary, Side::Player, report.transitions.player, report.time);

        let enemy_retreat_weight = MoraleOverrides::new(&mut engine, &battle, &config)
            .retreat_tactic_weight(TeamRelation::Hostile, 1.0);
        let line = RefreshLine {
            report: &report,
            enemy_confirmed: engine.verdict(Side::Enemy, &config),
            player_confirmed: engine.verdict(Side::Player, &config),
            enemy_retreat_weight,
        };

        match args.format.as_str() {
            "text" => println!(
                "[{:>6.1}] player={:>4} enemy={:>4} enemy_confirmed={} player_confirmed={}",
                report.time,
                report.counts.player,
                report.counts.enemy,
                line.enemy_confirmed,
                line.player_confirmed
            ),
            _ => println!("{}", serde_json::to_string(&line)?),
        }

        if report.counts.player == 0 || report.counts.enemy == 0 {
            break;
        }
    }
    summary.duration = battle.time;

    match args.format.as_str() {
        "text" => {
            println!();
            println!("Replay Summary");
            println!("==============");
            println!("Seed: {}", summary.seed);
            println!("Duration: {:.1}s over {} refreshes", summary.duration, summary.refreshes);
            println!("Enemy confirmed at: {:?}", summary.enemy_confirmed_at);
            println!("Player confirmed at: {:?}", summary.player_confirmed_at);
            println!(
                "Revocations: enemy={} player={}",
                summary.enemy_revocations, summary.player_revocations
            );
        }
        _ => println!("{}", serde_json::to_string_pretty(&summary)?),
    }

    Ok(())
}

/// Kill enemy troops and book them against a random formation
fn kill_in_formation(battle: &mut ScriptedBattle, n: u32, rng: &mut ChaCha8Rng) {
    let Some(mut enemy) = battle.team(TeamRole::Enemy) else {
        return;
    };
    let dead = n.min(enemy.active);
    enemy.active -= dead;
    if let Some(ledger) = enemy.formation_casualties.as_mut() {
        let formation = rng.gen_range(0..ledger.len());
        ledger[formation] += dead;
    } else {
        enemy.raw_deaths += dead;
    }
    battle.set_team(TeamRole::Enemy, enemy);
}

fn record_transition(summary: &mut ReplaySummary, side: Side, transition: Transition, time: f32) {
    let (confirmed_at, revocations) = match side {
        Side::Enemy => (&mut summary.enemy_confirmed_at, &mut summary.enemy_revocations),
        Side::Player => (&mut summary.player_confirmed_at, &mut summary.player_revocations),
    };
    match transition {
        Transition::Confirmed => {
            confirmed_at.get_or_insert(time);
        }
        Transition::Revoked => *revocations += 1,
        Transition::Unchanged => {}
    }
}
