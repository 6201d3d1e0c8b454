//! Quick Draw headless runner
//!
//! Plays a match against the simulated opponent at a fixed frame step, with a
//! random human-like reaction time standing in for the player.

use std::path::PathBuf;

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use quick_draw::consts::SIM_DT;
use quick_draw::sim::{Phase, RoundEvent, RoundStateMachine, TickInput, Winner};
use quick_draw::{Difficulty, QuickDrawError, Settings};

/// Simulated player reaction window (seconds after the draw window opens)
const PLAYER_REACTION_MIN: f32 = 0.15;
const PLAYER_REACTION_MAX: f32 = 0.45;

/// Frames after which a stalled match is abandoned
const MAX_FRAMES_PER_ROUND: u32 = 60 * 60;

#[derive(Parser, Debug)]
#[command(name = "quick-draw", about = "Headless quick draw match")]
struct Args {
    /// Opponent difficulty (easy, medium, hard); overrides the config file
    #[arg(short, long)]
    difficulty: Option<String>,

    /// Number of rounds to play
    #[arg(short, long, default_value_t = 10)]
    rounds: u32,

    /// Seed for both the opponent and the simulated player (OS entropy if omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON settings file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Default, Serialize)]
struct MatchSummary {
    difficulty: String,
    rounds: u32,
    player_wins: u32,
    opponent_wins: u32,
    no_draws: u32,
    scoreboard: String,
}

fn main() {
    env_logger::init();
    log::info!("Quick Draw (headless) starting...");

    let args = Args::parse();
    match run(&args) {
        Ok(summary) => match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Failed to encode summary: {e}"),
        },
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    }
}

fn run(args: &Args) -> Result<MatchSummary, QuickDrawError> {
    let mut settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(name) = &args.difficulty {
        match Difficulty::from_str(name) {
            Some(tier) => settings.difficulty = tier,
            None => log::warn!("Unknown difficulty '{name}', keeping {}", settings.difficulty),
        }
    }
    settings.auto_restart = true;

    let (mut machine, mut player_rng) = match args.seed {
        Some(seed) => (
            RoundStateMachine::seeded(settings, seed)?,
            Pcg32::seed_from_u64(seed.wrapping_add(1)),
        ),
        None => {
            let machine = RoundStateMachine::from_entropy(settings)?;
            let player_seed = machine.opponent().seed().wrapping_add(1);
            (machine, Pcg32::seed_from_u64(player_seed))
        }
    };

    let mut summary = MatchSummary {
        difficulty: machine.difficulty().to_string(),
        ..MatchSummary::default()
    };

    machine.start_round();
    let mut reaction = None;
    let mut frames = 0;

    while summary.rounds < args.rounds {
        frames += 1;
        if frames > MAX_FRAMES_PER_ROUND {
            log::warn!("Round {} stalled, stopping match", machine.round().number());
            break;
        }

        let draw = match reaction {
            Some(t) => {
                machine.phase() == Phase::DrawWindow && machine.round().draw_window_elapsed() >= t
            }
            None => false,
        };
        machine.tick(&TickInput { draw }, SIM_DT);

        let events: Vec<RoundEvent> = machine.drain_events().collect();
        for event in events {
            match event {
                RoundEvent::PhaseChanged(Phase::DrawWindow) => {
                    reaction =
                        Some(player_rng.random_range(PLAYER_REACTION_MIN..=PLAYER_REACTION_MAX));
                }
                RoundEvent::RoundResolved(outcome) => {
                    reaction = None;
                    frames = 0;
                    summary.rounds += 1;
                    if outcome.winner == Winner::Nobody {
                        summary.no_draws += 1;
                    }
                }
                RoundEvent::ScoreChanged {
                    player_wins,
                    opponent_wins,
                } => {
                    summary.player_wins = player_wins;
                    summary.opponent_wins = opponent_wins;
                }
                _ => {}
            }
        }
    }

    summary.scoreboard = machine.ledger().display();
    log::info!("Final score {}", summary.scoreboard);
    Ok(summary)
}
