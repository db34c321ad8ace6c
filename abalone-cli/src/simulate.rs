//! Simulate command - many random games in parallel
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_games(), report_results()
//! - Level 3: compute_statistics()
//! - Level 4: seeding, formatting

use anyhow::Result;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use abalone_core::{GameConfig, Player};

use crate::playout::{create_rng, random_game, GameEnd};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct SimulateArgs {
    /// Number of games to play
    #[arg(long, default_value = "100")]
    pub games: usize,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Summary of one finished game
#[derive(Clone, Copy, Debug)]
struct GameSummary {
    end: GameEnd,
    moves: u32,
    /// Player one's marbles minus player two's
    marble_balance: i32,
}

/// Aggregated results
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
struct SimulationResults {
    games: usize,
    player_one_wins: usize,
    player_two_wins: usize,
    forfeits: usize,
    ceiling: usize,
    stalled: usize,
    avg_moves: f32,
    avg_marble_balance: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run simulate command
pub fn run(args: SimulateArgs, config: GameConfig, seed: Option<u64>) -> Result<()> {
    tracing::info!(
        "Simulating {} random games: layout={}, max_moves={}",
        args.games,
        config.layout.name(),
        config.max_moves
    );

    let summaries = play_games(args.games, config, seed);
    let results = compute_statistics(&summaries);

    report_results(&results, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play all games; each game owns its own state and RNG
fn play_games(games: usize, config: GameConfig, seed: Option<u64>) -> Vec<GameSummary> {
    let progress = ProgressBar::new(games as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} games ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let summaries: Vec<GameSummary> = (0..games)
        .into_par_iter()
        .map(|i| {
            let mut rng = create_rng(game_seed(seed, i));
            let record = random_game(config, &mut rng);
            let board = record.final_state.board();
            progress.inc(1);
            GameSummary {
                end: record.end,
                moves: record.final_state.move_number(),
                marble_balance: board.marbles(Player::One) as i32
                    - board.marbles(Player::Two) as i32,
            }
        })
        .collect();

    progress.finish_and_clear();
    summaries
}

fn report_results(results: &SimulationResults, args: &SimulateArgs) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(results)?);
    } else {
        print_text_results(results);
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn compute_statistics(summaries: &[GameSummary]) -> SimulationResults {
    let mut results = SimulationResults {
        games: summaries.len(),
        ..Default::default()
    };
    if summaries.is_empty() {
        return results;
    }

    for s in summaries {
        match s.end {
            GameEnd::Threshold(Player::One) => results.player_one_wins += 1,
            GameEnd::Threshold(Player::Two) => results.player_two_wins += 1,
            GameEnd::Forfeit(_) => results.forfeits += 1,
            GameEnd::Ceiling => results.ceiling += 1,
            GameEnd::Stalled(_) => results.stalled += 1,
        }
    }

    let n = summaries.len() as f32;
    results.avg_moves = summaries.iter().map(|s| s.moves as f32).sum::<f32>() / n;
    results.avg_marble_balance = summaries.iter().map(|s| s.marble_balance as f32).sum::<f32>() / n;
    results
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Per-game seed so results do not depend on thread scheduling
fn game_seed(seed: Option<u64>, game: usize) -> Option<u64> {
    seed.map(|s| s.wrapping_add(game as u64))
}

fn percent(count: usize, total: usize) -> f32 {
    if total > 0 {
        count as f32 / total as f32 * 100.0
    } else {
        0.0
    }
}

fn print_text_results(results: &SimulationResults) {
    let total = results.games;
    println!("\n=== Simulation Results ===");
    println!("Total games:     {}", total);
    println!(
        "Player One wins: {} ({:.1}%)",
        results.player_one_wins,
        percent(results.player_one_wins, total)
    );
    println!(
        "Player Two wins: {} ({:.1}%)",
        results.player_two_wins,
        percent(results.player_two_wins, total)
    );
    println!("Forfeits:        {}", results.forfeits);
    println!(
        "Move limit:      {} ({:.1}%)",
        results.ceiling,
        percent(results.ceiling, total)
    );
    println!("Stalled:         {}", results.stalled);
    println!("Avg moves:       {:.1}", results.avg_moves);
    println!("Avg balance:     {:+.2}", results.avg_marble_balance);
}

// ============================================================================
// TESTS
// ============================================================================
