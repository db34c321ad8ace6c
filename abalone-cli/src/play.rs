//! Play command - one uniformly random game
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: report_game()
//! - Level 3: (delegated to playout)
//! - Level 4: formatting utilities

use anyhow::Result;
use clap::Args;

use abalone_core::{decode, GameConfig};

use crate::playout::{create_rng, random_game, GameEnd, GameRecord};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Print every move in notation
    #[arg(long)]
    pub show_moves: bool,

    /// Output the result as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
pub fn run(args: PlayArgs, config: GameConfig, seed: Option<u64>) -> Result<()> {
    tracing::info!(
        "Playing random game: layout={}, max_moves={}, seed={:?}",
        config.layout.name(),
        config.max_moves,
        seed
    );

    let mut rng = create_rng(seed);
    let record = random_game(config, &mut rng);

    report_game(&record, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn report_game(record: &GameRecord, args: &PlayArgs) -> Result<()> {
    if args.json {
        print_json(record)?;
    } else {
        print_text(record, args.show_moves);
    }
    Ok(())
}

// ============================================================================
// LEVEL 4 - FORMATTING
// ============================================================================

fn move_list(record: &GameRecord) -> Vec<String> {
    record.actions.iter().map(|&a| decode(a).to_string()).collect()
}

fn print_json(record: &GameRecord) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonOutput {
        end: GameEnd,
        moves: Vec<String>,
        returns: [f64; 2],
        marbles: [usize; 2],
    }

    let board = record.final_state.board();
    let output = JsonOutput {
        end: record.end,
        moves: move_list(record),
        returns: record.final_state.returns(),
        marbles: [
            board.marbles(abalone_core::Player::One),
            board.marbles(abalone_core::Player::Two),
        ],
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_text(record: &GameRecord, show_moves: bool) {
    if show_moves {
        for (i, mv) in move_list(record).iter().enumerate() {
            println!("{:>4}. {}", i + 1, mv);
        }
        println!();
    }
    println!("{}", record.final_state);
    println!("Result: {}", describe_end(record.end));
}

pub fn describe_end(end: GameEnd) -> String {
    match end {
        GameEnd::Threshold(winner) => format!("player {:?} wins by pushing off marbles", winner),
        GameEnd::Forfeit(loser) => format!("player {:?} forfeits with an illegal move", loser),
        GameEnd::Ceiling => "move limit reached".to_string(),
        GameEnd::Stalled(player) => format!("player {:?} has no legal move", player),
    }
}
