//! Replay command - apply moves written in notation and show the position
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: parse_moves(), replay_moves(), report_position()
//! - Level 4: formatting utilities

use anyhow::{Context, Result};
use clap::Args;

use abalone_core::{decode, encode, GameConfig, GameState, Move};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct ReplayArgs {
    /// Moves in notation, e.g. `c5c6 g5f5 c3c4d3`
    #[arg(value_name = "MOVE")]
    pub moves: Vec<String>,

    /// List the legal moves in the final position
    #[arg(long)]
    pub legal: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run replay command
pub fn run(args: ReplayArgs, config: GameConfig) -> Result<()> {
    let moves = parse_moves(&args.moves)?;
    let state = replay_moves(GameState::new(config), &moves);
    report_position(&state, args.legal);
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn parse_moves(texts: &[String]) -> Result<Vec<Move>> {
    texts
        .iter()
        .map(|text| {
            text.parse::<Move>()
                .with_context(|| format!("Failed to parse move: {}", text))
        })
        .collect()
}

/// Apply moves in order, stopping once the game is over
fn replay_moves(mut state: GameState, moves: &[Move]) -> GameState {
    for (i, mv) in moves.iter().enumerate() {
        if state.is_terminal() {
            tracing::warn!("game over after {} moves; ignoring the rest", i);
            break;
        }
        if !state.is_valid(mv) {
            tracing::warn!("{} is illegal for player {:?} and forfeits", mv, state.current_player());
        }
        state.apply_action(encode(mv));
    }
    state
}

fn report_position(state: &GameState, list_legal: bool) {
    println!("{}", state);
    if list_legal {
        let legal = legal_moves(state);
        println!("\n{} legal moves:", legal.len());
        for line in legal.chunks(10) {
            println!("  {}", line.join(" "));
        }
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn legal_moves(state: &GameState) -> Vec<String> {
    state
        .legal_actions()
        .into_iter()
        .map(|a| decode(a).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use abalone_core::Player;

    #[test]
    fn test_parse_moves_reports_bad_move() {
        let texts = vec!["c5c6".to_string(), "x9".to_string()];
        let err = parse_moves(&texts).unwrap_err();
        assert!(err.to_string().contains("x9"));
    }

    #[test]
    fn test_replay_opening() {
        let moves = parse_moves(&["c5c6".to_string(), "g5f5".to_string()]).unwrap();
        let state = replay_moves(GameState::default(), &moves);
        assert_eq!(state.move_number(), 2);
        assert_eq!(state.current_player(), Player::One);
        assert!(!state.is_terminal());
    }

    #[test]
    fn test_replay_stops_after_forfeit() {
        let moves = parse_moves(&["e5e6".to_string(), "g5f5".to_string()]).unwrap();
        let state = replay_moves(GameState::default(), &moves);
        assert_eq!(state.move_number(), 1);
        assert_eq!(state.outcome(), Some(Player::Two));
    }

    #[test]
    fn test_legal_moves_listed_in_notation() {
        let legal = legal_moves(&GameState::default());
        assert!(legal.contains(&"c5c6".to_string()));
        assert!(legal.iter().all(|m| m.len() == 4 || m.len() == 6));
    }
}
