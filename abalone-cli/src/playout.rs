//! Uniformly random self-play shared by the play and simulate commands
//!
//! Level 3 - single game; Level 4 - RNG and outcome classification

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use abalone_core::{ActionId, GameConfig, GameState, Player};

/// How a finished game ended
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum GameEnd {
    /// Winner pushed enough marbles off
    Threshold(Player),
    /// Loser submitted an illegal action
    Forfeit(Player),
    /// Move ceiling reached with no winner
    Ceiling,
    /// Player to move had no legal action before the ceiling
    Stalled(Player),
}

/// A completed game
#[derive(Clone, Debug)]
pub struct GameRecord {
    pub actions: Vec<ActionId>,
    pub final_state: GameState,
    pub end: GameEnd,
}

// ============================================================================
// LEVEL 3 - SINGLE GAME
// ============================================================================

/// Play random legal actions until the game is over
pub fn random_game<R: Rng>(config: GameConfig, rng: &mut R) -> GameRecord {
    let mut state = GameState::new(config);
    let mut actions = Vec::new();

    while !state.is_terminal() {
        let legal = state.legal_actions();
        let Some(&action) = legal.choose(rng) else {
            tracing::warn!("no legal actions at move {}", state.move_number());
            break;
        };
        state.apply_action(action);
        actions.push(action);
    }

    let end = classify_end(&state);
    GameRecord {
        actions,
        final_state: state,
        end,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Create RNG from seed or random
pub fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

pub fn classify_end(state: &GameState) -> GameEnd {
    match state.outcome() {
        Some(winner) => {
            let loser = winner.opponent();
            if state.board().marbles(loser) <= state.config().losing_count() {
                GameEnd::Threshold(winner)
            } else {
                GameEnd::Forfeit(loser)
            }
        }
        None if state.is_terminal() => GameEnd::Ceiling,
        None => GameEnd::Stalled(state.current_player()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_rng_deterministic() {
        let mut rng1 = create_rng(Some(42));
        let mut rng2 = create_rng(Some(42));
        assert_eq!(rng1.gen::<u64>(), rng2.gen::<u64>());
    }

    #[test]
    fn test_random_game_is_reproducible() {
        let config = GameConfig::default().with_max_moves(40);
        let a = random_game(config, &mut create_rng(Some(7)));
        let b = random_game(config, &mut create_rng(Some(7)));
        assert_eq!(a.actions, b.actions);
        assert_eq!(a.end, b.end);
    }

    #[test]
    fn test_classify_forfeit() {
        let mut state = GameState::default();
        // e5 is empty, so this forfeits for player one
        state.apply_action(abalone_core::encode(&"e5e6".parse().unwrap()));
        assert_eq!(classify_end(&state), GameEnd::Forfeit(Player::One));
    }

    #[test]
    fn test_classify_stalled_and_ceiling() {
        use abalone_core::{Board, Layout};

        // Player one has no marbles, so nothing is legal
        let state = GameState::with_board(Board::from_layout(Layout::Empty), GameConfig::default());
        assert!(state.legal_actions().is_empty());
        assert_eq!(classify_end(&state), GameEnd::Stalled(Player::One));

        let mut state = GameState::new(GameConfig::default().with_max_moves(1));
        state.apply_action(abalone_core::encode(&"c5c6".parse().unwrap()));
        assert_eq!(classify_end(&state), GameEnd::Ceiling);
    }

    #[test]
    fn test_random_game_stops_when_stalled() {
        // The empty layout leaves nothing to move
        let config = GameConfig::default().with_layout(abalone_core::Layout::Empty);
        let record = random_game(config, &mut create_rng(Some(1)));
        assert!(record.actions.is_empty());
        assert_eq!(record.end, GameEnd::Stalled(Player::One));
    }
}
