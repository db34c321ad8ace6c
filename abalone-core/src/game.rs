//! Game state: turn order, action application and scoring

use crate::board::{Board, Player};
use crate::codec::{decode, ActionId, Move, NUM_DISTINCT_ACTIONS};
use crate::config::GameConfig;
use crate::rules;

/// Return for a decided game
pub const WIN_VALUE: f64 = 1.0;

/// Game state (clone to branch)
#[derive(Clone, Debug)]
pub struct GameState {
    board: Board,
    config: GameConfig,

    /// Player whose turn it is
    current_player: Player,

    /// Winner, set by forfeiture or by reaching the marble threshold
    outcome: Option<Player>,

    /// Actions applied so far, forfeits included
    num_moves: u32,
    history: Vec<ActionId>,
}

impl GameState {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Create a new game from the config's layout
    pub fn new(config: GameConfig) -> Self {
        Self::with_board(Board::from_layout(config.layout), config)
    }

    /// Create a game from an arbitrary position; player one moves first
    pub fn with_board(board: Board, config: GameConfig) -> Self {
        Self {
            board,
            config,
            current_player: Player::One,
            outcome: None,
            num_moves: 0,
            history: Vec::new(),
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Player holding the turn, whether or not the game is over
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Player to act, or `None` once the game is over
    pub fn player_to_move(&self) -> Option<Player> {
        if self.is_terminal() {
            None
        } else {
            Some(self.current_player)
        }
    }

    pub fn outcome(&self) -> Option<Player> {
        self.outcome
    }

    pub fn move_number(&self) -> u32 {
        self.num_moves
    }

    pub fn history(&self) -> &[ActionId] {
        &self.history
    }

    // ========================================================================
    // RULES
    // ========================================================================

    /// Check `mv` against the current board for the player to move
    pub fn is_valid(&self, mv: &Move) -> bool {
        rules::is_valid(mv, &self.board, self.current_player)
    }

    /// All legal action ids in ascending order
    pub fn legal_actions(&self) -> Vec<ActionId> {
        if self.is_terminal() {
            return vec![];
        }
        (0..NUM_DISTINCT_ACTIONS as ActionId)
            .filter(|&action| self.is_valid(&decode(action)))
            .collect()
    }

    /// Apply an action. An illegal action forfeits the game for the mover.
    ///
    /// Panics if the game is already over.
    pub fn apply_action(&mut self, action: ActionId) {
        assert!(!self.is_terminal(), "action {} applied to a finished game", action);

        let mover = self.current_player;
        let mv = decode(action);
        if self.is_valid(&mv) {
            rules::apply(&mv, &mut self.board);
            tracing::trace!("player {:?} played {}", mover, mv);
            if self.reached_threshold(mover) {
                tracing::debug!("player {:?} reached the marble threshold", mover);
                self.outcome = Some(mover);
            }
        } else {
            tracing::debug!("player {:?} forfeits with illegal move {}", mover, mv);
            self.outcome = Some(mover.opponent());
        }

        self.current_player = mover.opponent();
        self.num_moves += 1;
        self.history.push(action);
    }

    /// Whether `player` has pushed off enough opposing marbles to win
    fn reached_threshold(&self, player: Player) -> bool {
        self.board.marbles(player.opponent()) <= self.config.losing_count()
    }

    /// Clone and apply an action
    pub fn child(&self, action: ActionId) -> Self {
        let mut next = self.clone();
        next.apply_action(action);
        next
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some() || self.num_moves >= self.config.max_moves
    }

    /// Per-player returns: +/-1 once decided, otherwise a marble-balance
    /// shaping score
    pub fn returns(&self) -> [f64; 2] {
        match self.outcome {
            Some(Player::One) => return [WIN_VALUE, -WIN_VALUE],
            Some(Player::Two) => return [-WIN_VALUE, WIN_VALUE],
            None => {}
        }

        if self.reached_threshold(Player::Two) {
            return [-WIN_VALUE, WIN_VALUE];
        }
        if self.reached_threshold(Player::One) {
            return [WIN_VALUE, -WIN_VALUE];
        }

        // lost by player two minus lost by player one
        let balance =
            self.board.marbles(Player::One) as f64 - self.board.marbles(Player::Two) as f64;
        let score = balance * self.config.marble_reward;
        [score, -score]
    }

    pub fn action_to_string(&self, action: ActionId) -> String {
        decode(action).to_string()
    }

    /// Comma-separated history of action ids
    pub fn information_state_string(&self) -> String {
        self.history
            .iter()
            .map(|a| a.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{CellState, Coordinate, Direction, Layout};
    use crate::codec::encode;
    use std::collections::HashSet;

    fn action(text: &str) -> ActionId {
        encode(&text.parse::<Move>().unwrap())
    }

    #[test]
    fn test_game_creation() {
        let game = GameState::default();
        assert_eq!(game.current_player(), Player::One);
        assert_eq!(game.player_to_move(), Some(Player::One));
        assert_eq!(game.move_number(), 0);
        assert_eq!(game.outcome(), None);
        assert!(!game.is_terminal());
        assert_eq!(game.returns(), [0.0, 0.0]);
    }

    #[test]
    fn test_legal_actions_opening() {
        let game = GameState::default();
        let actions = game.legal_actions();
        assert!(!actions.is_empty());
        assert!(actions.windows(2).all(|w| w[0] < w[1]));
        let unique: HashSet<_> = actions.iter().collect();
        assert_eq!(unique.len(), actions.len());
        for &a in &actions {
            assert!(game.is_valid(&decode(a)));
        }
    }

    #[test]
    fn test_simple_step() {
        let mut game = GameState::default();
        let c5 = Coordinate::new(6, 4);
        let c6 = Coordinate::new(6, 5);
        game.apply_action(encode(&Move::inline(c5, Direction::Right)));

        assert_eq!(game.board().get(c5), CellState::Empty);
        assert_eq!(game.board().get(c6), CellState::Player1);
        assert_eq!(game.current_player(), Player::Two);
        assert_eq!(game.move_number(), 1);
        assert!(!game.is_terminal());
    }

    #[test]
    fn test_forfeit_player_one() {
        let mut game = GameState::default();
        // e5 is empty at the start
        game.apply_action(action("e5e6"));
        assert!(game.is_terminal());
        assert_eq!(game.outcome(), Some(Player::Two));
        assert_eq!(game.returns(), [-1.0, 1.0]);
        assert_eq!(game.player_to_move(), None);
        assert_eq!(game.move_number(), 1);
        assert!(game.legal_actions().is_empty());
    }

    #[test]
    fn test_forfeit_player_two() {
        let mut game = GameState::default();
        game.apply_action(action("c5c6"));
        // player two tries to move a player-one marble
        game.apply_action(action("c6c7"));
        assert!(game.is_terminal());
        assert_eq!(game.returns(), [1.0, -1.0]);
    }

    #[test]
    fn test_forfeit_leaves_board_untouched() {
        let mut game = GameState::default();
        let before = game.board().clone();
        game.apply_action(action("a1a2"));
        assert_eq!(game.board(), &before);
    }

    #[test]
    fn test_threshold_win() {
        let mut board = Board::from_layout(Layout::Empty);
        for col in 6..=7 {
            board.set(Coordinate::new(4, col), CellState::Player1);
        }
        board.set(Coordinate::new(4, 8), CellState::Player2);
        board.set(Coordinate::new(0, 4), CellState::Player2);
        // One push removes the last marble needed
        let config = GameConfig::default()
            .with_marbles_to_win(13)
            .with_marble_reward(0.05);
        assert!(config.validate().is_ok());
        let mut game = GameState::with_board(board, config);
        assert_eq!(game.returns(), [0.0, 0.0]);

        game.apply_action(action("e7e8"));
        assert_eq!(game.outcome(), Some(Player::One));
        assert_eq!(game.returns(), [1.0, -1.0]);
        assert!(game.is_terminal());
    }

    #[test]
    fn test_large_shaping_score_is_not_a_win() {
        // e7-e8 pushes e9 off; player two keeps 9 marbles, above the losing count
        let mut board = Board::from_layout(Layout::Empty);
        board.set(Coordinate::new(4, 6), CellState::Player1);
        board.set(Coordinate::new(4, 7), CellState::Player1);
        board.set(Coordinate::new(4, 8), CellState::Player2);
        for col in 0..5 {
            board.set(Coordinate::new(8, col), CellState::Player1);
            board.set(Coordinate::new(7, col), CellState::Player1);
            board.set(Coordinate::new(0, col + 4), CellState::Player2);
        }
        for col in 3..7 {
            board.set(Coordinate::new(1, col), CellState::Player2);
        }
        assert_eq!(board.marbles(Player::One), 12);
        assert_eq!(board.marbles(Player::Two), 10);

        let config = GameConfig::default().with_marble_reward(0.5);
        let mut game = GameState::with_board(board, config);
        game.apply_action(action("e7e8"));

        assert_eq!(game.board().marbles(Player::Two), 9);
        assert_eq!(game.outcome(), None);
        assert!(!game.is_terminal());
        assert_eq!(game.returns(), [1.5, -1.5]);
    }

    #[test]
    fn test_threshold_win_needs_the_losing_count() {
        // With every marble required, a push down to two is not yet a win
        let mut board = Board::from_layout(Layout::Empty);
        board.set(Coordinate::new(4, 6), CellState::Player1);
        board.set(Coordinate::new(4, 7), CellState::Player1);
        board.set(Coordinate::new(4, 8), CellState::Player2);
        board.set(Coordinate::new(0, 4), CellState::Player2);
        board.set(Coordinate::new(0, 5), CellState::Player2);
        let config = GameConfig::default()
            .with_marbles_to_win(14)
            .with_marble_reward(0.05);
        let mut game = GameState::with_board(board, config);

        game.apply_action(action("e7e8"));
        assert_eq!(game.board().marbles(Player::Two), 2);
        assert_eq!(game.outcome(), None);
        assert!(!game.is_terminal());
    }

    #[test]
    fn test_shaping_returns() {
        let mut board = Board::from_layout(Layout::Classic);
        board.set(Coordinate::new(0, 4), CellState::Empty);
        board.set(Coordinate::new(0, 5), CellState::Empty);
        board.set(Coordinate::new(8, 0), CellState::Empty);
        let game = GameState::with_board(board, GameConfig::default());
        let [one, two] = game.returns();
        assert!((one - 0.1).abs() < 1e-9);
        assert!((two + 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_move_ceiling() {
        let config = GameConfig::default().with_max_moves(2);
        let mut game = GameState::new(config);
        game.apply_action(action("c5c6"));
        game.apply_action(action("g5f5"));
        assert!(game.is_terminal());
        assert_eq!(game.outcome(), None);
        assert!(game.legal_actions().is_empty());
    }

    #[test]
    #[should_panic]
    fn test_apply_after_end_panics() {
        let mut game = GameState::default();
        game.apply_action(action("e5e6"));
        game.apply_action(action("g5f5"));
    }

    #[test]
    fn test_clone_is_independent() {
        let game = GameState::default();
        let child = game.child(action("c5c6"));
        assert_eq!(game.move_number(), 0);
        assert_eq!(game.board().get(Coordinate::new(6, 4)), CellState::Player1);
        assert_eq!(child.move_number(), 1);
        assert_eq!(child.board().get(Coordinate::new(6, 4)), CellState::Empty);
    }

    #[test]
    fn test_history_strings() {
        let mut game = GameState::default();
        let first = action("c5c6");
        let second = action("g5f5");
        game.apply_action(first);
        game.apply_action(second);
        assert_eq!(game.history(), &[first, second]);
        assert_eq!(game.information_state_string(), format!("{}, {}", first, second));
        assert_eq!(game.action_to_string(first), "c5c6");
    }
}
