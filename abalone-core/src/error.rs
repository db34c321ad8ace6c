//! Recoverable errors
//!
//! Rule violations are not errors: an illegal action forfeits the game.

use thiserror::Error;

/// Failure to parse move notation such as `c5c6` or `c3c4d3`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("move notation must be 4 or 6 characters, got {0:?}")]
    BadLength(String),

    #[error("{0:?} is not a cell on the grid")]
    BadCell(String),

    #[error("{from:?} and {to:?} are not neighbours")]
    NotAdjacent { from: String, to: String },

    #[error("slide line {0:?} is longer than three marbles")]
    LineTooLong(String),
}

/// Invalid game parameters
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("marbles_to_win must be in 1..=14, got {0}")]
    MarblesToWin(u8),

    #[error("max_moves must be positive")]
    MaxMoves,

    #[error("marble_reward must be finite, got {0}")]
    MarbleReward(f64),

    #[error("marble_reward {reward} lets an undecided game score {score}, which must stay below 1")]
    ShapingTooLarge { reward: f64, score: f64 },

    #[error("unknown layout {0:?} (expected classic, belgian-daisy or empty)")]
    UnknownLayout(String),
}
