//! Abalone Core - rules engine
//!
//! This crate provides the game logic for two-player Abalone:
//! - Board geometry (hex board embedded in a 9x9 grid) and starting layouts
//! - Dense action-id encoding and text notation for moves
//! - Move legality (in-line pushes with sumito, lateral slides)
//! - Game state with forfeiture, marble-threshold wins and a move ceiling
//! - Observation tensor, rendering and a game registry for hosts

pub mod board;
pub mod codec;
pub mod notation;
pub mod rules;
pub mod game;
pub mod config;
pub mod observation;
pub mod registry;
pub mod error;

// Re-exports for convenient access
pub use board::{Board, CellState, Coordinate, Direction, Layout, Player, STARTING_MARBLES};
pub use codec::{decode, encode, ActionId, Move, NUM_DISTINCT_ACTIONS};
pub use game::{GameState, WIN_VALUE};
pub use config::GameConfig;
pub use observation::{OBSERVATION_SHAPE, OBSERVATION_SIZE};
pub use registry::{GameInfo, GameRegistry};
pub use error::{ConfigError, NotationError};
