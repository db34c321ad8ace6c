//! Game metadata and an explicit registry of game factories
//!
//! Hosts build one `GameRegistry` while wiring themselves up and pass it to
//! whatever needs to create games by name.

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::codec::NUM_DISTINCT_ACTIONS;
use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::game::{GameState, WIN_VALUE};
use crate::observation::OBSERVATION_SHAPE;

/// Static facts about a game type
#[derive(Clone, Debug, Serialize)]
pub struct GameInfo {
    pub short_name: &'static str,
    pub long_name: &'static str,
    pub num_players: usize,
    pub min_utility: f64,
    pub max_utility: f64,
    pub utility_sum: f64,
    pub num_distinct_actions: usize,
    pub observation_shape: [usize; 3],
    pub default_config: GameConfig,
}

impl GameInfo {
    pub fn abalone() -> Self {
        Self {
            short_name: "abalone",
            long_name: "Abalone",
            num_players: 2,
            min_utility: -WIN_VALUE,
            max_utility: WIN_VALUE,
            utility_sum: 0.0,
            num_distinct_actions: NUM_DISTINCT_ACTIONS,
            observation_shape: OBSERVATION_SHAPE,
            default_config: GameConfig::default(),
        }
    }

    /// Longest possible game under the default config
    pub fn max_game_length(&self) -> u32 {
        self.default_config.max_moves
    }
}

/// Builds a fresh game from a validated config
pub type GameFactory = fn(GameConfig) -> GameState;

struct Entry {
    info: GameInfo,
    factory: GameFactory,
}

/// Name -> game type lookup
#[derive(Default)]
pub struct GameRegistry {
    entries: FxHashMap<&'static str, Entry>,
}

impl GameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every game this crate provides
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(GameInfo::abalone(), GameState::new);
        registry
    }

    /// Register a game type; a later registration under the same short name
    /// replaces the earlier one
    pub fn register(&mut self, info: GameInfo, factory: GameFactory) {
        self.entries.insert(info.short_name, Entry { info, factory });
    }

    pub fn get(&self, name: &str) -> Option<&GameInfo> {
        self.entries.get(name).map(|e| &e.info)
    }

    /// Registered short names, sorted
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.entries.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Create a game by name, or `None` for an unknown name
    pub fn new_game(&self, name: &str, config: GameConfig) -> Option<Result<GameState, ConfigError>> {
        let entry = self.entries.get(name)?;
        Some(config.validate().map(|()| (entry.factory)(config)))
    }
}
