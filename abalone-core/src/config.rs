//! Game parameters

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::board::{Layout, STARTING_MARBLES};
use crate::error::ConfigError;
use crate::game::WIN_VALUE;

/// Default game length ceiling (moves, both players counted)
pub const DEFAULT_MAX_MOVES: u32 = 200;

/// Marbles a player must push off to win (6 standard, 4 for blitz)
pub const DEFAULT_MARBLES_TO_WIN: u8 = 6;

/// Shaping reward per marble of difference in undecided positions
pub const DEFAULT_MARBLE_REWARD: f64 = 0.1;

/// Tunable parameters of a game
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub layout: Layout,
    pub marbles_to_win: u8,
    pub max_moves: u32,
    /// Heuristic, not a rule: only used by `returns()` before a winner exists
    pub marble_reward: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            layout: Layout::Classic,
            marbles_to_win: DEFAULT_MARBLES_TO_WIN,
            max_moves: DEFAULT_MAX_MOVES,
            marble_reward: DEFAULT_MARBLE_REWARD,
        }
    }
}

impl GameConfig {
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_marbles_to_win(mut self, marbles_to_win: u8) -> Self {
        self.marbles_to_win = marbles_to_win;
        self
    }

    pub fn with_max_moves(mut self, max_moves: u32) -> Self {
        self.max_moves = max_moves;
        self
    }

    pub fn with_marble_reward(mut self, marble_reward: f64) -> Self {
        self.marble_reward = marble_reward;
        self
    }

    /// Marble count at or below which a player has lost
    pub fn losing_count(&self) -> usize {
        STARTING_MARBLES.saturating_sub(self.marbles_to_win as usize)
    }

    /// Largest shaping score an undecided position can reach: neither side
    /// is at the losing count, so the balance is at most `marbles_to_win - 1`
    pub fn max_shaping_score(&self) -> f64 {
        self.marble_reward.abs() * self.marbles_to_win.saturating_sub(1) as f64
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.marbles_to_win == 0 || self.marbles_to_win as usize > STARTING_MARBLES {
            return Err(ConfigError::MarblesToWin(self.marbles_to_win));
        }
        if self.max_moves == 0 {
            return Err(ConfigError::MaxMoves);
        }
        if !self.marble_reward.is_finite() {
            return Err(ConfigError::MarbleReward(self.marble_reward));
        }
        let score = self.max_shaping_score();
        if score >= WIN_VALUE {
            return Err(ConfigError::ShapingTooLarge {
                reward: self.marble_reward,
                score,
            });
        }
        Ok(())
    }

    /// Load from a JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save to a JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
