use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::error::{GameError, GameResult};
use super::grid::Grid;

/// Smallest grid side for which every adjacency has a unique index delta
pub const MIN_GRID_SIDE: usize = 3;

/// Largest grid side accepted
pub const MAX_GRID_SIDE: usize = 1024;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Step interval of a length-1 snake; the actual interval is this divided
    /// by the current length
    pub base_interval_ms: u64,
    /// Fixed RNG seed for reproducible food placement
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 30,
            grid_height: 30,
            initial_snake_length: 3,
            base_interval_ms: 500,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> GameResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.grid_width, self.grid_height)
    }

    pub fn base_interval(&self) -> Duration {
        Duration::from_millis(self.base_interval_ms)
    }

    /// Reject configurations the engine cannot run
    pub fn validate(&self) -> GameResult<()> {
        if self.grid_width < MIN_GRID_SIDE || self.grid_height < MIN_GRID_SIDE {
            return Err(GameError::invalid_config(format!(
                "grid must be at least {MIN_GRID_SIDE}x{MIN_GRID_SIDE}, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }
        if self.grid_width > MAX_GRID_SIDE || self.grid_height > MAX_GRID_SIDE {
            return Err(GameError::invalid_config(format!(
                "grid must be at most {MAX_GRID_SIDE}x{MAX_GRID_SIDE}, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }
        let cell_count = self
            .grid_width
            .checked_mul(self.grid_height)
            .ok_or_else(|| GameError::invalid_config("grid cell count overflows"))?;
        if self.initial_snake_length == 0 {
            return Err(GameError::invalid_config("initial snake length must be at least 1"));
        }
        if self.initial_snake_length > self.grid_width {
            return Err(GameError::invalid_config(format!(
                "initial snake length {} does not fit in a row of width {}",
                self.initial_snake_length, self.grid_width
            )));
        }
        if self.initial_snake_length >= cell_count {
            return Err(GameError::invalid_config("no room left for food"));
        }
        if self.base_interval_ms == 0 {
            return Err(GameError::invalid_config("base interval must be positive"));
        }
        Ok(())
    }
}
