use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest grid width or height accepted, wall border included
pub const MAX_GRID_SIZE: usize = 500;
/// Largest number of terminal columns per tile
pub const MAX_TILE_WIDTH: usize = 8;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid, wall border included
    pub grid_width: usize,
    /// Height of the game grid, wall border included
    pub grid_height: usize,
    /// Terminal columns used to draw one tile
    pub tile_width: usize,

    /// Delay between moves at the start of a game, in milliseconds
    pub initial_move_delay_ms: u64,
    /// Factor applied to the move delay every time an apple is eaten
    pub speedup_factor: f64,
    /// Number of apples kept on the board
    pub apple_count: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            tile_width: 2,
            initial_move_delay_ms: 600,
            speedup_factor: 0.9,
            apple_count: 2,
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

    /// Smallest grid that still fits the starting snake
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Create a large grid
    pub fn large() -> Self {
        Self::new(30, 30)
    }

    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig =
            serde_json::from_str(&json).context("Failed to deserialize config")?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the starting snake fits inside the walls and the speed ramp is sane
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.grid_width >= 10 && self.grid_height >= 10,
            "grid must be at least 10x10, got {}x{}",
            self.grid_width,
            self.grid_height
        );
        ensure!(
            self.grid_width <= MAX_GRID_SIZE && self.grid_height <= MAX_GRID_SIZE,
            "grid must be at most {}x{}, got {}x{}",
            MAX_GRID_SIZE,
            MAX_GRID_SIZE,
            self.grid_width,
            self.grid_height
        );
        ensure!(
            (1..=MAX_TILE_WIDTH).contains(&self.tile_width),
            "tile width must be between 1 and {}, got {}",
            MAX_TILE_WIDTH,
            self.tile_width
        );
        ensure!(
            self.speedup_factor > 0.0 && self.speedup_factor <= 1.0,
            "speedup factor must be in (0, 1], got {}",
            self.speedup_factor
        );
        Ok(())
    }

    /// Inclusive bounds of the playable interior as (min_x, max_x, min_y, max_y)
    pub fn interior(&self) -> (i32, i32, i32, i32) {
        (
            1,
            self.grid_width as i32 - 2,
            1,
            self.grid_height as i32 - 2,
        )
    }
}
