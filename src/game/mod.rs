//! Core game logic module for Snake
//!
//! This module contains all the game logic without any terminal or timer
//! dependencies. The engine writes frames into any [`TileSink`] and reports
//! status changes through [`GameState::status`].

pub mod action;
pub mod config;
pub mod engine;
pub mod grid;
pub mod snapshot;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, Key};
pub use config::GameConfig;
pub use engine::{GameEngine, StepInfo, StepResult};
pub use grid::{Tile, TileGrid, TileSink};
pub use snapshot::GameSnapshot;
pub use state::{CollisionType, GameMode, GameState, Position, Snake, StatusMessage};
