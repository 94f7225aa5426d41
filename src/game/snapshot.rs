//! Save and restore of an in-progress game
//!
//! A [`GameSnapshot`] is a flat, fixed-schema record: coordinates are
//! flattened to `[x1, y1, x2, y2, ...]` and directions are stored as integer
//! codes. Snapshots are written to disk as pretty-printed JSON.

use super::{
    action::Direction,
    config::GameConfig,
    state::{GameMode, GameState, Position, Snake, StatusMessage},
};
use anyhow::{bail, ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Persisted form of a [`GameState`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Apple cells, flattened
    pub apples: Vec<i32>,
    /// Committed direction code
    pub direction: i32,
    /// Pending direction code
    pub next_direction: i32,
    /// Move delay in milliseconds
    pub move_delay: i64,
    pub score: i64,
    /// Snake cells, flattened, head first
    pub snake: Vec<i32>,
}

fn flatten(cells: &[Position]) -> Vec<i32> {
    cells.iter().flat_map(|c| [c.x, c.y]).collect()
}

fn unflatten(raw: &[i32], what: &str) -> Result<Vec<Position>> {
    ensure!(
        raw.len() % 2 == 0,
        "{} has an odd number of ordinates ({})",
        what,
        raw.len()
    );
    Ok(raw
        .chunks_exact(2)
        .map(|pair| Position::new(pair[0], pair[1]))
        .collect())
}

fn direction_from_code(code: i32, what: &str) -> Result<Direction> {
    match Direction::from_code(code) {
        Some(dir) => Ok(dir),
        None => bail!("unknown {} code {}", what, code),
    }
}

impl GameState {
    /// Capture everything needed to resume this game later
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            apples: flatten(&self.apples),
            direction: self.direction.code(),
            next_direction: self.next_direction.code(),
            move_delay: self.move_delay_ms as i64,
            score: self.score as i64,
            snake: flatten(&self.snake.body),
        }
    }

    /// Rebuild a game from a snapshot. The restored game starts out paused.
    pub fn restore(snapshot: &GameSnapshot, config: &GameConfig) -> Result<Self> {
        let body = unflatten(&snapshot.snake, "snake")?;
        ensure!(!body.is_empty(), "snake has no segments");
        let apples = unflatten(&snapshot.apples, "apples")?;
        ensure!(snapshot.move_delay >= 0, "negative move delay");
        ensure!(snapshot.score >= 0, "negative score");

        let state = GameState {
            snake: Snake::from_body(body),
            apples,
            direction: direction_from_code(snapshot.direction, "direction")?,
            next_direction: direction_from_code(snapshot.next_direction, "next direction")?,
            score: snapshot.score as u64,
            move_delay_ms: snapshot.move_delay as u64,
            mode: GameMode::Paused,
            status: StatusMessage::Paused,
            grid_width: config.grid_width,
            grid_height: config.grid_height,
        };
        for cell in state.snake.body.iter().chain(&state.apples) {
            ensure!(
                state.is_in_interior(*cell),
                "cell {} lies outside the {}x{} board",
                cell,
                state.grid_width,
                state.grid_height
            );
        }
        log::debug!("restored game, score {}", state.score);

        Ok(state)
    }
}

/// Write a snapshot to `path`, creating parent directories if needed
pub fn save(path: &Path, snapshot: &GameSnapshot) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }

    let json = serde_json::to_string_pretty(snapshot).context("Failed to serialize snapshot")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write snapshot to {:?}", path))?;

    log::info!("saved game to {:?}", path);
    Ok(())
}

/// Read a snapshot previously written by [`save`]
pub fn load(path: &Path) -> Result<GameSnapshot> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot from {:?}", path))?;
    let snapshot = serde_json::from_str(&json).context("Failed to deserialize snapshot")?;

    log::info!("loaded game from {:?}", path);
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameEngine;
    use tempfile::TempDir;

    fn played_state() -> GameState {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 21);
        let mut state = engine.new_game();
        state.set_mode(GameMode::Running);
        state.apples = vec![Position::new(7, 6), Position::new(7, 6)];
        engine.step(&mut state);
        state.next_direction = Direction::East;
        engine.step(&mut state);
        state
    }

    #[test]
    fn test_snapshot_layout() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config);
        state.snake = Snake::from_body(vec![Position::new(3, 4), Position::new(2, 4)]);
        state.apples = vec![Position::new(9, 1)];
        state.direction = Direction::South;
        state.next_direction = Direction::West;
        state.move_delay_ms = 437;
        state.score = 5;

        let snapshot = state.snapshot();

        assert_eq!(snapshot.snake, vec![3, 4, 2, 4]);
        assert_eq!(snapshot.apples, vec![9, 1]);
        assert_eq!(snapshot.direction, 2);
        assert_eq!(snapshot.next_direction, 4);
        assert_eq!(snapshot.move_delay, 437);
        assert_eq!(snapshot.score, 5);
    }

    #[test]
    fn test_restore_reproduces_game() {
        let config = GameConfig::default();
        let mut state = played_state();
        state.set_mode(GameMode::Paused);

        let restored = GameState::restore(&state.snapshot(), &config).unwrap();

        assert_eq!(restored, state);
        assert_eq!(restored.mode, GameMode::Paused);
        assert_eq!(restored.status, StatusMessage::Paused);
    }

    #[test]
    fn test_restore_rejects_bad_records() {
        let config = GameConfig::default();
        let good = played_state().snapshot();

        let odd = GameSnapshot {
            snake: vec![1, 2, 3],
            ..good.clone()
        };
        assert!(GameState::restore(&odd, &config).is_err());

        let empty = GameSnapshot {
            snake: Vec::new(),
            ..good.clone()
        };
        assert!(GameState::restore(&empty, &config).is_err());

        let bad_dir = GameSnapshot {
            next_direction: 9,
            ..good.clone()
        };
        assert!(GameState::restore(&bad_dir, &config).is_err());

        let negative = GameSnapshot {
            move_delay: -1,
            ..good
        };
        assert!(GameState::restore(&negative, &config).is_err());
    }

    #[test]
    fn test_restore_rejects_cells_outside_board() {
        let config = GameConfig::default();
        let mut big = GameState::new(&GameConfig::new(30, 30));
        big.snake = Snake::new(Position::new(25, 25), Direction::East, 3);
        big.apples = vec![Position::new(5, 5), Position::new(5, 6)];
        assert!(GameState::restore(&big.snapshot(), &config).is_err());

        big.snake = Snake::new(Position::new(7, 7), Direction::East, 3);
        big.apples = vec![Position::new(27, 27), Position::new(26, 3)];
        assert!(GameState::restore(&big.snapshot(), &config).is_err());

        // Wall cells are not part of the board either
        big.apples = vec![Position::new(0, 5)];
        assert!(GameState::restore(&big.snapshot(), &config).is_err());

        big.apples = vec![Position::new(18, 18)];
        assert!(GameState::restore(&big.snapshot(), &config).is_ok());
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("saves").join("game.json");
        let snapshot = played_state().snapshot();

        save(&path, &snapshot).unwrap();
        let loaded = load(&path).unwrap();

        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn test_load_garbage_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("game.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(load(&path).is_err());
    }
}
