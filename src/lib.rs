//! Snake Garden - the classic tile-grid Snake game
//!
//! This library provides:
//! - Core game logic, free of I/O (game module)
//! - Key mapping and direction handling (input module)
//! - TUI rendering (render module)
//! - Session statistics (metrics module)
//! - The interactive terminal loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
