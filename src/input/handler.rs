use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{GameEngine, GameMode, GameState, Key};

/// What a terminal key press means to the front end
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Game(Key),
    Pause,
    Quit,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::Game(Key::Up),
            KeyCode::Down => KeyAction::Game(Key::Down),
            KeyCode::Left => KeyAction::Game(Key::Left),
            KeyCode::Right => KeyAction::Game(Key::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Game(Key::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Game(Key::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Game(Key::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Game(Key::Right),

            // Controls
            KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Char(' ') => KeyAction::Pause,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::Game(Key::Other),
        }
    }

    /// Apply a game key to the state. Returns false for keys the game does not handle.
    ///
    /// Up starts a new game from Ready or Lost and resumes from Paused. While
    /// running, arrows queue the next direction unless it reverses the
    /// direction the snake is currently moving in. Only the committed direction
    /// is checked, so a second key press before the next tick may still queue
    /// a turn that reverses the first one.
    pub fn apply(&self, key: Key, engine: &mut GameEngine, state: &mut GameState) -> bool {
        let Some(wanted) = key.direction() else {
            return false;
        };

        match state.mode {
            GameMode::Ready | GameMode::Lost if key == Key::Up => {
                engine.reset(state);
                state.set_mode(GameMode::Running);
            }
            GameMode::Paused if key == Key::Up => {
                state.set_mode(GameMode::Running);
            }
            GameMode::Running => {
                if !state.direction.is_opposite(wanted) {
                    state.next_direction = wanted;
                }
            }
            _ => {}
        }

        true
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
