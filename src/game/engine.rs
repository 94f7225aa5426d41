use super::{
    action::Direction,
    config::GameConfig,
    grid::{Tile, TileSink},
    state::{CollisionType, GameMode, GameState, Position, Snake},
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::{Duration, Instant};

/// Head of the snake at the start of every game
pub const START_HEAD: Position = Position { x: 7, y: 7 };
/// Length of the snake at the start of every game
pub const START_LENGTH: usize = 6;

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Number of apples eaten this step (two apples can share a cell)
    pub apples_eaten: u32,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
}

impl StepInfo {
    pub fn ate_food(&self) -> bool {
        self.apples_eaten > 0
    }
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the game has ended
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

impl StepResult {
    fn idle(terminated: bool) -> Self {
        Self {
            terminated,
            info: StepInfo {
                apples_eaten: 0,
                collision_type: None,
            },
        }
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
    last_move: Option<Instant>,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an engine whose apple placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        Self {
            config,
            rng,
            last_move: None,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// A fresh board, already reset and waiting in Ready mode
    pub fn new_game(&mut self) -> GameState {
        let mut state = GameState::new(&self.config);
        self.reset(&mut state);
        state
    }

    /// Reset the game to its starting layout. The mode is left untouched.
    pub fn reset(&mut self, state: &mut GameState) {
        // An eastbound snake that has just turned north
        state.snake = Snake::new(START_HEAD, Direction::East, START_LENGTH);
        state.direction = Direction::North;
        state.next_direction = Direction::North;
        state.grid_width = self.config.grid_width;
        state.grid_height = self.config.grid_height;

        state.apples.clear();
        for _ in 0..self.config.apple_count {
            let apple = self.spawn_apple(&state.snake);
            state.apples.push(apple);
        }

        state.move_delay_ms = self.config.initial_move_delay_ms;
        state.score = 0;
        self.last_move = None;

        log::info!("new game, apples at {:?}", state.apples);
    }

    /// Advance the game if it is running and the move delay has passed.
    ///
    /// Rasterizes into `grid` after every move that does not end the game.
    /// Returns how long to wait before calling again, or `None` once the game
    /// is no longer running.
    pub fn update(
        &mut self,
        state: &mut GameState,
        now: Instant,
        grid: &mut impl TileSink,
    ) -> Option<Duration> {
        if !state.is_running() {
            return None;
        }

        let due = match self.last_move {
            None => true,
            Some(last) => {
                now.saturating_duration_since(last) >= Duration::from_millis(state.move_delay_ms)
            }
        };

        if due {
            let result = self.step(state);
            if !result.terminated {
                self.rasterize(state, grid);
            }
            self.last_move = Some(now);
        }

        state
            .is_running()
            .then(|| Duration::from_millis(state.move_delay_ms))
    }

    /// Execute one tick of the game
    pub fn step(&mut self, state: &mut GameState) -> StepResult {
        if !state.is_running() {
            return StepResult::idle(state.mode == GameMode::Lost);
        }

        // Reversals were already filtered when the key was pressed
        state.direction = state.next_direction;

        let new_head = state.snake.head().moved_in_direction(state.direction);

        if let Some(collision_type) = self.check_collision(state, new_head) {
            log::info!(
                "game over at {} ({:?}), score {}",
                new_head,
                collision_type,
                state.score
            );
            state.set_mode(GameMode::Lost);

            return StepResult {
                terminated: true,
                info: StepInfo {
                    apples_eaten: 0,
                    collision_type: Some(collision_type),
                },
            };
        }

        let apples_eaten = self.eat_apples(state, new_head);
        state.snake.advance(new_head, apples_eaten > 0);

        log::trace!("head {} len {}", new_head, state.snake.len());

        StepResult {
            terminated: false,
            info: StepInfo {
                apples_eaten,
                collision_type: None,
            },
        }
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &GameState, pos: Position) -> Option<CollisionType> {
        if !state.is_in_interior(pos) {
            return Some(CollisionType::Wall);
        }

        if state.is_occupied_by_snake(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Remove every apple at `head`, replacing each one and speeding the game up
    fn eat_apples(&mut self, state: &mut GameState, head: Position) -> u32 {
        let before = state.apples.len();
        state.apples.retain(|apple| *apple != head);
        let eaten = (before - state.apples.len()) as u32;

        for _ in 0..eaten {
            let apple = self.spawn_apple(&state.snake);
            state.apples.push(apple);
            state.score += 1;
            state.move_delay_ms = (state.move_delay_ms as f64 * self.config.speedup_factor) as u64;
        }

        if eaten > 0 {
            log::debug!(
                "ate {} apple(s) at {}, score {}, delay {}ms",
                eaten,
                head,
                state.score,
                state.move_delay_ms
            );
        }

        eaten
    }

    /// Pick a random interior cell not covered by the snake.
    ///
    /// Apples may land on other apples. Loops forever if the snake fills the
    /// whole interior.
    pub fn spawn_apple(&mut self, snake: &Snake) -> Position {
        let (min_x, max_x, min_y, max_y) = self.config.interior();

        loop {
            let x = self.rng.gen_range(min_x..=max_x);
            let y = self.rng.gen_range(min_y..=max_y);
            let pos = Position::new(x, y);

            if !snake.occupies(pos) {
                return pos;
            }
        }
    }

    /// Redraw the whole frame: walls, then apples, then the snake
    pub fn rasterize(&self, state: &GameState, grid: &mut impl TileSink) {
        grid.clear();

        let max_x = state.grid_width as i32 - 1;
        let max_y = state.grid_height as i32 - 1;
        for x in 0..=max_x {
            grid.set_tile(Tile::Wall, x, 0);
            grid.set_tile(Tile::Wall, x, max_y);
        }
        for y in 1..max_y {
            grid.set_tile(Tile::Wall, 0, y);
            grid.set_tile(Tile::Wall, max_x, y);
        }

        for apple in &state.apples {
            grid.set_tile(Tile::Apple, apple.x, apple.y);
        }

        for (i, segment) in state.snake.body.iter().enumerate() {
            let tile = if i == 0 { Tile::SnakeHead } else { Tile::SnakeBody };
            grid.set_tile(tile, segment.x, segment.y);
        }
    }
}
