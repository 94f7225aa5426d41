use super::action::Direction;
use super::config::GameConfig;
use std::fmt;

/// A cell address on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position one cell in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
}

impl Snake {
    /// Create a straight snake whose head points in `direction`
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        // Add initial body segments behind the head
        let (dx, dy) = direction.delta();
        let (back_dx, back_dy) = (-dx, -dy);

        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_by(back_dx, back_dy));
        }

        Self { body }
    }

    pub fn from_body(body: Vec<Position>) -> Self {
        Self { body }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check if any segment, head or tail included, covers `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Push a new head; drop the tail unless the snake is growing
    pub fn advance(&mut self, new_head: Position, should_grow: bool) {
        self.body.insert(0, new_head);

        if !should_grow {
            self.body.pop();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Run state of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    Ready,
    Running,
    Paused,
    Lost,
}

/// What the status display should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusMessage {
    Hidden,
    Paused,
    Ready,
    Lost { score: u64 },
}

impl StatusMessage {
    /// Text lines for the status overlay; empty when hidden
    pub fn lines(&self) -> Vec<String> {
        match self {
            StatusMessage::Hidden => Vec::new(),
            StatusMessage::Paused => vec!["Paused".into(), "Press Up To Resume".into()],
            StatusMessage::Ready => vec!["Snake".into(), "Press Up To Play".into()],
            StatusMessage::Lost { score } => vec![
                "Game Over".into(),
                format!("Score: {}", score),
                "Press Up To Play".into(),
            ],
        }
    }
}

/// Type of collision that ended a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit the wall border
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// Apples on the board; two entries may share a cell
    pub apples: Vec<Position>,
    /// Committed direction, used for movement
    pub direction: Direction,
    /// Direction queued by input, committed at the next tick
    pub next_direction: Direction,
    pub score: u64,
    /// Milliseconds between moves
    pub move_delay_ms: u64,
    pub mode: GameMode,
    pub status: StatusMessage,
    pub grid_width: usize,
    pub grid_height: usize,
}

impl GameState {
    /// An empty board waiting for the first game
    pub fn new(config: &GameConfig) -> Self {
        Self {
            snake: Snake::from_body(Vec::new()),
            apples: Vec::new(),
            direction: Direction::North,
            next_direction: Direction::North,
            score: 0,
            move_delay_ms: config.initial_move_delay_ms,
            mode: GameMode::Ready,
            status: StatusMessage::Ready,
            grid_width: config.grid_width,
            grid_height: config.grid_height,
        }
    }

    /// Check if a position lies inside the wall border
    pub fn is_in_interior(&self, pos: Position) -> bool {
        pos.x >= 1
            && pos.x <= self.grid_width as i32 - 2
            && pos.y >= 1
            && pos.y <= self.grid_height as i32 - 2
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }

    /// Switch mode and update the status display to match
    pub fn set_mode(&mut self, new_mode: GameMode) {
        let old_mode = self.mode;
        self.mode = new_mode;

        self.status = match new_mode {
            GameMode::Running => StatusMessage::Hidden,
            GameMode::Paused => StatusMessage::Paused,
            GameMode::Ready => StatusMessage::Ready,
            GameMode::Lost => StatusMessage::Lost { score: self.score },
        };

        if old_mode != new_mode {
            log::debug!("mode {:?} -> {:?}", old_mode, new_mode);
        }
    }

    pub fn is_running(&self) -> bool {
        self.mode == GameMode::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_in_direction(Direction::North), Position::new(5, 4));
        assert_eq!(pos.moved_in_direction(Direction::South), Position::new(5, 6));
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(7, 7), Direction::East, 6);
        assert_eq!(snake.len(), 6);
        assert_eq!(snake.head(), Position::new(7, 7));
        assert_eq!(snake.body[1], Position::new(6, 7));
        assert_eq!(snake.body[5], Position::new(2, 7));
        assert_eq!(snake.body_segments().len(), 5);
    }

    #[test]
    fn test_snake_advance() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::East, 3);

        snake.advance(Position::new(6, 5), false);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(6, 5));
        assert_eq!(*snake.body.last().unwrap(), Position::new(4, 5));

        snake.advance(Position::new(7, 5), true);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Position::new(7, 5));
        assert_eq!(*snake.body.last().unwrap(), Position::new(4, 5));
    }

    #[test]
    fn test_occupies_includes_head_and_tail() {
        let snake = Snake::new(Position::new(5, 5), Direction::East, 3);
        assert!(snake.occupies(Position::new(5, 5)));
        assert!(snake.occupies(Position::new(3, 5)));
        assert!(!snake.occupies(Position::new(6, 5)));
    }

    #[test]
    fn test_interior_bounds() {
        let state = GameState::new(&GameConfig::new(20, 15));

        assert!(state.is_in_interior(Position::new(1, 1)));
        assert!(state.is_in_interior(Position::new(18, 13)));
        assert!(!state.is_in_interior(Position::new(0, 5)));
        assert!(!state.is_in_interior(Position::new(19, 5)));
        assert!(!state.is_in_interior(Position::new(5, 0)));
        assert!(!state.is_in_interior(Position::new(5, 14)));
    }

    #[test]
    fn test_set_mode_status() {
        let mut state = GameState::new(&GameConfig::default());
        assert_eq!(state.status, StatusMessage::Ready);

        state.set_mode(GameMode::Running);
        assert_eq!(state.status, StatusMessage::Hidden);

        state.set_mode(GameMode::Paused);
        assert_eq!(state.status, StatusMessage::Paused);

        state.score = 12;
        state.set_mode(GameMode::Lost);
        assert_eq!(state.status, StatusMessage::Lost { score: 12 });
        assert_eq!(state.mode, GameMode::Lost);
    }

    #[test]
    fn test_status_lines() {
        assert!(StatusMessage::Hidden.lines().is_empty());
        assert_eq!(StatusMessage::Ready.lines()[1], "Press Up To Play");
        assert_eq!(StatusMessage::Lost { score: 3 }.lines()[1], "Score: 3");
    }
}
