use snake_garden::game::{
    Direction, GameConfig, GameEngine, GameMode, GameState, Key, Position, TileGrid,
};
use snake_garden::input::InputHandler;
use std::collections::HashSet;
use std::time::{Duration, Instant};

fn start(seed: u64) -> (GameEngine, GameState, InputHandler) {
    let handler = InputHandler::new();
    let mut engine = GameEngine::with_seed(GameConfig::default(), seed);
    let mut state = GameState::new(engine.config());
    assert!(handler.apply(Key::Up, &mut engine, &mut state));
    (engine, state, handler)
}

#[test]
fn first_tick_turns_north() {
    let (mut engine, mut state, _) = start(1);
    state.apples = vec![Position::new(15, 15), Position::new(16, 16)];

    engine.step(&mut state);

    assert_eq!(
        state.snake.body,
        vec![
            Position::new(7, 6),
            Position::new(7, 7),
            Position::new(6, 7),
            Position::new(5, 7),
            Position::new(4, 7),
            Position::new(3, 7),
        ]
    );
    assert_eq!(state.score, 0);
}

#[test]
fn eating_keeps_two_apples_and_speeds_up() {
    let (mut engine, mut state, _) = start(2);
    state.apples = vec![Position::new(7, 6), Position::new(15, 15)];

    engine.step(&mut state);

    assert_eq!(state.score, 1);
    assert_eq!(state.apples.len(), 2);
    assert_eq!(state.snake.len(), 7);
    assert_eq!(state.move_delay_ms, 540);
}

#[test]
fn running_into_left_wall_loses() {
    let (mut engine, mut state, handler) = start(3);
    state.apples = vec![Position::new(15, 15), Position::new(16, 16)];
    let mut grid = TileGrid::new(20, 20);
    let t0 = Instant::now();

    // Head north once, then west along row 6 until x = 0
    engine.update(&mut state, t0, &mut grid);
    handler.apply(Key::Left, &mut engine, &mut state);

    let mut now = t0;
    let mut frames = Vec::new();
    while state.is_running() {
        now += Duration::from_millis(state.move_delay_ms);
        frames.push(grid.clone());
        engine.update(&mut state, now, &mut grid);
    }

    assert_eq!(state.mode, GameMode::Lost);
    assert_eq!(state.snake.head(), Position::new(1, 6));
    // The losing tick drew nothing
    assert_eq!(Some(&grid), frames.last());
}

#[test]
fn random_play_keeps_invariants() {
    let directions = [Key::Up, Key::Right, Key::Down, Key::Left];

    for seed in 0..20u64 {
        let (mut engine, mut state, handler) = start(seed);
        let mut last_score = state.score;
        let mut last_delay = state.move_delay_ms;

        for turn in 0..400usize {
            if !state.is_running() {
                break;
            }
            let key = directions[(turn * 7 + seed as usize) % 4];
            let committed = state.direction;
            handler.apply(key, &mut engine, &mut state);
            assert!(!committed.is_opposite(state.next_direction));

            let len_before = state.snake.len();
            let result = engine.step(&mut state);

            if !result.terminated {
                let expected = len_before + usize::from(result.info.ate_food());
                assert_eq!(state.snake.len(), expected);

                let cells: HashSet<_> = state.snake.body.iter().collect();
                assert_eq!(cells.len(), state.snake.len());
            }
            assert_eq!(state.apples.len(), 2);
            assert!(state.score >= last_score);
            assert!(state.move_delay_ms <= last_delay);
            last_score = state.score;
            last_delay = state.move_delay_ms;
        }
    }
}

#[test]
fn pause_and_resume_keeps_game() {
    let (mut engine, mut state, handler) = start(4);
    engine.step(&mut state);
    state.set_mode(GameMode::Paused);
    let paused = state.clone();

    handler.apply(Key::Up, &mut engine, &mut state);

    assert_eq!(state.mode, GameMode::Running);
    assert_eq!(state.snake, paused.snake);
    assert_eq!(state.direction, Direction::North);
}
