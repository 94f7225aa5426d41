use anyhow::{Context, Result};
use crossterm::{
    event::{DisableFocusChange, EnableFocusChange, Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::time::interval;

use crate::game::{snapshot, GameConfig, GameEngine, GameMode, GameState, Key, TileGrid};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::modes::TickTimer;
use crate::render::Renderer;

pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    grid: TileGrid,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    state_file: Option<PathBuf>,
    should_quit: bool,
}

impl HumanMode {
    /// Set up a session, resuming the game saved in `state_file` if there is one
    pub fn new(config: GameConfig, state_file: Option<PathBuf>) -> Self {
        let engine = GameEngine::new(config.clone());
        let mut grid = TileGrid::new(config.grid_width, config.grid_height);

        let state = state_file
            .as_deref()
            .filter(|path| path.exists())
            .and_then(|path| {
                match snapshot::load(path).and_then(|snap| GameState::restore(&snap, &config)) {
                    Ok(state) => Some(state),
                    Err(err) => {
                        log::warn!("ignoring saved game {:?}: {:#}", path, err);
                        None
                    }
                }
            })
            .unwrap_or_else(|| GameState::new(&config));

        engine.rasterize(&state, &mut grid);

        Self {
            engine,
            state,
            grid,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(config.tile_width),
            input_handler: InputHandler::new(),
            state_file,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen, EnableFocusChange)
            .context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result?;
        self.save_game()
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut tick_timer = TickTimer::new();

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event, &mut tick_timer),
                        Some(Err(err)) => log::warn!("terminal event error: {}", err),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick
                _ = tick_timer.fired() => {
                    self.pump(&mut tick_timer);
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.grid, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event, timer: &mut TickTimer) {
        match event {
            Event::Key(key) => {
                // Only process key press events, not release
                if key.kind != KeyEventKind::Press {
                    return;
                }

                match self.input_handler.handle_key_event(key) {
                    KeyAction::Game(game_key) => self.handle_game_key(game_key, timer),
                    KeyAction::Pause => self.pause(timer),
                    KeyAction::Quit => self.should_quit = true,
                }
            }
            // Leaving the terminal pauses, like a phone app going to the background
            Event::FocusLost => self.pause(timer),
            _ => {}
        }
    }

    fn handle_game_key(&mut self, key: Key, timer: &mut TickTimer) {
        let before = self.state.mode;

        if !self.input_handler.apply(key, &mut self.engine, &mut self.state) {
            return;
        }

        if before != GameMode::Running && self.state.is_running() {
            if before == GameMode::Paused {
                self.metrics.on_resume();
            } else {
                self.metrics.on_game_start();
            }
            self.pump(timer);
        }
    }

    fn pause(&mut self, timer: &mut TickTimer) {
        if self.state.is_running() {
            self.state.set_mode(GameMode::Paused);
            self.metrics.on_pause();
            timer.disarm();
        }
    }

    /// Run the engine and re-arm the tick timer for the next move
    fn pump(&mut self, timer: &mut TickTimer) {
        let was_running = self.state.is_running();

        match self
            .engine
            .update(&mut self.state, Instant::now(), &mut self.grid)
        {
            Some(delay) => timer.arm(delay),
            None => {
                timer.disarm();
                if was_running && self.state.mode == GameMode::Lost {
                    self.metrics.on_game_over(self.state.score);
                }
            }
        }
    }

    /// Persist a game in progress, or drop a stale save when there is none
    fn save_game(&mut self) -> Result<()> {
        let Some(path) = self.state_file.as_deref() else {
            return Ok(());
        };

        match self.state.mode {
            GameMode::Running | GameMode::Paused => {
                self.state.set_mode(GameMode::Paused);
                snapshot::save(path, &self.state.snapshot())
            }
            GameMode::Ready | GameMode::Lost => {
                if path.exists() {
                    std::fs::remove_file(path)
                        .with_context(|| format!("Failed to remove old save {:?}", path))?;
                    log::info!("no game in progress, removed {:?}", path);
                }
                Ok(())
            }
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), DisableFocusChange, LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
