use std::time::{Duration, Instant};

/// Per-session statistics shown in the header
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    /// Time accumulated before the last pause
    banked_time: Duration,
    running: bool,
    pub high_score: u64,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            banked_time: Duration::ZERO,
            running: false,
            high_score: 0,
            games_played: 0,
        }
    }

    /// Refresh the elapsed play time; the clock only runs while the game does
    pub fn update(&mut self) {
        self.elapsed_time = if self.running {
            self.banked_time + self.start_time.elapsed()
        } else {
            self.banked_time
        };
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.banked_time = Duration::ZERO;
        self.running = true;
    }

    pub fn on_pause(&mut self) {
        if self.running {
            self.banked_time += self.start_time.elapsed();
            self.running = false;
        }
    }

    pub fn on_resume(&mut self) {
        if !self.running {
            self.start_time = Instant::now();
            self.running = true;
        }
    }

    pub fn on_game_over(&mut self, final_score: u64) {
        self.on_pause();
        self.games_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
