use std::time::{Duration, Instant};

/// Play-time clock and best score for one process
pub struct GameMetrics {
    /// Running time banked before the current stretch
    pub banked_time: Duration,
    running_since: Option<Instant>,
    pub high_score: usize,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            banked_time: Duration::ZERO,
            running_since: None,
            high_score: 0,
            games_played: 0,
        }
    }

    /// Play time of the current game, excluding paused stretches
    pub fn elapsed_time(&self) -> Duration {
        self.banked_time + self.running_since.map_or(Duration::ZERO, |t| t.elapsed())
    }

    pub fn on_resume(&mut self) {
        if self.running_since.is_none() {
            self.running_since = Some(Instant::now());
        }
    }

    pub fn on_pause(&mut self) {
        if let Some(since) = self.running_since.take() {
            self.banked_time += since.elapsed();
        }
    }

    pub fn on_game_start(&mut self) {
        self.banked_time = Duration::ZERO;
        self.running_since = None;
    }

    pub fn on_game_over(&mut self, final_score: usize) {
        self.on_pause();
        self.games_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    pub fn format_time(&self) -> String {
        format_duration(self.elapsed_time())
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

fn format_duration(elapsed: Duration) -> String {
    let total_secs = elapsed.as_secs();
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}", minutes, seconds)
}
