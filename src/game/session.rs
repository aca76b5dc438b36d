//! A running game: engine, state and timer wired together.
//!
//! Every transition that stops the step loop (pause, restart, game over,
//! win) cancels the pending step, and every transition that starts it
//! (resume, a completed step) schedules the next one at the interval for the
//! current length.

use std::time::Duration;
use tracing::debug;

use super::{
    action::Direction,
    config::GameConfig,
    engine::{GameEngine, StepOutcome},
    error::{GameError, GameResult},
    scheduler::{DeadlineScheduler, ManualScheduler, Scheduler},
    state::{GameState, Snapshot},
};

pub struct Session<S: Scheduler> {
    engine: GameEngine,
    state: GameState,
    scheduler: S,
}

impl<S: Scheduler> Session<S> {
    /// Start a paused session
    pub fn new(config: GameConfig, scheduler: S) -> GameResult<Self> {
        let mut engine = GameEngine::new(config)?;
        let state = engine.new_game()?;
        Ok(Self {
            engine,
            state,
            scheduler,
        })
    }

    /// Continue from an existing position. A running state gets its next
    /// step scheduled immediately.
    pub fn with_state(config: GameConfig, state: GameState, scheduler: S) -> GameResult<Self> {
        let engine = GameEngine::new(config)?;
        if state.grid != engine.grid() {
            return Err(GameError::invalid_config(format!(
                "state grid {}x{} does not match configured {}x{}",
                state.grid.width,
                state.grid.height,
                engine.grid().width,
                engine.grid().height
            )));
        }
        if let Some(cell) = state
            .snake
            .iter()
            .chain([state.food])
            .find(|&cell| !state.grid.contains(cell))
        {
            return Err(GameError::invalid_config(format!(
                "cell {cell} lies outside the grid"
            )));
        }

        let mut session = Self {
            engine,
            state,
            scheduler,
        };
        if session.state.is_running() {
            session.schedule_next();
        }
        Ok(session)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn step_interval(&self) -> Duration {
        self.engine.step_interval(&self.state)
    }

    pub fn request_direction_change(&mut self, direction: Direction) -> bool {
        self.engine
            .request_direction_change(&mut self.state, direction)
    }

    pub fn pause(&mut self) -> bool {
        if !self.engine.pause(&mut self.state) {
            return false;
        }
        self.scheduler.cancel();
        true
    }

    /// Resume at the interval for the current length
    pub fn resume(&mut self) -> bool {
        if !self.engine.resume(&mut self.state) {
            return false;
        }
        self.schedule_next();
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        if self.state.is_paused() {
            self.resume()
        } else {
            self.pause()
        }
    }

    /// Back to the default body, paused
    pub fn restart(&mut self) -> GameResult<()> {
        self.scheduler.cancel();
        self.engine.restart(&mut self.state)
    }

    /// Run one scheduled step. Stale ticks delivered while not running are
    /// ignored.
    pub fn on_tick(&mut self) -> StepOutcome {
        let outcome = self.engine.advance(&mut self.state);
        match outcome {
            StepOutcome::Idle => {}
            StepOutcome::Moved | StepOutcome::Grew => self.schedule_next(),
            StepOutcome::Collided | StepOutcome::Won => self.scheduler.cancel(),
        }
        outcome
    }

    fn schedule_next(&mut self) {
        let interval = self.step_interval();
        debug!(interval_ms = interval.as_millis() as u64, "next step scheduled");
        self.scheduler.schedule(interval);
    }
}

impl Session<ManualScheduler> {
    /// Let `by` pass on the simulated clock, running every step that falls
    /// due on the way
    pub fn run_for(&mut self, by: Duration) -> Vec<StepOutcome> {
        let until = self.scheduler.now() + by;
        let mut outcomes = Vec::new();
        while self.scheduler.fire_next_within(until) {
            outcomes.push(self.on_tick());
        }
        self.scheduler.set_now(until);
        outcomes
    }
}

impl Session<DeadlineScheduler> {
    /// Consume the elapsed deadline and run the step
    pub fn fire_due(&mut self) -> StepOutcome {
        self.scheduler.clear();
        self.on_tick()
    }
}
