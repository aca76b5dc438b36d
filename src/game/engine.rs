use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tracing::{debug, info};

use super::{
    action::Direction,
    config::GameConfig,
    error::{GameError, GameResult},
    grid::Grid,
    state::{GameState, Phase, Snake},
};

/// What a call to [`GameEngine::advance`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Not running; nothing changed
    Idle,
    /// Head moved, tail followed
    Moved,
    /// Head landed on food and the snake grew by one
    Grew,
    /// Head ran into the body; the game is over
    Collided,
    /// The snake grew to fill every cell
    Won,
}

impl StepOutcome {
    pub fn is_terminal(&self) -> bool {
        matches!(self, StepOutcome::Collided | StepOutcome::Won)
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    grid: Grid,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> GameResult<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            grid: config.grid(),
            config,
            rng,
        })
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Starting body: a horizontal run heading right from the grid centre
    pub fn default_snake(&self) -> GameResult<Snake> {
        let start = self.grid.index_of(self.grid.width / 2, self.grid.height / 2);
        Snake::straight(
            &self.grid,
            start,
            Direction::Right,
            self.config.initial_snake_length,
        )
    }

    /// Fresh paused game with the default body and a random food cell
    pub fn new_game(&mut self) -> GameResult<GameState> {
        let snake = self.default_snake()?;
        let food = self.random_food(&snake)?;
        Ok(GameState::new(self.grid, snake, Direction::Right, food))
    }

    /// Reinitialise `state` to a fresh paused game
    pub fn restart(&mut self, state: &mut GameState) -> GameResult<()> {
        *state = self.new_game()?;
        info!(food = state.food, "game restarted");
        Ok(())
    }

    /// Pick a food cell uniformly among the cells the snake does not occupy
    pub fn random_food(&mut self, snake: &Snake) -> GameResult<usize> {
        self.pick_free_cell(snake).ok_or(GameError::GridFull {
            occupied: snake.len(),
        })
    }

    fn pick_free_cell(&mut self, snake: &Snake) -> Option<usize> {
        let mut occupied = vec![false; self.grid.cell_count()];
        for cell in snake.iter() {
            occupied[cell] = true;
        }

        let free: Vec<usize> = occupied
            .iter()
            .enumerate()
            .filter_map(|(cell, &taken)| (!taken).then_some(cell))
            .collect();

        if free.is_empty() {
            return None;
        }
        Some(free[self.rng.gen_range(0..free.len())])
    }

    /// Delay before the next step, shrinking as the snake grows
    pub fn step_interval(&self, state: &GameState) -> Duration {
        let length = u32::try_from(state.snake.len()).unwrap_or(u32::MAX);
        self.config.base_interval() / length.max(1)
    }

    /// Change heading unless it would reverse onto the segment behind the
    /// head. Returns whether the request was applied.
    pub fn request_direction_change(&self, state: &mut GameState, candidate: Direction) -> bool {
        if state.phase.is_terminal() {
            return false;
        }
        if state.blocked_direction() == Some(candidate) {
            debug!(direction = candidate.as_str(), "direction change blocked");
            return false;
        }

        state.direction = candidate;
        true
    }

    pub fn pause(&self, state: &mut GameState) -> bool {
        if state.phase != Phase::Running {
            return false;
        }
        state.phase = Phase::Paused;
        info!(tick = state.tick, "paused");
        true
    }

    pub fn resume(&self, state: &mut GameState) -> bool {
        if state.phase != Phase::Paused {
            return false;
        }
        state.phase = Phase::Running;
        info!(tick = state.tick, "resumed");
        true
    }

    /// Execute one step of the game
    pub fn advance(&mut self, state: &mut GameState) -> StepOutcome {
        if state.phase != Phase::Running {
            return StepOutcome::Idle;
        }

        let new_head = self.grid.neighbor(state.snake.head(), state.direction);

        // The tail vacates its cell this step, so only the rest can be hit.
        if state.snake.collides_with_body(new_head) {
            state.phase = Phase::GameOver;
            info!(score = state.score(), tick = state.tick, "game over");
            return StepOutcome::Collided;
        }

        let outcome = if new_head == state.food {
            state.snake.grow_to(new_head);
            match self.pick_free_cell(&state.snake) {
                Some(food) => {
                    state.food = food;
                    debug!(length = state.snake.len(), food, "snake grew");
                    StepOutcome::Grew
                }
                None => {
                    state.phase = Phase::Won;
                    info!(length = state.snake.len(), "snake fills the grid");
                    StepOutcome::Won
                }
            }
        } else {
            state.snake.slide_to(new_head);
            StepOutcome::Moved
        };

        state.tick += 1;
        outcome
    }
}
