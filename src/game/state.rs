use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::action::Direction;
use super::error::{GameError, GameResult};
use super::grid::Grid;

/// The snake, stored tail first and head last
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    cells: VecDeque<usize>,
}

impl Snake {
    /// Build a snake from cells ordered tail to head. A snake always has a
    /// head, so an empty sequence is rejected.
    pub fn new(cells: impl IntoIterator<Item = usize>) -> GameResult<Self> {
        let cells: VecDeque<usize> = cells.into_iter().collect();
        if cells.is_empty() {
            return Err(GameError::invalid_config("snake needs at least one cell"));
        }
        Ok(Self { cells })
    }

    /// Straight snake of `length` cells ending at the cell `length - 1` steps
    /// from `start` in `direction`.
    pub fn straight(
        grid: &Grid,
        start: usize,
        direction: Direction,
        length: usize,
    ) -> GameResult<Self> {
        let mut cells = VecDeque::with_capacity(length);
        let mut cell = start;
        for _ in 0..length {
            cells.push_back(cell);
            cell = grid.neighbor(cell, direction);
        }
        Self::new(cells)
    }

    pub fn head(&self) -> usize {
        self.cells[self.cells.len() - 1]
    }

    pub fn tail(&self) -> usize {
        self.cells[0]
    }

    /// The segment directly behind the head
    pub fn neck(&self) -> Option<usize> {
        self.cells.len().checked_sub(2).map(|i| self.cells[i])
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: usize) -> bool {
        self.cells.contains(&cell)
    }

    /// Every segment except the tail: the cells still occupied once the
    /// tail moves on
    pub fn collides_with_body(&self, cell: usize) -> bool {
        self.cells.iter().skip(1).any(|&c| c == cell)
    }

    pub fn position_of(&self, cell: usize) -> Option<usize> {
        self.cells.iter().position(|&c| c == cell)
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<usize> {
        self.cells.iter().copied().collect()
    }

    /// Append a new head, keeping the tail
    pub fn grow_to(&mut self, new_head: usize) {
        self.cells.push_back(new_head);
    }

    /// Drop the tail and append a new head
    pub fn slide_to(&mut self, new_head: usize) {
        self.cells.pop_front();
        self.cells.push_back(new_head);
    }

    /// True when no cell appears twice
    pub fn is_self_disjoint(&self) -> bool {
        let mut seen = self.to_vec();
        seen.sort_unstable();
        seen.windows(2).all(|w| w[0] != w[1])
    }
}

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Paused,
    Running,
    GameOver,
    /// The snake filled the grid; no cell is left for food
    Won,
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::GameOver | Phase::Won)
    }
}

/// Flags polled by renderers every frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub paused: bool,
    pub game_over: bool,
    pub tick: u64,
}

/// Which way the neighbouring segments of a snake cell lie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentLinks {
    /// Towards the tail; `None` for the tail itself
    pub prev: Option<Direction>,
    /// Towards the head; `None` for the head itself
    pub next: Option<Direction>,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub grid: Grid,
    pub snake: Snake,
    pub direction: Direction,
    pub food: usize,
    pub phase: Phase,
    /// Steps taken since the last restart
    pub tick: u64,
    pub initial_length: usize,
}

impl GameState {
    /// Create a new, paused game state
    pub fn new(grid: Grid, snake: Snake, direction: Direction, food: usize) -> Self {
        let initial_length = snake.len();
        Self {
            grid,
            snake,
            direction,
            food,
            phase: Phase::Paused,
            tick: 0,
            initial_length,
        }
    }

    pub fn score(&self) -> usize {
        self.snake.len().saturating_sub(self.initial_length)
    }

    pub fn is_paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn is_won(&self) -> bool {
        self.phase == Phase::Won
    }

    pub fn status(&self) -> Status {
        Status {
            paused: self.is_paused(),
            game_over: self.is_game_over(),
            tick: self.tick,
        }
    }

    /// The direction that would move the head onto the segment behind it
    pub fn blocked_direction(&self) -> Option<Direction> {
        let neck = self.snake.neck()?;
        self.grid.direction_between(self.snake.head(), neck)
    }

    /// Orientation of the segments around `cell`, or `None` if the snake
    /// does not occupy it
    pub fn segment_links(&self, cell: usize) -> Option<SegmentLinks> {
        let i = self.snake.position_of(cell)?;
        let cells = self.snake.to_vec();

        let prev = i
            .checked_sub(1)
            .and_then(|p| self.grid.direction_between(cell, cells[p]));
        let next = cells
            .get(i + 1)
            .and_then(|&n| self.grid.direction_between(cell, n));

        Some(SegmentLinks { prev, next })
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            width: self.grid.width,
            height: self.grid.height,
            snake: self.snake.to_vec(),
            food: self.food,
            direction: self.direction,
            paused: self.is_paused(),
            game_over: self.is_game_over(),
            won: self.is_won(),
            score: self.score(),
            tick: self.tick,
        }
    }
}

/// Serialisable read surface of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub width: usize,
    pub height: usize,
    /// Tail first, head last
    pub snake: Vec<usize>,
    pub food: usize,
    pub direction: Direction,
    pub paused: bool,
    pub game_over: bool,
    pub won: bool,
    pub score: usize,
    pub tick: u64,
}
