//! Cell addressing on a wrap-around grid.
//!
//! Cells are identified by a flat index `0..width * height` with
//! `x = index % width` and `y = index / width`. Opposite edges are adjacent,
//! so every cell has exactly four neighbours.

use serde::{Deserialize, Serialize};

use super::action::Direction;

/// Fixed-size toroidal grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Total number of addressable cells
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    pub fn contains(&self, index: usize) -> bool {
        index < self.cell_count()
    }

    /// Column and row of a cell
    pub fn coords(&self, index: usize) -> (usize, usize) {
        (index % self.width, index / self.width)
    }

    pub fn index_of(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Adjacent cell in `direction`, wrapping at every edge.
    ///
    /// Horizontal moves stay in the same row: left from column 0 lands on the
    /// last column, right from the last column lands on column 0. Vertical
    /// moves wrap down the columns.
    pub fn neighbor(&self, index: usize, direction: Direction) -> usize {
        let cells = self.cell_count();
        let (x, _) = self.coords(index);

        match direction {
            Direction::Left if x == 0 => index + self.width - 1,
            Direction::Left => index - 1,
            Direction::Right if x == self.width - 1 => index + 1 - self.width,
            Direction::Right => index + 1,
            Direction::Up => (index + cells - self.width) % cells,
            Direction::Down => (index + self.width) % cells,
        }
    }

    /// Direction in which `to` lies as seen from `from`, if the two cells are
    /// adjacent.
    ///
    /// Works on the flat index difference `from - to`: each direction has one
    /// direct delta and one wrap-around delta.
    pub fn direction_between(&self, from: usize, to: usize) -> Option<Direction> {
        let width = self.width as i64;
        let cells = self.cell_count() as i64;
        let diff = from as i64 - to as i64;

        let candidate = if diff == 1 || diff == -(width - 1) {
            Direction::Left
        } else if diff == -1 || diff == width - 1 {
            Direction::Right
        } else if diff == width || diff == -(cells - width) {
            Direction::Up
        } else if diff == -width || diff == cells - width {
            Direction::Down
        } else {
            return None;
        };

        // A delta of +-1 across a row boundary is not an adjacency.
        (self.neighbor(from, candidate) == to).then_some(candidate)
    }
}
