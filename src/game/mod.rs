//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Front ends read [`GameState`] and drive a [`Session`] through its scheduler.

pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod scheduler;
pub mod session;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::GameConfig;
pub use engine::{GameEngine, StepOutcome};
pub use error::{GameError, GameResult};
pub use grid::Grid;
pub use scheduler::{DeadlineScheduler, ManualScheduler, Scheduler};
pub use session::Session;
pub use state::{GameState, Phase, SegmentLinks, Snake, Snapshot, Status};
