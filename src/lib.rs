//! Torus Snake - Snake on a wrap-around grid
//!
//! This library provides:
//! - Core simulation engine (game module)
//! - Terminal input mapping (input module)
//! - TUI rendering (render module)
//! - Per-process session metrics (metrics module)
//! - The interactive terminal mode (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
