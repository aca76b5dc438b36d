use thiserror::Error;

/// Errors raised by the simulation core
#[derive(Error, Debug)]
pub enum GameError {
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("No free cell left for food: snake occupies all {occupied} cells")]
    GridFull { occupied: usize },

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Json(#[from] serde_json::Error),
}

pub type GameResult<T> = Result<T, GameError>;

impl GameError {
    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        GameError::InvalidConfig {
            reason: reason.into(),
        }
    }
}
