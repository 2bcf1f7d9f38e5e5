//! Error types for the grid engine and the session controller.

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid size {0} is below the minimum")]
    TooSmall(usize),
    #[error("grid is not square: row {row} has {len} cells, expected {expected}")]
    NotSquare { row: usize, len: usize, expected: usize },
    #[error("invalid tile value {value} at ({row}, {col})")]
    InvalidTile { row: usize, col: usize, value: u64 },
    #[error("invalid direction: {0:?}")]
    InvalidDirection(String),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("game is over")]
    GameOver,
    #[error("game is still in progress")]
    NotFinished,
    #[error("score already submitted")]
    AlreadySubmitted,
}

impl SessionError {
    /// Stable code sent to WebSocket clients.
    pub fn code(&self) -> &'static str {
        match self {
            SessionError::GameOver => "GAME_OVER",
            SessionError::NotFinished => "GAME_NOT_FINISHED",
            SessionError::AlreadySubmitted => "ALREADY_SUBMITTED",
        }
    }
}
