use thiserror::Error;

/// Errors that can occur in the enclosure engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnclosureError {
    #[error("Board size {0} is not supported")]
    InvalidBoardSize(usize),

    #[error("Cell ({row}, {col}) is outside a {size}x{size} board")]
    OutOfBounds { row: usize, col: usize, size: usize },

    #[error("Inconsistent walls: {0}")]
    InconsistentWalls(String),

    #[error("Bucket counts total {counted} but {actions} actions were enumerated")]
    BucketMismatch { counted: usize, actions: usize },

    #[error("Invalid move: {0}")]
    InvalidMove(String),

    #[error("No legal moves available")]
    NoLegalMoves,

    #[error("Game is already decided")]
    GameOver,

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Convenience Result type for enclosure operations
pub type Result<T> = std::result::Result<T, EnclosureError>;
