use crate::Position;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Invalid configuration: {mines} mines do not fit a {rows}x{cols} board")]
    InvalidConfiguration { rows: usize, cols: usize, mines: usize },
    #[error("Position {0:?} is out of bounds")]
    OutOfBounds(Position),
    #[error("Cover state shape {cover:?} does not match minefield shape {field:?}")]
    ShapeMismatch {
        field: (usize, usize),
        cover: (usize, usize),
    },
    #[error("Game is over, no further moves are accepted")]
    GameOver,
    #[error("Frontend failure: {0}")]
    Frontend(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
