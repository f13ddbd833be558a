use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board dimensions must be positive")]
    EmptyBoard,
    #[error("Board has more cells than can be addressed")]
    BoardTooLarge,
    #[error("Mines must be less than cells")]
    TooManyMines,
    #[error("Coordinates out of bounds")]
    InvalidCoords,
}

pub type Result<T> = std::result::Result<T, GameError>;
