use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid difficulty index {0}, expected 0..=2")]
    InvalidDifficulty(u8),
}

pub type Result<T> = core::result::Result<T, GameError>;
