use thiserror::Error as ThisError;

use crate::constants::MIN_CYCLE_POINTS;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid data: {0}")]
    InvalidData(String),
    #[error("tour is empty")]
    EmptyTour,
    #[error("need at least {needed} points for a cycle, got {got}")]
    TooFewPoints { needed: usize, got: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData(message.into())
    }

    pub fn too_few_points(got: usize) -> Self {
        Self::TooFewPoints {
            needed: MIN_CYCLE_POINTS,
            got,
        }
    }
}
