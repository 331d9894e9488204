//! Error types for the 8-puzzle crate.

use thiserror::Error;

use crate::solver::Algorithm;

/// Everything that can go wrong before a search starts.
///
/// An exhausted search is not an error: it is reported as
/// [`SolveOutcome::NoSolution`](crate::solver::SolveOutcome::NoSolution).
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PuzzleError {
    #[error("invalid board dimensions: expected {expected} cells, got {got}")]
    InvalidDimensions { expected: usize, got: usize },

    #[error("tile value {value} at ({row}, {col}) is out of range 0..=8")]
    TileOutOfRange { value: u8, row: usize, col: usize },

    #[error("tile value {value} appears more than once")]
    DuplicateTile { value: u8 },

    #[error("unrecognized character '{character}' in row {row} col {col}")]
    InvalidCharacter {
        character: char,
        row: usize,
        col: usize,
    },

    #[error("algorithm {algorithm} requires an informed heuristic, got none")]
    MissingHeuristic { algorithm: Algorithm },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, PuzzleError>;
