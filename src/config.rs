//! Solver configuration loaded from TOML.
//!
//! ```
//! use eight_puzzle::config::SolverConfig;
//! use eight_puzzle::heuristics::Heuristic;
//! use eight_puzzle::solver::Algorithm;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     algorithm = "a_star"
//!     heuristic = "manhattan"
//!     goal = [[0, 1, 2], [3, 4, 5], [6, 7, 8]]
//! "#).unwrap();
//!
//! assert_eq!(config.algorithm, Algorithm::AStar);
//! assert_eq!(config.heuristic, Heuristic::Manhattan);
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::engine::{State, BOARD_SIZE};
use crate::error::Result;
use crate::heuristics::Heuristic;
use crate::solver::{Algorithm, Puzzle};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct SolverConfig {
    #[serde(default)]
    pub algorithm: Algorithm,

    #[serde(default)]
    pub heuristic: Heuristic,

    /// Goal arrangement. Defaults to `{{1,2,3},{4,5,6},{7,8,0}}`.
    #[serde(default)]
    pub goal: Option<[[u8; BOARD_SIZE]; BOARD_SIZE]>,

    /// Seed for generating a random start board when none is supplied.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl SolverConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Loads a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// The configured goal, validated.
    pub fn goal_state(&self) -> Result<State> {
        match self.goal {
            Some(grid) => State::try_from_grid(grid),
            None => Ok(State::goal()),
        }
    }

    /// Builds a validated [`Puzzle`] starting from `start`.
    pub fn build_puzzle(&self, start: State) -> Result<Puzzle> {
        Puzzle::new(start, self.goal_state()?, self.algorithm, self.heuristic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PuzzleError;

    #[test]
    fn test_defaults() {
        let config = SolverConfig::from_toml_str("").unwrap();
        assert_eq!(config, SolverConfig::default());
        assert_eq!(config.algorithm, Algorithm::Bfs);
        assert_eq!(config.heuristic, Heuristic::None);
        assert_eq!(config.goal_state().unwrap(), State::goal());
    }

    #[test]
    fn test_parse_full() {
        let config = SolverConfig::from_toml_str(
            r#"
            algorithm = "astar"
            heuristic = "misplaced"
            seed = 42
            "#,
        )
        .unwrap();
        assert_eq!(config.algorithm, Algorithm::AStar);
        assert_eq!(config.heuristic, Heuristic::Misplaced);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = SolverConfig::from_toml_str("depth = 3");
        assert!(matches!(result, Err(PuzzleError::Toml(_))));
    }

    #[test]
    fn test_invalid_goal_rejected() {
        let config = SolverConfig::from_toml_str("goal = [[1, 2, 3], [4, 5, 6], [7, 8, 1]]").unwrap();
        assert!(matches!(
            config.goal_state(),
            Err(PuzzleError::DuplicateTile { value: 1 })
        ));
    }

    #[test]
    fn test_build_puzzle_validates_combination() {
        let config = SolverConfig {
            algorithm: Algorithm::AStar,
            ..SolverConfig::default()
        };
        assert!(matches!(
            config.build_puzzle(State::goal()),
            Err(PuzzleError::MissingHeuristic { .. })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let result = SolverConfig::load("/nonexistent/eight_puzzle.toml");
        assert!(matches!(result, Err(PuzzleError::Io(_))));
    }
}
