//! # 8-Puzzle Solver Library
//!
//! This library provides the board model for the 3x3 sliding tile puzzle and a
//! search engine that finds a sequence of slides from a start board to a goal board.
//!
//! It is used by two binaries:
//! - `puzzle_solver`: Takes a board (file, string or random seed), an algorithm and a
//!   heuristic, then prints the solution path step by step.
//! - `heuristic_evaluator`: Compares every algorithm/heuristic combination over a set
//!   of seeded random boards.
//!
//! ## Modules
//! - `engine`: The board representation (`State`), slide directions (`Move`) and
//!   successor generation.
//! - `heuristics`: Admissible estimates of the remaining moves (`Heuristic`).
//! - `frontier`: The open-set policies (FIFO, LIFO, priority on `g + h`).
//! - `solver`: The shared traversal, the `Algorithm` selection and the `Puzzle` facade.
//! - `config`: TOML configuration for algorithm, heuristic, goal and seed.
//! - `error`: The crate's error type.
//! - `logging`: Tracing subscriber setup for the binaries.
//! - `utils`: Parsing boards from text.

pub mod config;
pub mod engine;
pub mod error;
pub mod frontier;
pub mod heuristics;
pub mod logging;
pub mod solver;
pub mod utils;

pub use error::PuzzleError;
