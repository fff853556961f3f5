//! # N-Puzzle Solver Library
//!
//! This library finds a shortest sequence of tile slides that turns one N×N sliding-tile
//! configuration into another, using a priority-first search bounded at 36 moves.
//!
//! It is used by two binaries:
//! - `solve`: reads a start board (and optionally a target board) from text files and
//!   writes the path and a summary record to an output file.
//! - `heuristic_evaluator`: compares the built-in distances on seeded scrambled boards.
//!
//! ## Modules
//! - `engine`: the board representation (`Board`), slides, reachability test, distance
//!   measures and neighbor generation.
//! - `heuristics`: the `Heuristic` trait and the built-in `Distance` measures.
//! - `solver`: the search engine (`Solver`), its configuration and the `Solution` record.
//! - `utils`: reading boards from text and writing solutions.

pub mod engine;
pub mod heuristics;
pub mod solver;
pub mod utils;

pub use engine::{Board, BoardError};
pub use heuristics::{Distance, Heuristic};
pub use solver::{SearchStats, Solution, SolveError, Solver, SolverConfig};
