//! Two-phase solver for the 3x3x3 Rubik's cube.
//!
//! Give [`solve`] a 54-character facelet string (faces in U R F D L B order,
//! each row-major) and it returns a short move sequence, around twenty turns,
//! that restores the solved cube. Phase 1 reduces the cube to the subgroup
//! generated by U, D and the half turns; phase 2 finishes inside it. Both
//! phases are IDA* searches over precomputed coordinate tables.

pub mod coord;
pub mod cube;
pub mod search;
pub mod tables;

pub use cube::{CubieCube, Face, FaceCube, Move};
pub use search::{Solution, SolveParams, Solver};
pub use tables::Tables;

use thiserror::Error;

/// Everything that can go wrong between a facelet string and a solution.
/// The display strings double as the stable error kinds: callers that need
/// the textual protocol print them as `Error: <kind>`.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// Input is not exactly 54 facelets long.
    #[error("invalid length")]
    InvalidLength,
    /// A character outside U, R, F, D, L, B.
    #[error("invalid symbol")]
    InvalidSymbol,
    /// Not nine stickers of some colour, or two faces share a center colour.
    #[error("invalid counts / centers")]
    InvalidCounts,
    /// Stickers do not assemble into a legal set of cubies.
    #[error("invalid cube")]
    InvalidCube,
    /// A well-formed cube that violates a parity invariant.
    #[error("unsolvable")]
    Unsolvable,
    /// Search exhausted its depth or time budget without any solution.
    #[error("no solution in budget")]
    NoSolution,
}

/// Solves a facelet string with default parameters and the process-wide
/// shared tables. The first call pays for table setup; see [`init_tables`].
pub fn solve(facelets: &str) -> Result<String, SolveError> {
    solve_with(tables::shared(), facelets, SolveParams::default())
}

/// Solves against a caller-provided table set and parameters.
pub fn solve_with(
    tables: &Tables,
    facelets: &str,
    params: SolveParams,
) -> Result<String, SolveError> {
    Solver::new(tables, params).solve(facelets)
}

/// Builds or loads the shared tables now, so no later [`solve`] call pays
/// that cost.
pub fn init_tables() {
    tables::shared();
}
