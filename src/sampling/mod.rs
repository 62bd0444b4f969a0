//! Sampling module - Monte Carlo sampling of the auxiliary field.

mod sweep;
mod solver;

pub use sweep::{acceptance_probability, determinant_ratio, sweep, SweepState, SweepStats};
pub use solver::{HirschFyeSolver, Phase, SolverOutput, SolverParams};
