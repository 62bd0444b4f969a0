//! Hirsch-Fye QMC - discrete-time Quantum Monte Carlo impurity solver
//!
//! This crate solves the single-impurity Anderson model for a given Weiss
//! propagator by sampling a continuous Hubbard-Stratonovich field on L
//! imaginary-time slices. It is meant to be called once per iteration of a
//! DMFT self-consistency loop, which stays outside this crate.

pub mod error;
pub mod field;
pub mod greens;
pub mod sampling;
pub mod io;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use error::{QmcError, Result};
pub use field::{ising_v, FieldPrior};
pub use greens::{avg_g, free_level_tau, gnew_clean, translation_average, weiss_matrix, AcceptedFlip, Spin};
pub use sampling::{acceptance_probability, determinant_ratio, sweep, HirschFyeSolver, Phase, SolverOutput, SolverParams, SweepState, SweepStats};
pub use io::{read_run_config, RunConfig};
pub use telemetry::init_tracing;
