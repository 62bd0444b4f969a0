//! Greens module - imaginary-time Green's function matrices.
//!
//! Matrices are indexed by time slices, `G[i, j] = g(τ_i - τ_j)`, in the
//! positive convention `g(τ) = <T c(τ) c†(0)>`.

mod weiss;
mod clean;
mod update;

pub use weiss::{avg_g, free_level_tau, translation_average, weiss_matrix};
pub use clean::gnew_clean;
pub use update::AcceptedFlip;

/// Spin channel of the impurity electron.
///
/// The two channels couple to the auxiliary field with opposite sign.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Spin {
    Up,
    Down,
}

impl Spin {
    pub fn sign(self) -> f64 {
        match self {
            Spin::Up => 1.0,
            Spin::Down => -1.0,
        }
    }
}
