//! From-scratch construction of the interacting Green's function.

use nalgebra::{DMatrix, DVector};

use super::Spin;
use crate::error::{QmcError, Result};

/// Interacting Green's function for the field configuration `v`, built
/// directly from the non-interacting propagator `g0`:
///
/// u_j = exp(σ v_j) - 1
/// B_ij = δ_ij - u_j (G0_ij - δ_ij)
/// G = B⁻¹ G0
///
/// This is a dense LU solve and is used to anchor the incremental updates.
pub fn gnew_clean(g0: &DMatrix<f64>, v: &DVector<f64>, spin: Spin) -> Result<DMatrix<f64>> {
    let (rows, cols) = g0.shape();
    if rows != cols {
        return Err(QmcError::NotSquare { rows, cols });
    }
    if v.len() != rows {
        return Err(QmcError::DimensionMismatch {
            what: "auxiliary field",
            expected: rows,
            found: v.len(),
        });
    }

    let sigma = spin.sign();
    let u = v.map(|vj| (sigma * vj).exp() - 1.0);
    let b = DMatrix::from_fn(rows, cols, |i, j| {
        let delta = if i == j { 1.0 } else { 0.0 };
        delta - u[j] * (g0[(i, j)] - delta)
    });

    b.lu().solve(g0).ok_or(QmcError::SingularMatrix)
}
