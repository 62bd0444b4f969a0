//! Fast update of the Green's function after a single accepted field change.

use nalgebra::{DMatrix, DVector};

use super::Spin;

/// A field change that has passed the acceptance test.
///
/// Only the sweep engine creates these, so a Green's function can never be
/// updated for a proposal that was rejected.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AcceptedFlip {
    slice: usize,
    dv: f64,
}

impl AcceptedFlip {
    pub(crate) fn new(slice: usize, dv: f64) -> Self {
        Self { slice, dv }
    }

    /// Apply the flip to the Green's function of one spin channel in place:
    ///
    /// a = (exp(σ dv) - 1) / (1 + (1 - G_kk)(exp(σ dv) - 1))
    /// G'_ij = G_ij + a (G_ik - δ_ik) G_kj
    ///
    /// O(L²), done as a single `ger`.
    pub fn apply(&self, g: &mut DMatrix<f64>, spin: Spin) {
        let k = self.slice;
        let ee = (spin.sign() * self.dv).exp() - 1.0;
        let a = ee / (1.0 + (1.0 - g[(k, k)]) * ee);

        let mut x: DVector<f64> = g.column(k).clone_owned();
        x[k] -= 1.0;
        let y: DVector<f64> = g.row(k).transpose();

        g.ger(a, &x, &y, 1.0);
    }
}
