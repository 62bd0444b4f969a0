//! Single-slice proposals of the auxiliary field and their acceptance.
//!
//! Every slice gets a fresh field value drawn from the Gaussian prior,
//! independent of its current value. The proposal is accepted with the
//! probability
//!
//! p = R / (W + R)
//!
//! where R is the product of the spin-up and spin-down determinant ratios
//! and W = exp((V'² - V²) / (2UΔτ)) is the ratio of the prior weights.

use std::ops::AddAssign;

use nalgebra::{DMatrix, DVector};
use rand::Rng;

use crate::field::FieldPrior;
use crate::greens::{AcceptedFlip, Spin};

/// Field configuration together with the Green's functions it determines.
#[derive(Clone, Debug)]
pub struct SweepState {
    pub v: DVector<f64>,
    pub g_up: DMatrix<f64>,
    pub g_dw: DMatrix<f64>,
}

/// Accepted and proposed field changes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SweepStats {
    pub accepted: usize,
    pub proposed: usize,
}

impl SweepStats {
    pub fn acceptance_rate(&self) -> f64 {
        if self.proposed == 0 {
            0.0
        } else {
            self.accepted as f64 / self.proposed as f64
        }
    }
}

impl AddAssign for SweepStats {
    fn add_assign(&mut self, rhs: Self) {
        self.accepted += rhs.accepted;
        self.proposed += rhs.proposed;
    }
}

/// Ratio of the fermion determinants after changing one slice by `dv`,
/// up channel coupling with +dv and down channel with -dv.
#[inline]
pub fn determinant_ratio(dv: f64, g_up_jj: f64, g_dw_jj: f64) -> f64 {
    let ratup = 1.0 + (1.0 - g_up_jj) * (dv.exp() - 1.0);
    let ratdw = 1.0 + (1.0 - g_dw_jj) * ((-dv).exp() - 1.0);
    ratup * ratdw
}

/// Probability of replacing the field value `v_old` by `v_new` on a slice
/// whose equal-time Green's functions are `g_up_jj` and `g_dw_jj`.
#[inline]
pub fn acceptance_probability(
    v_old: f64,
    v_new: f64,
    g_up_jj: f64,
    g_dw_jj: f64,
    u: f64,
    dtau: f64,
) -> f64 {
    let rat = determinant_ratio(v_new - v_old, g_up_jj, g_dw_jj);
    let gauss_weight = ((v_new * v_new - v_old * v_old) / (2.0 * u * dtau)).exp();
    rat / (gauss_weight + rat)
}

/// One pass over all time slices in order.
///
/// Each proposal sees the Green's functions left behind by the previous
/// accepted one, so the slices cannot be visited concurrently.
pub fn sweep<R: Rng + ?Sized>(state: &mut SweepState, prior: &FieldPrior, rng: &mut R) -> SweepStats {
    let mut stats = SweepStats::default();

    for j in 0..state.v.len() {
        let vjp = prior.sample(rng);
        let vj = state.v[j];
        let rat = acceptance_probability(
            vj,
            vjp,
            state.g_up[(j, j)],
            state.g_dw[(j, j)],
            prior.u,
            prior.dtau,
        );

        stats.proposed += 1;
        if rat > rng.gen::<f64>() {
            let flip = AcceptedFlip::new(j, vjp - vj);
            state.v[j] = vjp;
            flip.apply(&mut state.g_up, Spin::Up);
            flip.apply(&mut state.g_dw, Spin::Down);
            stats.accepted += 1;
        }
    }

    stats
}
