//! Conversions between g(τ) vectors and time-slice matrices.

use nalgebra::{DMatrix, DVector};

use crate::error::{ensure_positive, QmcError, Result};

/// Expand g(τ_l), l = 0..L, into the matrix `G[i, j] = g(τ_i - τ_j)`.
///
/// Negative time differences use the fermionic antiperiodicity
/// g(τ - β) = -g(τ).
pub fn weiss_matrix(g_tau: &DVector<f64>) -> DMatrix<f64> {
    let n = g_tau.len();
    DMatrix::from_fn(n, n, |i, j| {
        if i >= j {
            g_tau[i - j]
        } else {
            -g_tau[n + i - j]
        }
    })
}

/// Average the entries of `gmat` that share the same time difference,
/// folding negative differences back with the antiperiodic sign.
///
/// g[l] = (Σ_{i-j=l} G[i,j] - Σ_{i-j=l-L} G[i,j]) / L
pub fn avg_g(gmat: &DMatrix<f64>) -> DVector<f64> {
    let n = gmat.nrows();
    let mut g = DVector::zeros(n);
    for j in 0..n {
        for i in 0..n {
            if i >= j {
                g[i - j] += gmat[(i, j)];
            } else {
                g[n + i - j] -= gmat[(i, j)];
            }
        }
    }
    g / n as f64
}

/// Replace `gmat` by its average over cyclic shifts of the time origin.
pub fn translation_average(gmat: &DMatrix<f64>) -> DMatrix<f64> {
    weiss_matrix(&avg_g(gmat))
}

/// Propagator of an isolated level at energy `energy`, sampled on
/// τ_l = l β / L.
///
/// g(τ) = exp(-ε τ) / (1 + exp(-β ε)). At ε = 0 every entry is 1/2, the
/// particle-hole-symmetric case.
pub fn free_level_tau(energy: f64, beta: f64, n_slices: usize) -> Result<DVector<f64>> {
    let beta = ensure_positive("beta", beta)?;
    if !energy.is_finite() {
        return Err(QmcError::InvalidParameter { name: "level_energy", value: energy });
    }
    if n_slices == 0 {
        return Err(QmcError::InvalidParameter { name: "n_tau", value: 0.0 });
    }
    let dtau = beta / n_slices as f64;
    Ok(DVector::from_fn(n_slices, |l, _| {
        let tau = l as f64 * dtau;
        // keep the exponents non-positive
        if energy >= 0.0 {
            (-energy * tau).exp() / (1.0 + (-beta * energy).exp())
        } else {
            (energy * (beta - tau)).exp() / ((beta * energy).exp() + 1.0)
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_weiss_matrix_antiperiodic() {
        let g = DVector::from_vec(vec![0.5, 0.4, 0.3]);
        let m = weiss_matrix(&g);
        assert_eq!(m[(0, 0)], 0.5);
        assert_eq!(m[(2, 2)], 0.5);
        assert_eq!(m[(1, 0)], 0.4);
        assert_eq!(m[(2, 0)], 0.3);
        assert_eq!(m[(0, 1)], -0.3);
        assert_eq!(m[(0, 2)], -0.4);
        assert_eq!(m[(1, 2)], -0.3);
    }

    #[test]
    fn test_avg_g_recovers_toeplitz_input() {
        let g = free_level_tau(0.7, 4.0, 12).unwrap();
        let back = avg_g(&weiss_matrix(&g));
        for l in 0..g.len() {
            assert_relative_eq!(back[l], g[l], epsilon = 1e-14);
        }
    }

    #[test]
    fn test_avg_g_two_slices_by_hand() {
        let m = DMatrix::from_row_slice(2, 2, &[0.6, 0.1, 0.3, 0.4]);
        let g = avg_g(&m);
        assert_relative_eq!(g[0], 0.5, epsilon = 1e-14);
        assert_relative_eq!(g[1], (0.3 - 0.1) / 2.0, epsilon = 1e-14);

        let sym = translation_average(&m);
        assert_relative_eq!(sym[(0, 0)], sym[(1, 1)], epsilon = 1e-14);
        assert_relative_eq!(sym[(0, 1)], -sym[(1, 0)], epsilon = 1e-14);
    }

    #[test]
    fn test_free_level_half_filling() {
        let g = free_level_tau(0.0, 0.8, 8).unwrap();
        assert!(g.iter().all(|&x| x == 0.5));
    }

    #[test]
    fn test_free_level_particle_hole_mirror() {
        let (beta, n) = (10.0, 16);
        let gp = free_level_tau(0.8, beta, n).unwrap();
        let gm = free_level_tau(-0.8, beta, n).unwrap();
        // g_ε(τ) = g_{-ε}(β - τ)
        for l in 1..n {
            assert_relative_eq!(gp[l], gm[n - l], epsilon = 1e-12);
        }
        // deep levels stay finite
        let deep = free_level_tau(-80.0, 50.0, n).unwrap();
        assert!(deep.iter().all(|x| x.is_finite() && *x >= 0.0 && *x <= 1.0));
    }

    #[test]
    fn test_free_level_rejects_bad_input() {
        assert!(free_level_tau(0.0, 0.0, 8).is_err());
        assert!(free_level_tau(f64::NAN, 1.0, 8).is_err());
        assert!(free_level_tau(0.0, 1.0, 0).is_err());
    }
}
