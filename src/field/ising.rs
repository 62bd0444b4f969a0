//! Gaussian prior of the continuous Hubbard-Stratonovich field.
//!
//! The local repulsion is decoupled on every time slice by a classical field
//! V_l = -Δτ M_l, where the M_l are normally distributed:
//!
//! P(M_l) ∝ exp(-Δτ M_l² / (2U))
//!
//! so V_l itself is a zero-mean Gaussian of variance UΔτ.

use nalgebra::DVector;
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::error::{ensure_positive, QmcError, Result};

/// Distribution the field values are drawn from, both at initialization and
/// for every proposal of the sweep engine.
#[derive(Clone, Copy, Debug)]
pub struct FieldPrior {
    /// Time-slice spacing Δτ
    pub dtau: f64,
    /// Local repulsion U
    pub u: f64,
    normal: Normal<f64>,
}

impl FieldPrior {
    pub fn new(u: f64, dtau: f64) -> Result<Self> {
        let u = ensure_positive("u", u)?;
        let dtau = ensure_positive("dtau_mc", dtau)?;
        let sigma = (u / dtau).sqrt();
        let normal = Normal::new(0.0, sigma)
            .map_err(|_| QmcError::InvalidParameter { name: "field width", value: sigma })?;
        Ok(Self { dtau, u, normal })
    }

    /// Draw a single field value V = -Δτ M.
    #[inline]
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        -self.dtau * self.normal.sample(rng)
    }

    /// Variance of the field values, UΔτ.
    pub fn variance(&self) -> f64 {
        self.u * self.dtau
    }
}

/// Initialize the vector of Hubbard-Stratonovich fields for `n_slices` time
/// slices, each entry drawn independently from `prior`.
pub fn ising_v<R: Rng + ?Sized>(prior: &FieldPrior, n_slices: usize, rng: &mut R) -> DVector<f64> {
    DVector::from_fn(n_slices, |_, _| prior.sample(rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_prior_rejects_bad_parameters() {
        assert!(FieldPrior::new(0.0, 0.1).is_err());
        assert!(FieldPrior::new(1.0, -0.1).is_err());
        assert!(FieldPrior::new(f64::NAN, 0.1).is_err());
    }

    #[test]
    fn test_ising_v_length() {
        let prior = FieldPrior::new(2.0, 0.25).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let v = ising_v(&prior, 32, &mut rng);
        assert_eq!(v.len(), 32);
        assert!(v.iter().all(|x| x.is_finite()));
    }

    #[test]
    fn test_ising_v_same_seed_same_field() {
        let prior = FieldPrior::new(1.0, 0.1).unwrap();
        let a = ising_v(&prior, 16, &mut StdRng::seed_from_u64(11));
        let b = ising_v(&prior, 16, &mut StdRng::seed_from_u64(11));
        assert_eq!(a, b);
    }

    #[test]
    fn test_field_statistics() {
        let (u, dtau) = (1.5, 0.2);
        let prior = FieldPrior::new(u, dtau).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let v = ising_v(&prior, 200_000, &mut rng);

        let n = v.len() as f64;
        let mean = v.sum() / n;
        let var = v.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;

        assert_relative_eq!(mean, 0.0, epsilon = 5e-3);
        assert_relative_eq!(var, prior.variance(), max_relative = 2e-2);
        assert_relative_eq!(prior.variance(), u * dtau, epsilon = 1e-12);
    }
}
