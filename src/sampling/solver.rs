//! Hirsch-Fye impurity solver driver.
//!
//! Runs `therm` discarded sweeps followed by `sweeps` measured ones, rebuilds
//! the Green's functions from scratch every `reclean_interval` sweeps and
//! returns the translation-averaged mean of the measured Green's functions.

use nalgebra::{DMatrix, DVector};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::sweep::{sweep, SweepState, SweepStats};
use crate::error::{ensure_positive, QmcError, Result};
use crate::field::{ising_v, FieldPrior};
use crate::greens::{gnew_clean, translation_average, Spin};

fn default_reclean_interval() -> usize {
    100
}

/// Parameters of one solver call.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SolverParams {
    /// Local Coulomb repulsion U
    pub u: f64,
    /// Time-slice spacing Δτ = β / L
    pub dtau_mc: f64,
    /// Number of measured sweeps
    pub sweeps: usize,
    /// Number of discarded thermalization sweeps
    pub therm: usize,
    /// Sweeps between two from-scratch rebuilds of the Green's functions
    #[serde(default = "default_reclean_interval")]
    pub reclean_interval: usize,
    /// Seed of the solver's random stream
    #[serde(default)]
    pub seed: u64,
}

impl SolverParams {
    pub fn validate(&self) -> Result<()> {
        ensure_positive("u", self.u)?;
        ensure_positive("dtau_mc", self.dtau_mc)?;
        if self.sweeps == 0 {
            return Err(QmcError::InvalidParameter { name: "sweeps", value: 0.0 });
        }
        if self.reclean_interval == 0 {
            return Err(QmcError::InvalidParameter { name: "reclean_interval", value: 0.0 });
        }
        Ok(())
    }
}

/// Stage of the Markov chain.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Thermalizing,
    Production,
}

/// Averaged interacting Green's functions of one solver call.
#[derive(Clone, Debug)]
pub struct SolverOutput {
    pub g_up: DMatrix<f64>,
    pub g_dw: DMatrix<f64>,
    /// Proposals made during the measured sweeps
    pub stats: SweepStats,
}

impl SolverOutput {
    /// Fraction of accepted proposals over the measured sweeps.
    pub fn acceptance_rate(&self) -> f64 {
        self.stats.acceptance_rate()
    }

    /// g_up(τ_l) on the time slices.
    pub fn tau_up(&self) -> DVector<f64> {
        self.g_up.column(0).clone_owned()
    }

    /// g_dw(τ_l) on the time slices.
    pub fn tau_dw(&self) -> DVector<f64> {
        self.g_dw.column(0).clone_owned()
    }
}

struct Accumulator {
    up: DMatrix<f64>,
    dw: DMatrix<f64>,
    samples: usize,
}

impl Accumulator {
    fn new(n: usize) -> Self {
        Self {
            up: DMatrix::zeros(n, n),
            dw: DMatrix::zeros(n, n),
            samples: 0,
        }
    }

    fn add(&mut self, state: &SweepState) {
        self.up += &state.g_up;
        self.dw += &state.g_dw;
        self.samples += 1;
    }

    fn finalize(self, sweeps: usize) -> (DMatrix<f64>, DMatrix<f64>) {
        debug_assert_eq!(self.samples, sweeps);
        let norm = sweeps as f64;
        (
            translation_average(&(self.up / norm)),
            translation_average(&(self.dw / norm)),
        )
    }
}

/// Solver context owning the random stream and the field prior.
///
/// Independent solvers share nothing and can be moved to separate threads.
pub struct HirschFyeSolver {
    params: SolverParams,
    prior: FieldPrior,
    rng: StdRng,
}

impl HirschFyeSolver {
    pub fn new(params: SolverParams) -> Result<Self> {
        params.validate()?;
        let prior = FieldPrior::new(params.u, params.dtau_mc)?;
        Ok(Self {
            params,
            prior,
            rng: StdRng::seed_from_u64(params.seed),
        })
    }

    /// Fresh auxiliary field drawn from the solver's own random stream.
    pub fn initial_field(&mut self, n_slices: usize) -> DVector<f64> {
        ising_v(&self.prior, n_slices, &mut self.rng)
    }

    /// Solve the impurity problem for the Weiss propagators `g0_up`, `g0_dw`.
    ///
    /// `v` is the starting field and holds the final field on return, so it
    /// can warm-start the next call.
    pub fn solve(
        &mut self,
        g0_up: &DMatrix<f64>,
        g0_dw: &DMatrix<f64>,
        v: &mut DVector<f64>,
    ) -> Result<SolverOutput> {
        let n = check_dimensions(g0_up, g0_dw, v)?;
        let SolverParams { sweeps, therm, .. } = self.params;
        info!(
            slices = n,
            u = self.params.u,
            dtau = self.params.dtau_mc,
            sweeps,
            therm,
            "starting Hirsch-Fye solver"
        );

        let mut state = SweepState {
            v: v.clone(),
            g_up: gnew_clean(g0_up, v, Spin::Up)?,
            g_dw: gnew_clean(g0_dw, v, Spin::Down)?,
        };
        let mut acc = Accumulator::new(n);
        let mut therm_stats = SweepStats::default();
        let mut stats = SweepStats::default();
        let mut phase = Phase::Thermalizing;

        for mcs in 0..sweeps + therm {
            if mcs == therm {
                phase = Phase::Production;
                info!(
                    acceptance = therm_stats.acceptance_rate(),
                    "thermalization done, measuring"
                );
            }

            let sweep_stats = self.advance(&mut state, mcs, g0_up, g0_dw)?;

            match phase {
                Phase::Thermalizing => therm_stats += sweep_stats,
                Phase::Production => {
                    acc.add(&state);
                    stats += sweep_stats;
                }
            }
        }

        v.copy_from(&state.v);
        let (g_up, g_dw) = acc.finalize(sweeps);
        info!(acceptance = stats.acceptance_rate(), "Hirsch-Fye solver finished");

        Ok(SolverOutput { g_up, g_dw, stats })
    }

    /// Sweep number `mcs`, followed by a from-scratch rebuild of both
    /// Green's functions when `mcs` is a multiple of the re-clean interval.
    fn advance(
        &mut self,
        state: &mut SweepState,
        mcs: usize,
        g0_up: &DMatrix<f64>,
        g0_dw: &DMatrix<f64>,
    ) -> Result<SweepStats> {
        let stats = sweep(state, &self.prior, &mut self.rng);

        if mcs % self.params.reclean_interval == 0 {
            let up = gnew_clean(g0_up, &state.v, Spin::Up)?;
            let dw = gnew_clean(g0_dw, &state.v, Spin::Down)?;
            debug!(
                sweep = mcs,
                drift_up = (&up - &state.g_up).amax(),
                drift_dw = (&dw - &state.g_dw).amax(),
                "rebuilt Green's functions"
            );
            state.g_up = up;
            state.g_dw = dw;
        }

        Ok(stats)
    }
}

fn check_dimensions(g0_up: &DMatrix<f64>, g0_dw: &DMatrix<f64>, v: &DVector<f64>) -> Result<usize> {
    let (rows, cols) = g0_up.shape();
    if rows != cols {
        return Err(QmcError::NotSquare { rows, cols });
    }
    if g0_dw.shape() != (rows, cols) {
        let (found, _) = g0_dw.shape();
        return Err(QmcError::DimensionMismatch {
            what: "spin-down Weiss propagator",
            expected: rows,
            found,
        });
    }
    if v.len() != rows {
        return Err(QmcError::DimensionMismatch {
            what: "auxiliary field",
            expected: rows,
            found: v.len(),
        });
    }
    if rows == 0 {
        return Err(QmcError::InvalidParameter { name: "time slices", value: 0.0 });
    }
    Ok(rows)
}
