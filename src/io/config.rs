//! YAML run configuration.
//!
//! ```yaml
//! n_tau: 8
//! level_energy: 0.0
//! solver:
//!   u: 1.0
//!   dtau_mc: 0.1
//!   sweeps: 2000
//!   therm: 200
//!   reclean_interval: 100
//!   seed: 42
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{QmcError, Result};
use crate::sampling::SolverParams;

/// Everything the demo binary needs for one solver call on an isolated level.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Number of imaginary-time slices L
    pub n_tau: usize,
    /// Energy of the non-interacting level
    #[serde(default)]
    pub level_energy: f64,
    pub solver: SolverParams,
}

impl RunConfig {
    pub fn from_yaml(text: &str) -> Result<Self> {
        let conf: RunConfig = serde_yaml::from_str(text)?;
        conf.validate()?;
        Ok(conf)
    }

    pub fn validate(&self) -> Result<()> {
        if self.n_tau == 0 {
            return Err(QmcError::InvalidParameter { name: "n_tau", value: 0.0 });
        }
        if !self.level_energy.is_finite() {
            return Err(QmcError::InvalidParameter {
                name: "level_energy",
                value: self.level_energy,
            });
        }
        self.solver.validate()
    }

    /// Inverse temperature β = L Δτ.
    pub fn beta(&self) -> f64 {
        self.n_tau as f64 * self.solver.dtau_mc
    }
}

/// Read and validate a run configuration from a YAML file.
pub fn read_run_config<P: AsRef<Path>>(path: P) -> Result<RunConfig> {
    let text = std::fs::read_to_string(path)?;
    RunConfig::from_yaml(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SAMPLE: &str = "
n_tau: 8
level_energy: 0.0
solver:
  u: 1.0
  dtau_mc: 0.1
  sweeps: 2000
  therm: 200
  reclean_interval: 100
  seed: 42
";

    #[test]
    fn test_parse_sample() {
        let conf = RunConfig::from_yaml(SAMPLE).unwrap();
        assert_eq!(conf.n_tau, 8);
        assert_eq!(conf.solver.sweeps, 2000);
        assert_eq!(conf.solver.therm, 200);
        assert_eq!(conf.solver.seed, 42);
        assert_relative_eq!(conf.beta(), 0.8, epsilon = 1e-12);
    }

    #[test]
    fn test_defaults() {
        let conf = RunConfig::from_yaml(
            "n_tau: 4\nsolver: {u: 2.0, dtau_mc: 0.25, sweeps: 10, therm: 0}\n",
        )
        .unwrap();
        assert_eq!(conf.level_energy, 0.0);
        assert_eq!(conf.solver.reclean_interval, 100);
        assert_eq!(conf.solver.seed, 0);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let zero_sweeps = "n_tau: 4\nsolver: {u: 2.0, dtau_mc: 0.25, sweeps: 0, therm: 5}\n";
        assert!(matches!(
            RunConfig::from_yaml(zero_sweeps),
            Err(QmcError::InvalidParameter { name: "sweeps", .. })
        ));

        let negative_u = "n_tau: 4\nsolver: {u: -1.0, dtau_mc: 0.25, sweeps: 3, therm: 5}\n";
        assert!(RunConfig::from_yaml(negative_u).is_err());

        let no_slices = "n_tau: 0\nsolver: {u: 1.0, dtau_mc: 0.25, sweeps: 3, therm: 5}\n";
        assert!(RunConfig::from_yaml(no_slices).is_err());
    }

    #[test]
    fn test_malformed_yaml() {
        assert!(matches!(
            RunConfig::from_yaml("n_tau: [1, 2"),
            Err(QmcError::Yaml(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            read_run_config("/nonexistent/hirschfye.yml"),
            Err(QmcError::Io(_))
        ));
    }
}
