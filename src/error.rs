//! Error type shared by the solver, its builders and the config loader.

use thiserror::Error;

/// Errors raised by the Hirsch-Fye solver.
///
/// Proposal rejections and Monte Carlo noise are not errors; everything here
/// is a configuration or numerical failure that aborts the current call.
#[derive(Error, Debug)]
pub enum QmcError {
    #[error("invalid parameter `{name}`: {value}")]
    InvalidParameter { name: &'static str, value: f64 },
    #[error("dimension mismatch for {what}: expected {expected}, found {found}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("matrix is not square: {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },
    #[error("Dyson matrix is singular, cannot rebuild the Green's function")]
    SingularMatrix,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, QmcError>;

/// Rejects non-finite or non-positive physical parameters.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(QmcError::InvalidParameter { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_positive() {
        assert_eq!(ensure_positive("u", 2.0).unwrap(), 2.0);
        assert!(ensure_positive("u", 0.0).is_err());
        assert!(ensure_positive("u", -1.0).is_err());
        assert!(ensure_positive("dtau", f64::NAN).is_err());
        assert!(ensure_positive("dtau", f64::INFINITY).is_err());
    }

    #[test]
    fn test_error_message_names_parameter() {
        let err = ensure_positive("dtau_mc", -0.5).unwrap_err();
        assert_eq!(err.to_string(), "invalid parameter `dtau_mc`: -0.5");
    }
}
