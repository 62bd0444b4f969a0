//! IO module - configuration and file handling for the solver.

mod config;

pub use config::{read_run_config, RunConfig};
