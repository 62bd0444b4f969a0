//! Field module - the auxiliary Hubbard-Stratonovich field.

mod ising;

pub use ising::{ising_v, FieldPrior};
