//! The boundary between the model store and solver backends.
//!
//! Backends only ever see a [`CompiledModel`]. Solving is the one required
//! capability; model files and presolve are separate traits because not
//! every backend offers them.

mod config;
mod error;
mod solution;
mod status;

pub use config::SolverConfig;
pub use error::SolverError;
pub use solution::Solution;
pub use status::SolverStatus;

use std::path::Path;

use crate::compiled::CompiledModel;

pub trait Solver {
    fn solve(&mut self, model: &CompiledModel) -> Result<Solution, SolverError>;
}

/// Backends that can persist compiled models in their own file formats.
///
/// The format is picked by the backend, typically from the file extension.
pub trait ModelFile {
    fn write_model(&mut self, model: &CompiledModel, path: &Path) -> Result<(), SolverError>;

    fn read_model(&mut self, path: &Path) -> Result<CompiledModel, SolverError>;
}

/// Backends that can reduce a model without solving it.
pub trait Presolve {
    /// Returns the reduced problem. Rows may come back ranged or free and
    /// the column set need not match the input.
    fn presolve(&mut self, model: &CompiledModel) -> Result<CompiledModel, SolverError>;
}
