//! HiGHS backend for compiled lpmodel models.
//!
//! [`HighsSolver`] implements the three backend traits of `lpmodel-core`:
//! [`lpmodel_core::Solver`] through the `highs` row builder, and
//! [`lpmodel_core::ModelFile`] / [`lpmodel_core::Presolve`] through the
//! HiGHS C API.

mod error;
mod ffi;
mod problem;
mod solver;
mod status;

pub use error::HighsError;
pub use ffi::highs_version;
pub use solver::HighsSolver;
pub use status::HighsStatus;
