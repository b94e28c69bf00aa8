use std::fmt;
use std::path::PathBuf;

use super::SolverStatus;

/// Failure reported across the solver boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum SolverError {
    /// The compiled model has no columns.
    EmptyModel,
    /// The backend library cannot be used in this build or environment.
    NotAvailable(String),
    /// The solve ran but produced no usable primal point.
    NoSolution { status: SolverStatus },
    /// A model file could not be written or read.
    ModelFile { path: PathBuf, reason: String },
    /// Backend failure with no portable meaning.
    Backend(String),
}

impl SolverError {
    pub fn code(&self) -> &'static str {
        match self {
            SolverError::EmptyModel => "SOLVER_EMPTY_MODEL",
            SolverError::NotAvailable(_) => "SOLVER_NOT_AVAILABLE",
            SolverError::NoSolution { .. } => "SOLVER_NO_SOLUTION",
            SolverError::ModelFile { .. } => "SOLVER_MODEL_FILE",
            SolverError::Backend(_) => "SOLVER_BACKEND",
        }
    }
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] ", self.code())?;
        match self {
            SolverError::EmptyModel => f.write_str("nothing to solve: model has no columns"),
            SolverError::NotAvailable(backend) => write!(f, "{backend} cannot be used here"),
            SolverError::NoSolution { status } => write!(f, "solve ended as {status}"),
            SolverError::ModelFile { path, reason } => {
                write!(f, "{}: {reason}", path.display())
            }
            SolverError::Backend(message) => f.write_str(message),
        }
    }
}

impl std::error::Error for SolverError {}
