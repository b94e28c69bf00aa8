//! Model error types.

use lpmodel_expr::ExprError;

use crate::solver::SolverError;

/// Errors that can occur during model operations
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Index beyond the current number of records
    OutOfRange { index: usize, len: usize },
    /// Handle does not refer to a record
    Unbound,
    /// Variable handle belongs to another model
    ForeignVariable { index: usize },
    /// Constraint handle belongs to another model
    ForeignConstraint { index: usize },
    /// Expression passed as a constraint carries no relation
    MissingRelation,
    /// Operation exists but is not supported
    NotImplemented { operation: &'static str },
    /// Compiled artifact cannot be turned back into records
    InvalidCompiledModel { reason: String },
    /// Error raised by the expression layer
    Expr(ExprError),
    /// Backend failure while writing, reading or presolving
    Solver(SolverError),
}

impl ModelError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ModelError::OutOfRange { .. } => "MODEL_INDEX_OUT_OF_RANGE",
            ModelError::Unbound => "HANDLE_UNBOUND",
            ModelError::ForeignVariable { .. } => "VARIABLE_FOREIGN",
            ModelError::ForeignConstraint { .. } => "CONSTRAINT_FOREIGN",
            ModelError::MissingRelation => "CONSTRAINT_MISSING_RELATION",
            ModelError::NotImplemented { .. } => "NOT_IMPLEMENTED",
            ModelError::InvalidCompiledModel { .. } => "COMPILED_MODEL_INVALID",
            ModelError::Expr(inner) => inner.code(),
            ModelError::Solver(inner) => inner.code(),
        }
    }
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::OutOfRange { index, len } => write!(
                f,
                "[{}] Index {} out of range (model has {})",
                self.code(),
                index,
                len
            ),
            ModelError::Unbound => {
                write!(f, "[{}] Handle does not refer to a record", self.code())
            }
            ModelError::ForeignVariable { index } => write!(
                f,
                "[{}] Variable {} does not belong to this model",
                self.code(),
                index
            ),
            ModelError::ForeignConstraint { index } => write!(
                f,
                "[{}] Constraint {} does not belong to this model",
                self.code(),
                index
            ),
            ModelError::MissingRelation => write!(
                f,
                "[{}] Constraint expression has no relation; use leq, geq or equals",
                self.code()
            ),
            ModelError::NotImplemented { operation } => {
                write!(f, "[{}] {} is not implemented", self.code(), operation)
            }
            ModelError::InvalidCompiledModel { reason } => {
                write!(f, "[{}] Compiled model invalid: {}", self.code(), reason)
            }
            ModelError::Expr(inner) => inner.fmt(f),
            ModelError::Solver(inner) => inner.fmt(f),
        }
    }
}

impl std::error::Error for ModelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ModelError::Expr(inner) => Some(inner),
            ModelError::Solver(inner) => Some(inner),
            _ => None,
        }
    }
}

impl From<ExprError> for ModelError {
    fn from(err: ExprError) -> Self {
        match err {
            ExprError::Unbound => ModelError::Unbound,
            ExprError::NotImplemented { operation } => ModelError::NotImplemented { operation },
            other => ModelError::Expr(other),
        }
    }
}

impl From<SolverError> for ModelError {
    fn from(err: SolverError) -> Self {
        ModelError::Solver(err)
    }
}

#[cfg(test)]
mod tests {
    use super::ModelError;
    use crate::solver::SolverError;
    use lpmodel_expr::{ComparisonSense, ExprError};

    #[test]
    fn expr_errors_keep_their_code() {
        let err: ModelError = ExprError::AlreadyConstrained {
            sense: ComparisonSense::Equal,
        }
        .into();
        assert_eq!(err.code(), "EXPR_ALREADY_CONSTRAINED");
        assert!(err.to_string().starts_with("[EXPR_ALREADY_CONSTRAINED]"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn shared_variants_are_flattened() {
        assert_eq!(ModelError::from(ExprError::Unbound), ModelError::Unbound);
        assert_eq!(
            ModelError::from(ExprError::NotImplemented { operation: "relax" }),
            ModelError::NotImplemented { operation: "relax" }
        );
    }

    #[test]
    fn display_prefixes_error_code() {
        let err = ModelError::OutOfRange { index: 4, len: 2 };
        assert_eq!(
            err.to_string(),
            "[MODEL_INDEX_OUT_OF_RANGE] Index 4 out of range (model has 2)"
        );
        assert!(
            ModelError::MissingRelation
                .to_string()
                .contains("no relation")
        );
    }

    #[test]
    fn solver_errors_pass_through() {
        let err = ModelError::from(SolverError::EmptyModel);
        assert_eq!(err.code(), "SOLVER_EMPTY_MODEL");
        assert_eq!(err.to_string(), SolverError::EmptyModel.to_string());
        assert!(std::error::Error::source(&err).is_some());
    }
}
