//! Expression and handle errors.

use crate::expr::ComparisonSense;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprError {
    /// A relation was applied to an expression that already carries one.
    AlreadyConstrained { sense: ComparisonSense },
    /// The handle does not refer to a record.
    Unbound,
    /// Term index outside the expression.
    TermOutOfRange { index: usize, len: usize },
    /// The operation exists but is not supported.
    NotImplemented { operation: &'static str },
}

impl ExprError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ExprError::AlreadyConstrained { .. } => "EXPR_ALREADY_CONSTRAINED",
            ExprError::Unbound => "HANDLE_UNBOUND",
            ExprError::TermOutOfRange { .. } => "EXPR_TERM_OUT_OF_RANGE",
            ExprError::NotImplemented { .. } => "NOT_IMPLEMENTED",
        }
    }
}

impl std::fmt::Display for ExprError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExprError::AlreadyConstrained { sense } => write!(
                f,
                "[{}] Expression already has a '{}' relation",
                self.code(),
                sense.symbol()
            ),
            ExprError::Unbound => write!(f, "[{}] Handle does not refer to a record", self.code()),
            ExprError::TermOutOfRange { index, len } => write!(
                f,
                "[{}] Term index {} out of range (expression has {} terms)",
                self.code(),
                index,
                len
            ),
            ExprError::NotImplemented { operation } => {
                write!(f, "[{}] {} is not implemented", self.code(), operation)
            }
        }
    }
}

impl std::error::Error for ExprError {}
