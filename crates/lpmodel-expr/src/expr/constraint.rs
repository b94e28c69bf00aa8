//! Relations: comparison sense plus right-hand side, and the scalar-on-the-left DSL.

use crate::expr::core::Expr;
use crate::expr::error::ExprError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonSense {
    LessEqual,
    GreaterEqual,
    Equal,
}

impl ComparisonSense {
    pub fn as_str(self) -> &'static str {
        match self {
            ComparisonSense::LessEqual => "le",
            ComparisonSense::GreaterEqual => "ge",
            ComparisonSense::Equal => "eq",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            ComparisonSense::LessEqual => "<=",
            ComparisonSense::GreaterEqual => ">=",
            ComparisonSense::Equal => "==",
        }
    }

    /// The sense seen from the other side: `k <= e` is `e >= k`.
    pub fn mirrored(self) -> Self {
        match self {
            ComparisonSense::LessEqual => ComparisonSense::GreaterEqual,
            ComparisonSense::GreaterEqual => ComparisonSense::LessEqual,
            ComparisonSense::Equal => ComparisonSense::Equal,
        }
    }
}

/// Relation attached to an expression: `expr <sense> rhs`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Relation {
    pub sense: ComparisonSense,
    pub rhs: f64,
}

impl Relation {
    pub fn new(sense: ComparisonSense, rhs: f64) -> Self {
        Self { sense, rhs }
    }
}

/// Comparisons with the scalar on the left-hand side.
///
/// The sense is mirrored so the result always reads relative to the
/// expression: `5.0.leq(x)` is `x >= 5`, `5.0.geq(x)` is `x <= 5`.
pub trait ScalarRelation {
    /// `self <= expr`.
    fn leq<E: Into<Expr>>(self, expr: E) -> Result<Expr, ExprError>;

    /// `self >= expr`.
    fn geq<E: Into<Expr>>(self, expr: E) -> Result<Expr, ExprError>;

    /// `self == expr`.
    fn equals<E: Into<Expr>>(self, expr: E) -> Result<Expr, ExprError>;
}

impl ScalarRelation for f64 {
    fn leq<E: Into<Expr>>(self, expr: E) -> Result<Expr, ExprError> {
        expr.into().relate(ComparisonSense::LessEqual.mirrored(), self)
    }

    fn geq<E: Into<Expr>>(self, expr: E) -> Result<Expr, ExprError> {
        expr.into().relate(ComparisonSense::GreaterEqual.mirrored(), self)
    }

    fn equals<E: Into<Expr>>(self, expr: E) -> Result<Expr, ExprError> {
        expr.into().relate(ComparisonSense::Equal.mirrored(), self)
    }
}
