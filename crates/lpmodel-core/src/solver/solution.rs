use std::collections::BTreeMap;
use std::time::Duration;

use lpmodel_expr::{Expr, Var};

use super::SolverStatus;
use crate::constraint::Constr;

/// Result of one solve, laid out like the compiled arrays it answers.
///
/// Column vectors follow variable indices and row vectors follow constraint
/// indices, so handles from the solved model read straight into them.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub status: SolverStatus,
    /// Includes the objective constant.
    pub objective_value: f64,
    pub col_values: Vec<f64>,
    /// Reduced costs.
    pub col_duals: Vec<f64>,
    /// Row activities, i.e. the left-hand side at `col_values`.
    pub row_values: Vec<f64>,
    pub row_duals: Vec<f64>,
    pub elapsed: Duration,
    /// Backend counters such as iteration counts or the final MIP gap.
    pub stats: BTreeMap<&'static str, f64>,
}

impl Solution {
    pub fn is_optimal(&self) -> bool {
        self.status.is_optimal()
    }

    pub fn value(&self, var: &Var) -> Option<f64> {
        self.col_values.get(var.index()?).copied()
    }

    pub fn reduced_cost(&self, var: &Var) -> Option<f64> {
        self.col_duals.get(var.index()?).copied()
    }

    /// `None` when a term is unbound or outside the solved columns.
    pub fn evaluate(&self, expr: &Expr) -> Option<f64> {
        expr.evaluate(&self.col_values)
    }

    pub fn activity(&self, constr: &Constr) -> Option<f64> {
        self.row_values.get(constr.index()?).copied()
    }

    pub fn dual(&self, constr: &Constr) -> Option<f64> {
        self.row_duals.get(constr.index()?).copied()
    }
}
