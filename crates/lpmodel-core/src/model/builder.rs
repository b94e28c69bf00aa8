//! Model builder methods for adding variables, constraints, and objectives.

use std::rc::Rc;

use crate::constraint::{Constr, ConstraintRecord};
use crate::types::{Bounds, Sense, Variable};
use lpmodel_expr::{Expr, Var};

use crate::model::Model;
use crate::model::error::ModelError;

impl Model {
    /// Add a variable to the model.
    ///
    /// Bounds are stored as given, including `lower > upper` and infinite
    /// values; the solver is the one to reject an empty domain.
    pub fn add_variable(&mut self, variable: Variable, name: impl Into<String>) -> Var {
        let var = self.variables.push(
            name,
            variable.bounds.lower,
            variable.bounds.upper,
            variable.is_integer,
        );
        self.invalidate("add_variable");
        var
    }

    /// Add a continuous variable with bounds `[lower, upper]`.
    pub fn add_var(&mut self, lower: f64, upper: f64, name: impl Into<String>) -> Var {
        self.add_variable(Variable::continuous(Bounds::new(lower, upper)), name)
    }

    /// Add an integer variable with bounds `[lower, upper]`.
    pub fn add_integral(&mut self, lower: f64, upper: f64, name: impl Into<String>) -> Var {
        self.add_variable(Variable::integer(Bounds::new(lower, upper)), name)
    }

    /// Add a binary variable.
    pub fn add_binary(&mut self, name: impl Into<String>) -> Var {
        self.add_variable(Variable::binary(), name)
    }

    /// Add `count` binary variables named `{prefix}0 .. {prefix}{count-1}`.
    pub fn add_binaries(&mut self, count: usize, prefix: &str) -> Vec<Var> {
        (0..count)
            .map(|i| self.add_binary(format!("{prefix}{i}")))
            .collect()
    }

    /// Add a constraint from a tagged expression (e.g. `(x + y).leq(10.0)?`).
    ///
    /// The expression is stored as is, terms in order and duplicates kept.
    pub fn add_constraint(
        &mut self,
        expr: Expr,
        name: impl Into<String>,
    ) -> Result<Constr, ModelError> {
        if expr.relation().is_none() {
            return Err(ModelError::MissingRelation);
        }
        self.ensure_terms_owned(&expr)?;

        let index = self.constraints.len();
        let terms = expr.len();
        let record = Rc::new(ConstraintRecord::new(index, name.into(), expr));
        self.constraints.push(Rc::clone(&record));
        self.invalidate("add_constraint");

        tracing::trace!(
            component = "model",
            operation = "add_constraint",
            status = "success",
            index,
            terms,
            "Added constraint"
        );
        Ok(Constr::new(record))
    }

    /// Replace the objective function and its sense.
    ///
    /// A relation attached to `expr` is kept on the stored expression but
    /// plays no part in compilation.
    pub fn set_objective(&mut self, expr: Expr, sense: Sense) -> Result<(), ModelError> {
        self.ensure_terms_owned(&expr)?;

        let terms = expr.len();
        self.objective = expr;
        self.sense = sense;
        self.invalidate("set_objective");
        tracing::debug!(
            component = "model",
            operation = "set_objective",
            status = "success",
            sense = sense.as_str(),
            terms,
            "Set objective function"
        );
        Ok(())
    }

    /// Minimize a linear expression, replacing any previous objective.
    pub fn minimize(&mut self, expr: Expr) -> Result<(), ModelError> {
        self.set_objective(expr, Sense::Minimize)
    }

    /// Maximize a linear expression, replacing any previous objective.
    pub fn maximize(&mut self, expr: Expr) -> Result<(), ModelError> {
        self.set_objective(expr, Sense::Maximize)
    }
}
