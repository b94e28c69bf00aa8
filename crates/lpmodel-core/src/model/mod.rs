//! Model module for building optimization models.
//!
//! This module provides the core [`Model`] type: an append-only store of
//! variable and constraint records plus an objective, compiled lazily into a
//! [`CompiledModel`](crate::CompiledModel) on demand.
//!
//! # Module Organization
//!
//! - [`error`]: Model error types
//! - [`builder`]: Methods for adding variables, constraints, and objectives
//! - [`storage`]: Record access by index, handle and name
//! - [`compile`]: Lazy row-wise compilation
//! - [`import`]: Rebuilding a model from a compiled artifact
//! - [`io`]: Model files and presolve through a backend
//! - [`solve`]: Running a solver against the compiled form
//! - [`unsupported`]: Operations that exist but are not implemented

mod builder;
mod compile;
mod error;
mod import;
mod io;
mod solve;
mod storage;
mod unsupported;

use std::rc::Rc;

use crate::compiled::CompiledModel;
use crate::constraint::{Constr, ConstraintRecord};
use crate::solver::Solution;
use crate::types::Sense;
use lpmodel_expr::{Expr, Var, VariableArena};

pub use error::ModelError;

/// A lazy model builder for linear and mixed-integer programs.
///
/// Records are only ever appended, so an index handed out once stays valid
/// for the lifetime of the model. Every mutation drops the compiled cache
/// and the last solution.
#[derive(Debug, Default)]
pub struct Model {
    pub(crate) variables: VariableArena,
    pub(crate) constraints: Vec<Rc<ConstraintRecord>>,
    pub(crate) objective: Expr,
    pub(crate) sense: Sense,
    pub(crate) compiled: Option<CompiledModel>,
    pub(crate) solution: Option<Solution>,
}

impl Model {
    /// Create a new empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that every term of `expr` references a variable of this model.
    pub(crate) fn ensure_terms_owned(&self, expr: &Expr) -> Result<(), ModelError> {
        for (var, _) in expr.terms() {
            self.ensure_variable_owned(var)?;
        }
        Ok(())
    }

    pub(crate) fn ensure_variable_owned(&self, var: &Var) -> Result<(), ModelError> {
        match var.index() {
            None => Err(ModelError::Unbound),
            Some(_) if self.variables.contains(var) => Ok(()),
            Some(index) => Err(ModelError::ForeignVariable { index }),
        }
    }

    /// Position of `constr` in this model's constraint list.
    pub(crate) fn constraint_position(&self, constr: &Constr) -> Result<usize, ModelError> {
        let index = constr.index().ok_or(ModelError::Unbound)?;
        match self.constraints.get(index) {
            Some(record) if constr.refers_to(record) => Ok(index),
            _ => Err(ModelError::ForeignConstraint { index }),
        }
    }

    /// Drop the compiled cache and the last solution.
    pub(crate) fn invalidate(&mut self, operation: &'static str) {
        let had_cache = self.compiled.take().is_some();
        let had_solution = self.solution.take().is_some();
        if had_cache || had_solution {
            tracing::trace!(
                component = "model",
                operation = operation,
                status = "success",
                had_cache,
                had_solution,
                "Invalidated compiled model"
            );
        }
    }
}
