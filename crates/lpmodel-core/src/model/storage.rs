//! Storage access methods for the model.

use crate::constraint::Constr;
use crate::types::Sense;
use lpmodel_expr::{Expr, Var};

use super::Model;
use super::error::ModelError;

impl Model {
    /// Get the number of variables
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// Get the number of constraints
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Number of stored constraint terms, duplicates included.
    pub fn num_coefficients(&self) -> usize {
        self.constraints
            .iter()
            .map(|record| record.expr().len())
            .sum()
    }

    /// Get a variable handle by index.
    pub fn get_variable(&self, index: usize) -> Result<Var, ModelError> {
        self.variables.get(index).ok_or(ModelError::OutOfRange {
            index,
            len: self.variables.len(),
        })
    }

    /// Get a constraint handle by index.
    pub fn get_constraint(&self, index: usize) -> Result<Constr, ModelError> {
        self.constraints
            .get(index)
            .map(|record| Constr::new(record.clone()))
            .ok_or(ModelError::OutOfRange {
                index,
                len: self.constraints.len(),
            })
    }

    /// Variable handles in index order.
    pub fn variables(&self) -> impl Iterator<Item = Var> + '_ {
        self.variables.handles()
    }

    /// Constraint handles in index order.
    pub fn constraints(&self) -> impl Iterator<Item = Constr> + '_ {
        self.constraints
            .iter()
            .map(|record| Constr::new(record.clone()))
    }

    pub fn objective(&self) -> &Expr {
        &self.objective
    }

    pub fn sense(&self) -> Sense {
        self.sense
    }

    /// The stored expression of a constraint owned by this model.
    pub fn get_row(&self, constr: &Constr) -> Result<&Expr, ModelError> {
        let index = self.constraint_position(constr)?;
        Ok(self.constraints[index].expr())
    }

    /// True iff `var` was created by this model.
    pub fn contains_variable(&self, var: &Var) -> bool {
        self.variables.contains(var)
    }

    pub fn contains_constraint(&self, constr: &Constr) -> bool {
        self.constraint_position(constr).is_ok()
    }

    /// First variable with the given name.
    pub fn variable_by_name(&self, name: &str) -> Option<Var> {
        self.variables
            .records()
            .position(|record| record.name() == name)
            .and_then(|index| self.variables.get(index))
    }

    /// First constraint with the given name.
    pub fn constraint_by_name(&self, name: &str) -> Option<Constr> {
        self.constraints
            .iter()
            .find(|record| record.name() == name)
            .map(|record| Constr::new(record.clone()))
    }
}
