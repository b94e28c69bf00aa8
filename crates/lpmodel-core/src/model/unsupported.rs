//! Operations that are part of the API but not supported.
//!
//! Each one logs a warning and fails with `NotImplemented`; the model is
//! left exactly as it was. Callers rebuild the model instead.

use crate::constraint::Constr;
use lpmodel_expr::Var;

use super::Model;
use super::error::ModelError;

fn not_implemented<T>(operation: &'static str) -> Result<T, ModelError> {
    tracing::warn!(
        component = "model",
        operation = operation,
        status = "error",
        "Operation is not implemented"
    );
    Err(ModelError::NotImplemented { operation })
}

impl Model {
    pub fn remove_variable(&mut self, _var: &Var) -> Result<(), ModelError> {
        not_implemented("remove_variable")
    }

    pub fn remove_constraint(&mut self, _constr: &Constr) -> Result<(), ModelError> {
        not_implemented("remove_constraint")
    }

    pub fn change_coefficient(
        &mut self,
        _constr: &Constr,
        _var: &Var,
        _value: f64,
    ) -> Result<(), ModelError> {
        not_implemented("change_coefficient")
    }

    pub fn get_coefficient(&self, _constr: &Constr, _var: &Var) -> Result<f64, ModelError> {
        not_implemented("get_coefficient")
    }

    /// Continuous relaxation of this model.
    pub fn relax(&self) -> Result<Model, ModelError> {
        not_implemented("relax")
    }

    /// Irreducible infeasible subsystem.
    pub fn compute_iis(&mut self) -> Result<(), ModelError> {
        not_implemented("compute_iis")
    }

    /// The last solution rendered as JSON.
    pub fn solution_json(&self) -> Result<String, ModelError> {
        not_implemented("solution_json")
    }
}
