//! Lazy compilation of the record store into row-wise arrays.

use std::rc::Rc;
use std::time::Instant;

use crate::compiled::{CompiledModel, RowMatrix};
use crate::constraint::ConstraintRecord;
use crate::types::Sense;
use lpmodel_expr::{ComparisonSense, Expr, VariableArena};

use super::Model;

impl Model {
    /// Compile the model if anything changed since the last compile.
    ///
    /// The returned arrays stay cached until the next mutation.
    pub fn update(&mut self) -> &CompiledModel {
        let Model {
            variables,
            constraints,
            objective,
            sense,
            compiled,
            ..
        } = self;
        compiled.get_or_insert_with(|| compile(variables, constraints, objective, *sense))
    }

    /// True when a compiled artifact is cached.
    pub fn is_compiled(&self) -> bool {
        self.compiled.is_some()
    }

    /// The cached artifact, if the model has not changed since the last compile.
    pub fn compiled(&self) -> Option<&CompiledModel> {
        self.compiled.as_ref()
    }
}

/// Row bounds of `expr <sense> rhs`, with the expression constant moved to the right.
fn row_bounds(sense: ComparisonSense, rhs: f64, constant: f64) -> (f64, f64) {
    let rhs = rhs - constant;
    match sense {
        ComparisonSense::Equal => (rhs, rhs),
        ComparisonSense::LessEqual => (f64::NEG_INFINITY, rhs),
        ComparisonSense::GreaterEqual => (rhs, f64::INFINITY),
    }
}

pub(super) fn compile(
    variables: &VariableArena,
    constraints: &[Rc<ConstraintRecord>],
    objective: &Expr,
    sense: Sense,
) -> CompiledModel {
    let started = Instant::now();
    let num_col = variables.len();
    let num_row = constraints.len();

    let mut col_lower = Vec::with_capacity(num_col);
    let mut col_upper = Vec::with_capacity(num_col);
    let mut col_names = Vec::with_capacity(num_col);
    let mut integrality = Vec::with_capacity(num_col);
    for record in variables.records() {
        col_lower.push(record.lower());
        col_upper.push(record.upper());
        col_names.push(record.name().to_string());
        integrality.push(record.is_integer());
    }
    let has_integer = integrality.iter().any(|flag| *flag);

    let nnz: usize = constraints.iter().map(|record| record.expr().len()).sum();
    let mut matrix = RowMatrix {
        start: Vec::with_capacity(num_row + 1),
        index: Vec::with_capacity(nnz),
        value: Vec::with_capacity(nnz),
    };
    let mut row_lower = Vec::with_capacity(num_row);
    let mut row_upper = Vec::with_capacity(num_row);
    let mut row_names = Vec::with_capacity(num_row);

    matrix.start.push(0);
    for record in constraints {
        let expr = record.expr();
        for (var, coeff) in expr.terms() {
            if let Some(col) = var.index() {
                matrix.index.push(col);
                matrix.value.push(*coeff);
            }
        }
        matrix.start.push(matrix.index.len());

        let (lower, upper) = match expr.relation() {
            Some(relation) => row_bounds(relation.sense, relation.rhs, expr.constant()),
            None => (f64::NEG_INFINITY, f64::INFINITY),
        };
        row_lower.push(lower);
        row_upper.push(upper);
        row_names.push(record.name().to_string());
    }

    let mut col_cost = vec![0.0; num_col];
    for (var, coeff) in objective.terms() {
        if let Some(cost) = var.index().and_then(|col| col_cost.get_mut(col)) {
            *cost += *coeff;
        }
    }

    let compiled = CompiledModel {
        num_col,
        num_row,
        col_lower,
        col_upper,
        integrality: has_integer.then_some(integrality),
        row_lower,
        row_upper,
        matrix,
        col_cost,
        offset: objective.constant(),
        sense,
        col_names,
        row_names,
    };

    tracing::debug!(
        component = "model",
        operation = "compile",
        status = "success",
        rows = num_row,
        cols = num_col,
        nnz = compiled.nnz(),
        is_mip = has_integer,
        duration_ms = started.elapsed().as_secs_f64() * 1000.0,
        "Compiled model"
    );

    compiled
}
