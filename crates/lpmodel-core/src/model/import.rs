//! Rebuilding a model from a compiled artifact.

use std::rc::Rc;

use crate::compiled::CompiledModel;
use crate::constraint::ConstraintRecord;
use lpmodel_expr::{ComparisonSense, Expr, Var};

use crate::model::Model;
use crate::model::error::ModelError;

fn invalid(reason: impl Into<String>) -> ModelError {
    ModelError::InvalidCompiledModel {
        reason: reason.into(),
    }
}

/// Recover `sense rhs` from a row's bounds. Ranged and free rows have no single relation.
#[allow(clippy::float_cmp)]
fn relation_from_bounds(
    row: usize,
    lower: f64,
    upper: f64,
) -> Result<(ComparisonSense, f64), ModelError> {
    match (lower.is_finite(), upper.is_finite()) {
        (true, true) if lower == upper => Ok((ComparisonSense::Equal, lower)),
        (true, true) => Err(invalid(format!("row {row} is ranged ({lower}, {upper})"))),
        (false, true) if lower == f64::NEG_INFINITY => Ok((ComparisonSense::LessEqual, upper)),
        (true, false) if upper == f64::INFINITY => Ok((ComparisonSense::GreaterEqual, lower)),
        _ => Err(invalid(format!("row {row} has no finite bound"))),
    }
}

impl Model {
    /// Build a model whose records reproduce `compiled`.
    ///
    /// Each matrix row becomes one constraint with its relation recovered
    /// from the row bounds; the objective is rebuilt from the cost vector and
    /// offset. Compiling the result gives back the same bounds, matrix and
    /// costs.
    pub fn from_compiled(compiled: &CompiledModel) -> Result<Self, ModelError> {
        let CompiledModel {
            num_col,
            num_row,
            col_lower,
            col_upper,
            integrality,
            row_lower,
            row_upper,
            matrix,
            col_cost,
            offset,
            sense,
            col_names,
            row_names,
        } = compiled;
        let (num_col, num_row) = (*num_col, *num_row);

        if col_lower.len() != num_col || col_upper.len() != num_col || col_cost.len() != num_col {
            return Err(invalid("column arrays length must match num_col"));
        }
        if integrality.as_ref().is_some_and(|flags| flags.len() != num_col) {
            return Err(invalid("integrality length must match num_col"));
        }
        if row_lower.len() != num_row || row_upper.len() != num_row {
            return Err(invalid("row bounds length must match num_row"));
        }
        if !col_names.is_empty() && col_names.len() != num_col {
            return Err(invalid("col_names length must match num_col"));
        }
        if !row_names.is_empty() && row_names.len() != num_row {
            return Err(invalid("row_names length must match num_row"));
        }
        if matrix.start.len() != num_row + 1 {
            return Err(invalid("start length must be num_row + 1"));
        }
        if matrix.index.len() != matrix.value.len() {
            return Err(invalid("index and value must be the same length"));
        }
        if matrix.start.first().copied().unwrap_or(0) != 0 {
            return Err(invalid("start must begin at 0"));
        }
        if matrix.start.last().copied().unwrap_or(0) != matrix.value.len() {
            return Err(invalid("start last entry must equal value length"));
        }

        let mut model = Model::new();
        let mut columns: Vec<Var> = Vec::with_capacity(num_col);
        for col in 0..num_col {
            let name = col_names.get(col).cloned().unwrap_or_default();
            let is_integer = integrality
                .as_ref()
                .and_then(|flags| flags.get(col).copied())
                .unwrap_or(false);
            columns.push(
                model
                    .variables
                    .push(name, col_lower[col], col_upper[col], is_integer),
            );
        }

        for row in 0..num_row {
            let (begin, end) = (matrix.start[row], matrix.start[row + 1]);
            if begin > end || end > matrix.value.len() {
                return Err(invalid(format!("start must be non-decreasing (row {row})")));
            }
            let mut expr = Expr::new();
            for entry in begin..end {
                let col = matrix.index[entry];
                let var = columns.get(col).ok_or_else(|| {
                    invalid(format!("column index out of bounds at position {entry}"))
                })?;
                expr.add_term(var, matrix.value[entry]);
            }
            let (relation, rhs) = relation_from_bounds(row, row_lower[row], row_upper[row])?;
            let expr = expr.relate(relation, rhs)?;
            let name = row_names.get(row).cloned().unwrap_or_default();
            model
                .constraints
                .push(Rc::new(ConstraintRecord::new(row, name, expr)));
        }

        let mut objective = Expr::from_constant(*offset);
        for (var, cost) in columns.iter().zip(col_cost) {
            if *cost != 0.0 {
                objective.add_term(var, *cost);
            }
        }
        model.objective = objective;
        model.sense = *sense;

        tracing::debug!(
            component = "model",
            operation = "from_compiled",
            status = "success",
            rows = num_row,
            cols = num_col,
            nnz = matrix.nnz(),
            "Rebuilt model from compiled arrays"
        );
        Ok(model)
    }
}
