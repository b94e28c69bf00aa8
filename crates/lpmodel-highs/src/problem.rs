//! Compiled arrays on their way into HiGHS.
//!
//! Both load paths (the `highs::RowProblem` builder used for solving and the
//! raw C handle used for files and presolve) go through [`merged_matrix`],
//! because HiGHS rejects a row that names the same column twice.

use std::collections::BTreeMap;

use highs::{Col, RowProblem, Sense as HighsSense, SolvedModel};
use lpmodel_core::{CompiledModel, RowMatrix, Sense, SolverConfig};

use crate::error::HighsError;

/// A HiGHS option value, typed the way the option registry expects it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum OptionValue {
    Bool(bool),
    Int(i32),
    Float(f64),
    Str(&'static str),
}

/// Translate a [`SolverConfig`] into HiGHS option names.
///
/// Output is switched off unless the config asks for console logging or a
/// positive verbosity.
pub(crate) fn highs_options(config: &SolverConfig) -> Vec<(&'static str, OptionValue)> {
    let log_to_console = config.log_to_console.unwrap_or(false);
    let output = log_to_console || config.verbosity.is_some_and(|level| level > 0);

    let mut options = vec![("output_flag", OptionValue::Bool(output))];
    if log_to_console {
        options.push(("log_to_console", OptionValue::Bool(true)));
    }
    if let Some(limit) = config.time_limit {
        options.push(("time_limit", OptionValue::Float(limit)));
    }
    if let Some(gap) = config.mip_gap {
        options.push(("mip_rel_gap", OptionValue::Float(gap)));
    }
    if let Some(presolve) = config.presolve {
        options.push((
            "presolve",
            OptionValue::Str(if presolve { "on" } else { "off" }),
        ));
    }
    if let Some(threads) = config.threads {
        let threads = i32::try_from(threads).unwrap_or(i32::MAX);
        options.push(("threads", OptionValue::Int(threads)));
    }
    if let Some(tolerance) = config.tolerance {
        options.push(("primal_feasibility_tolerance", OptionValue::Float(tolerance)));
        options.push(("dual_feasibility_tolerance", OptionValue::Float(tolerance)));
    }
    options
}

/// Reject arrays whose lengths disagree with `num_col` / `num_row`.
pub(crate) fn check_lengths(model: &CompiledModel) -> Result<(), HighsError> {
    let columns = [
        ("col_lower", model.col_lower.len()),
        ("col_upper", model.col_upper.len()),
        ("col_cost", model.col_cost.len()),
        (
            "integrality",
            model.integrality.as_ref().map_or(model.num_col, Vec::len),
        ),
    ];
    let rows = [
        ("row_lower", model.row_lower.len()),
        ("row_upper", model.row_upper.len()),
    ];
    let checks = columns
        .into_iter()
        .map(|(what, found)| (what, model.num_col, found))
        .chain(rows.into_iter().map(|(what, found)| (what, model.num_row, found)));
    for (what, expected, found) in checks {
        if expected != found {
            return Err(HighsError::ArrayLength {
                what,
                expected,
                found,
            });
        }
    }
    Ok(())
}

/// Row-wise matrix with repeated `(row, column)` entries summed and each
/// row's entries ordered by column. Also returns how many entries were folded.
pub(crate) fn merged_matrix(model: &CompiledModel) -> Result<(RowMatrix, usize), HighsError> {
    let mut matrix = RowMatrix {
        start: Vec::with_capacity(model.num_row + 1),
        index: Vec::with_capacity(model.nnz()),
        value: Vec::with_capacity(model.nnz()),
    };
    matrix.start.push(0);
    let mut folded = 0;

    for row in 0..model.num_row {
        let (index, value) = model.matrix.row(row).ok_or(HighsError::MissingRow { row })?;
        let mut sums: BTreeMap<usize, f64> = BTreeMap::new();
        for (&column, &coeff) in index.iter().zip(value) {
            if column >= model.num_col {
                return Err(HighsError::ColumnOutOfRange {
                    row,
                    column,
                    num_cols: model.num_col,
                });
            }
            *sums.entry(column).or_insert(0.0) += coeff;
        }
        folded += index.len() - sums.len();
        for (column, coeff) in sums {
            matrix.index.push(column);
            matrix.value.push(coeff);
        }
        matrix.start.push(matrix.index.len());
    }
    Ok((matrix, folded))
}

pub(crate) fn is_integer(model: &CompiledModel, col: usize) -> bool {
    model
        .integrality
        .as_ref()
        .is_some_and(|flags| flags.get(col).copied().unwrap_or(false))
}

/// A model loaded into the `highs` row builder, ready to solve once.
pub(crate) struct LoadedProblem {
    problem: RowProblem,
    sense: HighsSense,
    /// Entries summed away by [`merged_matrix`].
    pub folded_entries: usize,
}

impl LoadedProblem {
    pub fn new(model: &CompiledModel) -> Result<Self, HighsError> {
        check_lengths(model)?;
        let (matrix, folded_entries) = merged_matrix(model)?;

        let mut problem = RowProblem::default();
        let columns: Vec<Col> = (0..model.num_col)
            .map(|col| {
                let bounds = model.col_lower[col]..=model.col_upper[col];
                let cost = model.col_cost[col];
                if is_integer(model, col) {
                    problem.add_integer_column(cost, bounds)
                } else {
                    problem.add_column(cost, bounds)
                }
            })
            .collect();

        for row in 0..model.num_row {
            let (index, value) = matrix.row(row).ok_or(HighsError::MissingRow { row })?;
            let factors: Vec<(Col, f64)> = index
                .iter()
                .zip(value)
                .map(|(&column, &coeff)| (columns[column], coeff))
                .collect();
            problem.add_row(model.row_lower[row]..=model.row_upper[row], factors);
        }

        let sense = match model.sense {
            Sense::Minimize => HighsSense::Minimise,
            Sense::Maximize => HighsSense::Maximise,
        };
        Ok(Self {
            problem,
            sense,
            folded_entries,
        })
    }

    pub fn solve(self, options: &[(&'static str, OptionValue)]) -> SolvedModel {
        let mut model = self.problem.optimise(self.sense);
        for &(name, value) in options {
            match value {
                OptionValue::Bool(value) => model.set_option(name, value),
                OptionValue::Int(value) => model.set_option(name, value),
                OptionValue::Float(value) => model.set_option(name, value),
                OptionValue::Str(value) => model.set_option(name, value),
            }
        }
        model.solve()
    }
}
