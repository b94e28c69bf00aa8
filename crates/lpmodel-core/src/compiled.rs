//! Compiled, solver-ready form of a model.
//!
//! Columns are variables in index order, rows are constraints in index
//! order. The coefficient matrix is stored row-wise: row `r` owns the
//! entries `start[r]..start[r + 1]` of `index` and `value`.

use serde::{Deserialize, Serialize};

use crate::types::Sense;

/// Row-compressed sparse matrix.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RowMatrix {
    /// Length `num_row + 1`, starting at 0; `start[r + 1]` is the entry count of rows `0..=r`.
    pub start: Vec<usize>,
    /// Column index of each entry.
    pub index: Vec<usize>,
    pub value: Vec<f64>,
}

impl RowMatrix {
    pub fn num_rows(&self) -> usize {
        self.start.len().saturating_sub(1)
    }

    /// Number of stored entries; duplicates of a `(row, column)` pair count separately.
    pub fn nnz(&self) -> usize {
        self.value.len()
    }

    /// Column indices and values of row `row`.
    pub fn row(&self, row: usize) -> Option<(&[usize], &[f64])> {
        let begin = *self.start.get(row)?;
        let end = *self.start.get(row + 1)?;
        Some((self.index.get(begin..end)?, self.value.get(begin..end)?))
    }
}

/// Arrays handed to a solver backend.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CompiledModel {
    pub num_col: usize,
    pub num_row: usize,
    pub col_lower: Vec<f64>,
    pub col_upper: Vec<f64>,
    /// Present only when at least one column is integer.
    pub integrality: Option<Vec<bool>>,
    pub row_lower: Vec<f64>,
    pub row_upper: Vec<f64>,
    pub matrix: RowMatrix,
    pub col_cost: Vec<f64>,
    /// Constant term of the objective.
    pub offset: f64,
    pub sense: Sense,
    pub col_names: Vec<String>,
    pub row_names: Vec<String>,
}

impl CompiledModel {
    /// True when an integrality vector is present.
    pub fn is_mip(&self) -> bool {
        self.integrality.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.num_col == 0
    }

    pub fn nnz(&self) -> usize {
        self.matrix.nnz()
    }

    /// Rewrite rows so each has a single relation.
    ///
    /// A ranged row `l <= a x <= u` becomes `a x >= l` followed by
    /// `a x <= u`, suffixed `_lo` and `_up` when named. Rows with no finite
    /// bound constrain nothing and are dropped. Columns are untouched.
    #[allow(clippy::float_cmp)]
    pub fn split_ranged_rows(&self) -> CompiledModel {
        let mut row_lower = Vec::with_capacity(self.num_row);
        let mut row_upper = Vec::with_capacity(self.num_row);
        let mut row_names = Vec::new();
        let mut matrix = RowMatrix {
            start: vec![0],
            index: Vec::with_capacity(self.nnz()),
            value: Vec::with_capacity(self.nnz()),
        };
        let named = !self.row_names.is_empty();

        let mut push = |lower: f64, upper: f64, name: String, cols: &[usize], vals: &[f64]| {
            row_lower.push(lower);
            row_upper.push(upper);
            if named {
                row_names.push(name);
            }
            matrix.index.extend_from_slice(cols);
            matrix.value.extend_from_slice(vals);
            matrix.start.push(matrix.value.len());
        };

        for row in 0..self.num_row {
            let (Some((cols, vals)), Some(&lower), Some(&upper)) = (
                self.matrix.row(row),
                self.row_lower.get(row),
                self.row_upper.get(row),
            ) else {
                continue;
            };
            let name = self.row_names.get(row).cloned().unwrap_or_default();
            match (lower.is_finite(), upper.is_finite()) {
                (false, false) => {}
                (true, true) if lower != upper => {
                    let suffixed = |tag: &str| {
                        if name.is_empty() {
                            String::new()
                        } else {
                            format!("{name}_{tag}")
                        }
                    };
                    push(lower, f64::INFINITY, suffixed("lo"), cols, vals);
                    push(f64::NEG_INFINITY, upper, suffixed("up"), cols, vals);
                }
                _ => push(lower, upper, name, cols, vals),
            }
        }

        CompiledModel {
            num_row: row_lower.len(),
            row_lower,
            row_upper,
            matrix,
            row_names,
            ..self.clone()
        }
    }
}
