use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::compiled::CompiledModel;
use crate::model::Model;
use crate::solver::{ModelFile, Presolve, Solution, Solver, SolverError, SolverStatus};
use lpmodel_expr::{ScalarRelation, Var};

/// Two columns, three rows, minimize `x0 + x1 + 3`.
///
/// x0 in [0, 4], x1 in [1, 7];
/// `x0 + 2 x1 >= 5`, `x0 + 2 x1 <= 15`, `6 <= 3 x0 + 2 x1`.
pub(super) fn scenario_model() -> (Model, Var, Var) {
    let mut model = Model::new();
    let x0 = model.add_var(0.0, 4.0, "x0");
    let x1 = model.add_var(1.0, 7.0, "x1");

    model
        .add_constraint((&x0 + 2.0 * &x1).geq(5.0).unwrap(), "lower")
        .unwrap();
    model
        .add_constraint((&x0 + 2.0 * &x1).leq(15.0).unwrap(), "upper")
        .unwrap();
    model
        .add_constraint(6.0_f64.leq(3.0 * &x0 + 2.0 * &x1).unwrap(), "mirrored")
        .unwrap();
    model.minimize(&x0 + &x1 + 3.0).unwrap();

    (model, x0, x1)
}

/// Solver double that records what it was handed and replays a fixed answer.
#[derive(Default)]
pub(super) struct RecordingSolver {
    pub calls: usize,
    pub last_cost: Vec<f64>,
    pub fail_with: Option<SolverError>,
}

impl Solver for RecordingSolver {
    fn solve(&mut self, model: &CompiledModel) -> Result<Solution, SolverError> {
        self.calls += 1;
        self.last_cost = model.col_cost.clone();
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        Ok(Solution {
            status: SolverStatus::Optimal,
            objective_value: model.col_cost.iter().sum::<f64>() + model.offset,
            col_values: vec![1.0; model.num_col],
            col_duals: vec![0.0; model.num_col],
            row_values: vec![0.0; model.num_row],
            row_duals: vec![0.0; model.num_row],
            elapsed: Duration::ZERO,
            stats: BTreeMap::new(),
        })
    }
}

/// Model files kept in memory, keyed by path.
#[derive(Default)]
pub(super) struct MemoryFiles {
    pub files: HashMap<PathBuf, CompiledModel>,
}

impl ModelFile for MemoryFiles {
    fn write_model(&mut self, model: &CompiledModel, path: &Path) -> Result<(), SolverError> {
        self.files.insert(path.to_path_buf(), model.clone());
        Ok(())
    }

    fn read_model(&mut self, path: &Path) -> Result<CompiledModel, SolverError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| SolverError::ModelFile {
                path: path.to_path_buf(),
                reason: "no such file".to_string(),
            })
    }
}

/// Presolve double that returns a fixed reduced problem.
pub(super) struct FixedPresolve {
    pub reduced: CompiledModel,
    pub seen_rows: Option<usize>,
}

impl Presolve for FixedPresolve {
    fn presolve(&mut self, model: &CompiledModel) -> Result<CompiledModel, SolverError> {
        self.seen_rows = Some(model.num_row);
        Ok(self.reduced.clone())
    }
}

pub(super) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}
