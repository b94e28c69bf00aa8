#![allow(clippy::float_cmp)]

use std::path::PathBuf;

use lpmodel_core::{Model, ScalarRelation, Sense, Var};
use lpmodel_highs::{HighsSolver, highs_version};

const TOL: f64 = 1e-6;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < TOL,
        "expected {expected}, got {actual}"
    );
}

/// Removes the file when dropped so failed assertions do not leave it behind.
struct TempModelFile(PathBuf);

impl TempModelFile {
    fn new(stem: &str, extension: &str) -> Self {
        let name = format!("lpmodel_{stem}_{}.{extension}", std::process::id());
        Self(std::env::temp_dir().join(name))
    }
}

impl Drop for TempModelFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

/// x0 in [0, 4], x1 in [1, 7]; `x0 + 2 x1 >= 5`, `x0 + 2 x1 <= 15`,
/// `6 <= 3 x0 + 2 x1`; minimize `x0 + x1 + 3`. Optimum 5.75.
fn scenario_model() -> (Model, Var, Var) {
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

#[test]
fn test_highs_reports_a_version() {
    assert!(highs_version().is_some_and(|version| !version.is_empty()));
}

#[test]
fn test_mps_round_trip_keeps_arrays_and_names() {
    init_tracing();
    let file = TempModelFile::new("roundtrip", "mps");
    let (mut model, _, _) = scenario_model();
    let mut highs = HighsSolver::new();

    model.write(&mut highs, &file.0).unwrap();
    assert!(file.0.exists());

    let mut read = Model::read(&mut highs, &file.0).unwrap();
    let original = model.update().clone();
    let compiled = read.update();

    assert_eq!(compiled.col_names, original.col_names);
    assert_eq!(compiled.row_names, original.row_names);
    assert_eq!(compiled.col_lower, original.col_lower);
    assert_eq!(compiled.col_upper, original.col_upper);
    assert_eq!(compiled.col_cost, original.col_cost);
    assert_eq!(compiled.row_lower, original.row_lower);
    assert_eq!(compiled.row_upper, original.row_upper);
    assert_eq!(compiled.matrix, original.matrix);
    assert_eq!(compiled.sense, Sense::Minimize);
    assert_eq!(compiled.integrality, None);
    assert_close(compiled.offset, 3.0);

    let solution = read.optimize(&mut highs).unwrap();
    assert_close(solution.objective_value, 5.75);
}

#[test]
fn test_round_trip_keeps_integer_columns() {
    let file = TempModelFile::new("knapsack", "mps");
    let mut model = Model::new();
    let items = model.add_binaries(3, "take");
    let weight = 4.0 * &items[0] + 3.0 * &items[1] + 2.0 * &items[2];
    model.add_constraint(weight.leq(5.0).unwrap(), "weight").unwrap();
    model
        .maximize(5.0 * &items[0] + 4.0 * &items[1] + 3.0 * &items[2])
        .unwrap();
    let mut highs = HighsSolver::new();

    model.write(&mut highs, &file.0).unwrap();
    let mut read = Model::read(&mut highs, &file.0).unwrap();

    assert_eq!(read.num_variables(), 3);
    assert!(read.variables().all(|var| var.is_integer().unwrap()));
    assert_eq!(read.sense(), Sense::Maximize);
    let solution = read.optimize(&mut highs).unwrap();
    assert_close(solution.objective_value, 7.0);
}

#[test]
fn test_reading_a_missing_file_fails() {
    let missing = std::env::temp_dir()
        .join("lpmodel_no_such_dir")
        .join("absent.mps");
    let err = Model::read(&mut HighsSolver::new(), &missing).unwrap_err();
    assert_eq!(err.code(), "SOLVER_MODEL_FILE");
    assert!(err.to_string().contains("absent.mps"));
}

#[test]
fn test_presolve_yields_an_equivalent_model() {
    init_tracing();
    let (mut model, _, _) = scenario_model();
    let mut highs = HighsSolver::new();

    let mut reduced = model.presolve(&mut highs).unwrap();

    assert_eq!(model.num_variables(), 2);
    assert!(reduced.num_variables() <= model.num_variables());
    if reduced.num_variables() == 0 {
        assert_close(reduced.objective().constant(), 5.75);
    } else {
        let solution = reduced.optimize(&mut highs).unwrap();
        assert_close(solution.objective_value, 5.75);
    }
}

#[test]
fn test_presolve_refuses_an_infeasible_model() {
    let mut model = Model::new();
    let x = model.add_var(0.0, 1.0, "x");
    model.add_constraint(x.geq(2.0), "impossible").unwrap();
    model.minimize(x.clone().into()).unwrap();

    assert!(model.presolve(&mut HighsSolver::new()).is_err());
}
