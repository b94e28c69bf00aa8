use super::support::{RecordingSolver, init_tracing, scenario_model};
use crate::model::Model;
use crate::solver::{SolverError, SolverStatus};

#[test]
fn test_optimize_compiles_and_stores_solution() {
    init_tracing();
    let (mut model, x0, x1) = scenario_model();
    let mut solver = RecordingSolver::default();

    let solution = model.optimize(&mut solver).unwrap();
    assert_eq!(solution.status, SolverStatus::Optimal);
    assert_eq!(solution.objective_value, 5.0);
    assert_eq!(solution.value(&x0), Some(1.0));

    assert_eq!(solver.calls, 1);
    assert_eq!(solver.last_cost, vec![1.0, 1.0]);
    assert!(model.is_compiled());
    assert_eq!(
        model.solution().and_then(|s| s.evaluate(&(&x0 + &x1))),
        Some(2.0)
    );
}

#[test]
fn test_mutation_discards_solution() {
    let (mut model, x0, _) = scenario_model();
    let mut solver = RecordingSolver::default();
    model.optimize(&mut solver).unwrap();
    assert!(model.solution().is_some());

    model.minimize(2.0 * &x0).unwrap();
    assert!(model.solution().is_none());

    model.optimize(&mut solver).unwrap();
    assert_eq!(solver.last_cost, vec![2.0, 0.0]);
}

#[test]
fn test_failed_solve_leaves_no_solution() {
    init_tracing();
    let (mut model, _, _) = scenario_model();
    let mut solver = RecordingSolver::default();
    model.optimize(&mut solver).unwrap();

    solver.fail_with = Some(SolverError::NoSolution {
        status: SolverStatus::Infeasible,
    });
    let err = model.optimize(&mut solver).unwrap_err();
    assert_eq!(err.code(), "SOLVER_NO_SOLUTION");
    assert!(model.solution().is_none());
    assert!(model.is_compiled());
}

#[test]
fn test_optimize_accepts_trait_objects() {
    let mut model = Model::new();
    model.add_var(0.0, 1.0, "x");
    let mut recording = RecordingSolver::default();
    let solver: &mut dyn crate::solver::Solver = &mut recording;
    assert!(model.optimize(solver).is_ok());
}
