//! Running a solver against the compiled model.

use std::time::Instant;

use crate::solver::{Solution, Solver, SolverError};

use super::Model;
use super::compile::compile;

impl Model {
    /// Compile if stale, hand the arrays to `solver`, and keep the result.
    ///
    /// A failed solve leaves the model without a solution.
    pub fn optimize<S>(&mut self, solver: &mut S) -> Result<&Solution, SolverError>
    where
        S: Solver + ?Sized,
    {
        let Model {
            variables,
            constraints,
            objective,
            sense,
            compiled,
            solution,
        } = self;
        let compiled =
            compiled.get_or_insert_with(|| compile(variables, constraints, objective, *sense));
        *solution = None;

        tracing::debug!(
            component = "model",
            operation = "optimize",
            status = "start",
            rows = compiled.num_row,
            cols = compiled.num_col,
            "Starting solve"
        );
        let started = Instant::now();
        let result = match solver.solve(compiled) {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!(
                    component = "model",
                    operation = "optimize",
                    status = "error",
                    error_code = err.code(),
                    "Solve ended without a usable solution"
                );
                return Err(err);
            }
        };
        tracing::debug!(
            component = "model",
            operation = "optimize",
            status = "success",
            solver_status = result.status.as_str(),
            objective_value = result.objective_value,
            duration_ms = started.elapsed().as_secs_f64() * 1000.0,
            "Solve finished"
        );
        Ok(solution.insert(result))
    }

    /// Result of the last successful [`Model::optimize`], cleared by any mutation.
    pub fn solution(&self) -> Option<&Solution> {
        self.solution.as_ref()
    }
}
