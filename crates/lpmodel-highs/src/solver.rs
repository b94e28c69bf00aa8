//! [`HighsSolver`]: solving, model files and presolve through HiGHS.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

use lpmodel_core::{
    CompiledModel, ModelFile, Presolve, Solution, Solver, SolverConfig, SolverError,
};
use tracing::{debug, warn};

use crate::ffi::{self, RawHighs};
use crate::problem::{LoadedProblem, highs_options};
use crate::status::HighsStatus;

/// HiGHS backend driven by a [`SolverConfig`].
///
/// Holds no HiGHS state between calls: each solve, file operation or
/// presolve loads the compiled arrays into a fresh instance.
#[derive(Debug, Clone, Default)]
pub struct HighsSolver {
    config: SolverConfig,
}

impl HighsSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Changes apply from the next call on.
    pub fn config_mut(&mut self) -> &mut SolverConfig {
        &mut self.config
    }

    /// A C API instance with the configured options applied, except
    /// `presolve` when `keep_presolve` is false.
    fn raw_instance(&self, keep_presolve: bool) -> Result<RawHighs, SolverError> {
        let mut highs = RawHighs::new()?;
        for (name, value) in highs_options(&self.config) {
            if name == "presolve" && !keep_presolve {
                continue;
            }
            highs.set_option(name, value)?;
        }
        Ok(highs)
    }
}

fn reject_empty(model: &CompiledModel, operation: &'static str) -> Result<(), SolverError> {
    if model.is_empty() {
        warn!(
            component = "highs",
            operation,
            status = "error",
            "Refusing a model without columns"
        );
        return Err(SolverError::EmptyModel);
    }
    Ok(())
}

impl Solver for HighsSolver {
    fn solve(&mut self, model: &CompiledModel) -> Result<Solution, SolverError> {
        reject_empty(model, "solve")?;
        let started = Instant::now();
        let version = ffi::highs_version();
        debug!(
            component = "highs",
            operation = "solve",
            status = "start",
            highs_version = version.as_deref().unwrap_or("unknown"),
            rows = model.num_row,
            cols = model.num_col,
            nnz = model.nnz(),
            is_mip = model.is_mip(),
            "Loading model into HiGHS"
        );

        let problem = LoadedProblem::new(model)?;
        let folded_entries = problem.folded_entries;
        let solved = problem.solve(&highs_options(&self.config));
        let status = HighsStatus::from(solved.status());
        let simplex_iterations = ffi::int_info(&solved, "simplex_iteration_count").unwrap_or(0);
        let barrier_iterations = ffi::int_info(&solved, "barrier_iteration_count").unwrap_or(0);
        let duration_ms = started.elapsed().as_secs_f64() * 1000.0;
        debug!(
            component = "highs",
            operation = "solve",
            status = "success",
            highs_status = status.as_str(),
            folded_entries,
            simplex_iterations,
            barrier_iterations,
            duration_ms,
            "HiGHS returned"
        );

        if !status.has_solution() {
            warn!(
                component = "highs",
                operation = "solve",
                status = "error",
                highs_status = status.as_str(),
                "No usable solution"
            );
            return Err(SolverError::NoSolution {
                status: status.to_solver_status(),
            });
        }
        if status != HighsStatus::Optimal {
            warn!(
                component = "highs",
                operation = "solve",
                status = "warn",
                highs_status = status.as_str(),
                "Stopped on a limit; returning the incumbent"
            );
        }

        let mut stats = BTreeMap::new();
        stats.insert("simplex_iterations", simplex_iterations as f64);
        stats.insert("barrier_iterations", barrier_iterations as f64);
        let mip_gap = solved.mip_gap();
        if model.is_mip() && mip_gap.is_finite() {
            stats.insert("mip_gap", mip_gap);
        }

        let vectors = solved.get_solution();
        Ok(Solution {
            status: status.to_solver_status(),
            objective_value: solved.objective_value() + model.offset,
            col_values: vectors.columns().to_vec(),
            col_duals: vectors.dual_columns().to_vec(),
            row_values: vectors.rows().to_vec(),
            row_duals: vectors.dual_rows().to_vec(),
            elapsed: started.elapsed(),
            stats,
        })
    }
}

impl ModelFile for HighsSolver {
    fn write_model(&mut self, model: &CompiledModel, path: &Path) -> Result<(), SolverError> {
        let mut highs = self.raw_instance(true)?;
        highs.pass_model(model)?;
        highs.write_model(path)?;
        debug!(
            component = "highs",
            operation = "write_model",
            status = "success",
            path = %path.display(),
            rows = model.num_row,
            cols = model.num_col,
            "Model file written"
        );
        Ok(())
    }

    fn read_model(&mut self, path: &Path) -> Result<CompiledModel, SolverError> {
        let mut highs = self.raw_instance(true)?;
        highs.read_model(path)?;
        let model = highs.model()?;
        debug!(
            component = "highs",
            operation = "read_model",
            status = "success",
            path = %path.display(),
            rows = model.num_row,
            cols = model.num_col,
            is_mip = model.is_mip(),
            "Model file read"
        );
        Ok(model)
    }
}

impl Presolve for HighsSolver {
    fn presolve(&mut self, model: &CompiledModel) -> Result<CompiledModel, SolverError> {
        reject_empty(model, "presolve")?;
        let mut highs = self.raw_instance(false)?;
        highs.pass_model(model)?;
        let status = HighsStatus::from_model_status_code(highs.presolve()?);
        if matches!(
            status,
            HighsStatus::Infeasible | HighsStatus::Unbounded | HighsStatus::UnboundedOrInfeasible
        ) {
            warn!(
                component = "highs",
                operation = "presolve",
                status = "error",
                highs_status = status.as_str(),
                "Presolve settled the problem without an optimum"
            );
            return Err(SolverError::NoSolution {
                status: status.to_solver_status(),
            });
        }

        let reduced = highs.presolved_model()?;
        debug!(
            component = "highs",
            operation = "presolve",
            status = "success",
            rows = reduced.num_row,
            cols = reduced.num_col,
            nnz = reduced.nnz(),
            removed_rows = model.num_row.saturating_sub(reduced.num_row),
            removed_cols = model.num_col.saturating_sub(reduced.num_col),
            "Presolved model extracted"
        );
        Ok(reduced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_models_are_refused() {
        let mut solver = HighsSolver::new();
        let empty = CompiledModel::default();
        assert_eq!(solver.solve(&empty).unwrap_err(), SolverError::EmptyModel);
        assert_eq!(solver.presolve(&empty).unwrap_err(), SolverError::EmptyModel);
    }

    #[test]
    fn config_edits_stick() {
        let mut solver = HighsSolver::new();
        solver.config_mut().time_limit = Some(10.0);
        solver.config_mut().threads = Some(1);
        assert_eq!(
            solver.config(),
            &SolverConfig::new().with_time_limit(10.0).with_threads(1)
        );
    }
}
