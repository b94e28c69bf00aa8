//! HiGHS model status and its mapping onto [`SolverStatus`].

use highs::HighsModelStatus;
use lpmodel_core::SolverStatus;

/// The subset of HiGHS model statuses this backend tells apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighsStatus {
    Optimal,
    Infeasible,
    Unbounded,
    /// Presolve proved there is no optimum without deciding which case holds.
    UnboundedOrInfeasible,
    ReachedTimeLimit,
    ReachedIterationLimit,
    Unknown,
}

impl HighsStatus {
    /// Limits leave the incumbent in place, so they still yield a point.
    pub fn has_solution(self) -> bool {
        self.to_solver_status().has_solution()
    }

    pub fn to_solver_status(self) -> SolverStatus {
        match self {
            HighsStatus::Optimal => SolverStatus::Optimal,
            HighsStatus::Infeasible => SolverStatus::Infeasible,
            HighsStatus::Unbounded => SolverStatus::Unbounded,
            HighsStatus::ReachedTimeLimit => SolverStatus::TimeLimit,
            HighsStatus::ReachedIterationLimit => SolverStatus::IterationLimit,
            HighsStatus::UnboundedOrInfeasible | HighsStatus::Unknown => SolverStatus::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HighsStatus::UnboundedOrInfeasible => "unbounded_or_infeasible",
            other => other.to_solver_status().as_str(),
        }
    }
}

impl HighsStatus {
    /// Map a raw `Highs_getModelStatus` code (`kHighsModelStatus*`).
    pub(crate) fn from_model_status_code(code: i32) -> Self {
        match code {
            7 => HighsStatus::Optimal,
            8 => HighsStatus::Infeasible,
            9 => HighsStatus::UnboundedOrInfeasible,
            10 => HighsStatus::Unbounded,
            13 => HighsStatus::ReachedTimeLimit,
            14 => HighsStatus::ReachedIterationLimit,
            _ => HighsStatus::Unknown,
        }
    }
}

impl From<HighsModelStatus> for HighsStatus {
    fn from(status: HighsModelStatus) -> Self {
        match status {
            HighsModelStatus::Optimal => HighsStatus::Optimal,
            HighsModelStatus::Infeasible => HighsStatus::Infeasible,
            HighsModelStatus::Unbounded => HighsStatus::Unbounded,
            HighsModelStatus::UnboundedOrInfeasible => HighsStatus::UnboundedOrInfeasible,
            HighsModelStatus::ReachedTimeLimit => HighsStatus::ReachedTimeLimit,
            HighsModelStatus::ReachedIterationLimit => HighsStatus::ReachedIterationLimit,
            _ => HighsStatus::Unknown,
        }
    }
}
