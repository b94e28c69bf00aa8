use std::fmt;

/// How a backend's solve ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolverStatus {
    Optimal,
    Infeasible,
    Unbounded,
    /// Stopped on the time budget; an incumbent may exist.
    TimeLimit,
    /// Stopped on the iteration budget; an incumbent may exist.
    IterationLimit,
    /// Anything the backend could not classify, including
    /// "infeasible or unbounded".
    Unknown,
}

impl SolverStatus {
    pub fn is_optimal(self) -> bool {
        self == SolverStatus::Optimal
    }

    /// Whether a primal point can accompany this status.
    pub fn has_solution(self) -> bool {
        matches!(
            self,
            SolverStatus::Optimal | SolverStatus::TimeLimit | SolverStatus::IterationLimit
        )
    }

    /// Lowercase label used in log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            SolverStatus::Optimal => "optimal",
            SolverStatus::Infeasible => "infeasible",
            SolverStatus::Unbounded => "unbounded",
            SolverStatus::TimeLimit => "time_limit",
            SolverStatus::IterationLimit => "iteration_limit",
            SolverStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::SolverStatus;

    #[test]
    fn limits_may_carry_an_incumbent() {
        let with_point: Vec<_> = [
            SolverStatus::Optimal,
            SolverStatus::Infeasible,
            SolverStatus::Unbounded,
            SolverStatus::TimeLimit,
            SolverStatus::IterationLimit,
            SolverStatus::Unknown,
        ]
        .into_iter()
        .filter(|status| status.has_solution())
        .collect();

        assert_eq!(
            with_point,
            [
                SolverStatus::Optimal,
                SolverStatus::TimeLimit,
                SolverStatus::IterationLimit
            ]
        );
        assert!(!SolverStatus::TimeLimit.is_optimal());
    }

    #[test]
    fn labels_are_snake_case() {
        assert_eq!(SolverStatus::IterationLimit.to_string(), "iteration_limit");
        assert_eq!(SolverStatus::Unknown.as_str(), "unknown");
    }
}
