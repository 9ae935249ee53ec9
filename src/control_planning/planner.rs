//! Planner outcomes and termination conditions

use std::fmt;
use std::time::{Duration, Instant};

use crate::common::{PlanningError, PlanningResult};
use crate::control_planning::path::PathControl;

/// Outcome of a single solve attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerStatus {
    /// A path ending inside the goal region was found
    ExactSolution,
    /// The budget ran out; the path ends at the pose closest to the goal
    ApproximateSolution,
    /// The budget ran out before any motion could be added
    Timeout,
}

impl PlannerStatus {
    pub fn is_exact(&self) -> bool {
        matches!(self, PlannerStatus::ExactSolution)
    }
}

impl fmt::Display for PlannerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlannerStatus::ExactSolution => write!(f, "Exact solution"),
            PlannerStatus::ApproximateSolution => write!(f, "Approximate solution"),
            PlannerStatus::Timeout => write!(f, "Timeout"),
        }
    }
}

/// What a planner hands back from `solve`
#[derive(Debug, Clone)]
pub struct PlannerSolution {
    pub status: PlannerStatus,
    pub path: Option<PathControl>,
    /// Distance from the last pose of `path` to the goal
    pub distance_to_goal: f64,
    pub iterations: usize,
}

impl PlannerSolution {
    pub fn timeout(iterations: usize) -> Self {
        Self {
            status: PlannerStatus::Timeout,
            path: None,
            distance_to_goal: f64::INFINITY,
            iterations,
        }
    }
}

/// Stop planning once the deadline passes or the iteration cap is hit
#[derive(Debug, Clone)]
pub struct TerminationCondition {
    deadline: Instant,
    max_iterations: Option<usize>,
}

impl TerminationCondition {
    /// Deadline `seconds` from now
    pub fn timeout(seconds: f64) -> PlanningResult<Self> {
        let invalid = || PlanningError::InvalidParameter(format!(
            "time budget must be a non-negative number of seconds, got {}", seconds
        ));
        let budget = Duration::try_from_secs_f64(seconds).map_err(|_| invalid())?;
        let deadline = Instant::now().checked_add(budget).ok_or_else(invalid)?;
        Ok(Self { deadline, max_iterations: None })
    }

    pub fn with_max_iterations(mut self, max_iterations: Option<usize>) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn should_terminate(&self, iterations: usize) -> bool {
        if let Some(max) = self.max_iterations {
            if iterations >= max {
                return true;
            }
        }
        Instant::now() >= self.deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_rejects_invalid_budget() {
        assert!(TerminationCondition::timeout(-1.0).is_err());
        assert!(TerminationCondition::timeout(f64::NAN).is_err());
        assert!(TerminationCondition::timeout(10.0).is_ok());
    }

    #[test]
    fn test_zero_budget_terminates_immediately() {
        let ptc = TerminationCondition::timeout(0.0).unwrap();
        assert!(ptc.should_terminate(0));
    }

    #[test]
    fn test_iteration_cap() {
        let ptc = TerminationCondition::timeout(60.0).unwrap().with_max_iterations(Some(5));
        assert!(!ptc.should_terminate(4));
        assert!(ptc.should_terminate(5));
    }

    #[test]
    fn test_status_display() {
        assert_eq!(PlannerStatus::ExactSolution.to_string(), "Exact solution");
        assert!(!PlannerStatus::ApproximateSolution.is_exact());
    }
}
