//! Common traits defining the callback seams of a control planning problem

use crate::common::types::*;
use crate::common::error::PlanningResult;
use crate::control_planning::{GoalState, PlannerSolution, SpaceInformation, TerminationCondition};

/// Forward model used by the planner to extend motions
///
/// Implementations must be deterministic and free of hidden state: the
/// planner calls them many times per iteration.
pub trait StatePropagator {
    /// Apply `control` to `start` for one step of length `duration`
    fn propagate(&self, start: &Pose2D, control: &ControlInput, duration: f64) -> Pose2D;
}

impl<F> StatePropagator for F
where
    F: Fn(&Pose2D, &ControlInput, f64) -> Pose2D,
{
    fn propagate(&self, start: &Pose2D, control: &ControlInput, duration: f64) -> Pose2D {
        self(start, control, duration)
    }
}

/// Predicate deciding whether a pose may appear in a solution
pub trait StateValidityChecker {
    fn is_valid(&self, pose: &Pose2D) -> bool;
}

impl<F> StateValidityChecker for F
where
    F: Fn(&Pose2D) -> bool,
{
    fn is_valid(&self, pose: &Pose2D) -> bool {
        self(pose)
    }
}

/// Trait for planners searching in the control space
pub trait ControlPlanner {
    /// Planner name, used in log output
    fn name(&self) -> &str;

    /// Search for a control path from `start` into `goal`
    ///
    /// Blocks until the goal is reached or `ptc` fires.
    fn solve(
        &mut self,
        si: &SpaceInformation,
        start: &Pose2D,
        goal: &GoalState,
        ptc: &TerminationCondition,
    ) -> PlanningResult<PlannerSolution>;

    /// Drop all planner data so the next solve starts from scratch
    fn clear(&mut self);

    /// Poses and parent links of the search tree, for plotting
    fn tree(&self) -> Vec<(Pose2D, Option<usize>)> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_as_propagator() {
        let drift = |s: &Pose2D, c: &ControlInput, _dt: f64| Pose2D::new(s.x + c.v, s.y, s.yaw);
        let out = drift.propagate(&Pose2D::origin(), &ControlInput::new(0.5, 0.0), 1.0);
        assert_eq!(out, Pose2D::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn test_closure_as_validity_checker() {
        let upper_half = |p: &Pose2D| p.y >= 0.0;
        assert!(upper_half.is_valid(&Pose2D::new(0.0, 1.0, 0.0)));
        assert!(!upper_half.is_valid(&Pose2D::new(0.0, -1.0, 0.0)));
    }
}
