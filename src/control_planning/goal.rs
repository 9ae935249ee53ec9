//! Goal region: a single pose with an acceptance radius

use crate::common::{PlanningError, PlanningResult, Pose2D};
use crate::control_planning::state_space::SE2StateSpace;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalState {
    pub state: Pose2D,
    pub threshold: f64,
}

impl GoalState {
    pub fn new(state: Pose2D, threshold: f64) -> PlanningResult<Self> {
        if !(threshold.is_finite() && threshold > 0.0) {
            return Err(PlanningError::InvalidParameter(format!(
                "goal threshold must be positive, got {}", threshold
            )));
        }
        Ok(Self { state, threshold })
    }

    /// Distance from `pose` to the goal pose
    pub fn distance_goal(&self, space: &SE2StateSpace, pose: &Pose2D) -> f64 {
        space.distance(pose, &self.state)
    }

    /// Whether `pose` lies within the threshold, together with its distance
    pub fn is_satisfied(&self, space: &SE2StateSpace, pose: &Pose2D) -> (bool, f64) {
        let d = self.distance_goal(space, pose);
        (d <= self.threshold, d)
    }
}
