//! Everything a control planner needs to know about the problem's spaces
//!
//! Bundles the state space, the control space, the propagation and
//! validity callbacks, and the discretisation of control durations.

use crate::common::{
    ControlInput, PlanningError, PlanningResult, Pose2D, StatePropagator, StateValidityChecker,
};
use crate::control_planning::control_space::ControlSpace;
use crate::control_planning::kinematics::{BoundsValidityChecker, UnicyclePropagator};
use crate::control_planning::state_space::SE2StateSpace;

/// Default length of one propagation step
pub const DEFAULT_PROPAGATION_STEP_SIZE: f64 = 0.1;
/// Default control duration range, in propagation steps
pub const DEFAULT_MIN_CONTROL_DURATION: u32 = 1;
pub const DEFAULT_MAX_CONTROL_DURATION: u32 = 10;

pub struct SpaceInformation {
    state_space: SE2StateSpace,
    control_space: ControlSpace,
    propagator: Box<dyn StatePropagator>,
    validity_checker: Box<dyn StateValidityChecker>,
    step_size: f64,
    min_control_duration: u32,
    max_control_duration: u32,
}

impl SpaceInformation {
    /// Spaces with unicycle propagation and bounds-only validity
    pub fn new(state_space: SE2StateSpace, control_space: ControlSpace) -> Self {
        let validity_checker = BoundsValidityChecker::new(state_space.bounds().clone());
        Self {
            state_space,
            control_space,
            propagator: Box::new(UnicyclePropagator::with_defaults()),
            validity_checker: Box::new(validity_checker),
            step_size: DEFAULT_PROPAGATION_STEP_SIZE,
            min_control_duration: DEFAULT_MIN_CONTROL_DURATION,
            max_control_duration: DEFAULT_MAX_CONTROL_DURATION,
        }
    }

    pub fn set_state_propagator<P: StatePropagator + 'static>(&mut self, propagator: P) {
        self.propagator = Box::new(propagator);
    }

    pub fn set_state_validity_checker<V: StateValidityChecker + 'static>(&mut self, checker: V) {
        self.validity_checker = Box::new(checker);
    }

    pub fn set_propagation_step_size(&mut self, step_size: f64) {
        self.step_size = step_size;
    }

    pub fn set_min_max_control_duration(&mut self, min_steps: u32, max_steps: u32) {
        self.min_control_duration = min_steps;
        self.max_control_duration = max_steps;
    }

    pub fn state_space(&self) -> &SE2StateSpace {
        &self.state_space
    }

    pub fn control_space(&self) -> &ControlSpace {
        &self.control_space
    }

    pub fn propagation_step_size(&self) -> f64 {
        self.step_size
    }

    pub fn min_control_duration(&self) -> u32 {
        self.min_control_duration
    }

    pub fn max_control_duration(&self) -> u32 {
        self.max_control_duration
    }

    /// Validate the configuration before planning
    pub fn setup(&self) -> PlanningResult<()> {
        self.state_space.bounds().check()?;
        self.control_space.bounds().check()?;
        if !(self.step_size.is_finite() && self.step_size > 0.0) {
            return Err(PlanningError::InvalidParameter(format!(
                "propagation step size must be positive, got {}", self.step_size
            )));
        }
        if self.min_control_duration == 0 || self.min_control_duration > self.max_control_duration {
            return Err(PlanningError::InvalidParameter(format!(
                "invalid control duration range [{}, {}]",
                self.min_control_duration, self.max_control_duration
            )));
        }
        Ok(())
    }

    pub fn is_valid(&self, pose: &Pose2D) -> bool {
        self.validity_checker.is_valid(pose)
    }

    pub fn satisfies_bounds(&self, pose: &Pose2D) -> bool {
        self.state_space.satisfies_bounds(pose)
    }

    pub fn distance(&self, a: &Pose2D, b: &Pose2D) -> f64 {
        self.state_space.distance(a, b)
    }

    /// Apply `control` for a single step
    pub fn propagate_step(&self, start: &Pose2D, control: &ControlInput) -> Pose2D {
        self.propagator.propagate(start, control, self.step_size)
    }

    /// Apply `control` for `steps` steps, returning the pose after each step
    pub fn propagate(&self, start: &Pose2D, control: &ControlInput, steps: u32) -> Vec<Pose2D> {
        let mut states = Vec::with_capacity(steps as usize);
        let mut current = *start;
        for _ in 0..steps {
            current = self.propagate_step(&current, control);
            states.push(current);
        }
        states
    }

    /// Like [`propagate`](Self::propagate), but stops before the first invalid pose
    ///
    /// The number of returned poses is the number of valid steps taken.
    pub fn propagate_while_valid(
        &self,
        start: &Pose2D,
        control: &ControlInput,
        steps: u32,
    ) -> Vec<Pose2D> {
        let mut states = Vec::with_capacity(steps as usize);
        let mut current = *start;
        for _ in 0..steps {
            let next = self.propagate_step(&current, control);
            if !self.is_valid(&next) {
                break;
            }
            states.push(next);
            current = next;
        }
        states
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control_planning::state_space::RealVectorBounds;

    fn unit_si() -> SpaceInformation {
        SpaceInformation::new(
            SE2StateSpace::new(RealVectorBounds::uniform(-1.0, 1.0)),
            ControlSpace::new(RealVectorBounds::uniform(-0.3, 0.3)),
        )
    }

    #[test]
    fn test_default_setup_is_valid() {
        assert!(unit_si().setup().is_ok());
    }

    #[test]
    fn test_setup_rejects_bad_durations() {
        let mut si = unit_si();
        si.set_min_max_control_duration(5, 2);
        assert!(si.setup().is_err());
        si.set_min_max_control_duration(0, 2);
        assert!(si.setup().is_err());
    }

    #[test]
    fn test_setup_rejects_bad_step_size() {
        let mut si = unit_si();
        si.set_propagation_step_size(0.0);
        assert!(matches!(si.setup(), Err(PlanningError::InvalidParameter(_))));
    }

    #[test]
    fn test_propagate_steps() {
        let si = unit_si();
        let states = si.propagate(&Pose2D::origin(), &ControlInput::new(0.3, 0.0), 3);
        assert_eq!(states.len(), 3);
        assert!((states[2].x - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_propagate_while_valid_stops_at_boundary() {
        let si = unit_si();
        // 0.3, 0.6, 0.9 are inside, 1.2 is not
        let states = si.propagate_while_valid(&Pose2D::origin(), &ControlInput::new(0.3, 0.0), 10);
        assert_eq!(states.len(), 3);
        assert!(states.iter().all(|s| si.is_valid(s)));
    }

    #[test]
    fn test_custom_validity_checker() {
        let mut si = unit_si();
        si.set_state_validity_checker(|p: &Pose2D| p.x < 0.5);
        let states = si.propagate_while_valid(&Pose2D::origin(), &ControlInput::new(0.3, 0.0), 10);
        assert_eq!(states.len(), 1);
    }
}
