//! Unicycle motion model and bounds-only validity checking
//!
//! The propagation rule treats the control as a per-step displacement:
//! the forward speed moves the body along its heading and the yaw rate
//! is added to the heading, one step at a time.

use crate::common::{ControlInput, Pose2D, StatePropagator, StateValidityChecker};
use crate::control_planning::state_space::RealVectorBounds;

/// Unicycle propagation configuration
#[derive(Debug, Clone, Default)]
pub struct UnicycleConfig {
    /// Multiply the control by the step duration before applying it
    ///
    /// Off by default: the step duration is accepted but does not enter
    /// the arithmetic.
    pub scale_by_duration: bool,
}

/// First-order unicycle kinematics
#[derive(Debug, Clone, Default)]
pub struct UnicyclePropagator {
    config: UnicycleConfig,
}

impl UnicyclePropagator {
    pub fn new(config: UnicycleConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(UnicycleConfig::default())
    }

    /// Update pose using the unicycle model
    ///
    /// # Arguments
    /// * `start` - Pose at the beginning of the step
    /// * `control` - Forward speed and yaw rate
    /// * `duration` - Step length, only used when `scale_by_duration` is set
    ///
    /// # Returns
    /// Pose at the end of the step; yaw is not wrapped
    pub fn update(&self, start: &Pose2D, control: &ControlInput, duration: f64) -> Pose2D {
        let (v, omega) = if self.config.scale_by_duration {
            (control.v * duration, control.omega * duration)
        } else {
            (control.v, control.omega)
        };

        Pose2D {
            x: start.x + v * start.yaw.cos(),
            y: start.y + v * start.yaw.sin(),
            yaw: start.yaw + omega,
        }
    }
}

impl StatePropagator for UnicyclePropagator {
    fn propagate(&self, start: &Pose2D, control: &ControlInput, duration: f64) -> Pose2D {
        self.update(start, control, duration)
    }
}

/// Accepts every pose whose position is inside the bounds
#[derive(Debug, Clone)]
pub struct BoundsValidityChecker {
    bounds: RealVectorBounds,
}

impl BoundsValidityChecker {
    pub fn new(bounds: RealVectorBounds) -> Self {
        Self { bounds }
    }
}

impl StateValidityChecker for BoundsValidityChecker {
    fn is_valid(&self, pose: &Pose2D) -> bool {
        self.bounds.contains(&pose.position().to_vector())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_straight_motion_ignores_duration() {
        let model = UnicyclePropagator::with_defaults();
        for &dt in &[0.01, 0.1, 1.0, 25.0] {
            let end = model.propagate(&Pose2D::origin(), &ControlInput::new(1.0, 0.0), dt);
            assert_eq!(end, Pose2D::new(1.0, 0.0, 0.0));
        }
    }

    #[test]
    fn test_pure_rotation() {
        let model = UnicyclePropagator::with_defaults();
        let end = model.propagate(&Pose2D::origin(), &ControlInput::new(0.0, FRAC_PI_2), 0.3);
        assert_eq!(end, Pose2D::new(0.0, 0.0, FRAC_PI_2));
    }

    #[test]
    fn test_moves_along_current_heading() {
        let model = UnicyclePropagator::with_defaults();
        let start = Pose2D::new(0.1, 0.2, FRAC_PI_2);
        let end = model.propagate(&start, &ControlInput::new(0.3, 0.1), 1.0);
        assert!((end.x - 0.1).abs() < 1e-12);
        assert!((end.y - 0.5).abs() < 1e-12);
        assert!((end.yaw - (FRAC_PI_2 + 0.1)).abs() < 1e-12);
    }

    #[test]
    fn test_propagation_is_deterministic() {
        let model = UnicyclePropagator::with_defaults();
        let start = Pose2D::new(-0.37, 0.81, 2.9);
        let control = ControlInput::new(-0.21, 0.17);
        let a = model.propagate(&start, &control, 0.1);
        let b = model.propagate(&start, &control, 0.1);
        assert_eq!(a.x.to_bits(), b.x.to_bits());
        assert_eq!(a.y.to_bits(), b.y.to_bits());
        assert_eq!(a.yaw.to_bits(), b.yaw.to_bits());
    }

    #[test]
    fn test_yaw_is_not_wrapped() {
        let model = UnicyclePropagator::with_defaults();
        let mut pose = Pose2D::origin();
        for _ in 0..40 {
            pose = model.propagate(&pose, &ControlInput::new(0.0, 0.3), 0.1);
        }
        assert!((pose.yaw - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_scale_by_duration() {
        let model = UnicyclePropagator::new(UnicycleConfig { scale_by_duration: true });
        let end = model.propagate(&Pose2D::origin(), &ControlInput::new(1.0, 0.5), 0.1);
        assert!((end.x - 0.1).abs() < 1e-12);
        assert!((end.yaw - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_bounds_validity() {
        let checker = BoundsValidityChecker::new(RealVectorBounds::uniform(-1.0, 1.0));
        assert!(checker.is_valid(&Pose2D::new(1.0, 1.0, 0.0)));
        assert!(checker.is_valid(&Pose2D::new(1.0, 1.0, -100.0)));
        assert!(checker.is_valid(&Pose2D::new(-1.0, 0.5, 7.0)));
        assert!(!checker.is_valid(&Pose2D::new(1.0001, 0.0, 0.0)));
        assert!(!checker.is_valid(&Pose2D::new(0.0, -1.5, 0.0)));
    }
}
