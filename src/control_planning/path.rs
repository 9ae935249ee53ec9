//! Solution paths: control paths and their geometric waypoint view

use std::fmt;

use itertools::Itertools;

use crate::common::{ControlInput, Path2D, Pose2D};
use crate::control_planning::space_information::SpaceInformation;

/// Sequence of poses connected by controls held for a duration
///
/// `controls[i]` applied for `durations[i]` takes `states[i]` to `states[i + 1]`.
#[derive(Debug, Clone, Default)]
pub struct PathControl {
    states: Vec<Pose2D>,
    controls: Vec<ControlInput>,
    durations: Vec<f64>,
}

impl PathControl {
    pub fn new(start: Pose2D) -> Self {
        Self {
            states: vec![start],
            controls: Vec::new(),
            durations: Vec::new(),
        }
    }

    /// Append a segment ending at `state`
    pub fn append(&mut self, control: ControlInput, duration: f64, state: Pose2D) {
        self.controls.push(control);
        self.durations.push(duration);
        self.states.push(state);
    }

    pub fn states(&self) -> &[Pose2D] {
        &self.states
    }

    pub fn controls(&self) -> &[ControlInput] {
        &self.controls
    }

    pub fn durations(&self) -> &[f64] {
        &self.durations
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Total duration of the path
    pub fn length(&self) -> f64 {
        self.durations.iter().sum()
    }

    pub fn last_state(&self) -> Option<&Pose2D> {
        self.states.last()
    }

    /// Re-propagate every segment so that each segment covers one step
    pub fn interpolate(&mut self, si: &SpaceInformation) {
        let step = si.propagation_step_size();
        let mut states = Vec::with_capacity(self.states.len());
        let mut controls = Vec::new();
        let mut durations = Vec::new();

        if let Some(first) = self.states.first() {
            states.push(*first);
        }
        for (i, (control, duration)) in self.controls.iter().zip(&self.durations).enumerate() {
            let steps = (duration / step).round() as u32;
            if steps <= 1 {
                states.push(self.states[i + 1]);
                controls.push(*control);
                durations.push(*duration);
                continue;
            }
            let segment = si.propagate(&self.states[i], control, steps);
            for pose in segment {
                states.push(pose);
                controls.push(*control);
                durations.push(step);
            }
        }

        self.states = states;
        self.controls = controls;
        self.durations = durations;
    }

    pub fn as_geometric(&self) -> GeometricPath {
        GeometricPath::new(self.states.clone())
    }
}

impl fmt::Display for PathControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Control path with {} states", self.states.len())?;
        for (i, s) in self.states.iter().enumerate() {
            write!(f, "{} {} {}", s.x, s.y, s.yaw)?;
            if let (Some(c), Some(d)) = (self.controls.get(i), self.durations.get(i)) {
                write!(f, " {} {} {}", c.v, c.omega, d)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Ordered list of waypoints
#[derive(Debug, Clone, Default)]
pub struct GeometricPath {
    states: Vec<Pose2D>,
}

impl GeometricPath {
    pub fn new(states: Vec<Pose2D>) -> Self {
        Self { states }
    }

    pub fn states(&self) -> &[Pose2D] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Position-only view for plotting and length measurement
    pub fn to_path2d(&self) -> Path2D {
        Path2D::from_points(self.states.iter().map(|s| s.position()).collect())
    }
}

impl fmt::Display for GeometricPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Geometric path with {} states", self.states.len())?;
        let rows = self.states.iter()
            .map(|s| format!("{} {} {}", s.x, s.y, s.yaw))
            .join("\n");
        if !rows.is_empty() {
            writeln!(f, "{}", rows)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control_planning::control_space::ControlSpace;
    use crate::control_planning::state_space::{RealVectorBounds, SE2StateSpace};

    fn unit_si() -> SpaceInformation {
        SpaceInformation::new(
            SE2StateSpace::new(RealVectorBounds::uniform(-1.0, 1.0)),
            ControlSpace::new(RealVectorBounds::uniform(-0.3, 0.3)),
        )
    }

    fn straight_path(si: &SpaceInformation) -> PathControl {
        let start = Pose2D::new(-0.5, 0.0, 0.0);
        let control = ControlInput::new(0.2, 0.0);
        let end = *si.propagate(&start, &control, 3).last().unwrap();
        let mut path = PathControl::new(start);
        path.append(control, 3.0 * si.propagation_step_size(), end);
        path
    }

    #[test]
    fn test_append_and_length() {
        let si = unit_si();
        let path = straight_path(&si);
        assert_eq!(path.state_count(), 2);
        assert!((path.length() - 0.3).abs() < 1e-12);
        assert!((path.last_state().unwrap().x - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_interpolate_expands_segments() {
        let si = unit_si();
        let mut path = straight_path(&si);
        let end_before = *path.last_state().unwrap();
        path.interpolate(&si);

        assert_eq!(path.state_count(), 4);
        assert_eq!(path.controls().len(), 3);
        assert!((path.states()[1].x - (-0.3)).abs() < 1e-12);
        assert_eq!(*path.last_state().unwrap(), end_before);
        assert!((path.length() - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_geometric_display() {
        let path = GeometricPath::new(vec![Pose2D::new(0.0, 0.5, 0.0)]);
        assert_eq!(format!("{}", path), "Geometric path with 1 states\n0 0.5 0\n");
    }

    #[test]
    fn test_as_geometric_keeps_states() {
        let si = unit_si();
        let path = straight_path(&si);
        let geometric = path.as_geometric();
        assert_eq!(geometric.len(), 2);
        assert!((geometric.to_path2d().total_length() - 0.6).abs() < 1e-12);
    }
}
