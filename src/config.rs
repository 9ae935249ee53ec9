//! Problem configuration loading
//!
//! Every field has a default, so an empty file describes the reference
//! problem: a unicycle in the [-1, 1]^2 box driving from (-0.5, 0, 0) to
//! (0, 0.5, 0).

use std::path::Path;

use serde::Deserialize;

use crate::common::{PlanningResult, Pose2D};
use crate::control_planning::{
    ControlRRT, ControlRRTConfig, ControlSpace, RealVectorBounds, SE2StateSpace, SimpleSetup,
    SpaceInformation, UnicycleConfig, UnicyclePropagator,
};

/// Main configuration structure
#[derive(Clone, Debug, Deserialize)]
pub struct ProblemConfig {
    #[serde(default)]
    pub state_space: BoundsConfig,
    #[serde(default = "default_control_bounds")]
    pub control_space: BoundsConfig,
    #[serde(default)]
    pub propagation: PropagationConfig,
    #[serde(default)]
    pub problem: ProblemDefinition,
    #[serde(default)]
    pub planner: PlannerConfig,
}

/// Same interval on both axes; the state space default is [-1, 1]
#[derive(Clone, Debug, Deserialize)]
pub struct BoundsConfig {
    pub low: f64,
    pub high: f64,
}

impl Default for BoundsConfig {
    fn default() -> Self {
        Self { low: -1.0, high: 1.0 }
    }
}

impl BoundsConfig {
    fn to_bounds(&self) -> RealVectorBounds {
        RealVectorBounds::uniform(self.low, self.high)
    }
}

/// Propagation settings
#[derive(Clone, Debug, Deserialize)]
pub struct PropagationConfig {
    /// Length of one propagation step (default: 0.1)
    #[serde(default = "default_step_size")]
    pub step_size: f64,

    /// Fewest steps a control is held (default: 1)
    #[serde(default = "default_min_control_duration")]
    pub min_control_duration: u32,

    /// Most steps a control is held (default: 10)
    #[serde(default = "default_max_control_duration")]
    pub max_control_duration: u32,

    /// Scale the control by the step length (default: false)
    #[serde(default)]
    pub scale_by_duration: bool,
}

/// Start, goal and solve budget
#[derive(Clone, Debug, Deserialize)]
pub struct ProblemDefinition {
    /// Start pose as [x, y, yaw] (default: [-0.5, 0.0, 0.0])
    #[serde(default = "default_start")]
    pub start: [f64; 3],

    /// Goal pose as [x, y, yaw] (default: [0.0, 0.5, 0.0])
    #[serde(default = "default_goal")]
    pub goal: [f64; 3],

    /// Goal acceptance radius (default: 0.05)
    #[serde(default = "default_goal_threshold")]
    pub goal_threshold: f64,

    /// Solve time budget in seconds (default: 10.0)
    #[serde(default = "default_time_budget")]
    pub time_budget: f64,
}

/// Planner tuning
#[derive(Clone, Debug, Deserialize)]
pub struct PlannerConfig {
    /// Probability of sampling the goal (default: 0.05)
    #[serde(default = "default_goal_bias")]
    pub goal_bias: f64,

    /// Probability of sampling around the goal (default: 0.2)
    #[serde(default = "default_goal_region_bias")]
    pub goal_region_bias: f64,

    /// Spread of the samples around the goal (default: 0.1)
    #[serde(default = "default_goal_region_std_dev")]
    pub goal_region_std_dev: f64,

    /// Candidate controls per extension (default: 10)
    #[serde(default = "default_control_sampler_k")]
    pub control_sampler_k: usize,

    /// Keep every propagation step in the tree (default: false)
    #[serde(default)]
    pub intermediate_states: bool,

    /// Iteration cap on top of the time budget
    #[serde(default)]
    pub max_iterations: Option<usize>,

    /// RNG seed; entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

// Default value functions
fn default_control_bounds() -> BoundsConfig {
    BoundsConfig { low: -0.3, high: 0.3 }
}
fn default_step_size() -> f64 {
    0.1
}
fn default_min_control_duration() -> u32 {
    1
}
fn default_max_control_duration() -> u32 {
    10
}
fn default_start() -> [f64; 3] {
    [-0.5, 0.0, 0.0]
}
fn default_goal() -> [f64; 3] {
    [0.0, 0.5, 0.0]
}
fn default_goal_threshold() -> f64 {
    0.05
}
fn default_time_budget() -> f64 {
    10.0
}
fn default_goal_bias() -> f64 {
    0.05
}
fn default_goal_region_bias() -> f64 {
    0.2
}
fn default_goal_region_std_dev() -> f64 {
    0.1
}
fn default_control_sampler_k() -> usize {
    10
}

impl Default for ProblemConfig {
    fn default() -> Self {
        Self {
            state_space: BoundsConfig::default(),
            control_space: default_control_bounds(),
            propagation: PropagationConfig::default(),
            problem: ProblemDefinition::default(),
            planner: PlannerConfig::default(),
        }
    }
}

impl Default for PropagationConfig {
    fn default() -> Self {
        Self {
            step_size: default_step_size(),
            min_control_duration: default_min_control_duration(),
            max_control_duration: default_max_control_duration(),
            scale_by_duration: false,
        }
    }
}

impl Default for ProblemDefinition {
    fn default() -> Self {
        Self {
            start: default_start(),
            goal: default_goal(),
            goal_threshold: default_goal_threshold(),
            time_budget: default_time_budget(),
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            goal_bias: default_goal_bias(),
            goal_region_bias: default_goal_region_bias(),
            goal_region_std_dev: default_goal_region_std_dev(),
            control_sampler_k: default_control_sampler_k(),
            intermediate_states: false,
            max_iterations: None,
            seed: None,
        }
    }
}

impl ProblemConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> PlanningResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> PlanningResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Assemble a ready-to-solve problem from this configuration
    pub fn build_setup(&self) -> PlanningResult<SimpleSetup> {
        let space = SE2StateSpace::new(self.state_space.to_bounds());
        let cspace = ControlSpace::new(self.control_space.to_bounds());

        let mut si = SpaceInformation::new(space.clone(), cspace);
        si.set_propagation_step_size(self.propagation.step_size);
        si.set_min_max_control_duration(
            self.propagation.min_control_duration,
            self.propagation.max_control_duration,
        );

        let mut ss = SimpleSetup::new(si);
        ss.set_state_propagator(UnicyclePropagator::new(UnicycleConfig {
            scale_by_duration: self.propagation.scale_by_duration,
        }));
        ss.set_state_validity_checker(move |pose: &Pose2D| space.satisfies_bounds(pose));
        ss.set_planner(ControlRRT::new(ControlRRTConfig {
            goal_bias: self.planner.goal_bias,
            goal_region_bias: self.planner.goal_region_bias,
            goal_region_std_dev: self.planner.goal_region_std_dev,
            control_sampler_k: self.planner.control_sampler_k,
            intermediate_states: self.planner.intermediate_states,
            seed: self.planner.seed,
        }));
        ss.set_max_iterations(self.planner.max_iterations);
        ss.set_start_and_goal_states(
            Pose2D::from(self.problem.start),
            Pose2D::from(self.problem.goal),
            self.problem.goal_threshold,
        )?;
        ss.setup()?;
        Ok(ss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control_planning::SetupState;

    #[test]
    fn test_empty_file_is_reference_problem() {
        let config = ProblemConfig::from_toml_str("").unwrap();
        assert_eq!(config.state_space.low, -1.0);
        assert_eq!(config.state_space.high, 1.0);
        assert_eq!(config.control_space.low, -0.3);
        assert_eq!(config.control_space.high, 0.3);
        assert_eq!(config.problem.start, [-0.5, 0.0, 0.0]);
        assert_eq!(config.problem.goal, [0.0, 0.5, 0.0]);
        assert_eq!(config.problem.goal_threshold, 0.05);
        assert_eq!(config.problem.time_budget, 10.0);
        assert!(!config.propagation.scale_by_duration);
        assert_eq!(config.planner.seed, None);
    }

    #[test]
    fn test_default_matches_empty_file() {
        let config = ProblemConfig::default();
        assert_eq!(config.control_space.high, 0.3);
        assert_eq!(config.propagation.max_control_duration, 10);
    }

    #[test]
    fn test_partial_override() {
        let config = ProblemConfig::from_toml_str(
            r#"
            [problem]
            goal = [0.5, 0.5, 1.0]
            time_budget = 2.5

            [planner]
            seed = 9
            intermediate_states = true
            "#,
        )
        .unwrap();
        assert_eq!(config.problem.goal, [0.5, 0.5, 1.0]);
        assert_eq!(config.problem.start, [-0.5, 0.0, 0.0]);
        assert_eq!(config.problem.time_budget, 2.5);
        assert_eq!(config.planner.seed, Some(9));
        assert!(config.planner.intermediate_states);
        assert_eq!(config.planner.control_sampler_k, 10);
    }

    #[test]
    fn test_malformed_file() {
        assert!(ProblemConfig::from_toml_str("[problem]\nstart = \"north\"").is_err());
    }

    #[test]
    fn test_build_setup_configures_problem() {
        let ss = ProblemConfig::default().build_setup().unwrap();
        assert_eq!(ss.state(), SetupState::Configured);
        assert_eq!(ss.start(), Some(&Pose2D::new(-0.5, 0.0, 0.0)));
        assert_eq!(ss.goal().unwrap().threshold, 0.05);
    }

    #[test]
    fn test_build_setup_rejects_start_out_of_bounds() {
        let mut config = ProblemConfig::default();
        config.problem.start = [3.0, 0.0, 0.0];
        assert!(config.build_setup().is_err());
    }
}
