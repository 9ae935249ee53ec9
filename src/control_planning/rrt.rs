//! Kinodynamic RRT
//!
//! Sampling-based planner that grows a tree of motions in the control
//! space. Each iteration samples a target pose, picks the closest tree
//! node, and extends it with the best of several random controls held
//! for a random number of propagation steps.
//!
//! Targets are drawn from three sources: the goal pose itself, a normal
//! distribution centred on the goal, and the whole state space. The
//! goal neighbourhood samples densify the tree where the acceptance
//! region is small compared to the space.

use ordered_float::OrderedFloat;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::common::{ControlInput, ControlPlanner, PlanningError, PlanningResult, Pose2D};
use crate::control_planning::goal::GoalState;
use crate::control_planning::path::PathControl;
use crate::control_planning::planner::{PlannerSolution, PlannerStatus, TerminationCondition};
use crate::control_planning::space_information::SpaceInformation;

/// Configuration for the control RRT
#[derive(Debug, Clone)]
pub struct ControlRRTConfig {
    /// Probability of using the goal pose as the sampling target
    pub goal_bias: f64,
    /// Probability of sampling the target around the goal
    pub goal_region_bias: f64,
    /// Position standard deviation of goal neighbourhood samples
    pub goal_region_std_dev: f64,
    /// Random controls tried per extension; the one ending closest to the target wins
    pub control_sampler_k: usize,
    /// Add every propagation step to the tree instead of only the final pose
    pub intermediate_states: bool,
    /// Seed for reproducible runs
    pub seed: Option<u64>,
}

impl Default for ControlRRTConfig {
    fn default() -> Self {
        Self {
            goal_bias: 0.05,
            goal_region_bias: 0.2,
            goal_region_std_dev: 0.1,
            control_sampler_k: 10,
            intermediate_states: false,
            seed: None,
        }
    }
}

/// Tree node: the pose reached by applying `control` for `steps` from the parent
#[derive(Debug, Clone)]
pub struct Motion {
    pub state: Pose2D,
    pub control: ControlInput,
    pub steps: u32,
    pub parent: Option<usize>,
}

impl Motion {
    fn root(state: Pose2D) -> Self {
        Self {
            state,
            control: ControlInput::zero(),
            steps: 0,
            parent: None,
        }
    }
}

/// Control-space RRT planner
pub struct ControlRRT {
    config: ControlRRTConfig,
    motions: Vec<Motion>,
    rng: StdRng,
}

impl ControlRRT {
    pub fn new(config: ControlRRTConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            motions: Vec::new(),
            rng,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(ControlRRTConfig::default())
    }

    pub fn config(&self) -> &ControlRRTConfig {
        &self.config
    }

    /// Motions currently in the tree; index 0 is the start
    pub fn motions(&self) -> &[Motion] {
        &self.motions
    }

    fn check_config(&self) -> PlanningResult<()> {
        let c = &self.config;
        let in_unit = |p: f64| (0.0..=1.0).contains(&p);
        if !in_unit(c.goal_bias) || !in_unit(c.goal_region_bias) || !in_unit(c.goal_bias + c.goal_region_bias) {
            return Err(PlanningError::InvalidParameter(format!(
                "goal biases must be probabilities summing to at most 1, got {} and {}",
                c.goal_bias, c.goal_region_bias
            )));
        }
        if !(c.goal_region_std_dev.is_finite() && c.goal_region_std_dev > 0.0) {
            return Err(PlanningError::InvalidParameter(format!(
                "goal region standard deviation must be positive, got {}", c.goal_region_std_dev
            )));
        }
        if self.config.control_sampler_k == 0 {
            return Err(PlanningError::InvalidParameter(
                "control sampler needs at least one candidate".to_string(),
            ));
        }
        Ok(())
    }

    fn sample_target(&mut self, si: &SpaceInformation, goal: &GoalState) -> Pose2D {
        let r = self.rng.gen::<f64>();
        if r < self.config.goal_bias {
            goal.state
        } else if r < self.config.goal_bias + self.config.goal_region_bias {
            si.state_space().sample_gaussian(&mut self.rng, &goal.state, self.config.goal_region_std_dev)
        } else {
            si.state_space().sample_uniform(&mut self.rng)
        }
    }

    fn nearest(&self, si: &SpaceInformation, target: &Pose2D) -> usize {
        self.motions
            .iter()
            .enumerate()
            .min_by_key(|(_, m)| OrderedFloat(si.distance(&m.state, target)))
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    /// Best of `control_sampler_k` random controls for driving `from` towards `target`
    ///
    /// Returns the chosen control and the valid poses it produced, one per step.
    fn sample_to(
        &mut self,
        si: &SpaceInformation,
        from: &Pose2D,
        target: &Pose2D,
    ) -> Option<(ControlInput, Vec<Pose2D>)> {
        let mut best: Option<(f64, ControlInput, Vec<Pose2D>)> = None;

        for _ in 0..self.config.control_sampler_k {
            let control = si.control_space().sample_uniform(&mut self.rng);
            let steps = self.rng.gen_range(si.min_control_duration()..=si.max_control_duration());
            let states = si.propagate_while_valid(from, &control, steps);

            let d = match states.last() {
                Some(end) => si.distance(end, target),
                None => continue,
            };
            if best.as_ref().map_or(true, |(best_d, _, _)| d < *best_d) {
                best = Some((d, control, states));
            }
        }

        best.map(|(_, control, states)| (control, states))
    }

    /// Insert the extension into the tree, returning the indices of the added motions
    fn add_motions(&mut self, parent: usize, control: ControlInput, states: Vec<Pose2D>) -> Vec<usize> {
        let mut added = Vec::new();
        if self.config.intermediate_states {
            let mut parent = parent;
            for state in states {
                self.motions.push(Motion { state, control, steps: 1, parent: Some(parent) });
                parent = self.motions.len() - 1;
                added.push(parent);
            }
        } else if let Some(state) = states.last().copied() {
            let steps = states.len() as u32;
            self.motions.push(Motion { state, control, steps, parent: Some(parent) });
            added.push(self.motions.len() - 1);
        }
        added
    }

    fn extract_path(&self, si: &SpaceInformation, index: usize) -> PathControl {
        let mut chain = Vec::new();
        let mut node = Some(index);
        while let Some(i) = node {
            chain.push(&self.motions[i]);
            node = self.motions[i].parent;
        }
        chain.reverse();

        let step_size = si.propagation_step_size();
        let mut path = PathControl::new(chain[0].state);
        for motion in &chain[1..] {
            path.append(motion.control, motion.steps as f64 * step_size, motion.state);
        }
        path
    }
}

impl ControlPlanner for ControlRRT {
    fn name(&self) -> &str {
        "RRT"
    }

    fn solve(
        &mut self,
        si: &SpaceInformation,
        start: &Pose2D,
        goal: &GoalState,
        ptc: &TerminationCondition,
    ) -> PlanningResult<PlannerSolution> {
        self.check_config()?;
        if !si.is_valid(start) {
            return Err(PlanningError::InvalidStartState(format!(
                "({}, {}, {}) is not valid", start.x, start.y, start.yaw
            )));
        }
        // A tree grown from another start cannot be reused
        if self.motions.first().map(|m| m.state) != Some(*start) {
            self.motions.clear();
            self.motions.push(Motion::root(*start));
        }

        info!("{}: Starting planning with {} states already in datastructure",
            self.name(), self.motions.len());

        let space = si.state_space();
        let mut approx_index = 0;
        let mut approx_dist = f64::INFINITY;
        let mut solution = None;

        for (i, m) in self.motions.iter().enumerate() {
            let (satisfied, d) = goal.is_satisfied(space, &m.state);
            if d < approx_dist {
                approx_dist = d;
                approx_index = i;
            }
            if satisfied {
                solution = Some(i);
                break;
            }
        }

        let mut iterations = 0;
        while solution.is_none() && !ptc.should_terminate(iterations) {
            iterations += 1;

            let target = self.sample_target(si, goal);
            let nearest = self.nearest(si, &target);
            let from = self.motions[nearest].state;

            let (control, states) = match self.sample_to(si, &from, &target) {
                Some(extension) => extension,
                None => continue,
            };
            if (states.len() as u32) < si.min_control_duration() {
                continue;
            }

            for index in self.add_motions(nearest, control, states) {
                let (satisfied, d) = goal.is_satisfied(space, &self.motions[index].state);
                if d < approx_dist {
                    approx_dist = d;
                    approx_index = index;
                }
                if satisfied {
                    solution = Some(index);
                    break;
                }
            }
        }

        info!("{}: Created {} states in {} iterations", self.name(), self.motions.len(), iterations);

        let result = match solution {
            Some(index) => PlannerSolution {
                status: PlannerStatus::ExactSolution,
                path: Some(self.extract_path(si, index)),
                distance_to_goal: goal.distance_goal(space, &self.motions[index].state),
                iterations,
            },
            None if approx_index > 0 => {
                warn!("{}: Found approximate solution, distance to goal {:.4}", self.name(), approx_dist);
                PlannerSolution {
                    status: PlannerStatus::ApproximateSolution,
                    path: Some(self.extract_path(si, approx_index)),
                    distance_to_goal: approx_dist,
                    iterations,
                }
            }
            None => PlannerSolution::timeout(iterations),
        };
        debug!("{}: {}", self.name(), result.status);
        Ok(result)
    }

    fn clear(&mut self) {
        self.motions.clear();
    }

    fn tree(&self) -> Vec<(Pose2D, Option<usize>)> {
        self.motions.iter().map(|m| (m.state, m.parent)).collect()
    }
}
