//! One-stop assembly of a control planning problem
//!
//! `SimpleSetup` owns the spaces, the callbacks, the start and goal, and a
//! planner. A solve is a single blocking attempt under a time budget.

use std::fmt;
use std::time::Instant;

use tracing::info;

use crate::common::{
    ControlPlanner, PlanningError, PlanningResult, Pose2D, StatePropagator, StateValidityChecker,
};
use crate::control_planning::goal::GoalState;
use crate::control_planning::path::PathControl;
use crate::control_planning::planner::{PlannerSolution, PlannerStatus, TerminationCondition};
use crate::control_planning::rrt::ControlRRT;
use crate::control_planning::space_information::SpaceInformation;

/// Lifecycle of a planning problem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupState {
    Unconfigured,
    Configured,
    Solved,
    TimedOut,
}

impl fmt::Display for SetupState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupState::Unconfigured => write!(f, "unconfigured"),
            SetupState::Configured => write!(f, "configured"),
            SetupState::Solved => write!(f, "solved"),
            SetupState::TimedOut => write!(f, "timed out"),
        }
    }
}

pub struct SimpleSetup {
    si: SpaceInformation,
    planner: Box<dyn ControlPlanner>,
    start: Option<Pose2D>,
    goal: Option<GoalState>,
    max_iterations: Option<usize>,
    state: SetupState,
    last_solution: Option<PlannerSolution>,
}

impl SimpleSetup {
    /// Problem over `si`, solved with a default control RRT
    pub fn new(si: SpaceInformation) -> Self {
        Self {
            si,
            planner: Box::new(ControlRRT::with_defaults()),
            start: None,
            goal: None,
            max_iterations: None,
            state: SetupState::Unconfigured,
            last_solution: None,
        }
    }

    pub fn set_planner<P: ControlPlanner + 'static>(&mut self, planner: P) {
        self.planner = Box::new(planner);
        self.invalidate();
    }

    pub fn planner(&self) -> &dyn ControlPlanner {
        self.planner.as_ref()
    }

    pub fn space_information(&self) -> &SpaceInformation {
        &self.si
    }

    /// Mutable access; any change sends the problem back to `Unconfigured`
    pub fn space_information_mut(&mut self) -> &mut SpaceInformation {
        self.invalidate();
        &mut self.si
    }

    pub fn set_state_propagator<P: StatePropagator + 'static>(&mut self, propagator: P) {
        self.space_information_mut().set_state_propagator(propagator);
    }

    pub fn set_state_validity_checker<V: StateValidityChecker + 'static>(&mut self, checker: V) {
        self.space_information_mut().set_state_validity_checker(checker);
    }

    pub fn set_start_and_goal_states(
        &mut self,
        start: Pose2D,
        goal: Pose2D,
        threshold: f64,
    ) -> PlanningResult<()> {
        let goal = GoalState::new(goal, threshold)?;
        self.start = Some(start);
        self.goal = Some(goal);
        self.invalidate();
        Ok(())
    }

    /// Cap the number of planner iterations in addition to the time budget
    pub fn set_max_iterations(&mut self, max_iterations: Option<usize>) {
        self.max_iterations = max_iterations;
    }

    pub fn start(&self) -> Option<&Pose2D> {
        self.start.as_ref()
    }

    pub fn goal(&self) -> Option<&GoalState> {
        self.goal.as_ref()
    }

    pub fn state(&self) -> SetupState {
        self.state
    }

    /// Validate the problem and move to `Configured`
    pub fn setup(&mut self) -> PlanningResult<()> {
        if self.state != SetupState::Unconfigured {
            return Ok(());
        }
        self.si.setup()?;
        let start = self.start.ok_or_else(|| {
            PlanningError::SetupError("start state not set".to_string())
        })?;
        if self.goal.is_none() {
            return Err(PlanningError::SetupError("goal state not set".to_string()));
        }
        if !self.si.is_valid(&start) {
            return Err(PlanningError::InvalidStartState(format!(
                "({}, {}, {}) is not valid", start.x, start.y, start.yaw
            )));
        }
        self.state = SetupState::Configured;
        Ok(())
    }

    /// Run one planning attempt that blocks for at most `time_budget` seconds
    pub fn solve(&mut self, time_budget: f64) -> PlanningResult<PlannerStatus> {
        self.setup()?;
        let ptc = TerminationCondition::timeout(time_budget)?
            .with_max_iterations(self.max_iterations);

        let (start, goal) = match (self.start, self.goal) {
            (Some(start), Some(goal)) => (start, goal),
            _ => return Err(PlanningError::SetupError("start or goal missing".to_string())),
        };

        let started = Instant::now();
        let solution = self.planner.solve(&self.si, &start, &goal, &ptc)?;
        let elapsed = started.elapsed().as_secs_f64();
        let status = solution.status;

        if status.is_exact() {
            info!("Solution found in {:.6} seconds", elapsed);
            self.state = SetupState::Solved;
        } else {
            info!("No exact solution found after {:.6} seconds ({})", elapsed, status);
            self.state = SetupState::TimedOut;
        }
        self.last_solution = Some(solution);
        Ok(status)
    }

    pub fn last_status(&self) -> Option<PlannerStatus> {
        self.last_solution.as_ref().map(|s| s.status)
    }

    pub fn have_solution_path(&self) -> bool {
        self.solution_path().is_some()
    }

    pub fn have_exact_solution_path(&self) -> bool {
        self.state == SetupState::Solved
    }

    /// Path from the last solve, exact or approximate
    pub fn solution_path(&self) -> Option<&PathControl> {
        self.last_solution.as_ref().and_then(|s| s.path.as_ref())
    }

    /// Waypoint listing of an exact solution, `None` for anything less
    pub fn exact_solution_report(&self) -> Option<String> {
        if !self.have_exact_solution_path() {
            return None;
        }
        self.solution_path()
            .map(|path| format!("Found solution: {}", path.as_geometric()))
    }

    /// Drop planner data and previous solutions; the problem stays configured
    pub fn clear(&mut self) {
        self.planner.clear();
        self.last_solution = None;
        if self.state != SetupState::Unconfigured {
            self.state = SetupState::Configured;
        }
    }

    fn invalidate(&mut self) {
        self.planner.clear();
        self.last_solution = None;
        self.state = SetupState::Unconfigured;
    }
}
