//! rigid_body_controls - kinodynamic planning for a planar rigid body
//!
//! This crate sets up and solves control-space planning problems in SE(2):
//! a bounded state space, a bounded control space, a unicycle propagation
//! rule, a validity predicate, and a sampling-based planner that searches
//! for a sequence of controls taking the start pose into the goal region.

// Core modules
pub mod common;
pub mod config;
pub mod utils;

// Planning
pub mod control_planning;

// Re-export common types for convenience
pub use common::{Point2D, Pose2D, Path2D, ControlInput};
pub use common::{ControlPlanner, StatePropagator, StateValidityChecker};
pub use common::{PlanningError, PlanningResult};
pub use config::ProblemConfig;
pub use control_planning::{PlannerStatus, SimpleSetup};
