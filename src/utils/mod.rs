//! Utility modules for rigid_body_controls

pub mod visualization;

pub use visualization::{Visualizer, PathStyle, PointStyle, colors};
