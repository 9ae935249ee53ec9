// Control-space planning for a planar rigid body

pub mod state_space;
pub mod control_space;
pub mod kinematics;
pub mod space_information;
pub mod goal;
pub mod path;
pub mod planner;
pub mod rrt;
pub mod simple_setup;

pub use state_space::*;
pub use control_space::*;
pub use kinematics::*;
pub use space_information::*;
pub use goal::*;
pub use path::*;
pub use planner::*;
pub use rrt::*;
pub use simple_setup::*;
