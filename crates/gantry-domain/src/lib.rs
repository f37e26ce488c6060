pub mod commands;
pub mod controller;
pub mod rig;

pub use commands::{Command, CommandContext};
pub use controller::Controller;
pub use rig::{Axis, Envelope, GripperState, Pose, Rig};
