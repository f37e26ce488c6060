use super::{Command, CommandContext};
use crate::rig::Rig;
use gantry_core::GantryResult;

/// Close the gripper on a part
pub struct Grip;

impl Command<Rig> for Grip {
    fn execute(&mut self, ctx: &mut CommandContext<'_, Rig>) -> GantryResult<()> {
        ctx.state.close_gripper()
    }

    fn undo(&mut self, state: &mut Rig) -> GantryResult<()> {
        state.open_gripper()
    }

    fn description(&self) -> String {
        "Close gripper".to_string()
    }
}

/// Open the gripper
pub struct Release;

impl Command<Rig> for Release {
    fn execute(&mut self, ctx: &mut CommandContext<'_, Rig>) -> GantryResult<()> {
        ctx.state.open_gripper()
    }

    fn undo(&mut self, state: &mut Rig) -> GantryResult<()> {
        state.close_gripper()
    }

    fn description(&self) -> String {
        "Open gripper".to_string()
    }
}
