use super::{Command, CommandContext};
use crate::rig::{Axis, Pose, Rig};
use gantry_core::{GantryError, GantryResult};

/// Relative move along a single axis
pub struct Jog {
    pub axis: Axis,
    pub delta: i64,
}

impl Command<Rig> for Jog {
    fn execute(&mut self, ctx: &mut CommandContext<'_, Rig>) -> GantryResult<()> {
        ctx.state.translate(self.axis, self.delta)
    }

    fn undo(&mut self, state: &mut Rig) -> GantryResult<()> {
        let inverse = self.delta.checked_neg().ok_or_else(|| {
            GantryError::Validation(format!("jog by {} cannot be undone", self.delta))
        })?;
        state.translate(self.axis, inverse)
    }

    fn description(&self) -> String {
        format!("Jog {} by {}", self.axis, self.delta)
    }
}

/// Return every axis to the envelope's minimum corner
pub struct Home {
    restore: Option<Pose>,
}

impl Home {
    pub fn new() -> Self {
        Self { restore: None }
    }
}

impl Default for Home {
    fn default() -> Self {
        Self::new()
    }
}

impl Command<Rig> for Home {
    fn execute(&mut self, ctx: &mut CommandContext<'_, Rig>) -> GantryResult<()> {
        self.restore = Some(ctx.state.pose);
        let home = ctx.state.envelope.min;
        ctx.state.move_to(home)
    }

    fn undo(&mut self, state: &mut Rig) -> GantryResult<()> {
        let previous = self.restore.take().ok_or_else(|| {
            GantryError::Internal("home undo without a prior execute".to_string())
        })?;
        state.move_to(previous)
    }

    fn description(&self) -> String {
        "Home all axes".to_string()
    }
}

/// Trace a square in the XY plane by enqueuing four jogs.
///
/// The jogs run later in the same drain pass and land on the history
/// individually, so undoing them reverses each leg; undoing the square
/// itself has nothing left to do.
pub struct Square {
    pub side: i64,
}

impl Command<Rig> for Square {
    fn execute(&mut self, ctx: &mut CommandContext<'_, Rig>) -> GantryResult<()> {
        if self.side <= 0 {
            return Err(GantryError::Validation(format!(
                "square side must be positive, got {}",
                self.side
            )));
        }
        ctx.enqueue(Box::new(Jog {
            axis: Axis::X,
            delta: self.side,
        }));
        ctx.enqueue(Box::new(Jog {
            axis: Axis::Y,
            delta: self.side,
        }));
        ctx.enqueue(Box::new(Jog {
            axis: Axis::X,
            delta: -self.side,
        }));
        ctx.enqueue(Box::new(Jog {
            axis: Axis::Y,
            delta: -self.side,
        }));
        Ok(())
    }

    fn undo(&mut self, _state: &mut Rig) -> GantryResult<()> {
        Ok(())
    }

    fn description(&self) -> String {
        format!("Trace square of side {}", self.side)
    }
}
