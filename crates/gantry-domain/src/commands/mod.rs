use gantry_core::GantryResult;

pub mod motion;
pub mod tool;

pub use motion::*;
pub use tool::*;

/// Trait for reversible units of work against a state of type `S`.
///
/// Commands are queued, executed, and undone by the
/// [`Controller`](crate::Controller); they carry everything needed to
/// apply their effect and to reverse it later. `execute` takes `&mut
/// self` so a command can stash whatever its `undo` will need (a prior
/// position, for example) at the moment it runs.
pub trait Command<S>: Send {
    /// Apply this command's effect to the state in the context.
    fn execute(&mut self, ctx: &mut CommandContext<'_, S>) -> GantryResult<()>;

    /// Reverse the effect of the most recent `execute`.
    fn undo(&mut self, state: &mut S) -> GantryResult<()>;

    /// Human-readable description of what this command does
    fn description(&self) -> String;
}

/// Context passed to commands during execution.
///
/// Besides the state, it collects follow-up commands the running command
/// wants executed later in the same drain pass. Follow-ups join the
/// pending queue behind everything already waiting, and only if the
/// submitting command itself succeeds.
pub struct CommandContext<'a, S> {
    pub state: &'a mut S,
    followups: Vec<Box<dyn Command<S>>>,
}

impl<'a, S> CommandContext<'a, S> {
    pub fn new(state: &'a mut S) -> Self {
        Self {
            state,
            followups: Vec::new(),
        }
    }

    /// Submit a command to run after the currently queued ones.
    pub fn enqueue(&mut self, command: Box<dyn Command<S>>) {
        self.followups.push(command);
    }

    pub(crate) fn into_followups(self) -> Vec<Box<dyn Command<S>>> {
        self.followups
    }
}
