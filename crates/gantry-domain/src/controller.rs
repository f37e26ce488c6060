//! Command sequencing and bounded undo.
//!
//! The controller owns the two command containers: a FIFO queue of work
//! not yet executed and a LIFO history of work already done. Commands
//! move from one to the other exactly once; a command is never in both.
//! This is pure sequencing with no knowledge of what any command does.

use crate::commands::{Command, CommandContext};
use gantry_core::GantryResult;
use std::collections::VecDeque;

/// Sequences command execution and bounded-depth reversal.
///
/// Commands enter through [`enqueue`](Controller::enqueue), run in
/// submission order via [`execute_all`](Controller::execute_all), and
/// can be reversed most-recent-first with
/// [`undo_last`](Controller::undo_last). The controller is generic over
/// the state the commands act on; it never inspects a command beyond
/// the [`Command`] trait.
pub struct Controller<S> {
    /// Commands waiting to run, in submission order (front = next).
    pending: VecDeque<Box<dyn Command<S>>>,

    /// Executed commands available to undo (most recent = last).
    history: Vec<Box<dyn Command<S>>>,
}

impl<S> Controller<S> {
    /// Create a controller with no pending work and no history.
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
            history: Vec::new(),
        }
    }

    /// Append a command to the tail of the pending queue.
    pub fn enqueue(&mut self, command: Box<dyn Command<S>>) {
        tracing::debug!("Enqueued: {}", command.description());
        self.pending.push_back(command);
    }

    /// Drain the pending queue front to back, executing each command.
    ///
    /// The queue is re-checked every iteration, so follow-ups a command
    /// submits through its [`CommandContext`] run in the same pass,
    /// behind everything already waiting.
    ///
    /// Each command that succeeds moves onto the history. The first
    /// failure stops the drain: the error propagates, the failed
    /// command is dropped along with any follow-ups it submitted, and
    /// the rest of the queue stays pending. Calling `execute_all` again
    /// resumes from the next command.
    pub fn execute_all(&mut self, state: &mut S) -> GantryResult<()> {
        while let Some(mut command) = self.pending.pop_front() {
            tracing::debug!("Executing: {}", command.description());
            let mut ctx = CommandContext::new(state);
            match command.execute(&mut ctx) {
                Ok(()) => {
                    self.pending.extend(ctx.into_followups());
                    self.history.push(command);
                }
                Err(e) => {
                    tracing::warn!("Command failed: {}: {}", command.description(), e);
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    /// Undo up to `count` of the most recently executed commands,
    /// most recent first.
    ///
    /// Asking for more than the history holds undoes everything
    /// available; that is not an error. Undone commands are released,
    /// there is no redo. If an undo fails, the error propagates and the
    /// offending command is dropped; commands undone before the failure
    /// stay undone.
    pub fn undo_last(&mut self, state: &mut S, count: usize) -> GantryResult<()> {
        let effective = count.min(self.history.len());
        for _ in 0..effective {
            if let Some(mut command) = self.history.pop() {
                tracing::debug!("Undoing: {}", command.description());
                if let Err(e) = command.undo(state) {
                    tracing::warn!("Undo failed: {}: {}", command.description(), e);
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    /// Number of commands waiting to execute.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Number of executed commands available to undo.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// True when nothing is queued and nothing is undoable.
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty() && self.history.is_empty()
    }

    /// Descriptions of executed commands in execution order
    /// (for status display).
    pub fn history_descriptions(&self) -> Vec<String> {
        self.history.iter().map(|c| c.description()).collect()
    }
}

impl<S> Default for Controller<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{Jog, Square};
    use crate::rig::{Axis, Envelope, Pose, Rig};
    use gantry_core::GantryError;
    use std::sync::{Arc, Mutex};

    type Trace = Arc<Mutex<Vec<String>>>;

    /// Records its execute/undo calls into a shared trace.
    struct Probe {
        name: &'static str,
        trace: Trace,
    }

    impl Probe {
        fn boxed(name: &'static str, trace: &Trace) -> Box<dyn Command<Rig>> {
            Box::new(Probe {
                name,
                trace: Arc::clone(trace),
            })
        }
    }

    impl Command<Rig> for Probe {
        fn execute(&mut self, _ctx: &mut CommandContext<'_, Rig>) -> GantryResult<()> {
            self.trace.lock().unwrap().push(format!("run {}", self.name));
            Ok(())
        }

        fn undo(&mut self, _state: &mut Rig) -> GantryResult<()> {
            self.trace
                .lock()
                .unwrap()
                .push(format!("undo {}", self.name));
            Ok(())
        }

        fn description(&self) -> String {
            self.name.to_string()
        }
    }

    /// Fails on execute without touching the state.
    struct FailingProbe {
        name: &'static str,
        trace: Trace,
    }

    impl Command<Rig> for FailingProbe {
        fn execute(&mut self, _ctx: &mut CommandContext<'_, Rig>) -> GantryResult<()> {
            self.trace
                .lock()
                .unwrap()
                .push(format!("fail {}", self.name));
            Err(GantryError::Internal(format!("{} exploded", self.name)))
        }

        fn undo(&mut self, _state: &mut Rig) -> GantryResult<()> {
            Ok(())
        }

        fn description(&self) -> String {
            self.name.to_string()
        }
    }

    /// Executes fine but refuses to undo.
    struct StuckProbe {
        name: &'static str,
    }

    impl Command<Rig> for StuckProbe {
        fn execute(&mut self, _ctx: &mut CommandContext<'_, Rig>) -> GantryResult<()> {
            Ok(())
        }

        fn undo(&mut self, _state: &mut Rig) -> GantryResult<()> {
            Err(GantryError::Internal(format!("{} cannot undo", self.name)))
        }

        fn description(&self) -> String {
            self.name.to_string()
        }
    }

    /// Enqueues two probes as follow-ups, then optionally fails.
    struct Spawner {
        trace: Trace,
        fail_after_spawn: bool,
    }

    impl Command<Rig> for Spawner {
        fn execute(&mut self, ctx: &mut CommandContext<'_, Rig>) -> GantryResult<()> {
            self.trace.lock().unwrap().push("run spawner".to_string());
            ctx.enqueue(Probe::boxed("child-1", &self.trace));
            ctx.enqueue(Probe::boxed("child-2", &self.trace));
            if self.fail_after_spawn {
                return Err(GantryError::Internal("spawner exploded".to_string()));
            }
            Ok(())
        }

        fn undo(&mut self, _state: &mut Rig) -> GantryResult<()> {
            Ok(())
        }

        fn description(&self) -> String {
            "spawner".to_string()
        }
    }

    fn new_trace() -> Trace {
        Arc::new(Mutex::new(Vec::new()))
    }

    fn trace_entries(trace: &Trace) -> Vec<String> {
        trace.lock().unwrap().clone()
    }

    #[test]
    fn test_execute_all_runs_in_submission_order() {
        let trace = new_trace();
        let mut rig = Rig::new();
        let mut controller = Controller::new();

        controller.enqueue(Probe::boxed("a", &trace));
        controller.enqueue(Probe::boxed("b", &trace));
        controller.enqueue(Probe::boxed("c", &trace));

        controller.execute_all(&mut rig).unwrap();

        assert_eq!(trace_entries(&trace), vec!["run a", "run b", "run c"]);
        assert_eq!(controller.pending_len(), 0);
        assert_eq!(controller.history_len(), 3);
    }

    #[test]
    fn test_undo_last_reverses_most_recent_first() {
        let trace = new_trace();
        let mut rig = Rig::new();
        let mut controller = Controller::new();

        controller.enqueue(Probe::boxed("a", &trace));
        controller.enqueue(Probe::boxed("b", &trace));
        controller.enqueue(Probe::boxed("c", &trace));
        controller.execute_all(&mut rig).unwrap();

        controller.undo_last(&mut rig, 3).unwrap();

        assert_eq!(
            trace_entries(&trace),
            vec!["run a", "run b", "run c", "undo c", "undo b", "undo a"]
        );
        assert!(controller.is_idle());
    }

    #[test]
    fn test_undo_last_clamps_to_available_history() {
        let trace = new_trace();
        let mut rig = Rig::new();
        let mut controller = Controller::new();

        controller.enqueue(Probe::boxed("a", &trace));
        controller.enqueue(Probe::boxed("b", &trace));
        controller.execute_all(&mut rig).unwrap();

        controller.undo_last(&mut rig, 5).unwrap();

        assert_eq!(
            trace_entries(&trace),
            vec!["run a", "run b", "undo b", "undo a"]
        );
        assert_eq!(controller.history_len(), 0);
    }

    #[test]
    fn test_undo_last_on_empty_history_is_noop() {
        let mut rig = Rig::new();
        let mut controller: Controller<Rig> = Controller::new();

        controller.undo_last(&mut rig, 5).unwrap();
        assert!(controller.is_idle());
    }

    #[test]
    fn test_undo_last_zero_is_noop() {
        let trace = new_trace();
        let mut rig = Rig::new();
        let mut controller = Controller::new();

        controller.enqueue(Probe::boxed("a", &trace));
        controller.execute_all(&mut rig).unwrap();

        controller.undo_last(&mut rig, 0).unwrap();
        assert_eq!(controller.history_len(), 1);
        assert_eq!(trace_entries(&trace), vec!["run a"]);
    }

    #[test]
    fn test_execute_all_on_empty_queue_is_noop() {
        let trace = new_trace();
        let mut rig = Rig::new();
        let mut controller = Controller::new();

        controller.enqueue(Probe::boxed("a", &trace));
        controller.execute_all(&mut rig).unwrap();

        // draining again with nothing queued changes nothing
        controller.execute_all(&mut rig).unwrap();
        assert_eq!(controller.history_len(), 1);
        assert_eq!(trace_entries(&trace), vec!["run a"]);
    }

    #[test]
    fn test_command_counts_track_ownership() {
        let trace = new_trace();
        let mut rig = Rig::new();
        let mut controller = Controller::new();

        controller.enqueue(Probe::boxed("a", &trace));
        assert_eq!(controller.pending_len(), 1);
        assert_eq!(controller.history_len(), 0);

        controller.execute_all(&mut rig).unwrap();
        assert_eq!(controller.pending_len(), 0);
        assert_eq!(controller.history_len(), 1);

        controller.undo_last(&mut rig, 1).unwrap();
        assert_eq!(controller.pending_len(), 0);
        assert_eq!(controller.history_len(), 0);
        assert!(controller.is_idle());
    }

    #[test]
    fn test_single_failing_command_leaves_history_empty() {
        let trace = new_trace();
        let mut rig = Rig::new();
        let mut controller = Controller::new();

        controller.enqueue(Box::new(FailingProbe {
            name: "boom",
            trace: Arc::clone(&trace),
        }));

        let err = controller.execute_all(&mut rig).unwrap_err();
        assert!(matches!(err, GantryError::Internal(_)));
        assert_eq!(controller.pending_len(), 0);
        assert_eq!(controller.history_len(), 0);

        // exactly one attempt, no retry
        assert_eq!(trace_entries(&trace), vec!["fail boom"]);
    }

    #[test]
    fn test_failed_execute_stops_drain_and_keeps_remainder_pending() {
        let trace = new_trace();
        let mut rig = Rig::new();
        let mut controller = Controller::new();

        controller.enqueue(Probe::boxed("a", &trace));
        controller.enqueue(Box::new(FailingProbe {
            name: "boom",
            trace: Arc::clone(&trace),
        }));
        controller.enqueue(Probe::boxed("c", &trace));

        assert!(controller.execute_all(&mut rig).is_err());

        // a executed, boom was dropped, c never ran
        assert_eq!(trace_entries(&trace), vec!["run a", "fail boom"]);
        assert_eq!(controller.history_len(), 1);
        assert_eq!(controller.pending_len(), 1);

        // a second drain resumes from c
        controller.execute_all(&mut rig).unwrap();
        assert_eq!(
            trace_entries(&trace),
            vec!["run a", "fail boom", "run c"]
        );
        assert_eq!(controller.history_len(), 2);
        assert_eq!(controller.pending_len(), 0);
    }

    #[test]
    fn test_failed_undo_drops_the_command() {
        let trace = new_trace();
        let mut rig = Rig::new();
        let mut controller = Controller::new();

        controller.enqueue(Probe::boxed("a", &trace));
        controller.enqueue(Box::new(StuckProbe { name: "stuck" }));
        controller.execute_all(&mut rig).unwrap();

        let err = controller.undo_last(&mut rig, 2).unwrap_err();
        assert!(matches!(err, GantryError::Internal(_)));

        // the stuck command is gone; a is still undoable
        assert_eq!(controller.history_len(), 1);
        controller.undo_last(&mut rig, 1).unwrap();
        assert_eq!(trace_entries(&trace), vec!["run a", "undo a"]);
        assert!(controller.is_idle());
    }

    #[test]
    fn test_jog_with_unrepresentable_inverse_fails_undo() {
        let envelope = Envelope {
            min: Pose {
                x: i64::MIN,
                y: 0,
                z: 0,
            },
            max: Pose::ORIGIN,
        };
        let mut rig = Rig::with_envelope(envelope);
        let mut controller = Controller::new();

        // executes fine at the envelope floor, but -i64::MIN does not exist
        controller.enqueue(Box::new(Jog {
            axis: Axis::X,
            delta: i64::MIN,
        }));
        controller.execute_all(&mut rig).unwrap();
        assert_eq!(controller.history_len(), 1);

        let err = controller.undo_last(&mut rig, 1).unwrap_err();
        assert!(matches!(err, GantryError::Validation(_)));
        assert_eq!(controller.history_len(), 0);
        assert_eq!(rig.pose.x, i64::MIN);
    }

    #[test]
    fn test_followups_run_in_the_same_pass_behind_queued_work() {
        let trace = new_trace();
        let mut rig = Rig::new();
        let mut controller = Controller::new();

        controller.enqueue(Box::new(Spawner {
            trace: Arc::clone(&trace),
            fail_after_spawn: false,
        }));
        controller.enqueue(Probe::boxed("d", &trace));

        controller.execute_all(&mut rig).unwrap();

        // children join behind d, not immediately after the spawner
        assert_eq!(
            trace_entries(&trace),
            vec!["run spawner", "run d", "run child-1", "run child-2"]
        );
        assert_eq!(controller.history_len(), 4);
    }

    #[test]
    fn test_followups_of_failed_command_are_discarded() {
        let trace = new_trace();
        let mut rig = Rig::new();
        let mut controller = Controller::new();

        controller.enqueue(Box::new(Spawner {
            trace: Arc::clone(&trace),
            fail_after_spawn: true,
        }));
        controller.enqueue(Probe::boxed("t", &trace));

        assert!(controller.execute_all(&mut rig).is_err());
        assert_eq!(controller.pending_len(), 1);
        assert_eq!(controller.history_len(), 0);

        controller.execute_all(&mut rig).unwrap();

        // the spawner's children never appear
        assert_eq!(trace_entries(&trace), vec!["run spawner", "run t"]);
    }

    #[test]
    fn test_fifo_order_holds_across_passes() {
        let trace = new_trace();
        let mut rig = Rig::new();
        let mut controller = Controller::new();

        controller.enqueue(Probe::boxed("a", &trace));
        controller.enqueue(Probe::boxed("b", &trace));
        controller.execute_all(&mut rig).unwrap();

        controller.enqueue(Probe::boxed("c", &trace));
        controller.enqueue(Probe::boxed("d", &trace));
        controller.execute_all(&mut rig).unwrap();

        controller.undo_last(&mut rig, 4).unwrap();

        assert_eq!(
            trace_entries(&trace),
            vec![
                "run a", "run b", "run c", "run d", "undo d", "undo c", "undo b", "undo a"
            ]
        );
    }

    #[test]
    fn test_history_descriptions_in_execution_order() {
        let trace = new_trace();
        let mut rig = Rig::new();
        let mut controller = Controller::new();

        controller.enqueue(Probe::boxed("first", &trace));
        controller.enqueue(Probe::boxed("second", &trace));
        controller.execute_all(&mut rig).unwrap();

        assert_eq!(controller.history_descriptions(), vec!["first", "second"]);
    }

    #[test]
    fn test_jog_sequence_with_partial_undo() {
        let mut rig = Rig::new();
        let mut controller = Controller::new();
        // north, east, south
        controller.enqueue(Box::new(Jog {
            axis: Axis::Y,
            delta: 1,
        }));
        controller.enqueue(Box::new(Jog {
            axis: Axis::X,
            delta: 1,
        }));
        controller.enqueue(Box::new(Jog {
            axis: Axis::Y,
            delta: -1,
        }));

        controller.execute_all(&mut rig).unwrap();
        assert_eq!(rig.pose, Pose { x: 1, y: 0, z: 0 });
        assert_eq!(controller.history_len(), 3);

        // undo south, then east; only north remains applied
        controller.undo_last(&mut rig, 2).unwrap();
        assert_eq!(rig.pose, Pose { x: 0, y: 1, z: 0 });
        assert_eq!(controller.history_len(), 1);
        assert_eq!(controller.history_descriptions(), vec!["Jog y by 1"]);
    }

    #[test]
    fn test_square_expands_and_lands_back_home() {
        let mut rig = Rig::new();
        let mut controller = Controller::new();

        controller.enqueue(Box::new(Square { side: 3 }));
        controller.execute_all(&mut rig).unwrap();

        // the square plus its four jogs
        assert_eq!(controller.history_len(), 5);
        assert_eq!(rig.pose, Pose::ORIGIN);
        assert_eq!(
            controller.history_descriptions()[0],
            "Trace square of side 3"
        );
    }
}
