// flowline/src/core/control.rs

//! Signals for controlling pipeline flow and the outcome of a run.

/// Returned by every hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineControl {
  /// Run the next hook or step.
  Continue,
  /// Halt the run. No further hooks of this or later steps execute.
  Stop,
}

/// Outcome of a run that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineResult {
  /// Every step ran (or was skipped) without a hook asking to stop.
  Completed,
  /// A hook returned [`PipelineControl::Stop`].
  Stopped,
}
