// flowline/src/error.rs
use thiserror::Error;

/// Errors raised by the pipeline machinery itself, as opposed to errors
/// returned from user hooks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
  #[error("Step not found: {step_name}")]
  StepNotFound { step_name: String },

  #[error("Step declared twice: {step_name}")]
  DuplicateStep { step_name: String },

  #[error("Handler missing for non-optional step: {step_name}")]
  HandlerMissing { step_name: String },

  #[error("No pipeline registered for context type {type_name}")]
  NotRegistered { type_name: String },

  #[error("Context type mismatch in registry dispatch (expected {expected_type})")]
  TypeMismatch { expected_type: String },
}

pub type FlowResult<T, E = FlowError> = std::result::Result<T, E>;
