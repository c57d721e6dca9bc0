// flowline/src/core/step.rs

//! Step definitions and the boxed hook type stored per step.

use super::{ContextData, PipelineControl};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Evaluated right before a step; `true` skips the step entirely.
pub type SkipCondition<T> = Arc<dyn Fn(ContextData<T>) -> bool + Send + Sync + 'static>;

/// A boxed asynchronous hook.
///
/// The hook receives its own clone of the context handle and must release any
/// lock guard before awaiting.
pub type Handler<T, E> =
  Box<dyn Fn(ContextData<T>) -> Pin<Box<dyn Future<Output = Result<PipelineControl, E>> + Send>> + Send + Sync>;

#[derive(Clone)]
pub struct StepDef<T: 'static + Send + Sync> {
  pub name: String,
  pub optional: bool,
  pub skip_if: Option<SkipCondition<T>>,
}

impl<T: 'static + Send + Sync> std::fmt::Debug for StepDef<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("StepDef")
      .field("name", &self.name)
      .field("optional", &self.optional)
      .field("skip_if_present", &self.skip_if.is_some())
      .finish()
  }
}
