// flowline/src/pipeline/hooks.rs

//! Registration of `before`, `on` and `after` hooks.

use crate::core::context_data::ContextData;
use crate::core::control::PipelineControl;
use crate::core::step::Handler;
use crate::error::FlowError;
use crate::pipeline::definition::Pipeline;
use std::collections::HashMap;
use std::future::Future;

#[derive(Clone, Copy)]
enum Phase {
  Before,
  On,
  After,
}

impl<T, E> Pipeline<T, E>
where
  T: 'static + Send + Sync,
  E: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  /// Registers a hook that runs before the step's `on` hooks.
  ///
  /// The hook's own error type only needs to convert into the pipeline's `E`.
  pub fn before_root<F, HookErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(ContextData<T>) -> F + Send + Sync + 'static,
  ) -> Result<(), FlowError>
  where
    F: Future<Output = Result<PipelineControl, HookErr>> + Send + 'static,
    HookErr: Into<E> + Send + Sync + 'static,
  {
    self.push_hook(Phase::Before, step_name, handler_fn)
  }

  /// Registers the main hook(s) of a step.
  pub fn on_root<F, HookErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(ContextData<T>) -> F + Send + Sync + 'static,
  ) -> Result<(), FlowError>
  where
    F: Future<Output = Result<PipelineControl, HookErr>> + Send + 'static,
    HookErr: Into<E> + Send + Sync + 'static,
  {
    self.push_hook(Phase::On, step_name, handler_fn)
  }

  /// Registers a hook that runs once the step's `on` hooks have finished.
  pub fn after_root<F, HookErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(ContextData<T>) -> F + Send + Sync + 'static,
  ) -> Result<(), FlowError>
  where
    F: Future<Output = Result<PipelineControl, HookErr>> + Send + 'static,
    HookErr: Into<E> + Send + Sync + 'static,
  {
    self.push_hook(Phase::After, step_name, handler_fn)
  }

  fn push_hook<F, HookErr>(
    &mut self,
    phase: Phase,
    step_name: &str,
    handler_fn: impl Fn(ContextData<T>) -> F + Send + Sync + 'static,
  ) -> Result<(), FlowError>
  where
    F: Future<Output = Result<PipelineControl, HookErr>> + Send + 'static,
    HookErr: Into<E> + Send + Sync + 'static,
  {
    self.ensure_step_exists(step_name)?;
    let handler: Handler<T, E> = Box::new(move |ctx_data| {
      let fut = handler_fn(ctx_data);
      Box::pin(async move { fut.await.map_err(Into::into) })
    });
    let table: &mut HashMap<String, Vec<Handler<T, E>>> = match phase {
      Phase::Before => &mut self.before,
      Phase::On => &mut self.on,
      Phase::After => &mut self.after,
    };
    table.entry(step_name.to_string()).or_default().push(handler);
    Ok(())
  }
}
