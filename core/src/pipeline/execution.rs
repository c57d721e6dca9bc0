// flowline/src/pipeline/execution.rs

//! `Pipeline::run()`: walks the steps and drives their hooks.

use crate::core::context_data::ContextData;
use crate::core::control::{PipelineControl, PipelineResult};
use crate::core::step::Handler;
use crate::error::FlowError;
use crate::pipeline::definition::Pipeline;
use tracing::{event, instrument, span, Instrument, Level};

impl<T, E> Pipeline<T, E>
where
  T: 'static + Send + Sync,
  E: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  /// Executes every step against `ctx_data`.
  ///
  /// Returns `Ok(Stopped)` as soon as a hook returns [`PipelineControl::Stop`]
  /// and the first hook error unchanged. A required step without any hook
  /// fails with [`FlowError::HandlerMissing`] converted into `E`.
  #[instrument(
    name = "Pipeline::run",
    skip_all,
    fields(
      context_type = %std::any::type_name::<T>(),
      num_steps = self.steps.len(),
    ),
    err(Display)
  )]
  pub async fn run(&self, ctx_data: ContextData<T>) -> Result<PipelineResult, E> {
    event!(Level::DEBUG, "Pipeline execution starting.");

    for (step_idx, step_def) in self.steps.iter().enumerate() {
      let step_name = step_def.name.as_str();
      let step_span = span!(
        Level::INFO,
        "pipeline_step",
        step_name = step_name,
        step_index = step_idx,
        optional = step_def.optional
      );

      if let Some(skip_if) = &step_def.skip_if {
        if skip_if(ctx_data.clone()) {
          event!(parent: &step_span, Level::INFO, "Step skipped by its skip condition.");
          continue;
        }
      }

      let phases = [
        ("before", self.before.get(step_name)),
        ("on", self.on.get(step_name)),
        ("after", self.after.get(step_name)),
      ];

      if phases.iter().all(|(_, hooks)| hooks.map_or(true, |h| h.is_empty())) {
        if step_def.optional {
          event!(parent: &step_span, Level::DEBUG, "Optional step has no hooks, skipping.");
          continue;
        }
        event!(parent: &step_span, Level::ERROR, "Required step has no hooks.");
        return Err(E::from(FlowError::HandlerMissing {
          step_name: step_def.name.clone(),
        }));
      }

      for (phase, hooks) in phases {
        let Some(hooks) = hooks else { continue };
        let control = run_hooks(phase, hooks, &ctx_data)
          .instrument(step_span.clone())
          .await?;
        if control == PipelineControl::Stop {
          event!(parent: &step_span, Level::INFO, phase, "Pipeline stopped by a hook.");
          return Ok(PipelineResult::Stopped);
        }
      }
      event!(parent: &step_span, Level::DEBUG, "Step finished.");
    }

    event!(Level::DEBUG, "Pipeline execution completed.");
    Ok(PipelineResult::Completed)
  }
}

async fn run_hooks<T, E>(
  phase: &'static str,
  hooks: &[Handler<T, E>],
  ctx_data: &ContextData<T>,
) -> Result<PipelineControl, E>
where
  T: 'static + Send + Sync,
  E: std::error::Error + Send + Sync + 'static,
{
  for (hook_idx, hook) in hooks.iter().enumerate() {
    let hook_span = span!(Level::DEBUG, "hook", phase, hook_index = hook_idx);
    match hook(ctx_data.clone()).instrument(hook_span).await {
      Ok(PipelineControl::Continue) => {}
      Ok(PipelineControl::Stop) => return Ok(PipelineControl::Stop),
      Err(e) => {
        event!(Level::ERROR, phase, error = %e, "Hook failed.");
        return Err(e);
      }
    }
  }
  Ok(PipelineControl::Continue)
}
