// flowline/src/pipeline/definition.rs

//! The `Pipeline<T, E>` struct and its construction.

use crate::core::step::{Handler, SkipCondition, StepDef};
use crate::error::FlowError;
use std::collections::HashMap;

/// An ordered set of named steps over the context data type `T`.
///
/// Hooks return `Result<PipelineControl, E>`. `E` must absorb [`FlowError`]
/// so that structural problems found while running (a required step with no
/// hooks) surface through the same error type as the hooks' own failures.
pub struct Pipeline<T, E>
where
  T: 'static + Send + Sync,
  E: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  pub(crate) steps: Vec<StepDef<T>>,

  pub(crate) before: HashMap<String, Vec<Handler<T, E>>>,
  pub(crate) on: HashMap<String, Vec<Handler<T, E>>>,
  pub(crate) after: HashMap<String, Vec<Handler<T, E>>>,
}

impl<T, E> Pipeline<T, E>
where
  T: 'static + Send + Sync,
  E: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  /// Builds a pipeline from `(name, optional, skip_if)` tuples.
  ///
  /// A repeated name keeps its first declaration; use [`Pipeline::try_new`]
  /// to reject it instead.
  pub fn new(step_defs: &[(&str, bool, Option<SkipCondition<T>>)]) -> Self {
    let mut steps: Vec<StepDef<T>> = Vec::with_capacity(step_defs.len());
    for (name, optional, skip_if) in step_defs {
      if steps.iter().any(|s| s.name == *name) {
        tracing::warn!(step_name = %name, "Ignoring duplicate step declaration.");
        continue;
      }
      steps.push(StepDef {
        name: (*name).to_string(),
        optional: *optional,
        skip_if: skip_if.clone(),
      });
    }
    Self::from_steps(steps)
  }

  pub fn try_new(step_defs: &[(&str, bool, Option<SkipCondition<T>>)]) -> Result<Self, FlowError> {
    for (idx, (name, _, _)) in step_defs.iter().enumerate() {
      if step_defs[..idx].iter().any(|(earlier, _, _)| earlier == name) {
        return Err(FlowError::DuplicateStep {
          step_name: (*name).to_string(),
        });
      }
    }
    Ok(Self::new(step_defs))
  }

  fn from_steps(steps: Vec<StepDef<T>>) -> Self {
    Self {
      steps,
      before: HashMap::new(),
      on: HashMap::new(),
      after: HashMap::new(),
    }
  }

  /// Step names in execution order.
  pub fn step_names(&self) -> Vec<&str> {
    self.steps.iter().map(|s| s.name.as_str()).collect()
  }

  pub(crate) fn ensure_step_exists(&self, step_name: &str) -> Result<(), FlowError> {
    if self.steps.iter().any(|s| s.name == step_name) {
      Ok(())
    } else {
      Err(FlowError::StepNotFound {
        step_name: step_name.to_string(),
      })
    }
  }
}

impl<T, E> std::fmt::Debug for Pipeline<T, E>
where
  T: 'static + Send + Sync,
  E: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Pipeline")
      .field("steps", &self.steps)
      .field("context_type", &std::any::type_name::<T>())
      .finish()
  }
}
