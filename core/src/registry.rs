// flowline/src/registry.rs

//! A type-keyed registry of pipelines.
//!
//! Each pipeline is stored under the `TypeId` of its context data, so callers
//! only need a `ContextData<T>` to reach the right pipeline.

use crate::core::context_data::ContextData;
use crate::core::control::PipelineResult;
use crate::error::FlowError;
use crate::pipeline::definition::Pipeline;

use async_trait::async_trait;
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{event, Level};

#[async_trait]
trait ErasedRunner<AppErr>: Send + Sync
where
  AppErr: std::error::Error + Send + Sync + 'static,
{
  /// `ctx_obj` must hold a `ContextData<T>` matching the wrapped pipeline.
  async fn run_erased(&self, ctx_obj: Box<dyn Any + Send>) -> Result<PipelineResult, AppErr>;
}

struct PipelineRunner<T, HookErr, AppErr>
where
  T: 'static + Send + Sync,
  HookErr: std::error::Error + From<FlowError> + Send + Sync + 'static,
  AppErr: std::error::Error + From<HookErr> + From<FlowError> + Send + Sync + 'static,
{
  pipeline: Arc<Pipeline<T, HookErr>>,
  _app_err: PhantomData<fn() -> AppErr>,
}

#[async_trait]
impl<T, HookErr, AppErr> ErasedRunner<AppErr> for PipelineRunner<T, HookErr, AppErr>
where
  T: 'static + Send + Sync,
  HookErr: std::error::Error + From<FlowError> + Send + Sync + 'static,
  AppErr: std::error::Error + From<HookErr> + From<FlowError> + Send + Sync + 'static,
{
  async fn run_erased(&self, ctx_obj: Box<dyn Any + Send>) -> Result<PipelineResult, AppErr> {
    let ctx_data = match ctx_obj.downcast::<ContextData<T>>() {
      Ok(boxed) => *boxed,
      Err(_) => {
        let expected_type = std::any::type_name::<ContextData<T>>().to_string();
        event!(Level::ERROR, %expected_type, "Registry handed a mismatched context.");
        return Err(AppErr::from(FlowError::TypeMismatch { expected_type }));
      }
    };
    self.pipeline.run(ctx_data).await.map_err(AppErr::from)
  }
}

/// Holds at most one pipeline per context data type.
///
/// `AppErr` is what [`Registry::run`] returns; it must absorb both the
/// pipelines' hook errors and [`FlowError`].
pub struct Registry<AppErr = FlowError>
where
  AppErr: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  pipelines: RwLock<HashMap<TypeId, Arc<dyn ErasedRunner<AppErr>>>>,
}

impl<AppErr> Registry<AppErr>
where
  AppErr: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  pub fn new() -> Self {
    Self {
      pipelines: RwLock::new(HashMap::new()),
    }
  }

  /// Registers `pipeline` under its context type, replacing any previous one.
  pub fn register_pipeline<T, HookErr>(&self, pipeline: Pipeline<T, HookErr>)
  where
    T: 'static + Send + Sync,
    HookErr: std::error::Error + From<FlowError> + Send + Sync + 'static,
    AppErr: From<HookErr>,
  {
    event!(
      Level::DEBUG,
      context_type = %std::any::type_name::<T>(),
      steps = ?pipeline.step_names(),
      "Registering pipeline."
    );
    let runner = PipelineRunner::<T, HookErr, AppErr> {
      pipeline: Arc::new(pipeline),
      _app_err: PhantomData,
    };
    self.pipelines.write().insert(TypeId::of::<T>(), Arc::new(runner));
  }

  pub fn is_registered<T: 'static + Send + Sync>(&self) -> bool {
    self.pipelines.read().contains_key(&TypeId::of::<T>())
  }

  /// Runs the pipeline registered for `T`.
  pub async fn run<T>(&self, ctx_data: ContextData<T>) -> Result<PipelineResult, AppErr>
  where
    T: 'static + Send + Sync,
  {
    let runner = self.pipelines.read().get(&TypeId::of::<T>()).cloned();
    let Some(runner) = runner else {
      let type_name = std::any::type_name::<T>().to_string();
      event!(Level::ERROR, %type_name, "No pipeline registered for context type.");
      return Err(AppErr::from(FlowError::NotRegistered { type_name }));
    };
    runner.run_erased(Box::new(ctx_data)).await
  }
}

impl<AppErr> Default for Registry<AppErr>
where
  AppErr: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  fn default() -> Self {
    Self::new()
  }
}

impl<AppErr> std::fmt::Debug for Registry<AppErr>
where
  AppErr: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Registry")
      .field("pipelines", &self.pipelines.read().len())
      .finish()
  }
}
