// tests/error_handling_tests.rs
mod common;
use common::*;
use flowline::{ContextData, FlowError, Pipeline, PipelineControl};
use serial_test::serial;

#[tokio::test]
#[serial]
async fn test_pipeline_run_catches_handler_missing() {
  setup_tracing();
  let pipeline = Pipeline::<TestContext, TestError>::new(&[("missing", false, None)]);
  let ctx = ContextData::new(TestContext::default());
  let result = pipeline.run(ctx).await;
  assert_eq!(
    result,
    Err(TestError::Flow(FlowError::HandlerMissing {
      step_name: "missing".to_string()
    }))
  );
}

#[test]
fn test_registering_hook_for_unknown_step_fails() {
  let mut pipeline = Pipeline::<TestContext, TestError>::new(&[("known", false, None)]);
  let result = pipeline.on_root("unknown", create_simple_handler("unknown", "u"));
  assert_eq!(
    result,
    Err(FlowError::StepNotFound {
      step_name: "unknown".to_string()
    })
  );
}

#[tokio::test]
#[serial]
async fn test_hook_error_type_converts_into_pipeline_error() {
  setup_tracing();

  #[derive(Debug)]
  struct LowLevel(&'static str);

  impl From<LowLevel> for TestError {
    fn from(e: LowLevel) -> Self {
      TestError::Handler(format!("low level: {}", e.0))
    }
  }

  let mut pipeline = Pipeline::<TestContext, TestError>::new(&[("task", false, None)]);
  pipeline
    .on_root("task", |_ctx: ContextData<TestContext>| async move {
      Err::<PipelineControl, LowLevel>(LowLevel("disk on fire"))
    })
    .unwrap();

  let result = pipeline.run(ContextData::new(TestContext::default())).await;
  assert_eq!(result, Err(TestError::Handler("low level: disk on fire".to_string())));
}

#[tokio::test]
#[serial]
async fn test_pipeline_with_flow_error_type() {
  setup_tracing();
  let mut pipeline = Pipeline::<TestContext, FlowError>::new(&[("task", false, None)]);

  pipeline
    .on_root("task", |ctx: ContextData<TestContext>| async move {
      ctx.write().counter = 1;
      Ok::<PipelineControl, FlowError>(PipelineControl::Continue)
    })
    .unwrap();

  let ctx = ContextData::new(TestContext::default());
  assert!(pipeline.run(ctx.clone()).await.is_ok());
  assert_eq!(ctx.read().counter, 1);
}
