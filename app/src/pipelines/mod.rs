// storefront/src/pipelines/mod.rs

//! Pipeline definitions used by the storefront.

use crate::errors::AppError;
use flowline::{FlowError, Registry};

pub mod checkout_pipeline;
pub mod contexts;

/// Registers every pipeline with `registry`. Called once while building `AppState`.
pub fn register_all_pipelines(registry: &Registry<AppError>) -> Result<(), FlowError> {
  checkout_pipeline::register_checkout_pipeline(registry)?;
  tracing::info!("All application pipelines registered.");
  Ok(())
}
