// storefront/src/state.rs
use crate::config::AppConfig;
use crate::db::CheckoutStore;
use crate::errors::{AppError, Result};
use crate::pipelines;
use crate::services::InvoiceGateway;
use flowline::Registry;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub store: Arc<dyn CheckoutStore>,
  pub gateway: Arc<dyn InvoiceGateway>,
  pub flow_registry: Arc<Registry<AppError>>,
  pub config: Arc<AppConfig>,
}

impl AppState {
  /// Wires the shared services together and registers every pipeline.
  pub fn new(config: AppConfig, store: Arc<dyn CheckoutStore>, gateway: Arc<dyn InvoiceGateway>) -> Result<Self> {
    let flow_registry = Arc::new(Registry::<AppError>::new());
    pipelines::register_all_pipelines(&flow_registry)?;
    Ok(Self {
      store,
      gateway,
      flow_registry,
      config: Arc::new(config),
    })
  }
}
