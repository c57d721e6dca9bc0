// tests/common/mod.rs
#![allow(dead_code)]

pub mod db;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use storefront::config::AppConfig;
use storefront::db::MemoryCheckoutStore;
use storefront::errors::{AppError, Result};
use storefront::services::{InvoiceGateway, InvoiceRequest, InvoiceResponse};
use storefront::state::AppState;

pub const BASE_URL: &str = "https://petshop.test";

/// What the fake provider does with the next invoice request.
#[derive(Clone, Debug)]
pub enum Script {
  Respond(u16, Value),
  Unreachable(String),
}

/// Answers every invoice request with the same script and remembers what it was sent.
pub struct ScriptedGateway {
  script: Script,
  received: Mutex<Vec<InvoiceRequest>>,
}

impl ScriptedGateway {
  pub fn new(script: Script) -> Self {
    Self {
      script,
      received: Mutex::new(Vec::new()),
    }
  }

  pub fn received(&self) -> Vec<InvoiceRequest> {
    self.received.lock().clone()
  }
}

#[async_trait]
impl InvoiceGateway for ScriptedGateway {
  async fn create_invoice(&self, request: &InvoiceRequest) -> Result<InvoiceResponse> {
    self.received.lock().push(request.clone());
    match &self.script {
      Script::Respond(status_code, body) => Ok(InvoiceResponse {
        status_code: *status_code,
        body: body.clone(),
      }),
      Script::Unreachable(message) => Err(AppError::Transport(message.clone())),
    }
  }
}

pub fn test_config() -> AppConfig {
  let vars: HashMap<&str, &str> = HashMap::from([
    ("PUBLIC_BASE_URL", BASE_URL),
    ("XENDIT_SECRET_KEY", "xnd_test_secret"),
  ]);
  AppConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string())).unwrap()
}

pub struct Harness {
  pub state: AppState,
  pub store: Arc<MemoryCheckoutStore>,
  pub gateway: Arc<ScriptedGateway>,
}

pub fn harness(script: Script) -> Harness {
  let store = Arc::new(MemoryCheckoutStore::new());
  let gateway = Arc::new(ScriptedGateway::new(script));
  let state = AppState::new(test_config(), store.clone(), gateway.clone()).unwrap();
  Harness { state, store, gateway }
}
