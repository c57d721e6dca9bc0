// storefront/src/services/xendit.rs

use super::payment_gateway::{InvoiceGateway, InvoiceRequest, InvoiceResponse};
use crate::config::AppConfig;
use crate::errors::{AppError, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::{info, instrument, warn};

pub const INVOICES_PATH: &str = "/v2/invoices";
pub const MISSING_SECRET_MESSAGE: &str = "XENDIT_SECRET_KEY missing on server";

/// Xendit invoice API client.
///
/// Authenticates with HTTP Basic auth: the secret key is the username and the
/// password is empty. No retries; the timeout is whatever was configured.
#[derive(Clone)]
pub struct XenditClient {
  http: reqwest::Client,
  api_base: String,
  secret_key: Option<String>,
}

impl XenditClient {
  pub fn new(api_base: &str, secret_key: Option<String>, timeout: Option<Duration>) -> Result<Self> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
      builder = builder.timeout(timeout);
    }
    let http = builder
      .build()
      .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;
    Ok(Self {
      http,
      api_base: api_base.trim_end_matches('/').to_string(),
      secret_key,
    })
  }

  pub fn from_config(config: &AppConfig) -> Result<Self> {
    Self::new(
      &config.xendit_api_base,
      config.xendit_secret_key.clone(),
      config.xendit_timeout,
    )
  }

  pub fn invoices_url(&self) -> String {
    format!("{}{}", self.api_base, INVOICES_PATH)
  }
}

impl std::fmt::Debug for XenditClient {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("XenditClient")
      .field("api_base", &self.api_base)
      .field("secret_key", &if self.secret_key.is_some() { "OK" } else { "MISSING" })
      .finish()
  }
}

#[async_trait]
impl InvoiceGateway for XenditClient {
  #[instrument(
    name = "xendit::create_invoice",
    skip(self, request),
    fields(external_id = %request.external_id, amount = %request.amount)
  )]
  async fn create_invoice(&self, request: &InvoiceRequest) -> Result<InvoiceResponse> {
    let secret_key = self
      .secret_key
      .as_deref()
      .ok_or_else(|| AppError::Config(MISSING_SECRET_MESSAGE.to_string()))?;

    let response = self
      .http
      .post(self.invoices_url())
      .basic_auth(secret_key, None::<&str>)
      .json(request)
      .send()
      .await
      .map_err(|e| {
        warn!("Unexpected error calling Xendit: {}", e);
        AppError::Transport(e.to_string())
      })?;

    let status = response.status();
    // Xendit answers with a JSON body on rejections too.
    let body: Value = response.json().await.map_err(|e| {
      warn!(http_status = status.as_u16(), "Xendit returned an unreadable body: {}", e);
      AppError::Transport(format!("Invalid response from payment provider: {}", e))
    })?;

    if status.is_success() {
      info!(http_status = status.as_u16(), "Xendit invoice created.");
    } else {
      warn!(http_status = status.as_u16(), provider_body = %body, "Xendit API error response.");
    }

    Ok(InvoiceResponse {
      status_code: status.as_u16(),
      body,
    })
  }
}
