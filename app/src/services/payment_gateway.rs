// storefront/src/services/payment_gateway.rs

use crate::errors::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Invoice creation payload, in the provider's snake_case wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRequest {
  pub external_id: String,
  #[serde(with = "rust_decimal::serde::float")]
  pub amount: Decimal,
  pub payer_email: String,
  pub description: String,
  pub success_redirect_url: String,
  pub failure_redirect_url: String,
}

impl InvoiceRequest {
  /// Builds the request for one order.
  ///
  /// A missing or blank `buyer_email` falls back to `default_email`. Both
  /// redirect URLs land on `<base_url>/payment` carrying the external id.
  pub fn for_order(
    external_id: &str,
    amount: Decimal,
    buyer_email: Option<&str>,
    base_url: &str,
    default_email: &str,
  ) -> Self {
    let payer_email = buyer_email
      .map(str::trim)
      .filter(|e| !e.is_empty())
      .unwrap_or(default_email)
      .to_string();
    let landing = format!("{}/payment?external_id={}", base_url.trim_end_matches('/'), external_id);
    Self {
      external_id: external_id.to_string(),
      amount,
      payer_email,
      description: format!("Payment for {}", external_id),
      failure_redirect_url: format!("{}&failed=true", landing),
      success_redirect_url: landing,
    }
  }
}

/// Raw provider answer: HTTP status plus the JSON body, success or not.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceResponse {
  pub status_code: u16,
  pub body: Value,
}

impl InvoiceResponse {
  pub fn is_success(&self) -> bool {
    (200..300).contains(&self.status_code)
  }

  /// First of `keys` whose value is a truthy scalar.
  ///
  /// Null, `""`, `false` and `0` count as absent so the next key is tried.
  pub fn field(&self, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match self.body.get(*key)? {
      Value::String(s) if !s.is_empty() => Some(s.clone()),
      Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0) => Some(n.to_string()),
      Value::Bool(true) => Some("true".to_string()),
      _ => None,
    })
  }

  pub fn invoice_id(&self) -> Option<String> {
    self.field(&["id", "invoice_id"])
  }

  pub fn invoice_url(&self) -> Option<String> {
    self.field(&["invoice_url", "invoiceURL", "url"])
  }

  pub fn status(&self) -> Option<String> {
    self.field(&["status"])
  }
}

/// Creates hosted payment invoices.
///
/// Implementations return `Ok` for every HTTP answer that carries a JSON
/// body, including rejections; callers branch on [`InvoiceResponse::is_success`].
/// `Err` is reserved for missing configuration and transport failures.
#[async_trait]
pub trait InvoiceGateway: Send + Sync {
  async fn create_invoice(&self, request: &InvoiceRequest) -> Result<InvoiceResponse>;
}
