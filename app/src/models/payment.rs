// storefront/src/models/payment.rs

use super::order::Order;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const STATUS_PENDING: &str = "PENDING";
pub const STATUS_ERROR: &str = "ERROR";

/// Outcome of asking the provider for an invoice for one [`Order`].
///
/// `status` mirrors whatever the provider reported, falling back to
/// [`STATUS_PENDING`] on success and [`STATUS_ERROR`] on rejection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
  pub id: Uuid,
  pub checkout_id: Uuid,
  pub external_id: String,
  pub invoice_id: Option<String>,
  #[serde(with = "rust_decimal::serde::float")]
  pub amount: Decimal,
  pub status: String,
  pub invoice_url: Option<String>,
  pub created_at: DateTime<Utc>,
}

impl Payment {
  pub fn for_order(order: &Order, invoice_id: Option<String>, status: String, invoice_url: Option<String>) -> Self {
    Self {
      id: Uuid::new_v4(),
      checkout_id: order.id,
      external_id: order.external_id.clone(),
      invoice_id,
      amount: order.total,
      status,
      invoice_url,
      created_at: Utc::now(),
    }
  }
}
