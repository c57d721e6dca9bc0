// storefront/src/models/order.rs

use super::checkout::LineItem;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::Type as SqlxType;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, SqlxType)]
#[sqlx(type_name = "checkout_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
  Pending,
  Paid,
  Expired,
  Failed,
}

/// A submitted cart and its computed total. Written once per checkout attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
  pub id: Uuid,
  pub external_id: String,
  pub items: Vec<LineItem>,
  #[serde(with = "rust_decimal::serde::float")]
  pub total: Decimal,
  pub status: OrderStatus,
  pub created_at: DateTime<Utc>,
}

impl Order {
  pub fn pending(external_id: String, items: Vec<LineItem>, total: Decimal) -> Self {
    Self {
      id: Uuid::new_v4(),
      external_id,
      items,
      total,
      status: OrderStatus::Pending,
      created_at: Utc::now(),
    }
  }
}
