// storefront/src/models/product.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalogue entry as the storefront page receives it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
  #[serde(alias = "_id")]
  pub id: String,
  pub name: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub category: Option<String>,
  #[serde(with = "rust_decimal::serde::float")]
  pub price: Decimal,
}
