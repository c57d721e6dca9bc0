// storefront/src/models/checkout.rs

//! Wire types of `POST /api/checkout/create` and the arithmetic behind it.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One cart line as submitted by the browser.
///
/// Prices and quantities are taken as sent; only the resulting total is checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub product: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  #[serde(with = "rust_decimal::serde::float")]
  pub price: Decimal,
  pub qty: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
  #[serde(default)]
  pub items: Option<Vec<LineItem>>,
  #[serde(default)]
  pub buyer_email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
  pub ok: bool,
  pub invoice_url: Option<String>,
  pub external_id: String,
}

/// Sum of `qty * price` over all lines, or `None` if the arithmetic overflows.
pub fn compute_total(items: &[LineItem]) -> Option<Decimal> {
  items.iter().try_fold(Decimal::ZERO, |acc, item| {
    let line = Decimal::from(item.qty).checked_mul(item.price)?;
    acc.checked_add(line)
  })
}

/// External identifier shared by an order, its payment and the provider invoice.
///
/// Derived from the wall clock only; two checkouts in the same millisecond collide.
pub fn new_external_id(now: DateTime<Utc>) -> String {
  format!("order-{}", now.timestamp_millis())
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  fn line(price: i64, qty: i64) -> LineItem {
    LineItem {
      product: None,
      name: None,
      price: Decimal::from(price),
      qty,
    }
  }

  #[test]
  fn total_sums_every_line() {
    let items = vec![line(15_000, 2), line(42_500, 1)];
    assert_eq!(compute_total(&items), Some(Decimal::from(72_500)));
  }

  #[test]
  fn total_of_nothing_is_zero() {
    assert_eq!(compute_total(&[]), Some(Decimal::ZERO));
  }

  #[test]
  fn negative_quantities_pull_the_total_down() {
    let items = vec![line(10_000, 1), line(10_000, -2)];
    assert_eq!(compute_total(&items), Some(Decimal::from(-10_000)));
  }

  #[test]
  fn fractional_prices_stay_exact() {
    let items = vec![LineItem {
      product: None,
      name: None,
      price: Decimal::new(1999, 2),
      qty: 3,
    }];
    assert_eq!(compute_total(&items), Some(Decimal::new(5997, 2)));
  }

  #[test]
  fn overflow_yields_none() {
    let items = vec![
      LineItem {
        product: None,
        name: None,
        price: Decimal::MAX,
        qty: 1,
      },
      line(1, 1),
    ];
    assert_eq!(compute_total(&items), None);
  }

  #[test]
  fn external_id_uses_unix_millis() {
    let now = Utc.timestamp_millis_opt(1_718_000_000_123).unwrap();
    assert_eq!(new_external_id(now), "order-1718000000123");
  }

  #[test]
  fn request_accepts_browser_payload() {
    let raw = r#"{
      "items": [{ "product": "665f1c", "name": "Cat Food 1kg", "price": 45000, "qty": 2 }],
      "buyerEmail": "kucing@example.com"
    }"#;
    let req: CheckoutRequest = serde_json::from_str(raw).unwrap();
    let items = req.items.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].price, Decimal::from(45_000));
    assert_eq!(items[0].name.as_deref(), Some("Cat Food 1kg"));
    assert_eq!(req.buyer_email.as_deref(), Some("kucing@example.com"));
  }

  #[test]
  fn request_without_items_still_parses() {
    let req: CheckoutRequest = serde_json::from_str("{}").unwrap();
    assert!(req.items.is_none());
    assert!(req.buyer_email.is_none());
  }

  #[test]
  fn response_uses_camel_case() {
    let resp = CheckoutResponse {
      ok: true,
      invoice_url: Some("https://checkout.xendit.co/web/abc".into()),
      external_id: "order-1".into(),
    };
    let value = serde_json::to_value(&resp).unwrap();
    assert_eq!(value["invoiceUrl"], "https://checkout.xendit.co/web/abc");
    assert_eq!(value["externalId"], "order-1");
  }
}
