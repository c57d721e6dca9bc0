// storefront/src/models/cart.rs

use super::checkout::{CheckoutRequest, LineItem};
use super::product::Product;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub product: Option<String>,
  pub name: String,
  #[serde(with = "rust_decimal::serde::float")]
  pub price: Decimal,
  pub qty: i64,
}

/// The shopper's cart, keyed by product name.
///
/// Serializes as the plain JSON array the storefront page keeps in browser
/// storage, so a stored cart can be fed straight into a checkout request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
  items: Vec<CartItem>,
}

impl Cart {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn items(&self) -> &[CartItem] {
    &self.items
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  /// Adds one unit of `product`, appending a new line on first add.
  pub fn add(&mut self, product: &Product) {
    match self.items.iter_mut().find(|i| i.name == product.name) {
      Some(existing) => existing.qty += 1,
      None => self.items.push(CartItem {
        product: Some(product.id.clone()),
        name: product.name.clone(),
        price: product.price,
        qty: 1,
      }),
    }
  }

  /// Takes one unit away; the line disappears when its last unit goes.
  pub fn remove(&mut self, product_name: &str) {
    let Some(idx) = self.items.iter().position(|i| i.name == product_name) else {
      return;
    };
    if self.items[idx].qty <= 1 {
      self.items.remove(idx);
    } else {
      self.items[idx].qty -= 1;
    }
  }

  pub fn quantity(&self, product_name: &str) -> i64 {
    self.items.iter().find(|i| i.name == product_name).map_or(0, |i| i.qty)
  }

  pub fn total_items(&self) -> i64 {
    self.items.iter().map(|i| i.qty).sum()
  }

  pub fn to_checkout_request(&self, buyer_email: Option<String>) -> CheckoutRequest {
    let items = self
      .items
      .iter()
      .map(|i| LineItem {
        product: i.product.clone(),
        name: Some(i.name.clone()),
        price: i.price,
        qty: i.qty,
      })
      .collect();
    CheckoutRequest {
      items: Some(items),
      buyer_email,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn product(id: &str, name: &str, price: i64) -> Product {
    Product {
      id: id.to_string(),
      name: name.to_string(),
      category: Some("Cat Food".to_string()),
      price: Decimal::from(price),
    }
  }

  #[test]
  fn adding_twice_increments_one_line() {
    let mut cart = Cart::new();
    let tuna = product("p1", "Tuna Pouch", 12_000);
    cart.add(&tuna);
    cart.add(&tuna);
    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.quantity("Tuna Pouch"), 2);
    assert_eq!(cart.items()[0].product.as_deref(), Some("p1"));
  }

  #[test]
  fn remove_decrements_then_drops_line() {
    let mut cart = Cart::new();
    let bone = product("p2", "Chew Bone", 8_000);
    cart.add(&bone);
    cart.add(&bone);
    cart.remove("Chew Bone");
    assert_eq!(cart.quantity("Chew Bone"), 1);
    cart.remove("Chew Bone");
    assert_eq!(cart.quantity("Chew Bone"), 0);
    assert!(cart.is_empty());
  }

  #[test]
  fn removing_unknown_product_is_a_no_op() {
    let mut cart = Cart::new();
    cart.add(&product("p3", "Seed Mix", 5_000));
    cart.remove("Nothing Here");
    assert_eq!(cart.total_items(), 1);
  }

  #[test]
  fn total_items_counts_units_across_lines() {
    let mut cart = Cart::new();
    let a = product("a", "A", 1);
    let b = product("b", "B", 1);
    cart.add(&a);
    cart.add(&b);
    cart.add(&b);
    assert_eq!(cart.total_items(), 3);
  }

  #[test]
  fn stored_cart_round_trips_as_plain_array() {
    let raw = r#"[{"product":"p1","name":"Tuna Pouch","price":12000,"qty":3}]"#;
    let cart: Cart = serde_json::from_str(raw).unwrap();
    assert_eq!(cart.quantity("Tuna Pouch"), 3);
    assert!(serde_json::to_value(&cart).unwrap().is_array());
  }

  #[test]
  fn checkout_request_carries_every_line() {
    let mut cart = Cart::new();
    cart.add(&product("p1", "Tuna Pouch", 12_000));
    cart.add(&product("p2", "Chew Bone", 8_000));
    let req = cart.to_checkout_request(Some("meow@example.com".into()));
    let items = req.items.unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1].name.as_deref(), Some("Chew Bone"));
    assert_eq!(req.buyer_email.as_deref(), Some("meow@example.com"));
  }
}
