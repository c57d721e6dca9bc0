// storefront/src/db/memory.rs

use super::CheckoutStore;
use crate::errors::Result;
use crate::models::{Order, Payment};
use async_trait::async_trait;
use parking_lot::RwLock;

/// Keeps records in process memory. Used by tests and when no database is configured.
#[derive(Debug, Default)]
pub struct MemoryCheckoutStore {
  orders: RwLock<Vec<Order>>,
  payments: RwLock<Vec<Payment>>,
}

impl MemoryCheckoutStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn orders(&self) -> Vec<Order> {
    self.orders.read().clone()
  }

  pub fn payments(&self) -> Vec<Payment> {
    self.payments.read().clone()
  }
}

#[async_trait]
impl CheckoutStore for MemoryCheckoutStore {
  async fn insert_order(&self, order: &Order) -> Result<()> {
    self.orders.write().push(order.clone());
    Ok(())
  }

  async fn insert_payment(&self, payment: &Payment) -> Result<()> {
    self.payments.write().push(payment.clone());
    Ok(())
  }

  async fn find_order(&self, external_id: &str) -> Result<Option<Order>> {
    Ok(self.orders.read().iter().rev().find(|o| o.external_id == external_id).cloned())
  }

  async fn find_payment(&self, external_id: &str) -> Result<Option<Payment>> {
    Ok(self.payments.read().iter().rev().find(|p| p.external_id == external_id).cloned())
  }
}
