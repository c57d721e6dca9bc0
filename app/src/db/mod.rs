// storefront/src/db/mod.rs

//! Persistence of orders and payments.

pub mod memory;
pub mod postgres;

pub use memory::MemoryCheckoutStore;
pub use postgres::PgCheckoutStore;

use crate::errors::Result;
use crate::models::{Order, Payment};
use async_trait::async_trait;

/// Storage for the two records a checkout produces.
///
/// Lookups by external id return the most recently written record when the
/// clock-derived id has collided.
#[async_trait]
pub trait CheckoutStore: Send + Sync {
  async fn insert_order(&self, order: &Order) -> Result<()>;

  async fn insert_payment(&self, payment: &Payment) -> Result<()>;

  async fn find_order(&self, external_id: &str) -> Result<Option<Order>>;

  async fn find_payment(&self, external_id: &str) -> Result<Option<Payment>>;
}
