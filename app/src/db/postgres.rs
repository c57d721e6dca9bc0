// storefront/src/db/postgres.rs

use super::CheckoutStore;
use crate::errors::{AppError, Result};
use crate::models::{LineItem, Order, OrderStatus, Payment};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::{error, instrument};
use uuid::Uuid;

pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

#[derive(Debug, Clone)]
pub struct PgCheckoutStore {
  pool: PgPool,
}

#[derive(FromRow)]
struct CheckoutRow {
  id: Uuid,
  external_id: String,
  items: Json<Vec<LineItem>>,
  total: Decimal,
  status: OrderStatus,
  created_at: DateTime<Utc>,
}

impl From<CheckoutRow> for Order {
  fn from(row: CheckoutRow) -> Self {
    Order {
      id: row.id,
      external_id: row.external_id,
      items: row.items.0,
      total: row.total,
      status: row.status,
      created_at: row.created_at,
    }
  }
}

#[derive(FromRow)]
struct PaymentRow {
  id: Uuid,
  checkout_id: Uuid,
  external_id: String,
  invoice_id: Option<String>,
  amount: Decimal,
  status: String,
  invoice_url: Option<String>,
  created_at: DateTime<Utc>,
}

impl From<PaymentRow> for Payment {
  fn from(row: PaymentRow) -> Self {
    Payment {
      id: row.id,
      checkout_id: row.checkout_id,
      external_id: row.external_id,
      invoice_id: row.invoice_id,
      amount: row.amount,
      status: row.status,
      invoice_url: row.invoice_url,
      created_at: row.created_at,
    }
  }
}

impl PgCheckoutStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  /// Connects and brings the schema up to date.
  pub async fn connect(database_url: &str) -> Result<Self> {
    let pool = PgPool::connect(database_url).await?;
    MIGRATOR.run(&pool).await.map_err(|e| {
      error!("Failed to run database migrations: {}", e);
      AppError::Internal(format!("Migration failed: {}", e))
    })?;
    Ok(Self::new(pool))
  }
}

#[async_trait]
impl CheckoutStore for PgCheckoutStore {
  #[instrument(skip(self, order), fields(external_id = %order.external_id))]
  async fn insert_order(&self, order: &Order) -> Result<()> {
    sqlx::query(
      "INSERT INTO checkouts (id, external_id, items, total, status, created_at) VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(order.id)
    .bind(&order.external_id)
    .bind(Json(&order.items))
    .bind(order.total)
    .bind(order.status)
    .bind(order.created_at)
    .execute(&self.pool)
    .await
    .map_err(|e| {
      error!("Failed to insert checkout {}: {}", order.external_id, e);
      AppError::Sqlx(e)
    })?;
    Ok(())
  }

  #[instrument(skip(self, payment), fields(external_id = %payment.external_id, status = %payment.status))]
  async fn insert_payment(&self, payment: &Payment) -> Result<()> {
    sqlx::query(
      "INSERT INTO payments (id, checkout_id, external_id, invoice_id, amount, status, invoice_url, created_at) \
       VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
    )
    .bind(payment.id)
    .bind(payment.checkout_id)
    .bind(&payment.external_id)
    .bind(&payment.invoice_id)
    .bind(payment.amount)
    .bind(&payment.status)
    .bind(&payment.invoice_url)
    .bind(payment.created_at)
    .execute(&self.pool)
    .await
    .map_err(|e| {
      error!("Failed to insert payment for {}: {}", payment.external_id, e);
      AppError::Sqlx(e)
    })?;
    Ok(())
  }

  async fn find_order(&self, external_id: &str) -> Result<Option<Order>> {
    let row: Option<CheckoutRow> = sqlx::query_as(
      "SELECT id, external_id, items, total, status, created_at FROM checkouts \
       WHERE external_id = $1 ORDER BY created_at DESC LIMIT 1",
    )
    .bind(external_id)
    .fetch_optional(&self.pool)
    .await?;
    Ok(row.map(Order::from))
  }

  async fn find_payment(&self, external_id: &str) -> Result<Option<Payment>> {
    let row: Option<PaymentRow> = sqlx::query_as(
      "SELECT id, checkout_id, external_id, invoice_id, amount, status, invoice_url, created_at FROM payments \
       WHERE external_id = $1 ORDER BY created_at DESC LIMIT 1",
    )
    .bind(external_id)
    .fetch_optional(&self.pool)
    .await?;
    Ok(row.map(Payment::from))
  }
}
