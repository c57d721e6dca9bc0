// storefront/src/pipelines/contexts.rs

//! Context data carried through pipeline runs.

use crate::models::{CheckoutRequest, LineItem, Order, Payment};
use crate::services::{InvoiceRequest, InvoiceResponse};
use crate::state::AppState;
use rust_decimal::Decimal;

/// State of one `POST /api/checkout/create` request as it moves through the
/// checkout steps. Each step fills in the next field.
#[derive(Clone)]
pub struct CheckoutCtxData {
  pub app_state: AppState,
  pub request: CheckoutRequest,
  pub items: Vec<LineItem>,
  pub total: Option<Decimal>,
  pub order: Option<Order>,
  pub invoice_request: Option<InvoiceRequest>,
  pub invoice_response: Option<InvoiceResponse>,
  pub payment: Option<Payment>,
}

impl CheckoutCtxData {
  pub fn new(app_state: AppState, request: CheckoutRequest) -> Self {
    Self {
      app_state,
      request,
      items: Vec::new(),
      total: None,
      order: None,
      invoice_request: None,
      invoice_response: None,
      payment: None,
    }
  }
}
