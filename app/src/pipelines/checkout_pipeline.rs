// storefront/src/pipelines/checkout_pipeline.rs

//! The checkout flow: validate -> total -> persist order -> invoice -> persist payment.

use crate::errors::AppError;
use crate::models::payment::{STATUS_ERROR, STATUS_PENDING};
use crate::models::{compute_total, new_external_id, Order, Payment};
use crate::pipelines::contexts::CheckoutCtxData;
use crate::services::InvoiceRequest;
use chrono::Utc;
use flowline::{ContextData, FlowError, Pipeline, PipelineControl, Registry};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

pub const EMPTY_CART_MESSAGE: &str = "Cart is empty";
pub const INVALID_TOTAL_MESSAGE: &str = "Total amount invalid";

type StepResult = Result<PipelineControl, AppError>;

pub fn build_checkout_pipeline() -> Result<Pipeline<CheckoutCtxData, AppError>, FlowError> {
  let mut p = Pipeline::<CheckoutCtxData, AppError>::try_new(&[
    ("validate_cart", false, None),
    ("compute_total", false, None),
    ("create_order_record", false, None),
    ("prepare_invoice_request", false, None),
    ("request_invoice", false, None),
    ("record_payment", false, None),
  ])?;

  p.on_root("validate_cart", validate_cart)?;
  p.on_root("compute_total", compute_order_total)?;
  p.on_root("create_order_record", create_order_record)?;
  p.on_root("prepare_invoice_request", prepare_invoice_request)?;
  p.on_root("request_invoice", request_invoice)?;
  p.on_root("record_payment", record_payment)?;
  // The payment row is written for rejected invoices too; only then is the rejection surfaced.
  p.after_root("record_payment", reject_on_provider_error)?;

  Ok(p)
}

pub fn register_checkout_pipeline(registry: &Registry<AppError>) -> Result<(), FlowError> {
  registry.register_pipeline(build_checkout_pipeline()?);
  info!("Checkout pipeline registered.");
  Ok(())
}

fn missing(what: &str) -> AppError {
  AppError::Internal(format!("Checkout step ran before {} was available", what))
}

async fn validate_cart(ctx_data: ContextData<CheckoutCtxData>) -> StepResult {
  let mut guard = ctx_data.write();
  let items = guard.request.items.take().unwrap_or_default();
  if items.is_empty() {
    warn!("Checkout rejected: empty cart.");
    return Err(AppError::Validation(EMPTY_CART_MESSAGE.to_string()));
  }
  debug!(lines = items.len(), buyer_email = ?guard.request.buyer_email, "Cart accepted.");
  guard.items = items;
  Ok(PipelineControl::Continue)
}

async fn compute_order_total(ctx_data: ContextData<CheckoutCtxData>) -> StepResult {
  let mut guard = ctx_data.write();
  let total = compute_total(&guard.items);
  match total {
    Some(total) if total > Decimal::ZERO => {
      debug!(%total, "Order total computed.");
      guard.total = Some(total);
      Ok(PipelineControl::Continue)
    }
    other => {
      warn!(total = ?other, "Checkout rejected: non-positive or overflowing total.");
      Err(AppError::Validation(INVALID_TOTAL_MESSAGE.to_string()))
    }
  }
}

async fn create_order_record(ctx_data: ContextData<CheckoutCtxData>) -> StepResult {
  let (order, store) = {
    let guard = ctx_data.read();
    let total = guard.total.ok_or_else(|| missing("the order total"))?;
    let order = Order::pending(new_external_id(Utc::now()), guard.items.clone(), total);
    (order, guard.app_state.store.clone())
  };

  store.insert_order(&order).await?;
  info!(
    external_id = %order.external_id,
    total = %order.total,
    "Checkout record created with status PENDING."
  );

  ctx_data.write().order = Some(order);
  Ok(PipelineControl::Continue)
}

async fn prepare_invoice_request(ctx_data: ContextData<CheckoutCtxData>) -> StepResult {
  let mut guard = ctx_data.write();
  let order = guard.order.as_ref().ok_or_else(|| missing("the order record"))?;
  let config = &guard.app_state.config;
  let request = InvoiceRequest::for_order(
    &order.external_id,
    order.total,
    guard.request.buyer_email.as_deref(),
    &config.public_base_url,
    &config.default_payer_email,
  );
  guard.invoice_request = Some(request);
  Ok(PipelineControl::Continue)
}

async fn request_invoice(ctx_data: ContextData<CheckoutCtxData>) -> StepResult {
  let (request, gateway) = {
    let guard = ctx_data.read();
    let request = guard
      .invoice_request
      .clone()
      .ok_or_else(|| missing("the invoice request"))?;
    (request, guard.app_state.gateway.clone())
  };

  let response = gateway.create_invoice(&request).await?;
  debug!(http_status = response.status_code, "Payment provider answered.");

  ctx_data.write().invoice_response = Some(response);
  Ok(PipelineControl::Continue)
}

async fn record_payment(ctx_data: ContextData<CheckoutCtxData>) -> StepResult {
  let (payment, store) = {
    let guard = ctx_data.read();
    let order = guard.order.as_ref().ok_or_else(|| missing("the order record"))?;
    let response = guard
      .invoice_response
      .as_ref()
      .ok_or_else(|| missing("the provider response"))?;

    let payment = if response.is_success() {
      Payment::for_order(
        order,
        response.invoice_id(),
        response.status().unwrap_or_else(|| STATUS_PENDING.to_string()),
        response.invoice_url(),
      )
    } else {
      Payment::for_order(
        order,
        response.field(&["id"]),
        response.status().unwrap_or_else(|| STATUS_ERROR.to_string()),
        response.field(&["invoice_url"]),
      )
    };
    (payment, guard.app_state.store.clone())
  };

  store.insert_payment(&payment).await?;
  info!(
    external_id = %payment.external_id,
    status = %payment.status,
    invoice_id = ?payment.invoice_id,
    "Payment record saved."
  );

  ctx_data.write().payment = Some(payment);
  Ok(PipelineControl::Continue)
}

async fn reject_on_provider_error(ctx_data: ContextData<CheckoutCtxData>) -> StepResult {
  let guard = ctx_data.read();
  match &guard.invoice_response {
    Some(response) if !response.is_success() => Err(AppError::Gateway(response.body.clone())),
    Some(_) => Ok(PipelineControl::Continue),
    None => Err(missing("the provider response")),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn steps_are_declared_in_checkout_order() {
    let pipeline = build_checkout_pipeline().unwrap();
    assert_eq!(
      pipeline.step_names(),
      vec![
        "validate_cart",
        "compute_total",
        "create_order_record",
        "prepare_invoice_request",
        "request_invoice",
        "record_payment",
      ]
    );
  }
}
