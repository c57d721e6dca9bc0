// storefront/src/web/handlers/checkout_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::models::{CheckoutRequest, CheckoutResponse};
use crate::pipelines::contexts::CheckoutCtxData;
use crate::state::AppState;
use flowline::{ContextData, PipelineResult};

/// `POST /api/checkout/create`
///
/// Runs the checkout pipeline and answers with the hosted invoice URL.
/// Failures map through [`AppError`]: 400 for a bad cart, 502 when the
/// provider rejects the invoice, 500 for everything else.
#[instrument(
  name = "handler::create_checkout",
  skip(app_state, payload),
  fields(lines = payload.items.as_ref().map_or(0, Vec::len))
)]
pub async fn create_checkout_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<CheckoutRequest>,
) -> Result<HttpResponse, AppError> {
  let ctx_data = ContextData::new(CheckoutCtxData::new(app_state.get_ref().clone(), payload.into_inner()));

  match app_state.flow_registry.run(ctx_data.clone()).await? {
    PipelineResult::Completed => {
      let guard = ctx_data.read();
      let order = guard.order.as_ref().ok_or_else(|| {
        AppError::Internal("Checkout completed, but no order record was produced.".to_string())
      })?;
      let invoice_url = guard.payment.as_ref().and_then(|p| p.invoice_url.clone());
      info!(external_id = %order.external_id, has_invoice_url = invoice_url.is_some(), "Checkout completed.");

      Ok(HttpResponse::Ok().json(CheckoutResponse {
        ok: true,
        invoice_url,
        external_id: order.external_id.clone(),
      }))
    }
    PipelineResult::Stopped => {
      warn!("Checkout pipeline was stopped before completing.");
      Err(AppError::Internal("Checkout process was halted.".to_string()))
    }
  }
}

/// Any method other than POST on the create route.
pub async fn method_not_allowed_handler() -> Result<HttpResponse, AppError> {
  Err(AppError::MethodNotAllowed)
}

/// `GET /api/checkout/{external_id}`: the order and, when one was written, its payment.
#[instrument(name = "handler::get_checkout", skip(app_state, path), fields(external_id = %path.as_ref()))]
pub async fn get_checkout_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let external_id = path.into_inner();

  let order = app_state
    .store
    .find_order(&external_id)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Checkout {} not found", external_id)))?;
  let payment = app_state.store.find_payment(&external_id).await?;

  Ok(HttpResponse::Ok().json(json!({
    "ok": true,
    "checkout": order,
    "payment": payment,
  })))
}
