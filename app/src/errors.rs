// storefront/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use flowline::FlowError;
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Method not allowed")]
  MethodNotAllowed,

  #[error("Configuration Error: {0}")]
  Config(String),

  /// The payment provider could not be reached or answered with something
  /// that is not JSON.
  #[error("Payment provider transport error: {0}")]
  Transport(String),

  /// The payment provider answered with a non-2xx status. Holds its error
  /// body verbatim so it can be passed through to the caller.
  #[error("Payment provider rejected the request: {0}")]
  Gateway(Value),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Pipeline Error: {source}")]
  Flow {
    #[from]
    source: FlowError,
  },

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation(_) => StatusCode::BAD_REQUEST,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
      AppError::Gateway(_) => StatusCode::BAD_GATEWAY,
      AppError::Config(_)
      | AppError::Transport(_)
      | AppError::Sqlx(_)
      | AppError::Flow { .. }
      | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    tracing::error!(application_error = %self, "Responding with error");
    let body = match self {
      // Client mistakes carry a human readable `message`.
      AppError::Validation(m) | AppError::NotFound(m) => json!({ "ok": false, "message": m }),
      AppError::MethodNotAllowed => json!({ "ok": false, "message": "Method not allowed" }),
      // Server side failures carry `error`.
      AppError::Config(m) | AppError::Transport(m) | AppError::Internal(m) => json!({ "ok": false, "error": m }),
      AppError::Gateway(provider_body) => json!({ "ok": false, "error": provider_body }),
      AppError::Sqlx(_) => json!({ "ok": false, "error": "Database operation failed" }),
      AppError::Flow { source } => {
        tracing::error!(flow_error = ?source, "Pipeline error details");
        json!({ "ok": false, "error": "Checkout processing error" })
      }
    };
    HttpResponse::build(self.status_code()).json(body)
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::body::to_bytes;

  async fn body_of(err: AppError) -> (StatusCode, Value) {
    let resp = err.error_response();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body()).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
  }

  #[actix_web::test]
  async fn validation_is_bad_request_with_message() {
    let (status, body) = body_of(AppError::Validation("Cart is empty".into())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "ok": false, "message": "Cart is empty" }));
  }

  #[actix_web::test]
  async fn gateway_passes_provider_body_through() {
    let provider = json!({ "error_code": "API_VALIDATION_ERROR", "message": "amount too small" });
    let (status, body) = body_of(AppError::Gateway(provider.clone())).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body, json!({ "ok": false, "error": provider }));
  }

  #[actix_web::test]
  async fn missing_config_is_server_error() {
    let (status, body) = body_of(AppError::Config("XENDIT_SECRET_KEY missing on server".into())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "XENDIT_SECRET_KEY missing on server");
  }

  #[actix_web::test]
  async fn server_side_failures_carry_error_field() {
    for err in [
      AppError::Transport("connection reset".into()),
      AppError::Internal("boom".into()),
      AppError::Sqlx(sqlx::Error::RowNotFound),
      AppError::from(FlowError::NotRegistered { type_name: "X".into() }),
    ] {
      let (status, body) = body_of(err).await;
      assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
      assert_eq!(body["ok"], false);
      assert!(body["error"].is_string());
    }
  }

  #[actix_web::test]
  async fn method_not_allowed_has_fixed_message() {
    let (status, body) = body_of(AppError::MethodNotAllowed).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["message"], "Method not allowed");
  }
}
