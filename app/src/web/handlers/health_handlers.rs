// storefront/src/web/handlers/health_handlers.rs

use actix_web::HttpResponse;

pub async fn health_check_handler() -> HttpResponse {
  HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}
