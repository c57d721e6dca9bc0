// storefront/src/web/routes.rs

use actix_web::web;

use crate::errors::AppError;
use crate::web::handlers::{checkout_handlers, health_handlers};

/// Malformed or non-JSON bodies become a 400 in the same `{ok, message}` shape.
fn json_config() -> web::JsonConfig {
  web::JsonConfig::default().error_handler(|err, _req| AppError::Validation(err.to_string()).into())
}

/// Called from `main.rs` (and the integration tests) to mount every route.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.app_data(json_config()).service(
    web::scope("/api")
      .route("/health", web::get().to(health_handlers::health_check_handler))
      .service(
        web::scope("/checkout")
          .service(
            web::resource("/create")
              .route(web::post().to(checkout_handlers::create_checkout_handler))
              .default_service(web::to(checkout_handlers::method_not_allowed_handler)),
          )
          .route("/{external_id}", web::get().to(checkout_handlers::get_checkout_handler)),
      ),
  );
}
