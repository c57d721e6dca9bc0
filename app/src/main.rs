// storefront/src/main.rs

use storefront::config::AppConfig;
use storefront::db::{CheckoutStore, MemoryCheckoutStore, PgCheckoutStore};
use storefront::services::{InvoiceGateway, XenditClient};
use storefront::state::AppState;
use storefront::web::configure_app_routes;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO)
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .with_span_events(FmtSpan::CLOSE)
    .init();

  tracing::info!("Starting storefront server...");

  let app_config = AppConfig::from_env().context("Failed to load application configuration")?;

  let store: Arc<dyn CheckoutStore> = match &app_config.database_url {
    Some(url) => {
      let pg = PgCheckoutStore::connect(url)
        .await
        .context("Failed to connect to the database")?;
      tracing::info!("Connected to the database; migrations applied.");
      Arc::new(pg)
    }
    None => {
      tracing::warn!("DATABASE_URL not set; orders and payments are kept in memory only.");
      Arc::new(MemoryCheckoutStore::new())
    }
  };

  let gateway: Arc<dyn InvoiceGateway> =
    Arc::new(XenditClient::from_config(&app_config).context("Failed to build the Xendit client")?);

  let server_address = format!("{}:{}", app_config.server_host, app_config.server_port);
  let app_state = AppState::new(app_config, store, gateway).context("Failed to register pipelines")?;

  tracing::info!("Binding server to {}...", server_address);
  HttpServer::new(move || {
    App::new()
      .app_data(web::Data::new(app_state.clone()))
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(configure_app_routes)
  })
  .bind(&server_address)
  .with_context(|| format!("Failed to bind {}", server_address))?
  .run()
  .await
  .context("Server terminated with an error")
}
