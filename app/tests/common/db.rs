// tests/common/db.rs

//! Per-test Postgres databases inside one shared container.

use once_cell::sync::Lazy;
use sqlx::{Connection, PgConnection};
use storefront::db::PgCheckoutStore;
use testcontainers::runners::AsyncRunner;
use testcontainers::ContainerAsync;
use testcontainers_modules::postgres::Postgres as PostgresImage;
use tokio::sync::OnceCell;

static POSTGRES_CONTAINER: Lazy<OnceCell<ContainerAsync<PostgresImage>>> = Lazy::new(OnceCell::new);

async fn init_postgres_container() -> ContainerAsync<PostgresImage> {
  PostgresImage::default()
    .start()
    .await
    .expect("Failed to start PostgreSQL container")
}

/// A freshly created database with migrations applied through [`PgCheckoutStore::connect`].
pub struct TestDb {
  pub name: String,
  pub url: String,
  pub store: PgCheckoutStore,
}

impl TestDb {
  pub async fn new(prefix: &str) -> Self {
    let container = POSTGRES_CONTAINER.get_or_init(init_postgres_container).await;
    let host = container.get_host().await.expect("Failed to get container host");
    let port = container
      .get_host_port_ipv4(5432)
      .await
      .expect("Failed to get container port");

    let nanos = std::time::SystemTime::now()
      .duration_since(std::time::UNIX_EPOCH)
      .unwrap()
      .as_nanos();
    let name = format!("storefront_{}_{}", prefix, nanos);

    let admin_url = format!("postgres://postgres:postgres@{}:{}/postgres", host, port);
    let mut conn = PgConnection::connect(&admin_url)
      .await
      .expect("Failed to connect to postgres database");
    sqlx::query(&format!("CREATE DATABASE \"{}\"", name))
      .execute(&mut conn)
      .await
      .expect("Failed to create test database");
    conn.close().await.expect("Failed to close admin connection");

    let url = format!("postgres://postgres:postgres@{}:{}/{}", host, port, name);
    let store = PgCheckoutStore::connect(&url)
      .await
      .expect("Failed to connect store and run migrations");

    Self { name, url, store }
  }
}
