// storefront/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

pub const DEFAULT_XENDIT_API_BASE: &str = "https://api.xendit.co";
pub const DEFAULT_PAYER_EMAIL: &str = "buyer@example.com";

#[derive(Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  /// Absent means orders and payments are kept in process memory.
  pub database_url: Option<String>,
  /// Public origin the payment provider redirects buyers back to.
  pub public_base_url: String,

  /// Missing is not fatal at startup; each checkout reports it instead.
  pub xendit_secret_key: Option<String>,
  pub xendit_api_base: String,
  pub xendit_timeout: Option<Duration>,
  pub default_payer_email: String,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok();
    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Builds the config from any variable source. Empty values count as unset.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    let server_host = get("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
    let server_port = get("SERVER_PORT")
      .unwrap_or_else(|| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;
    let database_url = get("DATABASE_URL");
    let public_base_url = get("PUBLIC_BASE_URL")
      .unwrap_or_else(|| format!("http://{}:{}", server_host, server_port))
      .trim_end_matches('/')
      .to_string();

    let xendit_secret_key = get("XENDIT_SECRET_KEY");
    let xendit_api_base = get("XENDIT_API_BASE")
      .unwrap_or_else(|| DEFAULT_XENDIT_API_BASE.to_string())
      .trim_end_matches('/')
      .to_string();
    let xendit_timeout = get("XENDIT_TIMEOUT_SECS")
      .map(|raw| {
        raw
          .parse::<u64>()
          .map(Duration::from_secs)
          .map_err(|e| AppError::Config(format!("Invalid XENDIT_TIMEOUT_SECS: {}", e)))
      })
      .transpose()?;
    let default_payer_email = get("DEFAULT_PAYER_EMAIL").unwrap_or_else(|| DEFAULT_PAYER_EMAIL.to_string());

    tracing::info!(
      xendit_secret_key = if xendit_secret_key.is_some() { "OK" } else { "MISSING" },
      persistence = if database_url.is_some() { "postgres" } else { "memory" },
      "Application configuration loaded."
    );

    Ok(Self {
      server_host,
      server_port,
      database_url,
      public_base_url,
      xendit_secret_key,
      xendit_api_base,
      xendit_timeout,
      default_payer_email,
    })
  }
}

impl std::fmt::Debug for AppConfig {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("AppConfig")
      .field("server_host", &self.server_host)
      .field("server_port", &self.server_port)
      .field("database_url", &self.database_url.as_ref().map(|_| "[REDACTED]"))
      .field("public_base_url", &self.public_base_url)
      .field("xendit_secret_key", &self.xendit_secret_key.as_ref().map(|_| "[REDACTED]"))
      .field("xendit_api_base", &self.xendit_api_base)
      .field("xendit_timeout", &self.xendit_timeout)
      .field("default_payer_email", &self.default_payer_email)
      .finish()
  }
}
