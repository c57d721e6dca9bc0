// storefront/src/services/mod.rs

//! Outbound integrations.

pub mod payment_gateway;
pub mod xendit;

pub use payment_gateway::{InvoiceGateway, InvoiceRequest, InvoiceResponse};
pub use xendit::XenditClient;
