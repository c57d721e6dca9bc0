// storefront/src/models/mod.rs

//! Data structures for orders, payments and the shopper's cart.

pub mod cart;
pub mod checkout;
pub mod order;
pub mod payment;
pub mod product;

pub use cart::{Cart, CartItem};
pub use checkout::{compute_total, new_external_id, CheckoutRequest, CheckoutResponse, LineItem};
pub use order::{Order, OrderStatus};
pub use payment::Payment;
pub use product::Product;
