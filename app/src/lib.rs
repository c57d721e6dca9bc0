// storefront/src/lib.rs

//! Pet-shop storefront backend: cart model, checkout API and the Xendit
//! invoice integration behind it.

pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod pipelines;
pub mod services;
pub mod state;
pub mod web;
