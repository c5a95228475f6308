//! Application Layer (Use Cases)
//!
//! Orchestrates domain operations and coordinates between
//! the order store and the messaging handoff.

mod checkout_service;

pub use checkout_service::{CheckoutRequest, CheckoutService, Quote};
