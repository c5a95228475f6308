//! Repository Ports
//!
//! Abstract interfaces for data persistence operations.

mod order_repository;

pub use order_repository::*;
