//! Storefront API Models
//!
//! - Catalog: products, delivery zones, accessory and asset URLs
//! - Order: quote and order requests, totals, receipts

mod catalog;
mod order;

pub use catalog::*;
pub use order::*;
