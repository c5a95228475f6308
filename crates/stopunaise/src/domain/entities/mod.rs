//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - Product / LineItem: Catalog products and their selected quantities
//! - Accessory: The dosing kit add-on
//! - DeliveryZone: Municipality with its flat delivery fee
//! - CustomerInfo: Who the order is for
//! - Order: Persisted order header and line records

mod customer;
mod order;
mod product;
mod zone;

pub use customer::*;
pub use order::*;
pub use product::*;
pub use zone::*;
