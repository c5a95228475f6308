//! Domain Services
//!
//! Stateless business rules: pricing, validation, and the order summary.

mod pricing;
mod summary;
mod validation;

pub use pricing::*;
pub use summary::*;
pub use validation::*;
