//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod amount;
mod volume;
mod zone_class;

pub use amount::*;
pub use volume::*;
pub use zone_class::*;
