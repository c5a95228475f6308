//! Service Ports
//!
//! Abstract interfaces for external collaborators.

mod assets;
mod messaging;

pub use assets::*;
pub use messaging::*;
