//! Infrastructure Adapters
//!
//! Implementations of domain ports for external systems.

#[cfg(test)]
mod memory;
pub mod postgres;
pub mod supabase;
pub mod whatsapp;

// Re-exports
#[cfg(test)]
pub use memory::MemoryOrderRepository;
pub use postgres::PgOrderRepository;
pub use supabase::{SupabaseOrderRepository, SupabaseStorage};
pub use whatsapp::WhatsAppHandoff;
