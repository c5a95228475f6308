//! PostgreSQL Repository Implementations

mod order_repository;

pub use order_repository::PgOrderRepository;
