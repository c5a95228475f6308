//! Stopunaise Domain Library
//!
//! Core domain types and interfaces for the Stopunaise storefront.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (Product, LineItem, DeliveryZone, CustomerInfo, Order)
//!   - `value_objects/`: Immutable value types (ZoneClass, volume parsing, amounts)
//!   - `services/`: Pricing engine, validation, order summary formatting
//!   - `catalog`: Reference data (products, municipalities, accessory)
//!   - `checkout`: Checkout state machine
//!   - `errors`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Order persistence
//!   - `services/`: Messaging handoff, static asset resolution
//!
//! # Usage
//!
//! ```rust,ignore
//! use stopunaise::{CheckoutEvent, CheckoutState};
//!
//! let state = CheckoutState::standard();
//! let state = state.apply(CheckoutEvent::IncrementProduct("250ml".into()));
//! println!("{}", state.totals().total);
//! ```

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    build_order, compute_totals, format_amount, format_order_summary, parse_volume_ml,
    validate, Accessory, Catalog, CheckoutEvent, CheckoutState, CustomerInfo, DeliveryZone,
    DomainError, LineItem, NewOrder, NewOrderLine, OrderDraft, OrderLineRecord, OrderRecord,
    OrderTotals, PricingInput, Product, SubmissionReceipt, ValidationIssue, ZoneClass,
    CONFIRMATION_MESSAGE, CONFIRMATION_TITLE, FREE_DELIVERY_THRESHOLD_ML, ORDER_INCOMPLETE_HINT,
};
pub use ports::{
    resolve_or_placeholder, AssetResolver, MessagingHandoff, OrderRepository,
    PLACEHOLDER_IMAGE_URL,
};
