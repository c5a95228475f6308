//! Order - Persisted order header and its line records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{Accessory, CustomerInfo, DeliveryZone, LineItem};
use crate::domain::services::OrderTotals;

/// A validated checkout, ready to be persisted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderDraft {
    pub customer: CustomerInfo,
    pub zone: DeliveryZone,
    /// Only lines with a quantity above zero
    pub lines: Vec<LineItem>,
    pub accessory: Accessory,
    pub accessory_quantity: u32,
    pub totals: OrderTotals,
}

/// Order header to insert
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewOrder {
    pub full_name: String,
    pub phone: String,
    pub municipality: String,
    pub total: u64,
}

/// Persisted order header
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderRecord {
    pub id: Uuid,
    pub full_name: String,
    pub phone: String,
    pub municipality: String,
    pub total: u64,
    pub created_at: DateTime<Utc>,
}

impl OrderRecord {
    /// Create a record with generated ID and timestamp
    pub fn new(order: &NewOrder) -> Self {
        Self {
            id: Uuid::new_v4(),
            full_name: order.full_name.clone(),
            phone: order.phone.clone(),
            municipality: order.municipality.clone(),
            total: order.total,
            created_at: Utc::now(),
        }
    }
}

/// Order line before the order identifier is known
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewOrderLine {
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: u64,
}

impl NewOrderLine {
    pub fn for_order(&self, order_id: Uuid) -> OrderLineRecord {
        OrderLineRecord {
            order_id,
            product_name: self.product_name.clone(),
            quantity: self.quantity,
            unit_price: self.unit_price,
        }
    }
}

/// Persisted order line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderLineRecord {
    pub order_id: Uuid,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: u64,
}

/// Outcome of a successful submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub order: OrderRecord,
    pub totals: OrderTotals,
    /// Plain-text order summary
    pub summary: String,
    /// Messaging deep link carrying the summary
    pub handoff_url: String,
}
