//! Product - Catalog items and the quantities a customer selects

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::parse_volume_ml;

/// Catalog product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Volume label such as "250ml"
    pub volume: String,
    /// Unit price in CFA francs
    pub price: u64,
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        volume: impl Into<String>,
        price: u64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            volume: volume.into(),
            price,
        }
    }

    pub fn volume_ml(&self) -> u64 {
        parse_volume_ml(&self.volume)
    }
}

/// A product together with its selected quantity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineItem {
    pub product: Product,
    pub quantity: u32,
}

impl LineItem {
    pub fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 0,
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn increment(&mut self) {
        self.quantity = self.quantity.saturating_add(1);
    }

    /// Never goes below zero
    pub fn decrement(&mut self) {
        self.quantity = self.quantity.saturating_sub(1);
    }

    pub fn is_selected(&self) -> bool {
        self.quantity > 0
    }

    pub fn line_total(&self) -> u64 {
        self.product.price.saturating_mul(u64::from(self.quantity))
    }

    pub fn volume_ml(&self) -> u64 {
        self.product.volume_ml().saturating_mul(u64::from(self.quantity))
    }
}

/// Optional add-on priced independently of the products
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Accessory {
    pub name: String,
    pub unit_price: u64,
}

impl Accessory {
    pub fn dosing_kit() -> Self {
        Self {
            name: "Kit de dosage".to_string(),
            unit_price: 1000,
        }
    }

    pub fn cost(&self, quantity: u32) -> u64 {
        self.unit_price.saturating_mul(u64::from(quantity))
    }
}

impl Default for Accessory {
    fn default() -> Self {
        Self::dosing_kit()
    }
}
