//! DeliveryZone - Municipality reference entry

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::ZoneClass;

/// Municipality with its delivery classification and flat fee
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeliveryZone {
    pub name: String,
    pub class: ZoneClass,
    /// Flat delivery fee in CFA francs
    pub fee: u64,
}

impl DeliveryZone {
    pub fn new(name: impl Into<String>, class: ZoneClass, fee: u64) -> Self {
        Self {
            name: name.into(),
            class,
            fee,
        }
    }
}
