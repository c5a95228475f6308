//! CustomerInfo - Contact details typed into the order form

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomerInfo {
    pub full_name: String,
    pub phone: String,
}

impl CustomerInfo {
    pub fn new(full_name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            phone: phone.into(),
        }
    }

    pub fn has_full_name(&self) -> bool {
        !self.full_name.trim().is_empty()
    }

    pub fn has_phone(&self) -> bool {
        !self.phone.trim().is_empty()
    }
}
