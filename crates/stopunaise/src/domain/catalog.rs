//! Reference Catalog
//!
//! Products, municipalities and the accessory offered by the storefront.
//! Built once per process; overrides can be loaded from TOML.

use std::collections::HashSet;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Accessory, DeliveryZone, Product};
use crate::domain::errors::DomainError;
use crate::domain::value_objects::ZoneClass;

static STANDARD: LazyLock<Catalog> = LazyLock::new(Catalog::builtin);

const NEAR_FEE: u64 = 1500;
const OUTLYING_FEE: u64 = 2000;
const FAR_FEE: u64 = 3000;

const NEAR_MUNICIPALITIES: [&str; 10] = [
    "Abobo",
    "Adjamé",
    "Attécoubé",
    "Cocody",
    "Koumassi",
    "Marcory",
    "Le Plateau",
    "Port-Bouët",
    "Treichville",
    "Yopougon",
];
const OUTLYING_MUNICIPALITIES: [&str; 3] = ["Anyama", "Bingerville", "Songon"];
const FAR_MUNICIPALITIES: [&str; 1] = ["Autres communes (Hors Abidjan)"];

/// Immutable storefront reference data
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Catalog {
    pub products: Vec<Product>,
    pub zones: Vec<DeliveryZone>,
    #[serde(default)]
    pub accessory: Accessory,
}

impl Catalog {
    /// Process-wide default catalog
    pub fn standard() -> &'static Catalog {
        &STANDARD
    }

    fn builtin() -> Self {
        let products = vec![
            Product::new("100ml", "Sniper DDVP 100ml", "100ml", 2500),
            Product::new("250ml", "Sniper DDVP 250ml", "250ml", 6000),
        ];

        let zones = NEAR_MUNICIPALITIES
            .iter()
            .map(|name| DeliveryZone::new(*name, ZoneClass::Near, NEAR_FEE))
            .chain(
                OUTLYING_MUNICIPALITIES
                    .iter()
                    .map(|name| DeliveryZone::new(*name, ZoneClass::Outlying, OUTLYING_FEE)),
            )
            .chain(
                FAR_MUNICIPALITIES
                    .iter()
                    .map(|name| DeliveryZone::new(*name, ZoneClass::Far, FAR_FEE)),
            )
            .collect();

        Self {
            products,
            zones,
            accessory: Accessory::dosing_kit(),
        }
    }

    /// Parse and check a catalog written in TOML
    pub fn from_toml_str(content: &str) -> Result<Self, DomainError> {
        let catalog: Catalog =
            toml::from_str(content).map_err(|e| DomainError::Catalog(e.to_string()))?;
        catalog.check()?;
        Ok(catalog)
    }

    /// Reject empty product lists and duplicate keys
    pub fn check(&self) -> Result<(), DomainError> {
        if self.products.is_empty() {
            return Err(DomainError::Catalog("catalog has no products".to_string()));
        }

        let mut ids = HashSet::new();
        for product in &self.products {
            if !ids.insert(product.id.as_str()) {
                return Err(DomainError::Catalog(format!(
                    "duplicate product id: {}",
                    product.id
                )));
            }
        }

        let mut names = HashSet::new();
        for zone in &self.zones {
            if !names.insert(zone.name.as_str()) {
                return Err(DomainError::Catalog(format!(
                    "duplicate municipality: {}",
                    zone.name
                )));
            }
        }

        Ok(())
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Look up a municipality by its exact name
    pub fn zone(&self, name: &str) -> Option<&DeliveryZone> {
        self.zones.iter().find(|z| z.name == name)
    }

    pub fn zones_by_class(&self, class: ZoneClass) -> impl Iterator<Item = &DeliveryZone> {
        self.zones.iter().filter(move |z| z.class == class)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard().clone()
    }
}
