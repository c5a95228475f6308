//! Catalog DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use stopunaise::{Accessory, Catalog, DeliveryZone, Product, ZoneClass, FREE_DELIVERY_THRESHOLD_ML};

/// Product offered for sale
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductDto {
    pub id: String,
    pub name: String,
    /// Volume label, e.g. "250ml"
    pub volume: String,
    pub volume_ml: u64,
    /// Unit price in CFA
    pub price: u64,
}

impl From<&Product> for ProductDto {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            volume: product.volume.clone(),
            volume_ml: product.volume_ml(),
            price: product.price,
        }
    }
}

/// Municipality with its delivery fee
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ZoneDto {
    pub name: String,
    pub fee: u64,
}

impl From<&DeliveryZone> for ZoneDto {
    fn from(zone: &DeliveryZone) -> Self {
        Self {
            name: zone.name.clone(),
            fee: zone.fee,
        }
    }
}

/// Municipalities sharing a zone class
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ZoneGroupDto {
    /// near, outlying or far
    pub class: String,
    pub label: String,
    pub zones: Vec<ZoneDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AccessoryDto {
    pub name: String,
    pub unit_price: u64,
}

impl From<&Accessory> for AccessoryDto {
    fn from(accessory: &Accessory) -> Self {
        Self {
            name: accessory.name.clone(),
            unit_price: accessory.unit_price,
        }
    }
}

/// Everything a storefront needs to render the order form
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CatalogResponse {
    pub products: Vec<ProductDto>,
    pub zone_groups: Vec<ZoneGroupDto>,
    pub accessory: AccessoryDto,
    pub free_delivery_threshold_ml: u64,
    pub product_image_url: String,
    pub logo_url: String,
}

impl CatalogResponse {
    pub fn new(catalog: &Catalog, product_image_url: String, logo_url: String) -> Self {
        let zone_groups = ZoneClass::ALL
            .iter()
            .map(|class| ZoneGroupDto {
                class: class.to_string(),
                label: class.label().to_string(),
                zones: catalog.zones_by_class(*class).map(ZoneDto::from).collect(),
            })
            .filter(|group| !group.zones.is_empty())
            .collect();

        Self {
            products: catalog.products.iter().map(ProductDto::from).collect(),
            zone_groups,
            accessory: AccessoryDto::from(&catalog.accessory),
            free_delivery_threshold_ml: FREE_DELIVERY_THRESHOLD_ML,
            product_image_url,
            logo_url,
        }
    }
}
