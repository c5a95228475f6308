//! Stopunaise Storefront API Client

use anyhow::{bail, Context, Result};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use uuid::Uuid;

use stopunaise::{Accessory, Catalog, DeliveryZone, OrderDraft, OrderTotals, Product, ZoneClass};

/// API Client for the storefront server
pub struct StorefrontClient {
    client: Client,
    base_url: String,
}

// ============================================
// API Response Types
// ============================================

#[derive(Debug, Deserialize)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub volume: String,
    pub price: u64,
}

#[derive(Debug, Deserialize)]
pub struct ZoneResponse {
    pub name: String,
    pub fee: u64,
}

#[derive(Debug, Deserialize)]
pub struct ZoneGroupResponse {
    pub class: String,
    pub label: String,
    pub zones: Vec<ZoneResponse>,
}

#[derive(Debug, Deserialize)]
pub struct AccessoryResponse {
    pub name: String,
    pub unit_price: u64,
}

#[derive(Debug, Deserialize)]
pub struct CatalogResponse {
    pub products: Vec<ProductResponse>,
    pub zone_groups: Vec<ZoneGroupResponse>,
    pub accessory: AccessoryResponse,
    pub product_image_url: String,
    pub logo_url: String,
}

impl CatalogResponse {
    /// Rebuild the domain catalog the checkout form runs on
    pub fn to_catalog(&self) -> Result<Catalog> {
        let products = self
            .products
            .iter()
            .map(|p| Product::new(&p.id, &p.name, &p.volume, p.price))
            .collect();

        let mut zones = Vec::new();
        for group in &self.zone_groups {
            let class: ZoneClass = group.class.parse().map_err(anyhow::Error::msg)?;
            zones.extend(
                group
                    .zones
                    .iter()
                    .map(|z| DeliveryZone::new(&z.name, class, z.fee)),
            );
        }

        let catalog = Catalog {
            products,
            zones,
            accessory: Accessory {
                name: self.accessory.name.clone(),
                unit_price: self.accessory.unit_price,
            },
        };
        catalog.check().context("Server returned an invalid catalog")?;
        Ok(catalog)
    }
}

#[derive(Debug, Deserialize)]
pub struct IssueResponse {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct QuoteResponse {
    pub totals: OrderTotals,
    pub valid: bool,
    pub issues: Vec<IssueResponse>,
    pub hint: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OrderResponse {
    pub order_id: Uuid,
    pub totals: OrderTotals,
    pub summary: String,
    pub handoff_url: String,
    pub confirmation_title: String,
    pub confirmation_message: String,
}

// ============================================
// API Request Types
// ============================================

#[derive(Debug, Default, Serialize)]
pub struct QuoteRequest {
    pub quantities: HashMap<String, u32>,
    pub accessory_quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub municipality: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OrderRequest {
    pub quantities: HashMap<String, u32>,
    pub accessory_quantity: u32,
    pub municipality: String,
    pub full_name: String,
    pub phone: String,
}

impl From<&OrderDraft> for OrderRequest {
    fn from(draft: &OrderDraft) -> Self {
        Self {
            quantities: draft
                .lines
                .iter()
                .map(|l| (l.product.id.clone(), l.quantity))
                .collect(),
            accessory_quantity: draft.accessory_quantity,
            municipality: draft.zone.name.clone(),
            full_name: draft.customer.full_name.clone(),
            phone: draft.customer.phone.clone(),
        }
    }
}

impl StorefrontClient {
    /// Create a new API client
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("stopunaise-cli/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Test connection with health check
    pub async fn health(&self) -> Result<bool> {
        let url = format!("{}/health", self.base_url);
        let resp = self.client.get(&url).send().await?;
        Ok(resp.status().is_success())
    }

    /// Fetch products, municipalities and asset URLs
    pub async fn catalog(&self) -> Result<CatalogResponse> {
        let url = format!("{}/storefront/catalog", self.base_url);
        tracing::debug!(%url, "Fetching catalog");

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to connect to storefront API")?;

        check(resp)
            .await?
            .json()
            .await
            .context("Failed to parse catalog")
    }

    /// Price a selection
    pub async fn quote(&self, request: &QuoteRequest) -> Result<QuoteResponse> {
        let url = format!("{}/storefront/quote", self.base_url);
        tracing::debug!(%url, "Requesting quote");

        let resp = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .context("Failed to connect to storefront API")?;

        check(resp)
            .await?
            .json()
            .await
            .context("Failed to parse quote")
    }

    /// Submit an order
    pub async fn submit_order(&self, request: &OrderRequest) -> Result<OrderResponse> {
        let url = format!("{}/storefront/orders", self.base_url);
        tracing::debug!(%url, municipality = %request.municipality, "Submitting order");

        let resp = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .context("Failed to connect to storefront API")?;

        check(resp)
            .await?
            .json()
            .await
            .context("Failed to parse order receipt")
    }
}

async fn check(resp: Response) -> Result<Response> {
    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        bail!("API error ({}): {}", status, body);
    }
    Ok(resp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stopunaise::{CheckoutEvent, CheckoutState};
    use std::sync::Arc;

    fn catalog_json() -> serde_json::Value {
        serde_json::json!({
            "products": [
                { "id": "100ml", "name": "Sniper DDVP 100ml", "volume": "100ml", "volume_ml": 100, "price": 2500 },
                { "id": "250ml", "name": "Sniper DDVP 250ml", "volume": "250ml", "volume_ml": 250, "price": 6000 }
            ],
            "zone_groups": [
                { "class": "near", "label": "Abidjan", "zones": [{ "name": "Cocody", "fee": 1500 }] },
                { "class": "far", "label": "Hors Abidjan", "zones": [{ "name": "Autres communes (Hors Abidjan)", "fee": 3000 }] }
            ],
            "accessory": { "name": "Kit de dosage", "unit_price": 1000 },
            "free_delivery_threshold_ml": 500,
            "product_image_url": "https://via.placeholder.com/200x200?text=Sniper+DDVP",
            "logo_url": "https://via.placeholder.com/200x200?text=Sniper+DDVP"
        })
    }

    #[test]
    fn test_catalog_response_to_catalog() {
        let response: CatalogResponse = serde_json::from_value(catalog_json()).unwrap();
        let catalog = response.to_catalog().unwrap();

        assert_eq!(catalog.products.len(), 2);
        assert_eq!(catalog.zone("Cocody").map(|z| z.class), Some(ZoneClass::Near));
        assert_eq!(
            catalog.zone("Autres communes (Hors Abidjan)").map(|z| z.fee),
            Some(3000)
        );
        assert_eq!(catalog.accessory, Accessory::dosing_kit());
        assert_eq!(response.logo_url, stopunaise::PLACEHOLDER_IMAGE_URL);
    }

    #[test]
    fn test_quote_response_carries_hint() {
        let response: QuoteResponse = serde_json::from_value(serde_json::json!({
            "totals": {
                "subtotal": 2500, "accessory_cost": 0, "delivery_fee": 0,
                "total": 2500, "total_volume_ml": 100, "free_delivery": false
            },
            "valid": false,
            "issues": [{ "code": "no_municipality", "message": "no delivery municipality selected" }],
            "hint": stopunaise::ORDER_INCOMPLETE_HINT
        }))
        .unwrap();

        assert!(!response.valid);
        assert_eq!(response.issues[0].code, "no_municipality");
        assert_eq!(response.hint.as_deref(), Some(stopunaise::ORDER_INCOMPLETE_HINT));
    }

    #[test]
    fn test_unknown_zone_class_is_rejected() {
        let mut json = catalog_json();
        json["zone_groups"][0]["class"] = serde_json::json!("moon");
        let response: CatalogResponse = serde_json::from_value(json).unwrap();
        assert!(response.to_catalog().is_err());
    }

    #[test]
    fn test_order_request_from_draft() {
        let response: CatalogResponse = serde_json::from_value(catalog_json()).unwrap();
        let state = CheckoutState::new(Arc::new(response.to_catalog().unwrap()))
            .apply(CheckoutEvent::IncrementProduct("250ml".into()))
            .apply(CheckoutEvent::IncrementProduct("250ml".into()))
            .apply(CheckoutEvent::IncrementAccessory)
            .apply(CheckoutEvent::SelectMunicipality(Some("Cocody".into())))
            .apply(CheckoutEvent::SetFullName("Awa Koné".into()))
            .apply(CheckoutEvent::SetPhone("0700000000".into()));

        let request = OrderRequest::from(&state.draft().unwrap());
        assert_eq!(request.quantities.len(), 1);
        assert_eq!(request.quantities.get("250ml"), Some(&2));
        assert_eq!(request.accessory_quantity, 1);
        assert_eq!(request.municipality, "Cocody");
        assert_eq!(request.full_name, "Awa Koné");
    }

    #[test]
    fn test_order_response_parses() {
        let response: OrderResponse = serde_json::from_value(serde_json::json!({
            "order_id": "6f1c1f0e-8a53-4c5e-9a43-1d2f0b7d3c11",
            "created_at": "2026-10-17T09:30:00Z",
            "totals": {
                "subtotal": 12000, "accessory_cost": 1000, "delivery_fee": 0,
                "total": 13000, "total_volume_ml": 500, "free_delivery": true
            },
            "summary": "🛒 NOUVELLE COMMANDE",
            "handoff_url": "https://wa.me/+2250556520604?text=x",
            "confirmation_title": "Merci pour votre commande !",
            "confirmation_message": "..."
        }))
        .unwrap();

        assert!(response.totals.free_delivery);
        assert_eq!(response.totals.total, 13000);
    }
}
