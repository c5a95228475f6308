//! Supabase Adapters
//!
//! Order store over the Supabase REST (PostgREST) API and public URL
//! resolution for Supabase Storage.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

use stopunaise::{
    AssetResolver, DomainError, NewOrder, OrderLineRecord, OrderRecord, OrderRepository,
};

use crate::config::SupabaseConfig;

const ORDERS_TABLE: &str = "orders";
const ORDER_ITEMS_TABLE: &str = "order_items";

/// Supabase REST implementation of OrderRepository
///
/// Uses the trait's default `place_order`: two writes, with the order
/// deleted again if its lines cannot be stored.
pub struct SupabaseOrderRepository {
    client: Client,
    config: SupabaseConfig,
}

#[derive(Debug, Serialize)]
struct OrderInsert<'a> {
    full_name: &'a str,
    phone: &'a str,
    municipality: &'a str,
    total: u64,
}

#[derive(Debug, Serialize)]
struct OrderItemInsert<'a> {
    order_id: Uuid,
    product_name: &'a str,
    quantity: u32,
    price: u64,
}

#[derive(Debug, Deserialize)]
struct OrderRow {
    id: Uuid,
    full_name: String,
    phone: String,
    municipality: String,
    total: u64,
    created_at: DateTime<Utc>,
}

impl From<OrderRow> for OrderRecord {
    fn from(row: OrderRow) -> Self {
        Self {
            id: row.id,
            full_name: row.full_name,
            phone: row.phone,
            municipality: row.municipality,
            total: row.total,
            created_at: row.created_at,
        }
    }
}

impl SupabaseOrderRepository {
    pub fn new(config: SupabaseConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Stopunaise-Storefront/0.1")
            .build()
            .expect("Failed to build HTTP client");

        Self { client, config }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.config.url, table)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.config.anon_key)
            .header("Authorization", format!("Bearer {}", self.config.anon_key))
    }

    async fn send(&self, request: RequestBuilder, table: &str) -> Result<Response, DomainError> {
        let resp = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| DomainError::Repository(format!("{table}: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::Repository(format!(
                "{table}: API error ({status}): {body}"
            )));
        }

        Ok(resp)
    }
}

#[async_trait]
impl OrderRepository for SupabaseOrderRepository {
    async fn create_order(&self, order: &NewOrder) -> Result<OrderRecord, DomainError> {
        tracing::debug!(municipality = %order.municipality, total = order.total, "Inserting order");

        let body = [OrderInsert {
            full_name: &order.full_name,
            phone: &order.phone,
            municipality: &order.municipality,
            total: order.total,
        }];

        let request = self
            .client
            .post(self.table_url(ORDERS_TABLE))
            .header("Prefer", "return=representation")
            .json(&body);

        let rows: Vec<OrderRow> = self
            .send(request, ORDERS_TABLE)
            .await?
            .json()
            .await
            .map_err(|e| DomainError::Repository(format!("{ORDERS_TABLE}: {e}")))?;

        rows.into_iter()
            .next()
            .map(Into::into)
            .ok_or_else(|| DomainError::Repository(format!("{ORDERS_TABLE}: no row returned")))
    }

    async fn insert_lines(&self, lines: &[OrderLineRecord]) -> Result<(), DomainError> {
        if lines.is_empty() {
            return Ok(());
        }
        tracing::debug!(count = lines.len(), "Inserting order lines");

        let body: Vec<OrderItemInsert<'_>> = lines
            .iter()
            .map(|l| OrderItemInsert {
                order_id: l.order_id,
                product_name: &l.product_name,
                quantity: l.quantity,
                price: l.unit_price,
            })
            .collect();

        let request = self
            .client
            .post(self.table_url(ORDER_ITEMS_TABLE))
            .header("Prefer", "return=minimal")
            .json(&body);

        self.send(request, ORDER_ITEMS_TABLE).await?;
        Ok(())
    }

    async fn delete_order(&self, id: Uuid) -> Result<bool, DomainError> {
        let request = self
            .client
            .delete(self.table_url(ORDERS_TABLE))
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation");

        let rows: Vec<serde_json::Value> = self
            .send(request, ORDERS_TABLE)
            .await?
            .json()
            .await
            .map_err(|e| DomainError::Repository(format!("{ORDERS_TABLE}: {e}")))?;

        Ok(!rows.is_empty())
    }
}

/// Supabase Storage implementation of AssetResolver
///
/// Without a project URL every lookup fails, which callers turn into the
/// placeholder image.
pub struct SupabaseStorage {
    base_url: Option<String>,
}

impl SupabaseStorage {
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            base_url: base_url.map(|u| u.trim_end_matches('/').to_string()),
        }
    }
}

impl AssetResolver for SupabaseStorage {
    fn public_url(&self, bucket: &str, path: &str) -> Result<String, DomainError> {
        let base = self
            .base_url
            .as_deref()
            .ok_or_else(|| DomainError::ExternalService("storage is not configured".to_string()))?;

        if bucket.is_empty() || path.trim_matches('/').is_empty() {
            return Err(DomainError::Validation(format!(
                "invalid asset location: {bucket}/{path}"
            )));
        }

        let encoded_path = path
            .trim_matches('/')
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");

        Ok(format!(
            "{}/storage/v1/object/public/{}/{}",
            base,
            urlencoding::encode(bucket),
            encoded_path
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_url() {
        let storage = SupabaseStorage::new(Some("https://abc.supabase.co/".to_string()));
        assert_eq!(
            storage.public_url("products", "sniper_bottle.jpg").unwrap(),
            "https://abc.supabase.co/storage/v1/object/public/products/sniper_bottle.jpg"
        );
        assert_eq!(
            storage.public_url("products", "/logos/logo stopunaise.png").unwrap(),
            "https://abc.supabase.co/storage/v1/object/public/products/logos/logo%20stopunaise.png"
        );
    }

    #[test]
    fn test_unconfigured_storage_fails() {
        let storage = SupabaseStorage::new(None);
        assert!(storage.public_url("products", "logo_stopunaise.png").is_err());
        assert_eq!(
            stopunaise::resolve_or_placeholder(&storage, "products", "logo_stopunaise.png"),
            stopunaise::PLACEHOLDER_IMAGE_URL
        );
    }

    #[test]
    fn test_empty_path_fails() {
        let storage = SupabaseStorage::new(Some("https://abc.supabase.co".to_string()));
        assert!(storage.public_url("products", "/").is_err());
    }

    #[test]
    fn test_order_row_deserializes() {
        let rows: Vec<OrderRow> = serde_json::from_value(serde_json::json!([{
            "id": "6f1c1f0e-8a53-4c5e-9a43-1d2f0b7d3c11",
            "full_name": "Awa Koné",
            "phone": "0700000000",
            "municipality": "Abobo",
            "total": 12500,
            "created_at": "2026-10-17T09:30:00+00:00"
        }]))
        .unwrap();

        let record: OrderRecord = rows.into_iter().next().unwrap().into();
        assert_eq!(record.total, 12500);
        assert_eq!(record.municipality, "Abobo");
    }

    #[test]
    fn test_request_urls() {
        let repo = SupabaseOrderRepository::new(SupabaseConfig {
            url: "https://abc.supabase.co".to_string(),
            anon_key: "anon".to_string(),
        });
        assert_eq!(
            repo.table_url(ORDER_ITEMS_TABLE),
            "https://abc.supabase.co/rest/v1/order_items"
        );
    }
}
