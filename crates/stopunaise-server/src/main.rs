use axum::{routing::get, Json, Router};
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod adapters;
mod application;
mod config;
mod models;
mod routes;

use adapters::{PgOrderRepository, SupabaseOrderRepository, SupabaseStorage, WhatsAppHandoff};
use application::CheckoutService;
use config::ServerConfig;
use stopunaise::{resolve_or_placeholder, AssetResolver, OrderRepository};

const ASSET_BUCKET: &str = "products";
const PRODUCT_IMAGE_PATH: &str = "sniper_bottle.jpg";
const LOGO_PATH: &str = "logo_stopunaise.png";

/// Public image URLs, resolved once at startup
#[derive(Debug, Clone)]
pub struct AssetUrls {
    pub product_image_url: String,
    pub logo_url: String,
}

impl AssetUrls {
    pub fn resolve(resolver: &dyn AssetResolver) -> Self {
        Self {
            product_image_url: resolve_or_placeholder(resolver, ASSET_BUCKET, PRODUCT_IMAGE_PATH),
            logo_url: resolve_or_placeholder(resolver, ASSET_BUCKET, LOGO_PATH),
        }
    }
}

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub checkout_service: Arc<CheckoutService>,
    pub assets: Arc<AssetUrls>,
}

#[derive(Serialize)]
struct HealthCheck {
    status: String,
    message: String,
    version: String,
}

async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "Stopunaise storefront is taking orders".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

fn build_router(state: AppState) -> Router {
    let openapi = routes::swagger::ApiDoc::openapi();

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(health_check))
        .merge(routes::catalog::router())
        .merge(routes::quote::router())
        .merge(routes::orders::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[shuttle_runtime::main]
async fn main(
    #[shuttle_shared_db::Postgres] pool: PgPool,
    #[shuttle_runtime::Secrets] secrets: shuttle_runtime::SecretStore,
) -> shuttle_axum::ShuttleAxum {
    tracing::info!("🪲 Stopunaise storefront initializing...");

    let config = ServerConfig::from_lookup(|key| secrets.get(key));
    let catalog = Arc::new(config.load_catalog()?);
    tracing::info!(
        products = catalog.products.len(),
        zones = catalog.zones.len(),
        "📦 Catalog loaded"
    );

    // Run migrations
    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("✅ Database migrations completed");

    let repo: Arc<dyn OrderRepository> = match &config.supabase {
        Some(supabase) => {
            tracing::info!(url = %supabase.url, "🗄️  Orders stored through Supabase REST");
            Arc::new(SupabaseOrderRepository::new(supabase.clone()))
        }
        None => {
            tracing::warn!("⚠️  No SUPABASE_URL set - orders stored in Shuttle Postgres, placeholder images");
            Arc::new(PgOrderRepository::new(pool))
        }
    };
    let storage = SupabaseStorage::new(config.supabase.as_ref().map(|s| s.url.clone()));

    let handoff = Arc::new(WhatsAppHandoff::new(&config.whatsapp_phone));
    let checkout_service = Arc::new(CheckoutService::new(catalog, repo, handoff));
    let assets = Arc::new(AssetUrls::resolve(&storage));

    let router = build_router(AppState {
        checkout_service,
        assets,
    });

    tracing::info!("📚 Swagger UI: /swagger-ui");
    tracing::info!("✅ Stopunaise storefront ready");

    Ok(router.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryOrderRepository;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use stopunaise::{Catalog, PLACEHOLDER_IMAGE_URL};
    use tower::ServiceExt;

    fn create_test_app(repo: MemoryOrderRepository) -> Router {
        let checkout_service = Arc::new(CheckoutService::new(
            Arc::new(Catalog::standard().clone()),
            Arc::new(repo),
            Arc::new(WhatsAppHandoff::new(crate::config::DEFAULT_WHATSAPP_PHONE)),
        ));
        build_router(AppState {
            checkout_service,
            assets: Arc::new(AssetUrls::resolve(&SupabaseStorage::new(None))),
        })
    }

    async fn send(
        app: Router,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, Vec<u8>) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => request
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    fn order_body() -> serde_json::Value {
        serde_json::json!({
            "quantities": { "100ml": 2, "250ml": 1 },
            "accessory_quantity": 0,
            "municipality": "Koumassi",
            "full_name": "Awa Koné",
            "phone": "0700000000"
        })
    }

    #[tokio::test]
    async fn test_health_check() {
        let (status, body) =
            send(create_test_app(MemoryOrderRepository::new()), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_catalog_uses_placeholder_without_storage() {
        let (status, body) = send(
            create_test_app(MemoryOrderRepository::new()),
            "GET",
            "/storefront/catalog",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["product_image_url"], PLACEHOLDER_IMAGE_URL);
        assert_eq!(json["logo_url"], PLACEHOLDER_IMAGE_URL);
        assert_eq!(json["products"].as_array().unwrap().len(), 2);
        assert_eq!(json["free_delivery_threshold_ml"], 500);
    }

    #[tokio::test]
    async fn test_quote_reference_scenario() {
        let body = serde_json::json!({
            "quantities": { "100ml": 2, "250ml": 1 },
            "municipality": "Treichville"
        });
        let (status, body) = send(
            create_test_app(MemoryOrderRepository::new()),
            "POST",
            "/storefront/quote",
            Some(body),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["totals"]["subtotal"], 11000);
        assert_eq!(json["totals"]["total_volume_ml"], 450);
        assert_eq!(json["totals"]["total"], 12500);
        assert_eq!(json["valid"], false);
        assert_eq!(json["issues"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_quote_unknown_product() {
        let body = serde_json::json!({ "quantities": { "5l": 1 } });
        let (status, _) = send(
            create_test_app(MemoryOrderRepository::new()),
            "POST",
            "/storefront/quote",
            Some(body),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_order_returns_receipt() {
        let (status, body) = send(
            create_test_app(MemoryOrderRepository::new()),
            "POST",
            "/storefront/orders",
            Some(order_body()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["totals"]["total"], 12500);
        assert!(json["handoff_url"]
            .as_str()
            .unwrap()
            .starts_with("https://wa.me/+2250556520604?text="));
        assert!(json["summary"].as_str().unwrap().contains("Koumassi"));
        assert_eq!(json["confirmation_title"], "Merci pour votre commande !");
    }

    #[tokio::test]
    async fn test_incomplete_order_is_unprocessable() {
        let mut body = order_body();
        body["full_name"] = serde_json::json!("  ");
        let (status, _) = send(
            create_test_app(MemoryOrderRepository::new()),
            "POST",
            "/storefront/orders",
            Some(body),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_store_failure_is_bad_gateway() {
        let (status, _) = send(
            create_test_app(MemoryOrderRepository::new().failing_lines()),
            "POST",
            "/storefront/orders",
            Some(order_body()),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_openapi_document() {
        let (status, body) = send(
            create_test_app(MemoryOrderRepository::new()),
            "GET",
            "/api-docs/openapi.json",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json["paths"]["/storefront/orders"].is_object());
    }
}
