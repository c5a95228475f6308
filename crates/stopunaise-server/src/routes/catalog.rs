//! Catalog Routes

use axum::{extract::State, routing::get, Json, Router};

use crate::models::CatalogResponse;
use crate::AppState;

/// Storefront reference data
#[utoipa::path(
    get,
    path = "/storefront/catalog",
    responses(
        (status = 200, description = "Products, delivery zones and asset URLs", body = CatalogResponse)
    ),
    tag = "Catalog"
)]
pub async fn get_catalog(State(state): State<AppState>) -> Json<CatalogResponse> {
    Json(CatalogResponse::new(
        state.checkout_service.catalog(),
        state.assets.product_image_url.clone(),
        state.assets.logo_url.clone(),
    ))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/storefront/catalog", get(get_catalog))
}
