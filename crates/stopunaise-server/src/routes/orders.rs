//! Order Routes
//!
//! HTTP handlers that delegate to CheckoutService for submission.

use axum::{extract::State, routing::post, Json, Router};

use crate::application::CheckoutRequest;
use crate::models::{OrderRequest, OrderResponse};
use crate::AppState;

use super::error_response;

/// Place an order
///
/// Stores the order and its lines, then returns the summary and the
/// messaging link. Nothing is returned unless both writes succeeded.
#[utoipa::path(
    post,
    path = "/storefront/orders",
    request_body = OrderRequest,
    responses(
        (status = 200, description = "Order stored", body = OrderResponse),
        (status = 409, description = "An order for this phone number is already being submitted"),
        (status = 422, description = "Incomplete order or unknown product"),
        (status = 502, description = "Order store failure")
    ),
    tag = "Checkout"
)]
pub async fn create_order(
    State(state): State<AppState>,
    Json(payload): Json<OrderRequest>,
) -> Result<Json<OrderResponse>, (axum::http::StatusCode, String)> {
    let request = CheckoutRequest::from(payload);
    let receipt = state
        .checkout_service
        .submit(&request)
        .await
        .map_err(error_response)?;

    Ok(Json(receipt.into()))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/storefront/orders", post(create_order))
}
