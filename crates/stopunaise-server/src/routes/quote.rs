//! Quote Routes
//!
//! Prices a selection without persisting anything.

use axum::{extract::State, routing::post, Json, Router};

use crate::application::CheckoutRequest;
use crate::models::{QuoteRequest, QuoteResponse};
use crate::AppState;

use super::error_response;

/// Price a selection and report what is missing before it can be ordered
#[utoipa::path(
    post,
    path = "/storefront/quote",
    request_body = QuoteRequest,
    responses(
        (status = 200, description = "Totals and validation issues", body = QuoteResponse),
        (status = 422, description = "Unknown product")
    ),
    tag = "Checkout"
)]
pub async fn quote(
    State(state): State<AppState>,
    Json(payload): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>, (axum::http::StatusCode, String)> {
    let request = CheckoutRequest::from(payload);
    let quote = state
        .checkout_service
        .quote(&request)
        .map_err(error_response)?;

    Ok(Json(quote.into()))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/storefront/quote", post(quote))
}
