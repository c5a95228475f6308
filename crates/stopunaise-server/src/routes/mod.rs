//! Storefront API Routes
//!
//! - /storefront/catalog - Products, municipalities and assets
//! - /storefront/quote - Price a selection
//! - /storefront/orders - Place an order

use axum::http::StatusCode;

use stopunaise::DomainError;

pub mod catalog;
pub mod orders;
pub mod quote;
pub mod swagger;

/// Map a domain error onto the HTTP error tuple returned by handlers
pub fn error_response(err: DomainError) -> (StatusCode, String) {
    let status = match &err {
        DomainError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DomainError::NotFound { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Repository(_) | DomainError::ExternalService(_) => StatusCode::BAD_GATEWAY,
        DomainError::Catalog(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        tracing::error!(error = %err, "Request failed");
    }

    (status, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_statuses() {
        assert_eq!(
            error_response(DomainError::Validation("x".into())).0,
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            error_response(DomainError::not_found_str("Product", "5l")).0,
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            error_response(DomainError::Conflict("x".into())).0,
            StatusCode::CONFLICT
        );
        assert_eq!(
            error_response(DomainError::Repository("x".into())).0,
            StatusCode::BAD_GATEWAY
        );
    }
}
