//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use crate::models::{
    // Catalog models
    AccessoryDto,
    CatalogResponse,
    IssueDto,
    // Order models
    OrderRequest,
    OrderResponse,
    ProductDto,
    QuoteRequest,
    QuoteResponse,
    TotalsDto,
    ZoneDto,
    ZoneGroupDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::catalog::get_catalog,
        super::quote::quote,
        super::orders::create_order,
    ),
    info(
        title = "Stopunaise Storefront API",
        version = "0.1.0",
        description = "Order Sniper DDVP for delivery in Abidjan and beyond.\n\nPrices selections, stores orders and hands them off over WhatsApp.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Catalog", description = "Products, municipalities and assets"),
        (name = "Checkout", description = "Quotes and order submission"),
    ),
    components(
        schemas(
            // Catalog
            ProductDto,
            ZoneDto,
            ZoneGroupDto,
            AccessoryDto,
            CatalogResponse,
            // Checkout
            QuoteRequest,
            QuoteResponse,
            IssueDto,
            TotalsDto,
            OrderRequest,
            OrderResponse,
        )
    ),
)]
pub struct ApiDoc;
