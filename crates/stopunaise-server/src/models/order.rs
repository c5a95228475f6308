//! Quote and Order DTOs

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use stopunaise::{
    CustomerInfo, OrderTotals, SubmissionReceipt, ValidationIssue, CONFIRMATION_MESSAGE,
    CONFIRMATION_TITLE, ORDER_INCOMPLETE_HINT,
};

use crate::application::{CheckoutRequest, Quote};

// ============================================
// Request DTOs
// ============================================

/// Price a selection; customer fields are optional
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct QuoteRequest {
    /// Quantity per product id
    #[serde(default)]
    pub quantities: HashMap<String, u32>,
    #[serde(default)]
    pub accessory_quantity: u32,
    pub municipality: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
}

impl From<QuoteRequest> for CheckoutRequest {
    fn from(req: QuoteRequest) -> Self {
        Self {
            quantities: req.quantities,
            accessory_quantity: req.accessory_quantity,
            municipality: req.municipality,
            customer: CustomerInfo::new(
                req.full_name.unwrap_or_default(),
                req.phone.unwrap_or_default(),
            ),
        }
    }
}

/// Place an order
#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderRequest {
    pub quantities: HashMap<String, u32>,
    #[serde(default)]
    pub accessory_quantity: u32,
    pub municipality: String,
    pub full_name: String,
    pub phone: String,
}

impl From<OrderRequest> for CheckoutRequest {
    fn from(req: OrderRequest) -> Self {
        Self {
            quantities: req.quantities,
            accessory_quantity: req.accessory_quantity,
            municipality: Some(req.municipality),
            customer: CustomerInfo::new(req.full_name, req.phone),
        }
    }
}

// ============================================
// Response DTOs
// ============================================

/// Amounts in CFA
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TotalsDto {
    pub subtotal: u64,
    pub accessory_cost: u64,
    pub delivery_fee: u64,
    pub total: u64,
    pub total_volume_ml: u64,
    pub free_delivery: bool,
}

impl From<OrderTotals> for TotalsDto {
    fn from(totals: OrderTotals) -> Self {
        Self {
            subtotal: totals.subtotal,
            accessory_cost: totals.accessory_cost,
            delivery_fee: totals.delivery_fee,
            total: totals.total,
            total_volume_ml: totals.total_volume_ml,
            free_delivery: totals.free_delivery,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IssueDto {
    pub code: String,
    pub message: String,
}

impl From<&ValidationIssue> for IssueDto {
    fn from(issue: &ValidationIssue) -> Self {
        Self {
            code: issue.code().to_string(),
            message: issue.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QuoteResponse {
    pub totals: TotalsDto,
    /// True when the selection could be submitted as is
    pub valid: bool,
    pub issues: Vec<IssueDto>,
    /// Customer-facing hint, present while the selection is incomplete
    pub hint: Option<String>,
}

impl From<Quote> for QuoteResponse {
    fn from(quote: Quote) -> Self {
        let valid = quote.is_valid();
        Self {
            totals: quote.totals.into(),
            valid,
            issues: quote.issues.iter().map(IssueDto::from).collect(),
            hint: (!valid).then(|| ORDER_INCOMPLETE_HINT.to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    pub order_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub totals: TotalsDto,
    /// Plain-text summary sent to the fulfillment team
    pub summary: String,
    /// Messaging deep link carrying the summary
    pub handoff_url: String,
    pub confirmation_title: String,
    pub confirmation_message: String,
}

impl From<SubmissionReceipt> for OrderResponse {
    fn from(receipt: SubmissionReceipt) -> Self {
        Self {
            order_id: receipt.order.id,
            created_at: receipt.order.created_at,
            totals: receipt.totals.into(),
            summary: receipt.summary,
            handoff_url: receipt.handoff_url,
            confirmation_title: CONFIRMATION_TITLE.to_string(),
            confirmation_message: CONFIRMATION_MESSAGE.to_string(),
        }
    }
}
