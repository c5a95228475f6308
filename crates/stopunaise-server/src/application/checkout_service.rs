//! Checkout Application Service (Use Case)
//!
//! Prices selections and submits orders. Amounts are always recomputed from
//! the catalog; nothing the client computed is trusted.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};

use stopunaise::{
    build_order, compute_totals, format_order_summary, validate, Catalog, CustomerInfo,
    DomainError, LineItem, MessagingHandoff, OrderDraft, OrderRepository, OrderTotals,
    PricingInput, SubmissionReceipt, ValidationIssue,
};

/// Selections sent by a storefront client
#[derive(Debug, Clone, Default)]
pub struct CheckoutRequest {
    /// Quantity per product id
    pub quantities: HashMap<String, u32>,
    pub accessory_quantity: u32,
    pub municipality: Option<String>,
    pub customer: CustomerInfo,
}

/// Priced selection with its outstanding validation issues
#[derive(Debug, Clone)]
pub struct Quote {
    pub totals: OrderTotals,
    pub issues: Vec<ValidationIssue>,
}

impl Quote {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Application service for checkout operations
pub struct CheckoutService {
    catalog: Arc<Catalog>,
    repo: Arc<dyn OrderRepository>,
    handoff: Arc<dyn MessagingHandoff>,
    in_flight: Mutex<HashSet<String>>,
}

impl CheckoutService {
    pub fn new(
        catalog: Arc<Catalog>,
        repo: Arc<dyn OrderRepository>,
        handoff: Arc<dyn MessagingHandoff>,
    ) -> Self {
        Self {
            catalog,
            repo,
            handoff,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Price a selection without submitting it
    pub fn quote(&self, request: &CheckoutRequest) -> Result<Quote, DomainError> {
        let lines = self.lines(request)?;
        let zone = self.zone(request);

        let totals = compute_totals(&PricingInput {
            lines: &lines,
            accessory_quantity: request.accessory_quantity,
            accessory_unit_price: self.catalog.accessory.unit_price,
            zone,
        });
        let issues = validate(&lines, &request.customer, zone).err().unwrap_or_default();

        Ok(Quote { totals, issues })
    }

    /// Persist the order, then build the summary and the handoff link
    ///
    /// Nothing is summarised or linked unless the order and all its lines
    /// were stored. Overlapping submissions for one phone number are refused.
    pub async fn submit(&self, request: &CheckoutRequest) -> Result<SubmissionReceipt, DomainError> {
        let draft = self.draft(request)?;
        let _slot = self.claim(&draft.customer.phone)?;

        let (order, lines) = build_order(&draft);
        let record = self.repo.place_order(&order, &lines).await?;

        let summary = format_order_summary(&draft);
        let handoff_url = self.handoff.link(&summary);

        tracing::info!(
            order_id = %record.id,
            municipality = %record.municipality,
            total = record.total,
            lines = lines.len(),
            handoff = self.handoff.name(),
            "Order placed"
        );

        Ok(SubmissionReceipt {
            order: record,
            totals: draft.totals,
            summary,
            handoff_url,
        })
    }

    fn draft(&self, request: &CheckoutRequest) -> Result<OrderDraft, DomainError> {
        let lines = self.lines(request)?;
        let zone = self.zone(request);

        validate(&lines, &request.customer, zone).map_err(|issues| {
            DomainError::Validation(
                issues
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", "),
            )
        })?;
        let zone = zone
            .cloned()
            .ok_or_else(|| DomainError::Validation(ValidationIssue::NoMunicipality.to_string()))?;

        let totals = compute_totals(&PricingInput {
            lines: &lines,
            accessory_quantity: request.accessory_quantity,
            accessory_unit_price: self.catalog.accessory.unit_price,
            zone: Some(&zone),
        });

        Ok(OrderDraft {
            customer: request.customer.clone(),
            zone,
            lines: lines.into_iter().filter(LineItem::is_selected).collect(),
            accessory: self.catalog.accessory.clone(),
            accessory_quantity: request.accessory_quantity,
            totals,
        })
    }

    /// Catalog lines carrying the requested quantities
    fn lines(&self, request: &CheckoutRequest) -> Result<Vec<LineItem>, DomainError> {
        if let Some(unknown) = request
            .quantities
            .keys()
            .find(|id| self.catalog.product(id).is_none())
        {
            return Err(DomainError::not_found_str("Product", unknown));
        }

        Ok(self
            .catalog
            .products
            .iter()
            .map(|p| {
                let quantity = request.quantities.get(&p.id).copied().unwrap_or(0);
                LineItem::new(p.clone()).with_quantity(quantity)
            })
            .collect())
    }

    fn zone(&self, request: &CheckoutRequest) -> Option<&stopunaise::DeliveryZone> {
        request
            .municipality
            .as_deref()
            .and_then(|name| self.catalog.zone(name))
    }

    fn claim(&self, phone: &str) -> Result<InFlightSlot<'_>, DomainError> {
        let key = slot_key(phone);
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);

        if !in_flight.insert(key.clone()) {
            return Err(DomainError::Conflict(
                "an order for this phone number is already being submitted".to_string(),
            ));
        }

        Ok(InFlightSlot {
            set: &self.in_flight,
            key,
        })
    }
}

/// Digits of the phone number, or the trimmed number when it has none
fn slot_key(phone: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        phone.trim().to_string()
    } else {
        digits
    }
}

/// Released when the submission finishes, whatever the outcome
struct InFlightSlot<'a> {
    set: &'a Mutex<HashSet<String>>,
    key: String,
}

impl Drop for InFlightSlot<'_> {
    fn drop(&mut self) {
        self.set
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}
