//! Checkout State Machine
//!
//! The whole storefront form as one value. Every user action is a
//! [`CheckoutEvent`]; [`CheckoutState::apply`] turns the current snapshot and
//! an event into the next snapshot. Totals and validity are projections of
//! the snapshot and are never stored.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::catalog::Catalog;
use crate::domain::entities::{CustomerInfo, DeliveryZone, LineItem, OrderDraft};
use crate::domain::services::{compute_totals, validate, OrderTotals, PricingInput, ValidationIssue};

/// Something the customer did, or the outcome of a submission
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CheckoutEvent {
    IncrementProduct(String),
    DecrementProduct(String),
    IncrementAccessory,
    DecrementAccessory,
    /// `None` or an unknown name clears the selection
    SelectMunicipality(Option<String>),
    SetFullName(String),
    SetPhone(String),
    SubmissionStarted,
    SubmissionFailed(String),
    SubmissionSucceeded,
    DismissConfirmation,
}

/// Snapshot of the storefront form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutState {
    catalog: Arc<Catalog>,
    lines: Vec<LineItem>,
    accessory_quantity: u32,
    zone: Option<DeliveryZone>,
    customer: CustomerInfo,
    in_flight: bool,
    confirmation_shown: bool,
    last_error: Option<String>,
}

impl CheckoutState {
    /// Empty form over the given catalog
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let lines = catalog.products.iter().cloned().map(LineItem::new).collect();
        Self {
            catalog,
            lines,
            accessory_quantity: 0,
            zone: None,
            customer: CustomerInfo::default(),
            in_flight: false,
            confirmation_shown: false,
            last_error: None,
        }
    }

    /// Empty form over the built-in catalog
    pub fn standard() -> Self {
        Self::new(Arc::new(Catalog::standard().clone()))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn quantity(&self, product_id: &str) -> u32 {
        self.lines
            .iter()
            .find(|l| l.product.id == product_id)
            .map_or(0, |l| l.quantity)
    }

    pub fn accessory_quantity(&self) -> u32 {
        self.accessory_quantity
    }

    pub fn zone(&self) -> Option<&DeliveryZone> {
        self.zone.as_ref()
    }

    pub fn customer(&self) -> &CustomerInfo {
        &self.customer
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn is_confirmation_shown(&self) -> bool {
        self.confirmation_shown
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Produce the next snapshot
    pub fn apply(mut self, event: CheckoutEvent) -> Self {
        match event {
            CheckoutEvent::IncrementProduct(id) => {
                if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == id) {
                    line.increment();
                }
            }
            CheckoutEvent::DecrementProduct(id) => {
                if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == id) {
                    line.decrement();
                }
            }
            CheckoutEvent::IncrementAccessory => {
                self.accessory_quantity = self.accessory_quantity.saturating_add(1);
            }
            CheckoutEvent::DecrementAccessory => {
                self.accessory_quantity = self.accessory_quantity.saturating_sub(1);
            }
            CheckoutEvent::SelectMunicipality(name) => {
                self.zone = name.and_then(|n| self.catalog.zone(&n).cloned());
            }
            CheckoutEvent::SetFullName(name) => self.customer.full_name = name,
            CheckoutEvent::SetPhone(phone) => self.customer.phone = phone,
            CheckoutEvent::SubmissionStarted => {
                if self.can_submit() {
                    self.in_flight = true;
                    self.last_error = None;
                }
            }
            CheckoutEvent::SubmissionFailed(message) => {
                self.in_flight = false;
                self.last_error = Some(message);
            }
            CheckoutEvent::SubmissionSucceeded => {
                let mut reset = Self::new(self.catalog);
                reset.confirmation_shown = true;
                return reset;
            }
            CheckoutEvent::DismissConfirmation => self.confirmation_shown = false,
        }
        self
    }

    /// Pricing projection of the current snapshot
    pub fn totals(&self) -> OrderTotals {
        compute_totals(&PricingInput {
            lines: &self.lines,
            accessory_quantity: self.accessory_quantity,
            accessory_unit_price: self.catalog.accessory.unit_price,
            zone: self.zone.as_ref(),
        })
    }

    pub fn validation_issues(&self) -> Vec<ValidationIssue> {
        validate(&self.lines, &self.customer, self.zone.as_ref()).err().unwrap_or_default()
    }

    pub fn is_valid(&self) -> bool {
        validate(&self.lines, &self.customer, self.zone.as_ref()).is_ok()
    }

    /// The submit control is enabled only for a valid form with no submission running
    pub fn can_submit(&self) -> bool {
        self.is_valid() && !self.in_flight
    }

    /// Freeze the form into a draft ready for submission
    pub fn draft(&self) -> Result<OrderDraft, Vec<ValidationIssue>> {
        validate(&self.lines, &self.customer, self.zone.as_ref())?;

        let zone = match &self.zone {
            Some(zone) => zone.clone(),
            None => return Err(vec![ValidationIssue::NoMunicipality]),
        };

        Ok(OrderDraft {
            customer: self.customer.clone(),
            zone,
            lines: self.lines.iter().filter(|l| l.is_selected()).cloned().collect(),
            accessory: self.catalog.accessory.clone(),
            accessory_quantity: self.accessory_quantity,
            totals: self.totals(),
        })
    }
}
