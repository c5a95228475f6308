//! Order Validation
//!
//! An order can be submitted only when a product is selected, both customer
//! fields are filled in, and a municipality is chosen.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{CustomerInfo, DeliveryZone, LineItem};

/// Hint shown next to a disabled submit control
pub const ORDER_INCOMPLETE_HINT: &str = "Veuillez sélectionner au moins un produit, remplir vos informations et choisir une commune de livraison.";

/// A failed submission precondition
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ValidationIssue {
    NoProducts,
    MissingFullName,
    MissingPhone,
    NoMunicipality,
}

impl ValidationIssue {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoProducts => "no_products",
            Self::MissingFullName => "missing_full_name",
            Self::MissingPhone => "missing_phone",
            Self::NoMunicipality => "no_municipality",
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoProducts => write!(f, "no product selected"),
            Self::MissingFullName => write!(f, "full name is required"),
            Self::MissingPhone => write!(f, "phone number is required"),
            Self::NoMunicipality => write!(f, "no delivery municipality selected"),
        }
    }
}

/// Check every submission precondition, collecting all failures.
///
/// The accessory does not count as a product.
pub fn validate(
    lines: &[LineItem],
    customer: &CustomerInfo,
    zone: Option<&DeliveryZone>,
) -> Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    if !lines.iter().any(LineItem::is_selected) {
        issues.push(ValidationIssue::NoProducts);
    }
    if !customer.has_full_name() {
        issues.push(ValidationIssue::MissingFullName);
    }
    if !customer.has_phone() {
        issues.push(ValidationIssue::MissingPhone);
    }
    if zone.is_none() {
        issues.push(ValidationIssue::NoMunicipality);
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Product;
    use crate::domain::value_objects::ZoneClass;

    fn selected() -> Vec<LineItem> {
        vec![LineItem::new(Product::new("100ml", "Sniper DDVP 100ml", "100ml", 2500)).with_quantity(1)]
    }

    fn zone() -> DeliveryZone {
        DeliveryZone::new("Yopougon", ZoneClass::Near, 1500)
    }

    #[test]
    fn test_complete_order_is_valid() {
        let customer = CustomerInfo::new("Awa Koné", "+225 07 00 00 00 00");
        assert!(validate(&selected(), &customer, Some(&zone())).is_ok());
    }

    #[test]
    fn test_whitespace_fields_are_missing() {
        let customer = CustomerInfo::new("   ", "\t");
        let issues = validate(&selected(), &customer, Some(&zone())).unwrap_err();
        assert_eq!(
            issues,
            vec![ValidationIssue::MissingFullName, ValidationIssue::MissingPhone]
        );
    }

    #[test]
    fn test_zero_quantities_block_submission() {
        let lines: Vec<LineItem> = selected().into_iter().map(|l| l.with_quantity(0)).collect();
        let customer = CustomerInfo::new("Awa Koné", "0700000000");
        let issues = validate(&lines, &customer, Some(&zone())).unwrap_err();
        assert_eq!(issues, vec![ValidationIssue::NoProducts]);
    }

    #[test]
    fn test_every_issue_reported() {
        let issues = validate(&[], &CustomerInfo::default(), None).unwrap_err();
        assert_eq!(issues.len(), 4);
        assert!(issues.contains(&ValidationIssue::NoMunicipality));
    }
}
