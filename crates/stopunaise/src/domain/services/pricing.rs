//! Pricing Engine
//!
//! Derives every amount shown at checkout from the current selections.
//! Totals are never stored; callers recompute them after each change.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{DeliveryZone, LineItem};

/// Total selected volume at which delivery becomes free
pub const FREE_DELIVERY_THRESHOLD_ML: u64 = 500;

/// Derived order amounts, in CFA francs
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderTotals {
    pub subtotal: u64,
    pub accessory_cost: u64,
    pub delivery_fee: u64,
    pub total: u64,
    pub total_volume_ml: u64,
    pub free_delivery: bool,
}

/// Everything the pricing engine looks at
#[derive(Debug, Clone, Copy)]
pub struct PricingInput<'a> {
    pub lines: &'a [LineItem],
    pub accessory_quantity: u32,
    pub accessory_unit_price: u64,
    pub zone: Option<&'a DeliveryZone>,
}

/// Compute order totals.
///
/// Delivery is free once the selected volume reaches
/// [`FREE_DELIVERY_THRESHOLD_ML`], whatever the zone; without a zone the fee is zero.
pub fn compute_totals(input: &PricingInput<'_>) -> OrderTotals {
    let subtotal = input
        .lines
        .iter()
        .fold(0u64, |sum, line| sum.saturating_add(line.line_total()));

    let accessory_cost = input
        .accessory_unit_price
        .saturating_mul(u64::from(input.accessory_quantity));

    let total_volume_ml = input
        .lines
        .iter()
        .fold(0u64, |sum, line| sum.saturating_add(line.volume_ml()));

    let free_delivery = total_volume_ml >= FREE_DELIVERY_THRESHOLD_ML;

    let delivery_fee = match input.zone {
        Some(zone) if !free_delivery => zone.fee,
        _ => 0,
    };

    let total = subtotal
        .saturating_add(accessory_cost)
        .saturating_add(delivery_fee);

    OrderTotals {
        subtotal,
        accessory_cost,
        delivery_fee,
        total,
        total_volume_ml,
        free_delivery,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Product;
    use crate::domain::value_objects::ZoneClass;

    fn lines(q100: u32, q250: u32) -> Vec<LineItem> {
        vec![
            LineItem::new(Product::new("100ml", "Sniper DDVP 100ml", "100ml", 2500))
                .with_quantity(q100),
            LineItem::new(Product::new("250ml", "Sniper DDVP 250ml", "250ml", 6000))
                .with_quantity(q250),
        ]
    }

    fn cocody() -> DeliveryZone {
        DeliveryZone::new("Cocody", ZoneClass::Near, 1500)
    }

    #[test]
    fn test_paid_delivery_below_threshold() {
        let lines = lines(2, 1);
        let zone = cocody();
        let totals = compute_totals(&PricingInput {
            lines: &lines,
            accessory_quantity: 0,
            accessory_unit_price: 1000,
            zone: Some(&zone),
        });

        assert_eq!(totals.subtotal, 11000);
        assert_eq!(totals.total_volume_ml, 450);
        assert!(!totals.free_delivery);
        assert_eq!(totals.delivery_fee, 1500);
        assert_eq!(totals.total, 12500);
    }

    #[test]
    fn test_free_delivery_at_threshold() {
        let lines = lines(0, 2);
        let zone = DeliveryZone::new("Autres communes (Hors Abidjan)", ZoneClass::Far, 3000);
        let totals = compute_totals(&PricingInput {
            lines: &lines,
            accessory_quantity: 1,
            accessory_unit_price: 1000,
            zone: Some(&zone),
        });

        assert_eq!(totals.total_volume_ml, 500);
        assert!(totals.free_delivery);
        assert_eq!(totals.delivery_fee, 0);
        assert_eq!(totals.total, 12000 + 1000);
    }

    #[test]
    fn test_no_zone_means_no_fee() {
        let lines = lines(1, 0);
        let totals = compute_totals(&PricingInput {
            lines: &lines,
            accessory_quantity: 0,
            accessory_unit_price: 1000,
            zone: None,
        });

        assert_eq!(totals.delivery_fee, 0);
        assert_eq!(totals.total, 2500);
    }

    #[test]
    fn test_unparseable_volume_counts_as_zero() {
        let lines = vec![
            LineItem::new(Product::new("x", "Mystery", "a lot", 100)).with_quantity(50),
        ];
        let zone = cocody();
        let totals = compute_totals(&PricingInput {
            lines: &lines,
            accessory_quantity: 0,
            accessory_unit_price: 1000,
            zone: Some(&zone),
        });

        assert_eq!(totals.total_volume_ml, 0);
        assert_eq!(totals.delivery_fee, 1500);
        assert_eq!(totals.total, 5000 + 1500);
    }

    #[test]
    fn test_empty_selection() {
        let totals = compute_totals(&PricingInput {
            lines: &[],
            accessory_quantity: 0,
            accessory_unit_price: 1000,
            zone: None,
        });
        assert_eq!(totals, OrderTotals::default());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn zone_strategy() -> impl Strategy<Value = Option<DeliveryZone>> {
            prop_oneof![
                Just(None),
                (0u64..10_000).prop_map(|fee| Some(DeliveryZone::new("Zone", ZoneClass::Near, fee))),
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: total is exactly the sum of its parts.
            #[test]
            fn total_is_sum_of_parts(
                q100 in 0u32..50,
                q250 in 0u32..50,
                kits in 0u32..50,
                zone in zone_strategy(),
            ) {
                let lines = lines(q100, q250);
                let totals = compute_totals(&PricingInput {
                    lines: &lines,
                    accessory_quantity: kits,
                    accessory_unit_price: 1000,
                    zone: zone.as_ref(),
                });

                prop_assert_eq!(totals.total, totals.subtotal + totals.accessory_cost + totals.delivery_fee);
                prop_assert_eq!(totals.subtotal, u64::from(q100) * 2500 + u64::from(q250) * 6000);
                prop_assert_eq!(totals.accessory_cost, u64::from(kits) * 1000);
            }

            /// Property: free delivery depends on volume only.
            #[test]
            fn free_delivery_iff_volume_reaches_threshold(
                q100 in 0u32..10,
                q250 in 0u32..10,
                kits in 0u32..10,
                zone in zone_strategy(),
            ) {
                let lines = lines(q100, q250);
                let totals = compute_totals(&PricingInput {
                    lines: &lines,
                    accessory_quantity: kits,
                    accessory_unit_price: 1000,
                    zone: zone.as_ref(),
                });

                let volume = u64::from(q100) * 100 + u64::from(q250) * 250;
                prop_assert_eq!(totals.free_delivery, volume >= FREE_DELIVERY_THRESHOLD_ML);

                let expected_fee = match &zone {
                    Some(z) if volume < FREE_DELIVERY_THRESHOLD_ML => z.fee,
                    _ => 0,
                };
                prop_assert_eq!(totals.delivery_fee, expected_fee);
            }

            /// Property: changing one quantity only moves that line's contribution.
            #[test]
            fn single_quantity_change_is_local(
                q100 in 0u32..50,
                q250 in 0u32..50,
                new_q250 in 0u32..50,
            ) {
                let before = compute_totals(&PricingInput {
                    lines: &lines(q100, q250),
                    accessory_quantity: 0,
                    accessory_unit_price: 1000,
                    zone: None,
                });
                let after = compute_totals(&PricingInput {
                    lines: &lines(q100, new_q250),
                    accessory_quantity: 0,
                    accessory_unit_price: 1000,
                    zone: None,
                });

                let delta = i128::from(after.subtotal) - i128::from(before.subtotal);
                prop_assert_eq!(delta, (i128::from(new_q250) - i128::from(q250)) * 6000);
            }
        }
    }
}
