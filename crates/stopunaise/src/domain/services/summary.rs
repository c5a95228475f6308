//! Order Summary
//!
//! Turns a validated draft into the persisted order rows and the plain-text
//! message sent through the messaging handoff.

use crate::domain::entities::{NewOrder, NewOrderLine, OrderDraft};
use crate::domain::value_objects::format_amount;

/// Heading of the confirmation shown after a successful submission
pub const CONFIRMATION_TITLE: &str = "Merci pour votre commande !";

/// Body of the confirmation shown after a successful submission
pub const CONFIRMATION_MESSAGE: &str = "Nous avons bien reçu votre demande. Un conseiller vous contactera très bientôt pour finaliser la livraison.";

/// Build the order header and line rows for a draft.
///
/// The accessory becomes a synthetic line when at least one unit is selected.
pub fn build_order(draft: &OrderDraft) -> (NewOrder, Vec<NewOrderLine>) {
    let order = NewOrder {
        full_name: draft.customer.full_name.trim().to_string(),
        phone: draft.customer.phone.trim().to_string(),
        municipality: draft.zone.name.clone(),
        total: draft.totals.total,
    };

    let mut lines: Vec<NewOrderLine> = draft
        .lines
        .iter()
        .filter(|line| line.is_selected())
        .map(|line| NewOrderLine {
            product_name: line.product.name.clone(),
            quantity: line.quantity,
            unit_price: line.product.price,
        })
        .collect();

    if draft.accessory_quantity > 0 {
        lines.push(NewOrderLine {
            product_name: draft.accessory.name.clone(),
            quantity: draft.accessory_quantity,
            unit_price: draft.accessory.unit_price,
        });
    }

    (order, lines)
}

/// Render the order summary sent to the fulfillment team.
pub fn format_order_summary(draft: &OrderDraft) -> String {
    let items = draft
        .lines
        .iter()
        .filter(|line| line.is_selected())
        .map(|line| {
            format!(
                "{} x{} = {} CFA",
                line.product.name,
                line.quantity,
                format_amount(line.line_total())
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let accessory = if draft.accessory_quantity > 0 {
        format!(
            "{} x{}: {} CFA",
            draft.accessory.name,
            draft.accessory_quantity,
            format_amount(draft.accessory.cost(draft.accessory_quantity))
        )
    } else {
        String::new()
    };

    let delivery = if draft.totals.free_delivery {
        "Livraison: GRATUITE (500ml ou plus)".to_string()
    } else {
        format!(
            "Livraison ({}): {} CFA",
            draft.zone.name,
            format_amount(draft.totals.delivery_fee)
        )
    };

    format!(
        "🛒 COMMANDE SNIPER DDVP\n\
         \n\
         👤 Client: {name}\n\
         📱 Téléphone: {phone}\n\
         📍 Commune: {zone}\n\
         \n\
         📦 Produits:\n\
         {items}\n\
         \n\
         {accessory}\n\
         {delivery}\n\
         \n\
         💰 TOTAL: {total} CFA FRANCS\n\
         \n\
         Merci pour votre commande !",
        name = draft.customer.full_name.trim(),
        phone = draft.customer.phone.trim(),
        zone = draft.zone.name,
        items = items,
        accessory = accessory,
        delivery = delivery,
        total = format_amount(draft.totals.total),
    )
}
