use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::error::ValidationError;
use super::types::*;

/// Check an invoice against the limits the entry form declares.
/// Returns all findings (not just the first). The calculation engine never
/// applies these; they are advisory.
pub fn validate_invoice(invoice: &Invoice) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if invoice.invoice_number.trim().is_empty() {
        errors.push(ValidationError::new(
            "invoice_number",
            "invoice number must not be empty",
        ));
    }

    if invoice.date.is_none() {
        errors.push(ValidationError::new("date", "invoice date is not set"));
    }

    errors.extend(validate_items(&invoice.items));
    errors
}

/// Check rows against the form's declared ranges: quantity at least 1,
/// non-negative price, discount within 0..=100.
pub fn validate_items(items: &[LineItem]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (i, item) in items.iter().enumerate() {
        validate_item(item, i, &mut errors);
    }
    errors
}

fn validate_item(item: &LineItem, index: usize, errors: &mut Vec<ValidationError>) {
    let prefix = format!("items[{index}]");

    if item.quantity < Decimal::ONE {
        errors.push(ValidationError::new(
            format!("{prefix}.quantity"),
            format!("quantity {} is below the minimum of 1", item.quantity),
        ));
    }

    if item.unit_price < Decimal::ZERO {
        errors.push(ValidationError::new(
            format!("{prefix}.unit_price"),
            format!("unit price {} must not be negative", item.unit_price),
        ));
    }

    if item.discount_percent < Decimal::ZERO || item.discount_percent > dec!(100) {
        errors.push(ValidationError::new(
            format!("{prefix}.discount_percent"),
            format!("discount {}% is outside 0..=100", item.discount_percent),
        ));
    }
}
