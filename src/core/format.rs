//! Display formatting and the printable invoice page.
//!
//! Rounding to paise happens only here, never in the stored or computed
//! amounts.

use std::fmt;

use rust_decimal::Decimal;

use super::calc::round_half_up;
use super::types::*;

/// Currency symbol prefixed to displayed amounts.
pub const CURRENCY_SYMBOL: &str = "₹";

/// Format an amount with exactly two decimal places.
pub fn format_amount(value: Decimal) -> String {
    let mut rounded = round_half_up(value, 2);
    if rounded.is_zero() {
        // avoid "-0.00"
        rounded = Decimal::ZERO;
    }
    rounded.rescale(2);
    rounded.to_string()
}

/// Format an amount with the currency symbol, e.g. "₹236.00".
pub fn format_currency(value: Decimal) -> String {
    format!("{CURRENCY_SYMBOL}{}", format_amount(value))
}

/// Render a printable plain-text invoice page.
///
/// `totals` must have been computed from `invoice.items`.
pub fn render_text(invoice: &Invoice, totals: &InvoiceTotals) -> String {
    InvoicePage { invoice, totals }.to_string()
}

/// Printable plain-text invoice page, writable to any formatter.
#[derive(Debug, Clone, Copy)]
pub struct InvoicePage<'a> {
    pub invoice: &'a Invoice,
    pub totals: &'a InvoiceTotals,
}

impl fmt::Display for InvoicePage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { invoice, totals } = *self;

        writeln!(f, "TAX INVOICE")?;
        writeln!(f, "Invoice No: {}", invoice.invoice_number)?;
        match invoice.date {
            Some(date) => writeln!(f, "Date: {}", date.format("%Y-%m-%d"))?,
            None => writeln!(f, "Date:")?,
        }
        if !invoice.client_details.trim().is_empty() {
            writeln!(f, "Bill To:")?;
            for line in invoice.client_details.lines() {
                writeln!(f, "  {}", line.trim_end())?;
            }
        }
        writeln!(f)?;

        writeln!(
            f,
            "{:<3} {:<20} {:>6} {:>10} {:>6} {:>10} {:<9} {:>9} {:>10}",
            "#", "Item", "Qty", "Price", "Disc%", "Taxable", "Tax Type", "Tax", "Total"
        )?;
        for (i, (item, amounts)) in invoice.items.iter().zip(&totals.lines).enumerate() {
            writeln!(
                f,
                "{:<3} {:<20} {:>6} {:>10} {:>6} {:>10} {:<9} {:>9} {:>10}",
                i + 1,
                truncate(&item.name, 20),
                item.quantity.normalize().to_string(),
                format_amount(item.unit_price),
                item.discount_percent.normalize().to_string(),
                format_amount(amounts.taxable_amount),
                item.tax_regime.label(),
                format_amount(amounts.tax_amount),
                format_amount(amounts.line_total),
            )?;
        }
        writeln!(f)?;

        for (label, value) in [
            ("Subtotal", totals.subtotal),
            ("CGST", totals.total_cgst),
            ("SGST", totals.total_sgst),
            ("IGST", totals.total_igst),
            ("Round Off", totals.rounding),
            ("Grand Total", totals.grand_total),
        ] {
            writeln!(f, "{:>12}: {:>14}", label, format_currency(value))?;
        }
        Ok(())
    }
}

fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
