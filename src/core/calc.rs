use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use super::types::*;

/// CGST rate applied to intra-state lines. SGST uses the same rate.
pub const CGST_RATE: Decimal = dec!(0.09);
/// SGST rate applied to intra-state lines.
pub const SGST_RATE: Decimal = dec!(0.09);
/// IGST rate applied to inter-state lines.
pub const IGST_RATE: Decimal = dec!(0.18);

/// Compute the derived amounts of one line.
///
/// The discount is not clamped: a discount above 100% yields a negative
/// taxable amount. Nothing is rounded. Arithmetic saturates at
/// [`Decimal::MAX`] / [`Decimal::MIN`] instead of overflowing.
///
/// For intra-state lines `tax_amount` is the 9% figure that is credited to
/// CGST and again to SGST; use [`LineAmounts::combined_tax`] for the full
/// GST a line contributes.
pub fn compute_line(item: &LineItem) -> LineAmounts {
    let discount_factor = Decimal::ONE.saturating_sub(item.discount_percent / dec!(100));
    let taxable_amount = item
        .quantity
        .saturating_mul(item.unit_price)
        .saturating_mul(discount_factor);

    let (cgst, sgst, igst) = match item.tax_regime {
        TaxRegime::None => (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO),
        TaxRegime::Intra => (
            taxable_amount.saturating_mul(CGST_RATE),
            taxable_amount.saturating_mul(SGST_RATE),
            Decimal::ZERO,
        ),
        TaxRegime::Inter => (
            Decimal::ZERO,
            Decimal::ZERO,
            taxable_amount.saturating_mul(IGST_RATE),
        ),
    };

    // An intra-state line shows one 9% component; both are credited to the totals.
    let tax_amount = match item.tax_regime {
        TaxRegime::Intra => cgst,
        _ => igst,
    };

    LineAmounts {
        taxable_amount,
        cgst,
        sgst,
        igst,
        tax_amount,
        line_total: taxable_amount.saturating_add(tax_amount),
    }
}

/// Compute per-line amounts and invoice totals from scratch.
///
/// ```
/// use gstbill::core::*;
/// use rust_decimal_macros::dec;
///
/// let items = vec![
///     LineItemBuilder::new("Kurta").quantity(dec!(2)).unit_price(dec!(100)).build(),
/// ];
/// let totals = compute_totals(&items);
/// assert_eq!(totals.total_cgst, dec!(18));
/// assert_eq!(totals.grand_total, dec!(236));
/// ```
pub fn compute_totals(items: &[LineItem]) -> InvoiceTotals {
    let lines: Vec<LineAmounts> = items.iter().map(compute_line).collect();

    let subtotal = sum(lines.iter().map(|l| l.taxable_amount));
    let total_cgst = sum(lines.iter().map(|l| l.cgst));
    let total_sgst = sum(lines.iter().map(|l| l.sgst));
    let total_igst = sum(lines.iter().map(|l| l.igst));

    let total_tax = sum([total_cgst, total_sgst, total_igst]);
    let pre_round_total = subtotal.saturating_add(total_tax);
    let grand_total = round_half_up(pre_round_total, 0);
    let rounding = grand_total.saturating_sub(pre_round_total);

    InvoiceTotals {
        lines,
        subtotal,
        total_cgst,
        total_sgst,
        total_igst,
        total_tax,
        pre_round_total,
        rounding,
        grand_total,
    }
}

fn sum(values: impl IntoIterator<Item = Decimal>) -> Decimal {
    values.into_iter().fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Round a Decimal to `dp` decimal places using half-up (commercial rounding).
pub(crate) fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}
