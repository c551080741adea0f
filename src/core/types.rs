use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The invoice being composed: the unit that gets saved and loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Sequential invoice number, e.g. "SBJR-0001".
    pub invoice_number: String,
    /// Invoice date. `None` while the date field is blank.
    pub date: Option<NaiveDate>,
    /// Free-text bill-to block (name, address, GSTIN, ...).
    pub client_details: String,
    /// Invoice rows in display order.
    pub items: Vec<LineItem>,
}

/// One row of the invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Item label, may be empty.
    pub name: String,
    /// Quantity sold.
    pub quantity: Decimal,
    /// Price per unit before discount.
    pub unit_price: Decimal,
    /// Discount in percent. Declared range is 0..=100 but not enforced here.
    pub discount_percent: Decimal,
    /// Which GST components apply.
    pub tax_regime: TaxRegime,
}

impl Default for LineItem {
    /// A freshly added row: quantity 1, no price, no discount, intra-state.
    fn default() -> Self {
        Self {
            name: String::new(),
            quantity: Decimal::ONE,
            unit_price: Decimal::ZERO,
            discount_percent: Decimal::ZERO,
            tax_regime: TaxRegime::Intra,
        }
    }
}

/// GST treatment of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxRegime {
    /// Intra-state supply: 9% CGST + 9% SGST.
    #[default]
    Intra,
    /// Inter-state supply: 18% IGST.
    Inter,
    /// No GST.
    None,
}

impl TaxRegime {
    /// Wire code as stored in saved drafts.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Intra => "intra",
            Self::Inter => "inter",
            Self::None => "none",
        }
    }

    /// Parse from wire code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "intra" => Some(Self::Intra),
            "inter" => Some(Self::Inter),
            "none" => Some(Self::None),
            _ => None,
        }
    }

    /// Label shown in the tax column of a printed invoice.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Intra => "CGST+SGST",
            Self::Inter => "IGST",
            Self::None => "No Tax",
        }
    }
}

/// Derived amounts of a single line. Never rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LineAmounts {
    /// quantity × unit price × (1 − discount / 100).
    pub taxable_amount: Decimal,
    /// Central GST credited by this line.
    pub cgst: Decimal,
    /// State GST credited by this line.
    pub sgst: Decimal,
    /// Integrated GST credited by this line.
    pub igst: Decimal,
    /// Tax shown on the line: the 9% component for intra-state lines,
    /// the 18% IGST for inter-state lines.
    pub tax_amount: Decimal,
    /// taxable_amount + tax_amount.
    pub line_total: Decimal,
}

impl LineAmounts {
    /// Full GST this line contributes to the invoice totals.
    pub fn combined_tax(&self) -> Decimal {
        self.cgst + self.sgst + self.igst
    }
}

/// Aggregate over all lines of an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InvoiceTotals {
    /// Per-line amounts, same order as the input items.
    pub lines: Vec<LineAmounts>,
    /// Sum of taxable amounts.
    pub subtotal: Decimal,
    pub total_cgst: Decimal,
    pub total_sgst: Decimal,
    pub total_igst: Decimal,
    /// total_cgst + total_sgst + total_igst.
    pub total_tax: Decimal,
    /// subtotal + total_tax, before round-off.
    pub pre_round_total: Decimal,
    /// Signed round-off needed to reach a whole currency unit.
    pub rounding: Decimal,
    /// pre_round_total + rounding. Always integer valued.
    pub grand_total: Decimal,
}
