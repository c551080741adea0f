use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::InvoiceError;
use super::types::*;
use super::validation;

/// Upper bound on rows per invoice.
pub const MAX_ITEMS: usize = 10_000;

/// Builder for constructing invoices.
///
/// ```
/// use gstbill::core::*;
/// use rust_decimal_macros::dec;
/// use chrono::NaiveDate;
///
/// let invoice = InvoiceBuilder::new("SBJR-0001", NaiveDate::from_ymd_opt(2024, 8, 1).unwrap())
///     .client_details("Meera Textiles, Surat")
///     .add_item(LineItemBuilder::new("Silk saree")
///         .quantity(dec!(2))
///         .unit_price(dec!(2500))
///         .build())
///     .build()
///     .unwrap();
///
/// assert_eq!(invoice.items.len(), 1);
/// ```
pub struct InvoiceBuilder {
    invoice_number: String,
    date: NaiveDate,
    client_details: String,
    items: Vec<LineItem>,
}

impl InvoiceBuilder {
    pub fn new(invoice_number: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            invoice_number: invoice_number.into(),
            date,
            client_details: String::new(),
            items: Vec::new(),
        }
    }

    pub fn client_details(mut self, details: impl Into<String>) -> Self {
        self.client_details = details.into();
        self
    }

    pub fn add_item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn items(mut self, items: impl IntoIterator<Item = LineItem>) -> Self {
        self.items.extend(items);
        self
    }

    /// Build the invoice, running the draft checks before the structural ones.
    /// Returns all validation errors (not just the first).
    pub fn build(self) -> Result<Invoice, InvoiceError> {
        let invoice = self.assemble();

        let errors = validation::validate_invoice(&invoice);
        if !errors.is_empty() {
            let msg = errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(InvoiceError::Validation(msg));
        }

        check_structure(&invoice)?;
        Ok(invoice)
    }

    /// Build without the draft checks, for half-filled drafts and loaded data.
    pub fn build_unchecked(self) -> Result<Invoice, InvoiceError> {
        let invoice = self.assemble();
        check_structure(&invoice)?;
        Ok(invoice)
    }

    fn assemble(self) -> Invoice {
        Invoice {
            invoice_number: self.invoice_number,
            date: Some(self.date),
            client_details: self.client_details,
            items: self.items,
        }
    }
}

fn check_structure(invoice: &Invoice) -> Result<(), InvoiceError> {
    if invoice.invoice_number.trim().is_empty() {
        return Err(InvoiceError::Builder("invoice number is required".into()));
    }
    if invoice.invoice_number.len() > 200 {
        return Err(InvoiceError::Builder(
            "invoice number cannot exceed 200 characters".into(),
        ));
    }
    if invoice.items.len() > MAX_ITEMS {
        return Err(InvoiceError::Builder(format!(
            "invoice cannot have more than {MAX_ITEMS} line items"
        )));
    }
    Ok(())
}

/// Builder for LineItem. Starts from the defaults of a freshly added row.
pub struct LineItemBuilder {
    item: LineItem,
}

impl LineItemBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            item: LineItem {
                name: name.into(),
                ..LineItem::default()
            },
        }
    }

    pub fn quantity(mut self, quantity: Decimal) -> Self {
        self.item.quantity = quantity;
        self
    }

    pub fn unit_price(mut self, price: Decimal) -> Self {
        self.item.unit_price = price;
        self
    }

    /// Discount in percent.
    pub fn discount(mut self, percent: Decimal) -> Self {
        self.item.discount_percent = percent;
        self
    }

    pub fn tax_regime(mut self, regime: TaxRegime) -> Self {
        self.item.tax_regime = regime;
        self
    }

    pub fn build(self) -> LineItem {
        self.item
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 8, 1).unwrap()
    }

    #[test]
    fn line_defaults_match_new_row() {
        let item = LineItemBuilder::new("").build();
        assert_eq!(item, LineItem::default());
        assert_eq!(item.quantity, dec!(1));
        assert_eq!(item.tax_regime, TaxRegime::Intra);
    }

    #[test]
    fn builds_invoice() {
        let invoice = InvoiceBuilder::new("SBJR-0007", date())
            .client_details("Ravi Traders")
            .add_item(LineItemBuilder::new("Cotton").unit_price(dec!(80)).build())
            .add_item(
                LineItemBuilder::new("Silk")
                    .unit_price(dec!(900))
                    .tax_regime(TaxRegime::Inter)
                    .build(),
            )
            .build()
            .unwrap();
        assert_eq!(invoice.invoice_number, "SBJR-0007");
        assert_eq!(invoice.items.len(), 2);
        assert_eq!(invoice.items[1].tax_regime, TaxRegime::Inter);
    }

    #[test]
    fn empty_number_rejected() {
        let err = InvoiceBuilder::new("  ", date()).build_unchecked().unwrap_err();
        assert!(matches!(err, InvoiceError::Builder(_)));
    }

    #[test]
    fn checked_build_reports_empty_number_with_other_findings() {
        let err = InvoiceBuilder::new("", date())
            .add_item(LineItemBuilder::new("Shawl").quantity(dec!(0)).build())
            .build()
            .unwrap_err();
        let InvoiceError::Validation(msg) = &err else {
            panic!("expected a validation error, got {err:?}");
        };
        assert!(msg.contains("invoice_number: invoice number must not be empty"));
        assert!(msg.contains("items[0].quantity"));
    }

    #[test]
    fn checked_build_still_enforces_structure() {
        let result = InvoiceBuilder::new("SBJR-0001", date())
            .items(std::iter::repeat_n(LineItem::default(), MAX_ITEMS + 1))
            .build();
        assert!(matches!(result, Err(InvoiceError::Builder(_))));
    }

    #[test]
    fn out_of_range_discount_fails_checked_build() {
        let result = InvoiceBuilder::new("SBJR-0001", date())
            .add_item(LineItemBuilder::new("Shawl").discount(dec!(120)).build())
            .build();
        let err = result.unwrap_err().to_string();
        assert!(err.contains("discount"));
    }

    #[test]
    fn unchecked_build_keeps_out_of_range_values() {
        let invoice = InvoiceBuilder::new("SBJR-0001", date())
            .add_item(LineItemBuilder::new("Shawl").discount(dec!(120)).build())
            .build_unchecked()
            .unwrap();
        assert_eq!(invoice.items[0].discount_percent, dec!(120));
    }

    #[test]
    fn too_many_items() {
        let result = InvoiceBuilder::new("SBJR-0001", date())
            .items(std::iter::repeat_n(LineItem::default(), MAX_ITEMS + 1))
            .build_unchecked();
        assert!(result.is_err());
    }
}
