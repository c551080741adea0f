use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info};

use super::backend::StorageBackend;
use super::invoice_store::InvoiceStore;
use crate::core::{
    Invoice, InvoiceError, InvoiceTotals, LineItem, MAX_ITEMS, RawLineItem, compute_totals,
};

/// Asks the user before current work is thrown away.
pub trait Confirm {
    /// Return `true` to go ahead.
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Prompt shown before a saved draft replaces the current one.
pub const LOAD_PROMPT: &str = "Load last saved invoice? This will replace current data.";
/// Prompt shown before a fresh invoice replaces the current one.
pub const NEW_INVOICE_PROMPT: &str = "Start a new invoice? Current data will be lost.";

/// Headless invoice form: owns the draft being edited and the store behind it.
///
/// Every change leaves the draft consistent; totals are recomputed from the
/// rows on demand and never cached.
#[derive(Debug)]
pub struct DraftSession<B> {
    store: InvoiceStore<B>,
    invoice: Invoice,
}

impl<B: StorageBackend> DraftSession<B> {
    /// Start a session with a freshly numbered invoice dated `today` and one
    /// empty row.
    pub fn open(mut store: InvoiceStore<B>, today: NaiveDate) -> Result<Self, InvoiceError> {
        let invoice = fresh_invoice(&mut store, today)?;
        info!(invoice_no = %invoice.invoice_number, "opened draft session");
        Ok(Self { store, invoice })
    }

    pub fn invoice(&self) -> &Invoice {
        &self.invoice
    }

    pub fn items(&self) -> &[LineItem] {
        &self.invoice.items
    }

    pub fn store(&self) -> &InvoiceStore<B> {
        &self.store
    }

    pub fn into_store(self) -> InvoiceStore<B> {
        self.store
    }

    /// Current totals, computed from scratch.
    pub fn totals(&self) -> InvoiceTotals {
        compute_totals(&self.invoice.items)
    }

    pub fn set_invoice_number(&mut self, number: impl Into<String>) {
        self.invoice.invoice_number = number.into();
    }

    /// Set or clear (`None`) the invoice date.
    pub fn set_date(&mut self, date: impl Into<Option<NaiveDate>>) {
        self.invoice.date = date.into();
    }

    pub fn set_client_details(&mut self, details: impl Into<String>) {
        self.invoice.client_details = details.into();
    }

    /// Append a row and return its index.
    pub fn add_row(&mut self, item: LineItem) -> Result<usize, InvoiceError> {
        if self.invoice.items.len() >= MAX_ITEMS {
            return Err(InvoiceError::Builder(format!(
                "invoice cannot have more than {MAX_ITEMS} line items"
            )));
        }
        self.invoice.items.push(item);
        Ok(self.invoice.items.len() - 1)
    }

    /// Append a row from form text, applying new-row defaults.
    pub fn add_raw_row(&mut self, raw: &RawLineItem) -> Result<usize, InvoiceError> {
        self.add_row(raw.to_new_row())
    }

    /// Replace a row with an edited form row. Unparseable numbers become zero.
    pub fn update_row(&mut self, index: usize, raw: &RawLineItem) -> Result<(), InvoiceError> {
        self.set_row(index, raw.to_line_item())
    }

    pub fn set_row(&mut self, index: usize, item: LineItem) -> Result<(), InvoiceError> {
        let len = self.invoice.items.len();
        let slot = self
            .invoice
            .items
            .get_mut(index)
            .ok_or(InvoiceError::RowIndex { index, len })?;
        *slot = item;
        Ok(())
    }

    pub fn remove_row(&mut self, index: usize) -> Result<LineItem, InvoiceError> {
        let len = self.invoice.items.len();
        if index >= len {
            return Err(InvoiceError::RowIndex { index, len });
        }
        Ok(self.invoice.items.remove(index))
    }

    /// Persist the whole draft.
    pub fn save(&mut self, now: DateTime<Utc>) -> Result<(), InvoiceError> {
        self.store.save(&self.invoice, now)?;
        Ok(())
    }

    /// Replace the draft with the saved one.
    ///
    /// Returns `Ok(false)` if the user declined, and `NotFound` if nothing is
    /// saved; in both cases the draft is untouched.
    pub fn load(&mut self, confirm: &mut impl Confirm) -> Result<bool, InvoiceError> {
        let Some(snapshot) = self.store.load_snapshot()? else {
            return Err(InvoiceError::NotFound("no saved invoice found".into()));
        };
        if !confirm.confirm(LOAD_PROMPT) {
            debug!("load declined");
            return Ok(false);
        }
        self.invoice = snapshot.into_invoice();
        info!(invoice_no = %self.invoice.invoice_number, "loaded saved draft");
        Ok(true)
    }

    /// Discard the draft and start a new, freshly numbered invoice.
    ///
    /// Returns `Ok(false)` if the user declined; the draft and the counter
    /// are then untouched.
    pub fn new_invoice(
        &mut self,
        confirm: &mut impl Confirm,
        today: NaiveDate,
    ) -> Result<bool, InvoiceError> {
        if !confirm.confirm(NEW_INVOICE_PROMPT) {
            debug!("new invoice declined");
            return Ok(false);
        }
        self.invoice = fresh_invoice(&mut self.store, today)?;
        info!(invoice_no = %self.invoice.invoice_number, "started new invoice");
        Ok(true)
    }
}

fn fresh_invoice<B: StorageBackend>(
    store: &mut InvoiceStore<B>,
    today: NaiveDate,
) -> Result<Invoice, InvoiceError> {
    Ok(Invoice {
        invoice_number: store.next_invoice_number()?,
        date: Some(today),
        client_details: String::new(),
        items: vec![LineItem::default()],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStorage;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 8, 1).unwrap()
    }

    fn session() -> DraftSession<MemoryStorage> {
        DraftSession::open(InvoiceStore::new(MemoryStorage::new()), today()).unwrap()
    }

    #[test]
    fn opens_with_one_default_row() {
        let s = session();
        assert_eq!(s.invoice().invoice_number, "SBJR-0001");
        assert_eq!(s.items(), &[LineItem::default()]);
        assert_eq!(s.totals().grand_total, dec!(0));
    }

    #[test]
    fn edits_flow_into_totals() {
        let mut s = session();
        s.update_row(
            0,
            &RawLineItem {
                name: "Kurta".into(),
                quantity: "2".into(),
                price: "100".into(),
                discount: "0".into(),
                tax_type: "intra".into(),
            },
        )
        .unwrap();
        assert_eq!(s.totals().grand_total, dec!(236));

        s.remove_row(0).unwrap();
        assert_eq!(s.totals().grand_total, dec!(0));
    }

    #[test]
    fn row_index_errors() {
        let mut s = session();
        assert!(matches!(
            s.remove_row(3),
            Err(InvoiceError::RowIndex { index: 3, len: 1 })
        ));
        assert!(s.set_row(1, LineItem::default()).is_err());
    }

    #[test]
    fn prompt_text_reaches_confirm() {
        let mut s = session();
        let mut seen = Vec::new();
        s.new_invoice(
            &mut |p: &str| {
                seen.push(p.to_string());
                false
            },
            today(),
        )
        .unwrap();
        assert_eq!(seen, vec![NEW_INVOICE_PROMPT.to_string()]);
    }
}
