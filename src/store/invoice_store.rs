use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::backend::StorageBackend;
use super::config::SessionConfig;
use super::snapshot::InvoiceSnapshot;
use crate::core::{Invoice, InvoiceCounter, InvoiceError};

/// Saves and loads the draft and keeps the invoice number counter.
#[derive(Debug)]
pub struct InvoiceStore<B> {
    backend: B,
    config: SessionConfig,
}

impl<B: StorageBackend> InvoiceStore<B> {
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, SessionConfig::default())
    }

    pub fn with_config(backend: B, config: SessionConfig) -> Self {
        Self { backend, config }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Write the whole invoice, replacing any previous draft.
    pub fn save(
        &mut self,
        invoice: &Invoice,
        saved_at: DateTime<Utc>,
    ) -> Result<InvoiceSnapshot, InvoiceError> {
        let snapshot = InvoiceSnapshot::capture(invoice, saved_at);
        let json = snapshot.to_json()?;
        self.backend.set(&self.config.invoice_key, &json)?;
        info!(
            invoice_no = %snapshot.invoice_no,
            items = snapshot.items.len(),
            "saved invoice draft"
        );
        Ok(snapshot)
    }

    /// Read the stored draft, `None` if nothing has been saved.
    pub fn load_snapshot(&self) -> Result<Option<InvoiceSnapshot>, InvoiceError> {
        match self.backend.get(&self.config.invoice_key)? {
            Some(json) => InvoiceSnapshot::from_json(&json).map(Some),
            None => Ok(None),
        }
    }

    /// Read the stored draft as an invoice.
    pub fn load(&self) -> Result<Invoice, InvoiceError> {
        let snapshot = self.load_snapshot()?.ok_or_else(|| {
            InvoiceError::NotFound(format!(
                "no saved invoice under '{}'",
                self.config.invoice_key
            ))
        })?;
        debug!(invoice_no = %snapshot.invoice_no, saved_at = %snapshot.saved_at, "loaded invoice draft");
        Ok(snapshot.into_invoice())
    }

    pub fn has_saved(&self) -> Result<bool, InvoiceError> {
        Ok(self.backend.get(&self.config.invoice_key)?.is_some())
    }

    /// Discard the stored draft.
    pub fn clear(&mut self) -> Result<(), InvoiceError> {
        self.backend.remove(&self.config.invoice_key)
    }

    /// Read the counter. A missing value means nothing was issued yet; a
    /// value that does not start with digits is treated the same way.
    pub fn load_counter(&self) -> Result<InvoiceCounter, InvoiceError> {
        let last = match self.backend.get(&self.config.counter_key)? {
            Some(raw) => parse_leading_int(&raw).unwrap_or_else(|| {
                warn!(key = %self.config.counter_key, value = %raw, "corrupt invoice counter, restarting at 0");
                0
            }),
            None => 0,
        };
        Ok(self.config.counter(last))
    }

    pub fn store_counter(&mut self, counter: &InvoiceCounter) -> Result<(), InvoiceError> {
        self.backend
            .set(&self.config.counter_key, &counter.last_issued().to_string())
    }

    /// Consume and persist the next invoice number.
    pub fn next_invoice_number(&mut self) -> Result<String, InvoiceError> {
        let mut counter = self.load_counter()?;
        let number = counter.next();
        self.store_counter(&counter)?;
        debug!(invoice_no = %number, "issued invoice number");
        Ok(number)
    }
}

/// Leading decimal digits of `raw` (after whitespace), like `parseInt`.
fn parse_leading_int(raw: &str) -> Option<u64> {
    let trimmed = raw.trim_start();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().ok()
}
