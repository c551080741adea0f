use serde::Deserialize;

use crate::core::{DEFAULT_PADDING, DEFAULT_PREFIX, InvoiceCounter, InvoiceError};

/// Storage key of the current draft.
pub const CURRENT_INVOICE_KEY: &str = "sbjr_current_invoice";

/// Storage key of the last issued invoice sequence number.
pub const LAST_INVOICE_KEY: &str = "sbjr_last_invoice";

/// Settings for [`InvoiceStore`](super::InvoiceStore) and
/// [`DraftSession`](super::DraftSession).
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```
/// use gstbill::store::SessionConfig;
///
/// let config = SessionConfig::from_json(r#"{"numberPrefix": "INV"}"#).unwrap();
/// assert_eq!(config.number_prefix, "INV");
/// assert_eq!(config.number_padding, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionConfig {
    /// Prefix of issued invoice numbers.
    pub number_prefix: String,
    /// Zero-padding width of the sequence part.
    pub number_padding: usize,
    /// Key the draft snapshot is stored under.
    pub invoice_key: String,
    /// Key the last issued sequence number is stored under.
    pub counter_key: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            number_prefix: DEFAULT_PREFIX.to_string(),
            number_padding: DEFAULT_PADDING,
            invoice_key: CURRENT_INVOICE_KEY.to_string(),
            counter_key: LAST_INVOICE_KEY.to_string(),
        }
    }
}

impl SessionConfig {
    pub fn from_json(json: &str) -> Result<Self, InvoiceError> {
        serde_json::from_str(json)
            .map_err(|e| InvoiceError::Builder(format!("invalid session config: {e}")))
    }

    pub fn number_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.number_prefix = prefix.into();
        self
    }

    pub fn number_padding(mut self, width: usize) -> Self {
        self.number_padding = width;
        self
    }

    pub fn invoice_key(mut self, key: impl Into<String>) -> Self {
        self.invoice_key = key.into();
        self
    }

    pub fn counter_key(mut self, key: impl Into<String>) -> Self {
        self.counter_key = key.into();
        self
    }

    /// Counter continuing after `last_issued` with this configuration.
    pub(crate) fn counter(&self, last_issued: u64) -> InvoiceCounter {
        InvoiceCounter::starting_after(self.number_prefix.clone(), last_issued)
            .with_padding(self.number_padding)
    }
}
