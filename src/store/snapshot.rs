use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{Invoice, InvoiceError, RawLineItem};

/// Schema version written by this crate.
pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

/// Whole-document draft as it is written to storage.
///
/// Documents written before versioning carry no `schemaVersion` and read
/// as version 0; their layout is otherwise identical to version 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSnapshot {
    #[serde(default)]
    pub schema_version: u32,
    pub invoice_no: String,
    /// `YYYY-MM-DD`, or blank when the date field was cleared.
    #[serde(default, with = "form_date")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub client: String,
    #[serde(default)]
    pub items: Vec<RawLineItem>,
    pub saved_at: DateTime<Utc>,
}

impl InvoiceSnapshot {
    /// Capture an invoice at `saved_at`.
    pub fn capture(invoice: &Invoice, saved_at: DateTime<Utc>) -> Self {
        Self {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            invoice_no: invoice.invoice_number.clone(),
            date: invoice.date,
            client: invoice.client_details.clone(),
            items: invoice.items.iter().map(RawLineItem::from).collect(),
            saved_at,
        }
    }

    /// Rebuild the invoice. Rows are re-created, so blank quantities start at 1.
    pub fn into_invoice(self) -> Invoice {
        Invoice {
            invoice_number: self.invoice_no,
            date: self.date,
            client_details: self.client,
            items: self.items.iter().map(RawLineItem::to_new_row).collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, InvoiceError> {
        serde_json::to_string(self)
            .map_err(|e| InvoiceError::Snapshot(format!("failed to encode snapshot: {e}")))
    }

    /// Decode a stored document, upgrading older schema versions.
    pub fn from_json(json: &str) -> Result<Self, InvoiceError> {
        let mut snapshot: Self = serde_json::from_str(json)
            .map_err(|e| InvoiceError::Snapshot(format!("failed to decode snapshot: {e}")))?;

        if snapshot.schema_version > SNAPSHOT_SCHEMA_VERSION {
            return Err(InvoiceError::Snapshot(format!(
                "snapshot schema version {} is newer than supported version {}",
                snapshot.schema_version, SNAPSHOT_SCHEMA_VERSION
            )));
        }
        snapshot.schema_version = SNAPSHOT_SCHEMA_VERSION;

        Ok(snapshot)
    }
}

/// The form's date field: `YYYY-MM-DD` or an empty string.
mod form_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => serializer.collect_str(&date.format(FORMAT)),
            None => serializer.serialize_str(""),
        }
    }

    /// Blank, null and unreadable dates all read as no date.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.and_then(|s| NaiveDate::parse_from_str(s.trim(), FORMAT).ok()))
    }
}
