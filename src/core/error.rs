use thiserror::Error;

/// Errors that can occur while building, persisting or exporting an invoice.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InvoiceError {
    /// One or more validation rules failed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Builder encountered invalid or missing configuration.
    #[error("builder error: {0}")]
    Builder(String),

    /// Nothing stored under the requested key.
    #[error("not found: {0}")]
    NotFound(String),

    /// Storage backend failed to read or write.
    #[error("storage error: {0}")]
    Storage(String),

    /// Snapshot could not be encoded, decoded or upgraded.
    #[error("snapshot error: {0}")]
    Snapshot(String),

    /// Row operation addressed a row that does not exist.
    #[error("row {index} out of range (invoice has {len} rows)")]
    RowIndex { index: usize, len: usize },

    /// PDF assembly or raster input error.
    #[error("export error: {0}")]
    Export(String),
}

impl From<std::io::Error> for InvoiceError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

/// A single non-blocking validation finding with field path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dot-separated path to the offending field (e.g. "items[2].discount_percent").
    pub field: String,
    /// Human-readable description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}
