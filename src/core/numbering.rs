use serde::{Deserialize, Serialize};

/// Default prefix of issued invoice numbers.
pub const DEFAULT_PREFIX: &str = "SBJR";

/// Default zero-padding width of the sequence part.
pub const DEFAULT_PADDING: usize = 4;

/// Monotonic invoice number counter.
///
/// Generates invoice numbers in the format `{prefix}-{sequential}`,
/// e.g. "SBJR-0001", "SBJR-0002", etc. Every call to [`next`](Self::next)
/// consumes a number, whether or not the invoice is ever saved.
///
/// The counter is a plain value: whoever persists it passes it to the code
/// that needs a new number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceCounter {
    prefix: String,
    last_issued: u64,
    zero_pad: usize,
}

impl InvoiceCounter {
    /// Create a counter that has not issued anything yet.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::starting_after(prefix, 0)
    }

    /// Create a counter continuing after `last_issued`.
    pub fn starting_after(prefix: impl Into<String>, last_issued: u64) -> Self {
        Self {
            prefix: prefix.into(),
            last_issued,
            zero_pad: DEFAULT_PADDING,
        }
    }

    /// Set zero-padding width (default: 4, so "0001").
    pub fn with_padding(mut self, width: usize) -> Self {
        self.zero_pad = width;
        self
    }

    /// Issue the next invoice number.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> String {
        self.last_issued = self.last_issued.saturating_add(1);
        self.format(self.last_issued)
    }

    /// Preview the next number without consuming it.
    pub fn peek(&self) -> String {
        self.format(self.last_issued.saturating_add(1))
    }

    /// The last number handed out (0 if none).
    pub fn last_issued(&self) -> u64 {
        self.last_issued
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn format(&self, number: u64) -> String {
        format!(
            "{}-{:0>width$}",
            self.prefix,
            number,
            width = self.zero_pad
        )
    }
}

impl Default for InvoiceCounter {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_numbering() {
        let mut counter = InvoiceCounter::new("SBJR");
        assert_eq!(counter.next(), "SBJR-0001");
        assert_eq!(counter.next(), "SBJR-0002");
        assert_eq!(counter.next(), "SBJR-0003");
        assert_eq!(counter.last_issued(), 3);
    }

    #[test]
    fn peek_does_not_consume() {
        let mut counter = InvoiceCounter::default();
        assert_eq!(counter.peek(), "SBJR-0001");
        assert_eq!(counter.peek(), "SBJR-0001");
        assert_eq!(counter.next(), "SBJR-0001");
        assert_eq!(counter.peek(), "SBJR-0002");
    }

    #[test]
    fn starting_after() {
        let mut counter = InvoiceCounter::starting_after("INV", 41);
        assert_eq!(counter.next(), "INV-0042");
    }

    #[test]
    fn custom_padding() {
        let mut counter = InvoiceCounter::new("R").with_padding(6);
        assert_eq!(counter.next(), "R-000001");
    }

    #[test]
    fn wide_numbers_are_not_truncated() {
        let mut counter = InvoiceCounter::starting_after("SBJR", 9_999);
        assert_eq!(counter.next(), "SBJR-10000");
    }
}
