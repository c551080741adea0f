//! # gstbill
//!
//! GST sales invoice composer: line-level CGST/SGST/IGST, rounded invoice
//! totals, locally persisted drafts, and paginated PDF export.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use gstbill::core::*;
//! use rust_decimal_macros::dec;
//!
//! let invoice = InvoiceBuilder::new("SBJR-0001", NaiveDate::from_ymd_opt(2024, 8, 1).unwrap())
//!     .client_details("Meera Textiles\nSurat, Gujarat")
//!     .add_item(LineItemBuilder::new("Cotton fabric")
//!         .quantity(dec!(2))
//!         .unit_price(dec!(100))
//!         .build())
//!     .add_item(LineItemBuilder::new("Silk dupatta")
//!         .unit_price(dec!(99.50))
//!         .discount(dec!(10))
//!         .tax_regime(TaxRegime::Inter)
//!         .build())
//!     .build()
//!     .unwrap();
//!
//! let totals = compute_totals(&invoice.items);
//! assert_eq!(totals.subtotal, dec!(289.55));
//! assert_eq!(totals.grand_total, dec!(342));
//! assert_eq!(format_currency(totals.rounding), "₹0.33");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Line/invoice types, tax engine, numbering, formatting |
//! | `store` | Versioned JSON drafts, storage backends, draft session |
//! | `pdf` | Image slicing into A4 pages and PDF assembly |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "store")]
pub mod store;

#[cfg(feature = "pdf")]
pub mod export;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
