//! Draft persistence and the headless invoice form.
//!
//! Drafts are stored as versioned JSON documents under a fixed key, and the
//! last issued invoice number under a second key, in any [`StorageBackend`].
//!
//! # Example
//!
//! ```
//! use chrono::{NaiveDate, Utc};
//! use gstbill::store::*;
//!
//! let today = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
//! let mut session = DraftSession::open(InvoiceStore::new(MemoryStorage::new()), today).unwrap();
//! assert_eq!(session.invoice().invoice_number, "SBJR-0001");
//!
//! session.set_client_details("Ravi Traders");
//! session.save(Utc::now()).unwrap();
//! assert!(session.load(&mut |_: &str| true).unwrap());
//! ```

mod backend;
mod config;
mod invoice_store;
mod session;
mod snapshot;

pub use backend::{FileStorage, MemoryStorage, StorageBackend};
pub use config::{CURRENT_INVOICE_KEY, LAST_INVOICE_KEY, SessionConfig};
pub use invoice_store::InvoiceStore;
pub use session::{Confirm, DraftSession, LOAD_PROMPT, NEW_INVOICE_PROMPT};
pub use snapshot::{InvoiceSnapshot, SNAPSHOT_SCHEMA_VERSION};
