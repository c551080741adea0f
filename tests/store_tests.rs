//! Draft persistence and session behaviour.
//!
//! Run with: `cargo test --features store --test store_tests`

#![cfg(feature = "store")]

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use gstbill::core::*;
use gstbill::store::*;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 8, 1, 12, 0, 0).unwrap()
}

fn yes() -> impl FnMut(&str) -> bool {
    |_: &str| true
}

fn no() -> impl FnMut(&str) -> bool {
    |_: &str| false
}

fn raw(name: &str, qty: &str, price: &str, discount: &str, tax: &str) -> RawLineItem {
    RawLineItem {
        name: name.into(),
        quantity: qty.into(),
        price: price.into(),
        discount: discount.into(),
        tax_type: tax.into(),
    }
}

fn filled_session(storage: &mut MemoryStorage) -> DraftSession<&mut MemoryStorage> {
    let mut session = DraftSession::open(InvoiceStore::new(storage), date(2024, 8, 1)).unwrap();
    session.set_client_details("Ravi Traders\nGSTIN 24ABCDE1234F1Z5");
    session
        .update_row(0, &raw("Cotton fabric", "2", "100", "0", "intra"))
        .unwrap();
    session
        .add_raw_row(&raw("Silk dupatta", "", "99.50", "10", "inter"))
        .unwrap();
    session
}

// --- Save / load ---

#[test]
fn save_then_load_restores_everything() {
    let mut storage = MemoryStorage::new();
    let mut session = filled_session(&mut storage);
    let saved = session.invoice().clone();
    session.save(now()).unwrap();

    session.set_client_details("changed");
    session.remove_row(1).unwrap();
    assert!(session.load(&mut yes()).unwrap());

    assert_eq!(session.invoice(), &saved);
    assert_eq!(session.totals().grand_total, dec!(342));
}

#[test]
fn declined_load_keeps_draft() {
    let mut storage = MemoryStorage::new();
    let mut session = filled_session(&mut storage);
    session.save(now()).unwrap();

    session.set_client_details("unsaved edit");
    let before = session.invoice().clone();
    assert!(!session.load(&mut no()).unwrap());
    assert_eq!(session.invoice(), &before);
}

#[test]
fn load_without_saved_draft_reports_not_found() {
    let mut storage = MemoryStorage::new();
    let mut session = filled_session(&mut storage);
    let before = session.invoice().clone();

    let mut asked = false;
    let result = session.load(&mut |_: &str| {
        asked = true;
        true
    });
    assert!(matches!(result, Err(InvoiceError::NotFound(_))));
    assert!(!asked);
    assert_eq!(session.invoice(), &before);
}

#[test]
fn load_replaces_rather_than_merges() {
    let mut storage = MemoryStorage::new();
    {
        let mut session =
            DraftSession::open(InvoiceStore::new(&mut storage), date(2024, 8, 1)).unwrap();
        session.save(now()).unwrap();
    }
    let mut session = filled_session(&mut storage);
    assert_eq!(session.items().len(), 2);
    session.load(&mut yes()).unwrap();
    assert_eq!(session.items(), &[LineItem::default()]);
    assert_eq!(session.invoice().client_details, "");
}

// --- New invoice / numbering ---

#[test]
fn new_invoice_takes_next_number() {
    let mut storage = MemoryStorage::new();
    let mut session = filled_session(&mut storage);
    assert_eq!(session.invoice().invoice_number, "SBJR-0001");

    assert!(session.new_invoice(&mut yes(), date(2024, 8, 2)).unwrap());
    let invoice = session.invoice();
    assert_eq!(invoice.invoice_number, "SBJR-0002");
    assert_eq!(invoice.date, Some(date(2024, 8, 2)));
    assert_eq!(invoice.client_details, "");
    assert_eq!(invoice.items, vec![LineItem::default()]);
}

#[test]
fn declined_new_invoice_consumes_nothing() {
    let mut storage = MemoryStorage::new();
    let mut session = filled_session(&mut storage);
    let before = session.invoice().clone();

    assert!(!session.new_invoice(&mut no(), date(2024, 8, 2)).unwrap());
    assert_eq!(session.invoice(), &before);
    assert_eq!(session.store().load_counter().unwrap().last_issued(), 1);
}

#[test]
fn numbers_advance_even_without_saving() {
    let mut storage = MemoryStorage::new();
    for expected in ["SBJR-0001", "SBJR-0002", "SBJR-0003"] {
        let session =
            DraftSession::open(InvoiceStore::new(&mut storage), date(2024, 8, 1)).unwrap();
        assert_eq!(session.invoice().invoice_number, expected);
    }
    assert_eq!(
        storage.get(LAST_INVOICE_KEY).unwrap().as_deref(),
        Some("3")
    );
    assert_eq!(storage.get(CURRENT_INVOICE_KEY).unwrap(), None);
}

#[test]
fn custom_config() {
    let config = SessionConfig::default()
        .number_prefix("INV")
        .number_padding(3)
        .invoice_key("draft")
        .counter_key("seq");
    let mut storage = MemoryStorage::new();
    let mut session = DraftSession::open(
        InvoiceStore::with_config(&mut storage, config),
        date(2024, 8, 1),
    )
    .unwrap();
    assert_eq!(session.invoice().invoice_number, "INV-001");
    session.save(now()).unwrap();
    drop(session);

    assert!(storage.get("draft").unwrap().is_some());
    assert_eq!(storage.get("seq").unwrap().as_deref(), Some("1"));
}

// --- Files on disk ---

#[test]
fn file_storage_survives_restart() {
    let tmp = tempfile::tempdir().unwrap();

    {
        let store = InvoiceStore::new(FileStorage::new(tmp.path()));
        let mut session = DraftSession::open(store, date(2024, 8, 1)).unwrap();
        session
            .update_row(0, &raw("Bedsheet", "4", "350", "5", "none"))
            .unwrap();
        session.save(now()).unwrap();
    }

    let store = InvoiceStore::new(FileStorage::new(tmp.path()));
    let mut session = DraftSession::open(store, date(2024, 8, 3)).unwrap();
    assert_eq!(session.invoice().invoice_number, "SBJR-0002");

    assert!(session.load(&mut yes()).unwrap());
    assert_eq!(session.invoice().invoice_number, "SBJR-0001");
    assert_eq!(session.invoice().date, Some(date(2024, 8, 1)));
    // 4 × 350 × 0.95
    assert_eq!(session.totals().grand_total, dec!(1330));
}

#[test]
fn browser_saved_document_loads() {
    let mut storage = MemoryStorage::new();
    storage
        .set(
            CURRENT_INVOICE_KEY,
            r#"{"invoiceNo":"SBJR-0042","date":"2024-07-15","client":"Anand Stores",
                "items":[{"name":"Towel","qty":"3","price":"120","discount":"0","taxType":"inter"}],
                "savedAt":"2024-07-15T09:00:00.000Z"}"#,
        )
        .unwrap();
    storage.set(LAST_INVOICE_KEY, "42").unwrap();

    let mut session = DraftSession::open(InvoiceStore::new(&mut storage), date(2024, 8, 1)).unwrap();
    assert_eq!(session.invoice().invoice_number, "SBJR-0043");
    session.load(&mut yes()).unwrap();

    let totals = session.totals();
    assert_eq!(totals.subtotal, dec!(360));
    assert_eq!(totals.total_igst, dec!(64.8));
    assert_eq!(totals.grand_total, dec!(425));
}

#[test]
fn browser_saved_document_with_blank_date_loads() {
    let mut storage = MemoryStorage::new();
    storage
        .set(
            CURRENT_INVOICE_KEY,
            r#"{"invoiceNo":"SBJR-0001","date":"","client":"","items":[],"savedAt":"2024-07-15T09:00:00.000Z"}"#,
        )
        .unwrap();

    let mut session = DraftSession::open(InvoiceStore::new(&mut storage), date(2024, 8, 1)).unwrap();
    assert!(session.load(&mut yes()).unwrap());
    assert_eq!(session.invoice().invoice_number, "SBJR-0001");
    assert_eq!(session.invoice().date, None);
    assert!(session.items().is_empty());

    // Saving keeps the date blank, as the form would.
    session.save(now()).unwrap();
    drop(session);
    let stored = storage.get(CURRENT_INVOICE_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&stored).unwrap();
    assert_eq!(value["date"], "");
    assert_eq!(value["schemaVersion"], 1);
}

#[test]
fn future_schema_is_refused_without_touching_draft() {
    let mut storage = MemoryStorage::new();
    storage
        .set(
            CURRENT_INVOICE_KEY,
            r#"{"schemaVersion":99,"invoiceNo":"X","date":"2024-07-15","savedAt":"2024-07-15T09:00:00Z"}"#,
        )
        .unwrap();
    let mut session = DraftSession::open(InvoiceStore::new(&mut storage), date(2024, 8, 1)).unwrap();
    let before = session.invoice().clone();
    assert!(matches!(
        session.load(&mut yes()),
        Err(InvoiceError::Snapshot(_))
    ));
    assert_eq!(session.invoice(), &before);
}
