use chrono::{Local, Utc};
use gstbill::core::*;
use gstbill::store::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), InvoiceError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gstbill=debug")),
        )
        .init();

    let dir = std::env::temp_dir().join("gstbill-demo");
    let store = InvoiceStore::new(FileStorage::new(&dir));
    let mut session = DraftSession::open(store, Local::now().date_naive())?;

    session.set_client_details("Meera Textiles\nRing Road, Surat\nGSTIN 24AAACM1234F1Z9");
    session.update_row(
        0,
        &RawLineItem {
            name: "Cotton fabric (m)".into(),
            quantity: "12.5".into(),
            price: "86".into(),
            discount: "5".into(),
            tax_type: "intra".into(),
        },
    )?;
    session.add_raw_row(&RawLineItem {
        name: "Silk dupatta".into(),
        quantity: "".into(),
        price: "99.50".into(),
        discount: "10".into(),
        tax_type: "inter".into(),
    })?;

    for finding in validate_invoice(session.invoice()) {
        println!("warning: {finding}");
    }

    let totals = session.totals();
    println!("{}", render_text(session.invoice(), &totals));

    session.save(Utc::now())?;
    println!("Draft saved to {}", dir.display());

    // Reload what was just saved, answering the prompt on the console.
    session.load(&mut |prompt: &str| {
        println!("{prompt} [y]");
        true
    })?;
    println!(
        "Reloaded {} with grand total {}",
        session.invoice().invoice_number,
        format_currency(session.totals().grand_total)
    );

    Ok(())
}
