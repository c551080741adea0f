#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Decode → rebuild → encode must not panic at any step.
        if let Ok(snapshot) = gstbill::store::InvoiceSnapshot::from_json(s) {
            let saved_at = snapshot.saved_at;
            let invoice = snapshot.into_invoice();
            let _ = gstbill::store::InvoiceSnapshot::capture(&invoice, saved_at).to_json();
        }
    }
});
