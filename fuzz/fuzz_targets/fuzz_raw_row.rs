#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (&str, &str, &str, &str)| {
    let (qty, price, discount, tax) = data;
    let raw = gstbill::RawLineItem {
        name: String::new(),
        quantity: qty.to_string(),
        price: price.to_string(),
        discount: discount.to_string(),
        tax_type: tax.to_string(),
    };
    // Coercion never fails and the coerced rows always total.
    let items = [raw.to_line_item(), raw.to_new_row()];
    let _ = gstbill::compute_totals(&items);
});
