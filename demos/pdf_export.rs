use gstbill::export::*;

fn main() {
    // Stand-in for a captured page: 800 px wide, 2400 px tall, light grey
    // with a dark rule every 100 px.
    let (width, height) = (800u32, 2400u32);
    let mut rgb = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        let shade = if y % 100 == 0 { 40 } else { 235 };
        for _ in 0..width {
            rgb.extend_from_slice(&[shade, shade, shade]);
        }
    }
    let image = RasterImage::new(width, height, rgb).expect("valid raster");

    for (i, page) in paginate(width, height).iter().enumerate() {
        println!(
            "page {}: image at y = {:.1} mm ({:.1} mm tall)",
            i + 1,
            page.y_mm,
            page.height_mm
        );
    }

    let pdf = render_pdf(&image, "SBJR-0001").expect("PDF generation failed");
    let path = std::env::temp_dir().join(pdf_file_name("SBJR-0001"));
    std::fs::write(&path, &pdf).expect("failed to write PDF");
    println!("Wrote {} ({} bytes)", path.display(), pdf.len());
}
