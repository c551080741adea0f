//! Paginated PDF export of a captured invoice image.
//!
//! The caller renders the invoice to an RGB raster (any screenshot or
//! rendering pipeline will do). The image is drawn 190 mm wide on A4 pages
//! and sliced into 295 mm bands, one band per page.
//!
//! # Example
//!
//! ```
//! use gstbill::export::*;
//!
//! let image = RasterImage::new(4, 4, vec![255; 4 * 4 * 3]).unwrap();
//! let pdf = render_pdf(&image, "SBJR-0001").unwrap();
//! assert!(pdf.starts_with(b"%PDF"));
//! assert_eq!(pdf_file_name("SBJR-0001"), "SBJR-0001.pdf");
//! ```

mod layout;
mod render;

pub use layout::{
    BAND_HEIGHT_MM, IMAGE_WIDTH_MM, MARGIN_MM, PAGE_HEIGHT_MM, PAGE_WIDTH_MM, PagePlacement,
    paginate,
};
pub use render::{RasterImage, pdf_file_name, render_pdf};
