use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use tracing::debug;

use super::layout::{PAGE_HEIGHT_MM, PAGE_WIDTH_MM, PagePlacement, paginate};
use crate::core::InvoiceError;

/// Points per millimetre.
const PT_PER_MM: f64 = 72.0 / 25.4;

/// Name the image XObject is registered under in each page's resources.
const IMAGE_NAME: &str = "Im0";

/// A captured rendering of the invoice: 8-bit RGB, row major, no padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    rgb: Vec<u8>,
}

impl RasterImage {
    /// Wrap raw RGB bytes, checking that they match the dimensions.
    pub fn new(width: u32, height: u32, rgb: Vec<u8>) -> Result<Self, InvoiceError> {
        if width == 0 || height == 0 {
            return Err(InvoiceError::Export(format!(
                "image must not be empty ({width}x{height})"
            )));
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(3))
            .ok_or_else(|| InvoiceError::Export("image dimensions overflow".into()))?;
        if rgb.len() != expected {
            return Err(InvoiceError::Export(format!(
                "expected {expected} bytes for a {width}x{height} RGB image, got {}",
                rgb.len()
            )));
        }
        Ok(Self { width, height, rgb })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

/// File name the exported PDF is saved under.
pub fn pdf_file_name(invoice_number: &str) -> String {
    format!("{invoice_number}.pdf")
}

/// Assemble an A4 PDF from a captured invoice image, sliced into pages.
///
/// All pages share one image object; each page draws it at its
/// [`PagePlacement`]. `title` (normally the invoice number) goes into the
/// document information dictionary.
pub fn render_pdf(image: &RasterImage, title: &str) -> Result<Vec<u8>, InvoiceError> {
    let placements = paginate(image.width, image.height);

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let image_stream = Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => Object::Integer(i64::from(image.width)),
            "Height" => Object::Integer(i64::from(image.height)),
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => Object::Integer(8),
        },
        image.rgb.clone(),
    );
    let image_id = doc.add_object(image_stream);

    let mut kids = Vec::with_capacity(placements.len());
    for placement in &placements {
        let content = page_content(placement);
        let encoded = content
            .encode()
            .map_err(|e| InvoiceError::Export(format!("failed to encode page content: {e}")))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => dictionary! {
                "XObject" => dictionary! {
                    IMAGE_NAME => image_id,
                },
            },
        });
        kids.push(Object::Reference(page_id));
    }

    let page_count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => Object::Integer(page_count),
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(mm_to_pt(PAGE_WIDTH_MM)),
            Object::Real(mm_to_pt(PAGE_HEIGHT_MM)),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(title),
        "Producer" => Object::string_literal("gstbill"),
    });
    doc.trailer.set("Info", info_id);

    doc.compress();

    let mut output = Vec::new();
    doc.save_to(&mut output)
        .map_err(|e| InvoiceError::Export(format!("failed to save PDF: {e}")))?;

    debug!(title, pages = page_count, bytes = output.len(), "rendered invoice PDF");
    Ok(output)
}

/// Draw the shared image scaled and positioned per `placement`.
/// PDF space has its origin at the bottom-left, so the top offset is flipped.
fn page_content(placement: &PagePlacement) -> Content {
    let bottom_mm = PAGE_HEIGHT_MM - placement.y_mm - placement.height_mm;
    Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    Object::Real(mm_to_pt(placement.width_mm)),
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Real(mm_to_pt(placement.height_mm)),
                    Object::Real(mm_to_pt(placement.x_mm)),
                    Object::Real(mm_to_pt(bottom_mm)),
                ],
            ),
            Operation::new("Do", vec![Object::Name(IMAGE_NAME.as_bytes().to_vec())]),
            Operation::new("Q", vec![]),
        ],
    }
}

fn mm_to_pt(mm: f64) -> f32 {
    (mm * PT_PER_MM) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white(width: u32, height: u32) -> RasterImage {
        RasterImage::new(width, height, vec![255; (width * height * 3) as usize]).unwrap()
    }

    #[test]
    fn rejects_mismatched_buffer() {
        assert!(RasterImage::new(2, 2, vec![0; 11]).is_err());
        assert!(RasterImage::new(0, 2, vec![]).is_err());
    }

    #[test]
    fn file_name_follows_invoice_number() {
        assert_eq!(pdf_file_name("SBJR-0042"), "SBJR-0042.pdf");
    }

    #[test]
    fn single_page_pdf() {
        let bytes = render_pdf(&white(20, 20), "SBJR-0001").unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn tall_image_spans_pages() {
        // 10 px wide → 19 mm per px of height; 40 px is 760 mm → three pages.
        let bytes = render_pdf(&white(10, 40), "SBJR-0002").unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 3);
    }
}
