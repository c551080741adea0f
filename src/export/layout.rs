/// A4 page width in millimetres.
pub const PAGE_WIDTH_MM: f64 = 210.0;
/// A4 page height in millimetres.
pub const PAGE_HEIGHT_MM: f64 = 297.0;
/// Width the captured invoice image is drawn at.
pub const IMAGE_WIDTH_MM: f64 = 190.0;
/// Height of one page band the image is sliced into.
pub const BAND_HEIGHT_MM: f64 = 295.0;
/// Left and top margin.
pub const MARGIN_MM: f64 = 10.0;

/// Where the image is drawn on one page, in millimetres from the page's
/// top-left corner. `y_mm` goes negative on later pages: the same image is
/// shifted up so the next band shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PagePlacement {
    pub x_mm: f64,
    pub y_mm: f64,
    pub width_mm: f64,
    pub height_mm: f64,
}

/// Slice an image of `width_px` × `height_px` into pages.
///
/// The image is scaled to [`IMAGE_WIDTH_MM`] wide. The first page draws it
/// at the top margin; while at least a full band of image remains, another
/// page draws it shifted up by one more band. Returns no pages for an empty
/// image.
pub fn paginate(width_px: u32, height_px: u32) -> Vec<PagePlacement> {
    if width_px == 0 || height_px == 0 {
        return Vec::new();
    }

    let height_mm = f64::from(height_px) * IMAGE_WIDTH_MM / f64::from(width_px);
    let place = |y_mm| PagePlacement {
        x_mm: MARGIN_MM,
        y_mm,
        width_mm: IMAGE_WIDTH_MM,
        height_mm,
    };

    let mut pages = vec![place(MARGIN_MM)];
    let mut height_left = height_mm - BAND_HEIGHT_MM;
    while height_left >= 0.0 {
        pages.push(place(height_left - height_mm + MARGIN_MM));
        height_left -= BAND_HEIGHT_MM;
    }
    pages
}
