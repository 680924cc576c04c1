use std::path::Path;

use image::GrayImage;
use lopdf::Document;

/// Open an image file as 8-bit grayscale with user-friendly error messages.
///
/// Colour images are converted to luma. Returns `Err(1)` with a message
/// printed to stderr if the file is missing or cannot be decoded.
pub fn open_gray(file: &Path) -> Result<GrayImage, i32> {
    if !file.exists() {
        eprintln!("Error: file not found: {}", file.display());
        return Err(1);
    }

    image::open(file).map(|img| img.to_luma8()).map_err(|e| {
        eprintln!("Error: failed to decode image {}: {e}", file.display());
        1
    })
}

/// Load a PDF document with user-friendly error messages.
pub fn open_pdf(file: &Path) -> Result<Document, i32> {
    let bytes = std::fs::read(file).map_err(|e| {
        eprintln!("Error: failed to read {}: {e}", file.display());
        1
    })?;

    Document::load_mem(&bytes).map_err(|e| {
        eprintln!("Error: failed to open PDF: {e}");
        1
    })
}
