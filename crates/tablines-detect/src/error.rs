//! Error types for raster ruling detection.
//!
//! [`DetectError`] covers the fallible steps of a detection run: loading the
//! document, rewriting its content, rendering, and writing the overlay.

use tablines_core::CoreError;
use thiserror::Error;

/// Error type for the detection pipeline.
#[derive(Debug, Error)]
pub enum DetectError {
    /// The document could not be loaded or its content rewritten.
    #[error("PDF error: {0}")]
    Load(#[from] lopdf::Error),

    /// The requested page (1-based) does not exist.
    #[error("page {0} not found")]
    PageNotFound(u32),

    /// The render resolution is not a positive number.
    #[error("invalid render resolution: {0} dpi")]
    InvalidResolution(f64),

    /// The rasterizer failed to produce a bitmap.
    #[error("render error: {0}")]
    Render(String),

    /// Image encoding failed while writing the overlay.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Error reading or writing a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A detected ruling was rejected by the page.
    #[error(transparent)]
    Core(#[from] CoreError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablines_core::Ruling;

    #[test]
    fn page_not_found_message() {
        let err = DetectError::PageNotFound(7);
        assert_eq!(err.to_string(), "page 7 not found");
    }

    #[test]
    fn render_message() {
        let err = DetectError::Render("no renderer available".to_string());
        assert_eq!(err.to_string(), "render error: no renderer available");
    }

    #[test]
    fn invalid_resolution_message() {
        let err = DetectError::InvalidResolution(-72.0);
        assert_eq!(err.to_string(), "invalid render resolution: -72 dpi");
    }

    #[test]
    fn io_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: DetectError = io_err.into();
        assert!(matches!(err, DetectError::Io(_)));
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn core_error_is_transparent() {
        let core = CoreError::ObliqueRuling {
            ruling: Ruling::new(0.0, 0.0, 5.0, 10.0),
        };
        let expected = core.to_string();
        let err: DetectError = core.into();
        assert!(matches!(err, DetectError::Core(_)));
        assert_eq!(err.to_string(), expected);
    }
}
