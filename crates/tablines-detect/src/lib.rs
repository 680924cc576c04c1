//! tablines-detect: raster ruling detection.
//!
//! Finds table grid lines in a rendered page bitmap when the page carries
//! no usable vector rulings. The pipeline loads the document with `lopdf`,
//! renders it through a [`PageRasterizer`], scans for intensity runs, and
//! repeats the vertical scan on a text-free render.

pub mod detector;
pub mod error;
pub mod overlay;
pub mod raster;
pub mod strip;

pub use detector::{DetectionAlgorithm, DetectorSettings, PageRasterizer, RasterLineDetector};
pub use error::DetectError;
pub use overlay::{OVERLAY_PALETTE, OVERLAY_STROKE, draw_overlay, overlay_path, write_overlay};
pub use raster::{RasterRulings, RasterSettings, scan_horizontal, scan_vertical};
pub use strip::{TEXT_SHOWING_OPERATORS, strip_text_operators};
pub use tablines_core;
