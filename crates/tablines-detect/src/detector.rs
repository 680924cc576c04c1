//! Raster ruling detection for a page of a PDF document.
//!
//! The detector renders the page, runs the horizontal pass, strips the text
//! operators, renders again and runs the vertical pass on the text-free
//! bitmap. Rendering is delegated to a [`PageRasterizer`].

use std::path::Path;

use image::{DynamicImage, GrayImage, RgbImage};
use lopdf::Document;
use tablines_core::{Page, Rectangle, Ruling};
use tracing::{debug, warn};

use crate::error::DetectError;
use crate::overlay::{overlay_path, write_overlay};
use crate::raster::{RasterRulings, RasterSettings, scan_horizontal, scan_vertical};
use crate::strip::strip_text_operators;

/// Renders document pages to bitmaps.
pub trait PageRasterizer {
    /// Render page `page_number` (1-based) as 8-bit grayscale at `dpi`.
    fn render_gray(
        &self,
        doc: &Document,
        page_number: u32,
        dpi: f64,
    ) -> Result<GrayImage, DetectError>;

    /// Render page `page_number` as RGB. Defaults to the grayscale render.
    fn render_rgb(&self, doc: &Document, page_number: u32, dpi: f64) -> Result<RgbImage, DetectError> {
        let gray = self.render_gray(doc, page_number, dpi)?;
        Ok(DynamicImage::ImageLuma8(gray).to_rgb8())
    }
}

/// A strategy that finds table-relevant regions on a page.
pub trait DetectionAlgorithm {
    /// Regions on `page` in page coordinates, read from the document at `document`.
    ///
    /// Failures yield an empty list.
    fn detect(&self, page: &Page, document: &Path) -> Vec<Rectangle>;
}

/// Options for [`RasterLineDetector`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorSettings {
    pub raster: RasterSettings,
    /// Render resolution (default: 144).
    pub dpi: f64,
    /// Strip text before the horizontal pass too (default: false).
    pub strip_text_for_horizontal: bool,
    /// Write `<stem>-<page>.jpg` next to the document (default: false).
    pub debug_overlay: bool,
}

impl Default for DetectorSettings {
    fn default() -> Self {
        Self {
            raster: RasterSettings::default(),
            dpi: 144.0,
            strip_text_for_horizontal: false,
            debug_overlay: false,
        }
    }
}

/// Finds ruling lines by scanning rendered page bitmaps.
#[derive(Debug, Clone)]
pub struct RasterLineDetector<R> {
    rasterizer: R,
    settings: DetectorSettings,
}

impl<R: PageRasterizer> RasterLineDetector<R> {
    pub fn new(rasterizer: R) -> Self {
        Self::with_settings(rasterizer, DetectorSettings::default())
    }

    pub fn with_settings(rasterizer: R, settings: DetectorSettings) -> Self {
        Self {
            rasterizer,
            settings,
        }
    }

    pub fn settings(&self) -> &DetectorSettings {
        &self.settings
    }

    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    /// Detect rulings on page `page_number` (1-based) of the PDF at `path`.
    ///
    /// Rulings come back in page coordinates. The document is loaded for
    /// this call only; text stripping never touches the file on disk.
    pub fn detect_rulings(&self, page_number: u32, path: &Path) -> Result<RasterRulings, DetectError> {
        let DetectorSettings {
            raster,
            dpi,
            strip_text_for_horizontal,
            debug_overlay,
        } = self.settings;
        if dpi.is_nan() || dpi <= 0.0 {
            return Err(DetectError::InvalidResolution(dpi));
        }

        let bytes = std::fs::read(path)?;
        let mut doc = Document::load_mem(&bytes)?;
        if !doc.get_pages().contains_key(&page_number) {
            return Err(DetectError::PageNotFound(page_number));
        }

        let overlay_base = if debug_overlay {
            Some(self.rasterizer.render_rgb(&doc, page_number, dpi)?)
        } else {
            None
        };

        if strip_text_for_horizontal {
            strip_text_operators(&mut doc, page_number)?;
        }
        let image = self.rasterizer.render_gray(&doc, page_number, dpi)?;
        let horizontal = scan_horizontal(&image, &raster);

        if !strip_text_for_horizontal {
            strip_text_operators(&mut doc, page_number)?;
        }
        let image = self.rasterizer.render_gray(&doc, page_number, dpi)?;
        let vertical = scan_vertical(&image, &raster);

        debug!(
            page = page_number,
            horizontal = horizontal.len(),
            vertical = vertical.len(),
            width = image.width(),
            height = image.height(),
            "raster passes complete"
        );

        let pixels = RasterRulings {
            horizontal,
            vertical,
        };

        if let Some(base) = overlay_base {
            let target = overlay_path(path, page_number);
            match write_overlay(base, &pixels, &target) {
                Ok(()) => debug!(path = %target.display(), "wrote ruling overlay"),
                Err(err) => warn!(path = %target.display(), error = %err, "failed to write ruling overlay"),
            }
        }

        Ok(pixels.scaled(72.0 / dpi))
    }

    /// Detect rulings for `page` and add them to it.
    ///
    /// The page keeps its existing rulings; its canonical cache is
    /// invalidated by the additions.
    pub fn detect_into_page(&self, page: Page, path: &Path) -> Result<Page, DetectError> {
        let page_number = u32::try_from(page.page_number())
            .map_err(|_| DetectError::PageNotFound(u32::MAX))?;
        let rulings = self.detect_rulings(page_number, path)?;
        Ok(page.with_rulings(rulings.into_rulings())?)
    }

    /// Detect rulings for `page`, degrading any failure to an empty result.
    pub fn detect_lines(&self, page: &Page, path: &Path) -> RasterRulings {
        let Ok(page_number) = u32::try_from(page.page_number()) else {
            warn!(page = page.page_number(), "page number out of range");
            return RasterRulings::default();
        };

        match self.detect_rulings(page_number, path) {
            Ok(rulings) => rulings,
            Err(err) => {
                warn!(page = page_number, path = %path.display(), error = %err, "raster detection failed");
                RasterRulings::default()
            }
        }
    }
}

impl<R: PageRasterizer> DetectionAlgorithm for RasterLineDetector<R> {
    /// Bounds of every detected ruling.
    fn detect(&self, page: &Page, document: &Path) -> Vec<Rectangle> {
        self.detect_lines(page, document)
            .into_rulings()
            .iter()
            .map(Ruling::bounds)
            .collect()
    }
}
