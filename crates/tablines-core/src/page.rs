//! Page: the text and rulings of one rendered page.
//!
//! A [`Page`] owns its text elements and unprocessed rulings and derives a
//! canonical ruling set on demand. [`Page::area`] produces a new page
//! restricted to a sub-rectangle that shares the parent's spatial index.

use std::cell::OnceCell;
use std::sync::Arc;

use tracing::debug;

use crate::error::CoreError;
use crate::geometry::{Rectangle, bounding_box_of};
use crate::processing::{
    DEFAULT_COLLAPSE_EXPAND_AMOUNT, collapse_oriented_rulings, crop_rulings_to_area, snap_points,
    split_by_orientation,
};
use crate::ruling::Ruling;
use crate::spatial::SpatialIndex;
use crate::text::{TextElement, min_char_size};

/// Glyph size assumed for snapping when a page or crop has no text.
pub const DEFAULT_MIN_CHAR_SIZE: f64 = 7.0;

/// Tunables for ruling canonicalization and area crops.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSettings {
    /// Min glyph width/height used when there is no text to measure (default: 7.0).
    pub default_min_char_size: f64,
    /// Extent gap bridged when collapsing colinear rulings (default: 1.0).
    pub collapse_expand_amount: f64,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            default_min_char_size: DEFAULT_MIN_CHAR_SIZE,
            collapse_expand_amount: DEFAULT_COLLAPSE_EXPAND_AMOUNT,
        }
    }
}

/// Snapped and collapsed rulings, split by orientation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CanonicalRulings {
    pub vertical: Vec<Ruling>,
    pub horizontal: Vec<Ruling>,
    /// Vertical rulings followed by horizontal rulings.
    pub all: Vec<Ruling>,
}

impl CanonicalRulings {
    /// Snap with the glyph-size tolerances, then collapse each orientation.
    pub fn compute(
        rulings: &[Ruling],
        x_tolerance: f64,
        y_tolerance: f64,
        expand_amount: f64,
    ) -> Self {
        if rulings.is_empty() {
            return Self::default();
        }

        let mut snapped = rulings.to_vec();
        snap_points(&mut snapped, x_tolerance, y_tolerance);

        let (horizontal, vertical) = split_by_orientation(snapped);
        let vertical = collapse_oriented_rulings(vertical, expand_amount);
        let horizontal = collapse_oriented_rulings(horizontal, expand_amount);

        let mut all = Vec::with_capacity(vertical.len() + horizontal.len());
        all.extend_from_slice(&vertical);
        all.extend_from_slice(&horizontal);

        debug!(
            raw = rulings.len(),
            vertical = vertical.len(),
            horizontal = horizontal.len(),
            "canonicalized rulings"
        );

        Self {
            vertical,
            horizontal,
            all,
        }
    }
}

/// Lazily computed canonical rulings.
///
/// Two states: stale (empty cell) and fresh. Reads move stale to fresh;
/// [`RulingCache::invalidate`] is the only way back, and it needs `&mut`.
#[derive(Debug, Clone, Default)]
struct RulingCache {
    cell: OnceCell<CanonicalRulings>,
}

impl RulingCache {
    fn get_or_compute<F>(&self, compute: F) -> &CanonicalRulings
    where
        F: FnOnce() -> CanonicalRulings,
    {
        self.cell.get_or_init(compute)
    }

    fn invalidate(&mut self) {
        self.cell.take();
    }

    fn is_fresh(&self) -> bool {
        self.cell.get().is_some()
    }
}

/// Text elements and rulings of one page or page area.
///
/// Reads take `&self` and mutation takes `&mut self`, so a page cannot be
/// read while a ruling is being added. A page is `Send` but not `Sync`:
/// process each page on a single worker.
#[derive(Debug, Clone)]
pub struct Page {
    bounds: Rectangle,
    /// Page number (1-based).
    page_number: usize,
    rotation: i32,
    texts: Vec<TextElement>,
    rulings: Vec<Ruling>,
    min_char_width: f64,
    min_char_height: f64,
    index: Arc<SpatialIndex>,
    settings: PageSettings,
    cache: RulingCache,
}

impl Page {
    /// Create a page from extracted text; it starts without rulings.
    pub fn new(bounds: Rectangle, page_number: usize, texts: Vec<TextElement>) -> Self {
        let settings = PageSettings::default();
        let (min_char_width, min_char_height) =
            min_char_size(&texts).unwrap_or((settings.default_min_char_size, settings.default_min_char_size));
        let index = Arc::new(SpatialIndex::new(texts.clone()));

        Self {
            bounds,
            page_number,
            rotation: 0,
            texts,
            rulings: Vec::new(),
            min_char_width,
            min_char_height,
            index,
            settings,
            cache: RulingCache::default(),
        }
    }

    /// Add explicit rulings, failing on the first oblique one.
    pub fn with_rulings<I>(mut self, rulings: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = Ruling>,
    {
        for ruling in rulings {
            self.add_ruling(ruling)?;
        }
        Ok(self)
    }

    pub fn with_rotation(mut self, rotation: i32) -> Self {
        self.rotation = rotation;
        self
    }

    /// Replace the settings, re-deriving the fallback glyph size if there is no text.
    pub fn with_settings(mut self, settings: PageSettings) -> Self {
        if self.texts.is_empty() {
            self.min_char_width = settings.default_min_char_size;
            self.min_char_height = settings.default_min_char_size;
        }
        self.settings = settings;
        self.cache.invalidate();
        self
    }

    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    pub fn page_number(&self) -> usize {
        self.page_number
    }

    pub fn rotation(&self) -> i32 {
        self.rotation
    }

    pub fn settings(&self) -> &PageSettings {
        &self.settings
    }

    pub fn min_char_width(&self) -> f64 {
        self.min_char_width
    }

    pub fn min_char_height(&self) -> f64 {
        self.min_char_height
    }

    /// The spatial index, shared with every area crop of this page.
    pub fn spatial_index(&self) -> &Arc<SpatialIndex> {
        &self.index
    }

    pub fn text(&self) -> &[TextElement] {
        &self.texts
    }

    pub fn has_text(&self) -> bool {
        !self.texts.is_empty()
    }

    /// Text elements intersecting `area`, looked up in the shared spatial index.
    pub fn text_in(&self, area: &Rectangle) -> Vec<&TextElement> {
        self.index.intersecting(area)
    }

    pub fn text_in_bounds(&self, top: f64, left: f64, bottom: f64, right: f64) -> Vec<&TextElement> {
        self.text_in(&Rectangle::from_bounds(top, left, bottom, right))
    }

    /// Bounding box of all text on the page, or a zero rectangle when there is none.
    pub fn text_bounds(&self) -> Rectangle {
        bounding_box_of(self.texts.iter().map(|t| &t.bounds)).unwrap_or_default()
    }

    /// Rulings as added, before snapping and collapsing.
    pub fn unprocessed_rulings(&self) -> &[Ruling] {
        &self.rulings
    }

    /// Append a ruling and invalidate the canonical rulings.
    ///
    /// Oblique rulings are rejected with [`CoreError::ObliqueRuling`].
    pub fn add_ruling(&mut self, ruling: Ruling) -> Result<(), CoreError> {
        if ruling.oblique() {
            return Err(CoreError::ObliqueRuling { ruling });
        }
        self.push_ruling(ruling);
        Ok(())
    }

    fn push_ruling(&mut self, ruling: Ruling) {
        self.rulings.push(ruling);
        self.cache.invalidate();
    }

    fn canonical(&self) -> &CanonicalRulings {
        self.cache.get_or_compute(|| {
            CanonicalRulings::compute(
                &self.rulings,
                self.min_char_width,
                self.min_char_height,
                self.settings.collapse_expand_amount,
            )
        })
    }

    /// Canonical rulings: vertical ones first, then horizontal ones.
    pub fn rulings(&self) -> &[Ruling] {
        &self.canonical().all
    }

    pub fn vertical_rulings(&self) -> &[Ruling] {
        &self.canonical().vertical
    }

    pub fn horizontal_rulings(&self) -> &[Ruling] {
        &self.canonical().horizontal
    }

    /// Whether the canonical rulings are computed and current.
    pub fn has_fresh_rulings(&self) -> bool {
        self.cache.is_fresh()
    }

    /// A new page restricted to `area`.
    ///
    /// The crop holds the text intersecting `area`, glyph minima measured on
    /// that text (the configured default when there is none), this page's
    /// canonical rulings clipped to `area`, and four boundary rulings framing
    /// it. A crop without text is still a valid, empty page.
    pub fn area(&self, area: &Rectangle) -> Page {
        let texts: Vec<TextElement> = self.index.intersecting(area).into_iter().cloned().collect();
        let fallback = self.settings.default_min_char_size;
        let (min_char_width, min_char_height) = min_char_size(&texts).unwrap_or((fallback, fallback));
        let rulings = crop_rulings_to_area(self.rulings(), area);

        debug!(
            page = self.page_number,
            texts = texts.len(),
            rulings = rulings.len(),
            top = area.top(),
            left = area.left(),
            bottom = area.bottom(),
            right = area.right(),
            "cropped page area"
        );

        let mut page = Page {
            bounds: *area,
            page_number: self.page_number,
            rotation: self.rotation,
            texts,
            rulings,
            min_char_width,
            min_char_height,
            index: Arc::clone(&self.index),
            settings: self.settings,
            cache: RulingCache::default(),
        };

        let (top, left, bottom, right) = (area.top(), area.left(), area.bottom(), area.right());
        page.push_ruling(Ruling::horizontal_at(top, left, right));
        page.push_ruling(Ruling::vertical_at(right, top, bottom));
        page.push_ruling(Ruling::horizontal_at(bottom, left, right));
        page.push_ruling(Ruling::vertical_at(left, top, bottom));

        page
    }

    pub fn area_bounds(&self, top: f64, left: f64, bottom: f64, right: f64) -> Page {
        self.area(&Rectangle::from_bounds(top, left, bottom, right))
    }
}
