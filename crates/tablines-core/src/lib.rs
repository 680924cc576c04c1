//! tablines-core: geometry, rulings, and page areas for table structure recovery.
//!
//! This crate holds the backend-independent pieces: rectangles and reading
//! order, ruling lines and their normalization (snap, collapse, crop), a
//! spatial index over text elements, and the [`Page`] aggregate with its
//! lazily canonicalized rulings and area crops. Raster line detection lives
//! in `tablines-detect`.

pub mod error;
pub mod geometry;
pub mod page;
pub mod processing;
pub mod ruling;
pub mod spatial;
pub mod text;

pub use error::CoreError;
pub use geometry::{
    Bounded, Point, ReadingOrder, Rectangle, VERTICAL_COMPARISON_THRESHOLD, bounding_box_of,
};
pub use page::{CanonicalRulings, DEFAULT_MIN_CHAR_SIZE, Page, PageSettings};
pub use processing::{
    DEFAULT_COLLAPSE_EXPAND_AMOUNT, collapse_oriented_rulings, crop_rulings_to_area, snap_points,
    split_by_orientation,
};
pub use ruling::{ORIENTATION_EPSILON, Orientation, Ruling, classify_orientation};
pub use spatial::SpatialIndex;
pub use text::{TextDirection, TextElement, min_char_size};
