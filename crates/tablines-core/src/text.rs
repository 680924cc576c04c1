use crate::geometry::{Bounded, Rectangle};

/// A positioned glyph or text run extracted from a page.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextElement {
    /// Bounding box in top-left origin coordinates.
    pub bounds: Rectangle,
    /// The text content of this element.
    pub text: String,
    /// Font size in points.
    pub font_size: f64,
    /// Dominant reading direction of the run.
    pub direction: TextDirection,
}

impl TextElement {
    /// Create a left-to-right element with a zero font size.
    pub fn new(bounds: Rectangle, text: impl Into<String>) -> Self {
        Self {
            bounds,
            text: text.into(),
            font_size: 0.0,
            direction: TextDirection::LeftToRight,
        }
    }

    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn with_direction(mut self, direction: TextDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn width(&self) -> f64 {
        self.bounds.width()
    }

    pub fn height(&self) -> f64 {
        self.bounds.height()
    }
}

impl Bounded for TextElement {
    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn direction(&self) -> TextDirection {
        self.direction
    }
}

/// Dominant reading direction of a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextDirection {
    /// Latin, CJK horizontal.
    LeftToRight,
    /// Arabic, Hebrew.
    RightToLeft,
    /// No dominant direction (digits, punctuation, bare rectangles).
    #[default]
    Neutral,
}

/// Smallest glyph width and smallest glyph height among `texts`.
///
/// The two minima are taken independently and may come from different
/// elements. Returns `None` when `texts` is empty.
pub fn min_char_size<'a, I>(texts: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = &'a TextElement>,
{
    texts.into_iter().fold(None, |acc, t| match acc {
        None => Some((t.width(), t.height())),
        Some((w, h)) => Some((w.min(t.width()), h.min(t.height()))),
    })
}
