//! Ruling lines: drawn or inferred table grid segments.

use std::fmt;

use crate::geometry::{Point, Rectangle};

/// Tolerance for classifying a ruling as horizontal or vertical.
pub const ORIENTATION_EPSILON: f64 = 0.01;

/// Orientation of a ruling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
    /// Neither axis-aligned; not accepted as a page ruling.
    Oblique,
}

/// Classify the segment `(x1, y1)-(x2, y2)`.
///
/// Horizontal is checked first, so a zero-length segment is horizontal.
pub fn classify_orientation(x1: f64, y1: f64, x2: f64, y2: f64) -> Orientation {
    if (y1 - y2).abs() < ORIENTATION_EPSILON {
        Orientation::Horizontal
    } else if (x1 - x2).abs() < ORIENTATION_EPSILON {
        Orientation::Vertical
    } else {
        Orientation::Oblique
    }
}

/// A line segment from `start` to `end`.
///
/// Axis-aligned rulings are normalized on construction: the fixed
/// coordinate is averaged across both endpoints and the endpoints are
/// ordered so that `start` is the top/left end. Oblique rulings keep the
/// endpoints they were given.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ruling {
    start: Point,
    end: Point,
}

impl Ruling {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        let mut ruling = Self {
            start: Point::new(x1, y1),
            end: Point::new(x2, y2),
        };
        ruling.normalize();
        ruling
    }

    pub fn from_points(start: Point, end: Point) -> Self {
        Self::new(start.x, start.y, end.x, end.y)
    }

    /// Horizontal ruling at `y` spanning `left..=right`.
    pub fn horizontal_at(y: f64, left: f64, right: f64) -> Self {
        Self::new(left, y, right, y)
    }

    /// Vertical ruling at `x` spanning `top..=bottom`.
    pub fn vertical_at(x: f64, top: f64, bottom: f64) -> Self {
        Self::new(x, top, x, bottom)
    }

    pub(crate) fn normalize(&mut self) {
        let Self { start, end } = *self;
        match self.orientation() {
            Orientation::Horizontal => {
                let y = (start.y + end.y) / 2.0;
                self.start = Point::new(start.x.min(end.x), y);
                self.end = Point::new(start.x.max(end.x), y);
            }
            Orientation::Vertical => {
                let x = (start.x + end.x) / 2.0;
                self.start = Point::new(x, start.y.min(end.y));
                self.end = Point::new(x, start.y.max(end.y));
            }
            Orientation::Oblique => {}
        }
    }

    pub fn start_point(&self) -> Point {
        self.start
    }

    pub fn end_point(&self) -> Point {
        self.end
    }

    pub fn x1(&self) -> f64 {
        self.start.x
    }

    pub fn y1(&self) -> f64 {
        self.start.y
    }

    pub fn x2(&self) -> f64 {
        self.end.x
    }

    pub fn y2(&self) -> f64 {
        self.end.y
    }

    pub(crate) fn set_endpoints(&mut self, start: Point, end: Point) {
        self.start = start;
        self.end = end;
        self.normalize();
    }

    pub fn orientation(&self) -> Orientation {
        classify_orientation(self.start.x, self.start.y, self.end.x, self.end.y)
    }

    pub fn horizontal(&self) -> bool {
        self.orientation() == Orientation::Horizontal
    }

    pub fn vertical(&self) -> bool {
        self.orientation() == Orientation::Vertical
    }

    pub fn oblique(&self) -> bool {
        self.orientation() == Orientation::Oblique
    }

    /// The fixed coordinate: `y` for horizontal rulings, `x` otherwise.
    pub fn position(&self) -> f64 {
        if self.horizontal() {
            self.start.y
        } else {
            self.start.x
        }
    }

    /// Lower end of the varying coordinate.
    pub fn start(&self) -> f64 {
        if self.horizontal() {
            self.start.x
        } else {
            self.start.y
        }
    }

    /// Upper end of the varying coordinate.
    pub fn end(&self) -> f64 {
        if self.horizontal() {
            self.end.x
        } else {
            self.end.y
        }
    }

    /// Copy of this axis-aligned ruling spanning `start..=end` along its axis.
    pub(crate) fn with_extent(&self, start: f64, end: f64) -> Ruling {
        let position = self.position();
        if self.horizontal() {
            Ruling::new(start, position, end, position)
        } else {
            Ruling::new(position, start, position, end)
        }
    }

    pub fn length(&self) -> f64 {
        (self.end.x - self.start.x).hypot(self.end.y - self.start.y)
    }

    pub fn top(&self) -> f64 {
        self.start.y.min(self.end.y)
    }

    pub fn bottom(&self) -> f64 {
        self.start.y.max(self.end.y)
    }

    pub fn left(&self) -> f64 {
        self.start.x.min(self.end.x)
    }

    pub fn right(&self) -> f64 {
        self.start.x.max(self.end.x)
    }

    /// Bounding rectangle; zero-width or zero-height for axis-aligned rulings.
    pub fn bounds(&self) -> Rectangle {
        Rectangle::from_bounds(self.top(), self.left(), self.bottom(), self.right())
    }

    /// Crossing point of a horizontal and a vertical ruling, endpoints inclusive.
    ///
    /// Returns `None` for parallel or oblique pairs and for pairs that do
    /// not reach each other.
    pub fn intersection_point(&self, other: &Ruling) -> Option<Point> {
        let (h, v) = match (self.orientation(), other.orientation()) {
            (Orientation::Horizontal, Orientation::Vertical) => (self, other),
            (Orientation::Vertical, Orientation::Horizontal) => (other, self),
            _ => return None,
        };

        let (x, y) = (v.position(), h.position());
        let crosses = h.start() <= x && x <= h.end() && v.start() <= y && y <= v.end();
        crosses.then(|| Point::new(x, y))
    }
}

impl fmt::Display for Ruling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.2}, {:.2})-({:.2}, {:.2})",
            self.start.x, self.start.y, self.end.x, self.end.y
        )
    }
}
